use std::collections::{HashMap, HashSet};

use blake3::Hash;

use crate::error::{Result, ScoreboardError};
use crate::geometry::Rect;
use crate::render::ZoneSlot;
use crate::resolve::ZoneId;

/// Pending repaint for one zone.
#[derive(Debug, Clone)]
pub struct ZonePatch {
    pub zone: ZoneId,
    pub rect: Rect,
    pub content: String,
}

#[derive(Debug, Clone)]
struct SurfaceState {
    rect: Rect,
    content: String,
    hash: Option<Hash>,
    dirty: bool,
}

impl SurfaceState {
    fn new(rect: Rect) -> Self {
        Self {
            rect,
            content: String::new(),
            hash: None,
            dirty: true,
        }
    }

    fn update_content(&mut self, content: String) {
        let new_hash = blake3::hash(content.as_bytes());
        if self.hash.map(|h| h != new_hash).unwrap_or(true) {
            self.content = content;
            self.hash = Some(new_hash);
            self.dirty = true;
        }
    }
}

/// Tracks the last painted rect and content per zone.
///
/// Content is hashed so re-submitting identical content does not mark the
/// zone dirty; moving a zone (resize, re-arrange) always does.
#[derive(Debug, Default)]
pub struct SurfaceRegistry {
    entries: HashMap<ZoneId, SurfaceState>,
    dirty: HashSet<ZoneId>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile the surface set against the renderer's latest arrangement.
    /// New zones start dirty, moved zones become dirty, vanished zones are
    /// dropped.
    pub fn sync_slots(&mut self, slots: &[ZoneSlot]) {
        use std::collections::hash_map::Entry;

        let mut newly_dirty = Vec::new();

        for slot in slots {
            match self.entries.entry(slot.zone.clone()) {
                Entry::Occupied(mut entry) => {
                    let state = entry.get_mut();
                    if state.rect != slot.rect {
                        state.rect = slot.rect;
                        state.dirty = true;
                        newly_dirty.push(slot.zone.clone());
                    }
                }
                Entry::Vacant(vacant) => {
                    vacant.insert(SurfaceState::new(slot.rect));
                    newly_dirty.push(slot.zone.clone());
                }
            }
        }

        let to_remove: Vec<_> = self
            .entries
            .keys()
            .filter(|zone| !slots.iter().any(|slot| &slot.zone == *zone))
            .cloned()
            .collect();
        for zone in to_remove {
            self.entries.remove(&zone);
            self.dirty.remove(&zone);
        }

        for zone in newly_dirty {
            self.dirty.insert(zone);
        }
    }

    pub fn apply_content(&mut self, zone: &str, content: String) -> Result<()> {
        let state = self
            .entries
            .get_mut(zone)
            .ok_or_else(|| ScoreboardError::ZoneNotFound(zone.to_string()))?;
        state.update_content(content);
        if state.dirty {
            self.dirty.insert(zone.to_string());
        }
        Ok(())
    }

    /// Drain pending repaints in zone-name order.
    pub fn take_dirty(&mut self) -> Vec<ZonePatch> {
        let mut zones: Vec<_> = self.dirty.drain().collect();
        zones.sort();
        zones
            .into_iter()
            .filter_map(|zone| {
                self.entries.get_mut(&zone).map(|state| {
                    state.dirty = false;
                    ZonePatch {
                        zone: zone.clone(),
                        rect: state.rect,
                        content: state.content.clone(),
                    }
                })
            })
            .collect()
    }

    pub fn rect_of(&self, zone: &str) -> Option<Rect> {
        self.entries.get(zone).map(|state| state.rect)
    }

    pub fn has_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(zone: &str, rect: Rect) -> ZoneSlot {
        ZoneSlot {
            zone: zone.to_string(),
            rect,
        }
    }

    #[test]
    fn new_zones_start_dirty() {
        let mut surfaces = SurfaceRegistry::new();
        surfaces.sync_slots(&[slot("zone1", Rect::new(0, 0, 10, 5))]);

        let dirty = surfaces.take_dirty();
        assert_eq!(dirty.len(), 1);
        assert_eq!(dirty[0].zone, "zone1");
        assert!(!surfaces.has_dirty());
    }

    #[test]
    fn identical_content_does_not_mark_dirty() {
        let mut surfaces = SurfaceRegistry::new();
        surfaces.sync_slots(&[slot("zone1", Rect::new(0, 0, 10, 5))]);
        surfaces.take_dirty();

        surfaces.apply_content("zone1", "hello".to_string()).unwrap();
        assert_eq!(surfaces.take_dirty().len(), 1);

        surfaces.apply_content("zone1", "hello".to_string()).unwrap();
        assert!(surfaces.take_dirty().is_empty());
    }

    #[test]
    fn moved_zone_is_dirty_again() {
        let mut surfaces = SurfaceRegistry::new();
        surfaces.sync_slots(&[slot("zone1", Rect::new(0, 0, 10, 5))]);
        surfaces.take_dirty();

        surfaces.sync_slots(&[slot("zone1", Rect::new(5, 0, 10, 5))]);
        let dirty = surfaces.take_dirty();
        assert_eq!(dirty.len(), 1);
        assert_eq!(dirty[0].rect.x, 5);
    }

    #[test]
    fn vanished_zones_are_dropped() {
        let mut surfaces = SurfaceRegistry::new();
        surfaces.sync_slots(&[
            slot("zone1", Rect::new(0, 0, 10, 5)),
            slot("zone2", Rect::new(10, 0, 10, 5)),
        ]);
        surfaces.take_dirty();

        surfaces.sync_slots(&[slot("zone1", Rect::new(0, 0, 10, 5))]);
        assert!(surfaces.rect_of("zone2").is_none());
        assert!(surfaces.take_dirty().is_empty());
    }

    #[test]
    fn unknown_zone_content_is_an_error() {
        let mut surfaces = SurfaceRegistry::new();
        let err = surfaces.apply_content("ghost", "x".to_string()).unwrap_err();
        assert!(matches!(err, ScoreboardError::ZoneNotFound(_)));
    }
}
