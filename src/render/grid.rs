use crate::config::{LayoutConfig, RowSizing};
use crate::geometry::{Rect, Size};
use crate::layout::{TrackSize, distribute};
use crate::resolve::ResolvedLayout;

use super::{LayoutRenderer, ZoneSlot};

/// Zone vocabulary of the grid renderer, in visual flow order.
pub const GRID_ZONES: [&str; 6] = ["zone1", "zone2", "zone3", "zone4", "zone5", "zone6"];

#[derive(Debug, Clone, Copy)]
struct CellPlacement {
    zone: &'static str,
    row: u16,
    col: u16,
    span: u16,
}

/// Three-column grid.
///
/// Zones flow left to right, top to bottom. Hidden zones are skipped and
/// consume no cell; a spanning zone occupies several columns and wraps to
/// the next row when the current one cannot fit it. Row heights follow the
/// configuration's sizing hints in declaration order, defaulting to equal
/// weights.
#[derive(Debug, Clone)]
pub struct GridRenderer {
    columns: u16,
    gap: u16,
    padding: u16,
    row_sizing: Vec<RowSizing>,
}

impl GridRenderer {
    pub fn new() -> Self {
        Self {
            columns: 3,
            gap: 1,
            padding: 1,
            row_sizing: Vec::new(),
        }
    }

    pub fn from_config(config: &LayoutConfig) -> Self {
        Self::new().with_row_sizing(config.row_sizing.clone())
    }

    pub fn with_row_sizing(mut self, row_sizing: Vec<RowSizing>) -> Self {
        self.row_sizing = row_sizing;
        self
    }

    fn flow(&self, layout: &ResolvedLayout) -> Vec<CellPlacement> {
        let mut placements = Vec::new();
        let mut row = 0u16;
        let mut col = 0u16;

        for zone in GRID_ZONES {
            if layout.is_hidden(zone) {
                continue;
            }
            // The resolver accepts any group size; the renderer clamps the
            // visual span to its track count.
            let span = layout.span_of(zone).clamp(1, self.columns);
            if col + span > self.columns {
                row += 1;
                col = 0;
            }
            placements.push(CellPlacement {
                zone,
                row,
                col,
                span,
            });
            col += span;
            if col >= self.columns {
                row += 1;
                col = 0;
            }
        }

        placements
    }
}

impl Default for GridRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutRenderer for GridRenderer {
    fn name(&self) -> &'static str {
        "grid"
    }

    fn vocabulary(&self) -> &'static [&'static str] {
        &GRID_ZONES
    }

    fn arrange(&self, layout: &ResolvedLayout, size: Size) -> Vec<ZoneSlot> {
        let placements = self.flow(layout);
        let Some(row_count) = placements.iter().map(|p| p.row + 1).max() else {
            return Vec::new();
        };

        let inner_width = size
            .width
            .saturating_sub(self.padding * 2 + self.gap * (self.columns - 1));
        let col_widths = distribute(
            inner_width,
            &vec![TrackSize::Weight(1); self.columns as usize],
        );

        let inner_height = size
            .height
            .saturating_sub(self.padding * 2 + self.gap * (row_count - 1));
        let row_tracks: Vec<TrackSize> = (0..row_count)
            .map(|row| {
                self.row_sizing
                    .get(row as usize)
                    .copied()
                    .map(TrackSize::from)
                    .unwrap_or(TrackSize::Weight(1))
            })
            .collect();
        let row_heights = distribute(inner_height, &row_tracks);

        placements
            .into_iter()
            .map(|p| {
                let col = p.col as usize;
                let span = p.span as usize;
                let x = self.padding
                    + col_widths[..col].iter().sum::<u16>()
                    + p.col * self.gap;
                let y = self.padding
                    + row_heights[..p.row as usize].iter().sum::<u16>()
                    + p.row * self.gap;
                let width = col_widths[col..col + span].iter().sum::<u16>()
                    + (p.span - 1) * self.gap;
                let height = row_heights[p.row as usize];
                ZoneSlot {
                    zone: p.zone.to_string(),
                    rect: Rect::new(x, y, width, height),
                }
            })
            .collect()
    }

    fn placeholder(&self, zone: &str) -> String {
        format!("Empty Slot ({})", zone)
    }
}
