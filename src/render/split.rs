use crate::geometry::{Rect, Size};
use crate::layout::{TrackSize, distribute};
use crate::resolve::ResolvedLayout;

use super::{LayoutRenderer, ZoneSlot};

/// Zone vocabulary of the split renderer.
pub const SPLIT_ZONES: [&str; 2] = ["sidebar", "main"];

/// Two-pane layout: a narrow sidebar and a flexible main area.
///
/// Split layouts never span or hide zones; both slots always exist and the
/// resolver's span bookkeeping is simply not consulted.
#[derive(Debug, Clone)]
pub struct SplitRenderer {
    gap: u16,
    padding: u16,
    sidebar_percent: u8,
}

impl SplitRenderer {
    pub fn new() -> Self {
        Self {
            gap: 1,
            padding: 1,
            sidebar_percent: 25,
        }
    }
}

impl Default for SplitRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutRenderer for SplitRenderer {
    fn name(&self) -> &'static str {
        "split"
    }

    fn vocabulary(&self) -> &'static [&'static str] {
        &SPLIT_ZONES
    }

    fn arrange(&self, _layout: &ResolvedLayout, size: Size) -> Vec<ZoneSlot> {
        let inner_width = size.width.saturating_sub(self.padding * 2 + self.gap);
        let widths = distribute(
            inner_width,
            &[
                TrackSize::Percent(self.sidebar_percent),
                TrackSize::Weight(1),
            ],
        );
        let height = size.height.saturating_sub(self.padding * 2);

        vec![
            ZoneSlot {
                zone: "sidebar".to_string(),
                rect: Rect::new(self.padding, self.padding, widths[0], height),
            },
            ZoneSlot {
                zone: "main".to_string(),
                rect: Rect::new(
                    self.padding + widths[0] + self.gap,
                    self.padding,
                    widths[1],
                    height,
                ),
            },
        ]
    }

    fn placeholder(&self, zone: &str) -> String {
        match zone {
            "sidebar" => "Sidebar".to_string(),
            "main" => "Main Content".to_string(),
            other => format!("Empty Slot ({})", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LayoutConfig, LayoutKind};
    use crate::module::{ModuleDescriptor, ModuleRegistry};
    use crate::resolve::ZoneResolver;

    #[test]
    fn sidebar_takes_a_quarter_of_the_width() {
        let layout = ResolvedLayout::default();
        let slots = SplitRenderer::new().arrange(&layout, Size::new(103, 30));

        assert_eq!(slots.len(), 2);
        let sidebar = &slots[0];
        let main = &slots[1];
        assert_eq!(sidebar.zone, "sidebar");
        assert_eq!(sidebar.rect.width, 25);
        assert_eq!(main.rect.width, 75);
        assert_eq!(main.rect.x, sidebar.rect.right() + 1);
        assert_eq!(sidebar.rect.height, 28);
    }

    #[test]
    fn spans_never_apply_to_split_layouts() {
        let mut registry = ModuleRegistry::new();
        registry.register(ModuleDescriptor::text("sales", "Live Sales", "$1,250"));
        let config = LayoutConfig::new("both", LayoutKind::Split)
            .assign("sidebar", "sales")
            .assign("main", "sales");

        let layout = ZoneResolver::new().resolve(&config, &registry, &SPLIT_ZONES);
        // The resolver still groups by module id; the renderer ignores it.
        let slots = SplitRenderer::new().arrange(&layout, Size::new(103, 30));
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].zone, "sidebar");
        assert_eq!(slots[1].zone, "main");
    }

    #[test]
    fn placeholders_match_the_pane() {
        let renderer = SplitRenderer::new();
        assert_eq!(renderer.placeholder("sidebar"), "Sidebar");
        assert_eq!(renderer.placeholder("main"), "Main Content");
    }
}
