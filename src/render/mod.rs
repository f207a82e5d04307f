//! Layout renderers.
//!
//! A renderer owns a fixed zone vocabulary and turns a resolved layout plus
//! a terminal size into positioned slots; the painter then writes slot
//! content as ANSI sequences. Renderers are pure with respect to their
//! inputs and never fail: unresolved zones degrade to placeholders.

mod core;
mod grid;
mod split;

pub use core::{PainterSettings, ZonePainter};
pub use grid::{GRID_ZONES, GridRenderer};
pub use split::{SPLIT_ZONES, SplitRenderer};

use crate::config::{LayoutConfig, LayoutKind};
use crate::geometry::{Rect, Size};
use crate::resolve::{ResolvedLayout, ZoneId};

/// A zone positioned by a renderer for the current frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneSlot {
    pub zone: ZoneId,
    pub rect: Rect,
}

/// Arrangement contract shared by the grid and split renderers.
pub trait LayoutRenderer: Send {
    fn name(&self) -> &'static str;

    /// Ordered zone names this renderer understands. Assignments outside
    /// the vocabulary never reach this renderer.
    fn vocabulary(&self) -> &'static [&'static str];

    /// Position every visible zone for the given terminal size. Hidden
    /// zones are omitted entirely; unassigned zones still get a slot so the
    /// runtime can paint their placeholder.
    fn arrange(&self, layout: &ResolvedLayout, size: Size) -> Vec<ZoneSlot>;

    /// Content shown in a slot whose zone resolved to nothing.
    fn placeholder(&self, zone: &str) -> String;
}

/// Select the renderer a configuration asks for.
pub fn renderer_for(config: &LayoutConfig) -> Box<dyn LayoutRenderer> {
    match config.kind {
        LayoutKind::Grid => Box::new(GridRenderer::from_config(config)),
        LayoutKind::Split => Box::new(SplitRenderer::new()),
    }
}
