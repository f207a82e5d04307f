//! Scoreboard: a zone-based layout engine for full-screen terminal
//! dashboards.
//!
//! A declarative configuration assigns display modules to named zones; the
//! resolver detects when one module spans several zones, picks the visible
//! anchor, and hides the subsumed slots. Grid and split renderers turn the
//! resolved layout into positioned cells, and a small runtime repaints only
//! the zones whose content changed.

pub mod config;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod module;
pub mod render;
pub mod resolve;
pub mod runtime;
pub mod surface;
pub mod width;

pub use config::{LayoutConfig, LayoutKind, RowSizing};
pub use error::{Result, ScoreboardError};
pub use geometry::{Rect, Size};
pub use layout::{TrackSize, distribute};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink,
};
pub use metrics::{DashboardMetrics, MetricSnapshot};
pub use module::{ModuleDescriptor, ModuleId, ModuleRegistry, RenderableUnit, TextUnit};
pub use render::{
    GRID_ZONES, GridRenderer, LayoutRenderer, PainterSettings, SPLIT_ZONES, SplitRenderer,
    ZonePainter, ZoneSlot, renderer_for,
};
pub use resolve::{ResolvedLayout, ResolvedZone, ZoneId, ZoneResolver};
pub use runtime::{Dashboard, DashboardEvent, RuntimeOptions};
pub use surface::{SurfaceRegistry, ZonePatch};
pub use width::display_width;
