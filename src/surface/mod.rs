//! Zone surface orchestrator.
//!
//! Surfaces remember what each zone last painted so the runtime can repaint
//! only what changed.

mod core;

pub use core::{SurfaceRegistry, ZonePatch};
