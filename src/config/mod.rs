//! Layout configuration orchestrator.

mod core;

pub use core::{LayoutConfig, LayoutKind, RowSizing};
