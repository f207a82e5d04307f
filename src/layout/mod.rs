//! Track sizing orchestrator.
//!
//! Both renderers size their rows and columns through the same distribution
//! helper; the implementation lives in the private `tracks` module.

mod tracks;

pub use tracks::{TrackSize, distribute};
