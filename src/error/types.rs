use thiserror::Error;

/// Unified result type for the scoreboard crate.
pub type Result<T> = std::result::Result<T, ScoreboardError>;

/// Errors surfaced by the layout engine.
#[derive(Debug, Error)]
pub enum ScoreboardError {
    #[error("layout configuration invalid: {0}")]
    InvalidConfig(String),
    #[error("zone `{0}` not found")]
    ZoneNotFound(String),
    #[error("configuration parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
