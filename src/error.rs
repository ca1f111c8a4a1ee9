//! Setup errors
//!
//! Only construction and settings loading can fail. Runtime commands (tick,
//! spawn, fire) never error: they are no-ops once the run is over.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("arena bounds must be finite and positive, got {width}x{height}")]
    InvalidArena { width: f32, height: f32 },

    #[error("invalid setting `{name}`: {reason}")]
    InvalidSettings { name: &'static str, reason: String },

    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Json(#[from] serde_json::Error),
}

impl SetupError {
    pub(crate) fn setting(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidSettings {
            name,
            reason: reason.into(),
        }
    }
}
