//! Site error types.

use tt_config::ConfigError;
use tt_highlight::HighlightError;

/// Site error type.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Highlight(#[from] HighlightError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
