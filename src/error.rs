//! # Error Types
//!
//! Errors surface only at the I/O boundary (configuration, fetching, decoding,
//! writing). The render core never fails.

use thiserror::Error;

/// Main error type for repocard operations
#[derive(Debug, Error)]
pub enum CardError {
    /// Card list or CLI configuration problem
    #[error("Config error: {0}")]
    Config(String),

    /// Metadata or logo download failure
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Image decoding or encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// Font file could not be used
    #[error("Font error: {0}")]
    Font(String),

    /// JSON parse error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
