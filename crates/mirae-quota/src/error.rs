//! Error types for mirae-quota

use thiserror::Error;

/// Quota error type
#[derive(Debug, Error)]
pub enum QuotaError {
    /// Reading or writing the persisted record failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The record could not be encoded
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// No platform data directory is available for the default store path
    #[error("no platform data directory available")]
    NoDataDir,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, QuotaError>;
