//! Error types for mirae-gen

use thiserror::Error;

/// Generation error type
#[derive(Debug, Error)]
pub enum Error {
    /// Provider credentials are missing. Raised at construction time only —
    /// a generator is never handed out half-configured.
    #[error("provider not configured: {0}")]
    NotConfigured(String),

    /// The provider responded but returned no image part (it declined or
    /// could not comply).
    #[error("no image in provider response")]
    NoImage,

    /// The provider returned an error status
    #[error("api error: {0}")]
    Api(String),

    /// The provider rejected the request as rate limited
    #[error("rate limit exceeded")]
    RateLimit,

    /// Transport failure (includes the request timeout)
    #[error("network error: {0}")]
    Network(String),

    /// The provider response could not be decoded
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
