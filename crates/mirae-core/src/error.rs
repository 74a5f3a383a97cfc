//! User-facing error taxonomy for the generation flow.

use thiserror::Error;

use crate::messages;

/// Classified outcome of a failed generation attempt.
///
/// This is the whole taxonomy the user can observe. Provider detail is
/// already logged by `mirae-gen` before it ever becomes a [`FlowError`];
/// the conversion below deliberately discards it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FlowError {
    /// Missing or invalid user input; no quota read, no network call.
    #[error("invalid input: {0}")]
    Validation(&'static str),

    /// Daily cap reached; user must wait for the date rollover.
    #[error("daily usage limit reached")]
    QuotaExceeded,

    /// Provider responded but produced no usable image.
    #[error("provider produced no image")]
    Generation,

    /// Transport, auth, or unexpected provider failure.
    #[error("provider call failed")]
    Provider,
}

impl FlowError {
    /// The displayable message for this failure.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Validation(message) => message,
            Self::QuotaExceeded => messages::QUOTA_EXCEEDED,
            Self::Generation => messages::GENERATION_FAILED,
            Self::Provider => messages::PROVIDER_FAILURE,
        }
    }
}

impl From<mirae_gen::Error> for FlowError {
    fn from(error: mirae_gen::Error) -> Self {
        match error {
            mirae_gen::Error::NoImage => Self::Generation,
            _ => Self::Provider,
        }
    }
}

impl From<mirae_quota::QuotaError> for FlowError {
    fn from(_: mirae_quota::QuotaError) -> Self {
        // Quota state could not be verified; do not spend the network call.
        Self::Provider
    }
}
