//! Mirae Core - Generation Request Lifecycle
//!
//! This crate sequences one page's generation flow:
//! validation → quota gate → single provider call → charge-on-success →
//! result or classified error. At most one request is in flight per flow;
//! a trigger while one is running is a no-op, mirroring the disabled
//! button in the view layer.
//!
//! Every runtime failure is absorbed here and reduced to one displayable
//! message; nothing propagates past the controller.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod draft;
pub mod error;
pub mod flow;
pub mod messages;

pub use draft::Draft;
pub use error::FlowError;
pub use flow::GenerationFlow;
