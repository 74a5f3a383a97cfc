//! Mirae Gen - Portrait Transformation Requester
//!
//! This crate turns a child's portrait into an AI-generated image via the
//! Google Gemini image API:
//! - Transform: the two supported renderings (future adult face, animal
//!   character) and their prompt construction
//! - Gemini: the wire types and the single-attempt `generateContent` call
//! - Image: source/result payload types and download-name derivation
//!
//! One request per call, no retries, no cancellation. Provider failures are
//! logged in detail here and reduced to coarse error variants for the
//! caller; nothing user-facing leaks credentials or provider internals.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod gemini;
pub mod image;
pub mod mock;
pub mod transform;
pub mod util;

pub use error::{Error, Result};
pub use gemini::{GeminiConfig, GeminiImageGenerator, ImageGenerator, DEFAULT_MODEL};
pub use image::{GeneratedImage, ImageFormat, SourceImage};
pub use mock::MockImageGenerator;
pub use transform::{ArtStyle, Gender, Transform};
