//! Mock generator for tests — returns queued outcomes instead of calling
//! the provider, and counts how many times it was invoked.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::gemini::ImageGenerator;
use crate::image::{GeneratedImage, SourceImage};
use crate::transform::Transform;

/// Queue-backed [`ImageGenerator`] for tests.
///
/// Outcomes are popped in push order; an empty queue answers with
/// [`Error::NoImage`].
#[derive(Debug, Default)]
pub struct MockImageGenerator {
    outcomes: Mutex<VecDeque<Result<GeneratedImage>>>,
    calls: AtomicUsize,
}

impl MockImageGenerator {
    /// Create a mock with an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful generation.
    pub fn push_image(&self, image: GeneratedImage) {
        self.outcomes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Ok(image));
    }

    /// Queue a failure.
    pub fn push_error(&self, error: Error) {
        self.outcomes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Err(error));
    }

    /// Number of `generate` calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    async fn generate(
        &self,
        _image: &SourceImage,
        _transform: &Transform,
    ) -> Result<GeneratedImage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcomes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or(Err(Error::NoImage))
    }
}
