//! The generation request lifecycle for one page.

use std::sync::Arc;

use mirae_gen::{GeneratedImage, ImageFormat, ImageGenerator, SourceImage};
use mirae_quota::{UsageSnapshot, UsageTracker};
use tracing::{debug, error, warn};

use crate::draft::Draft;
use crate::error::FlowError;
use crate::messages;

/// One page's generation session: current inputs, last outcome, and the
/// single-flight guard.
///
/// `generate` walks Idle → Validating → QuotaChecking → InFlight →
/// {Succeeded, Failed} → Idle in one call. The flow is back in `Idle` on
/// every exit path, ready for a "regenerate" trigger. Any trigger or new
/// upload drops the previously displayed result before new work begins.
pub struct GenerationFlow {
    generator: Arc<dyn ImageGenerator>,
    tracker: UsageTracker,
    draft: Draft,
    source: Option<SourceImage>,
    result: Option<GeneratedImage>,
    error: Option<&'static str>,
    in_flight: bool,
}

impl GenerationFlow {
    /// Create a flow with an explicit draft.
    pub fn new(generator: Arc<dyn ImageGenerator>, tracker: UsageTracker, draft: Draft) -> Self {
        Self {
            generator,
            tracker,
            draft,
            source: None,
            result: None,
            error: None,
            in_flight: false,
        }
    }

    /// Flow for the future-face page.
    pub fn future_face(generator: Arc<dyn ImageGenerator>, tracker: UsageTracker) -> Self {
        Self::new(generator, tracker, Draft::future_face())
    }

    /// Flow for the animal-character page.
    pub fn animal_character(generator: Arc<dyn ImageGenerator>, tracker: UsageTracker) -> Self {
        Self::new(generator, tracker, Draft::animal_character())
    }

    // ── Inputs ──────────────────────────────────────────────────

    /// Accept an uploaded file. Only JPEG and PNG pass; anything else sets
    /// the format message and leaves the previous source untouched.
    /// Accepting a new source invalidates the stale result immediately.
    pub fn set_source(&mut self, bytes: Vec<u8>, mime: &str) {
        match ImageFormat::from_mime(mime) {
            Some(format) => {
                self.source = Some(SourceImage::new(bytes, format));
                self.result = None;
                self.error = None;
            }
            None => {
                debug!(mime, "rejected upload with unsupported format");
                self.error = Some(messages::UPLOAD_FORMAT);
            }
        }
    }

    /// Select a gender (future-face page; ignored on the animal page).
    pub fn set_gender(&mut self, gender: mirae_gen::Gender) {
        if let Draft::FutureFace { gender: slot } = &mut self.draft {
            *slot = Some(gender);
        }
    }

    /// Type an animal name (animal page; ignored on the future-face page).
    pub fn set_animal_name(&mut self, name: impl Into<String>) {
        if let Draft::AnimalCharacter { animal, .. } = &mut self.draft {
            *animal = name.into();
        }
    }

    /// Select a style (animal page; ignored on the future-face page).
    pub fn set_style(&mut self, style: mirae_gen::ArtStyle) {
        if let Draft::AnimalCharacter { style: slot, .. } = &mut self.draft {
            *slot = Some(style);
        }
    }

    // ── Lifecycle ───────────────────────────────────────────────

    /// Run one generation attempt.
    ///
    /// Ordering matters: validation and the quota gate run before anything
    /// is spent, the provider is called at most once, and usage is charged
    /// only after an image actually came back.
    pub async fn generate(&mut self) {
        if self.in_flight {
            // Trigger is disabled in the view; a second call is a no-op.
            debug!("generation already in flight, trigger ignored");
            return;
        }
        // A trigger invalidates stale output before any new work begins.
        self.error = None;
        self.result = None;

        let Some(source) = self.source.clone() else {
            self.error = Some(self.draft.input_message());
            return;
        };
        let transform = match self.draft.validate() {
            Ok(transform) => transform,
            Err(invalid) => {
                self.error = Some(invalid.user_message());
                return;
            }
        };

        match self.tracker.can_use() {
            Ok(true) => {}
            Ok(false) => {
                self.error = Some(FlowError::QuotaExceeded.user_message());
                return;
            }
            Err(store_error) => {
                error!(error = %store_error, "quota check failed, generation not attempted");
                self.error = Some(FlowError::from(store_error).user_message());
                return;
            }
        }

        self.in_flight = true;

        let outcome = self.generator.generate(&source, &transform).await;

        match outcome {
            Ok(image) => {
                match self.tracker.record_use() {
                    Ok(true) => {}
                    // Another tab won the race to the last slot. The image
                    // was produced, so it is still shown.
                    Ok(false) => warn!("daily limit reached concurrently, usage not recorded"),
                    Err(store_error) => {
                        warn!(error = %store_error, "failed to persist usage count");
                    }
                }
                self.result = Some(image);
            }
            Err(provider_error) => {
                let classified = FlowError::from(provider_error);
                debug!(error = ?classified, "generation failed");
                self.error = Some(classified.user_message());
            }
        }
        self.in_flight = false;
    }

    // ── Outputs ─────────────────────────────────────────────────

    /// The current result, if the last attempt produced one.
    #[must_use]
    pub fn result(&self) -> Option<&GeneratedImage> {
        self.result.as_ref()
    }

    /// The current displayable error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    /// Whether a request is currently outstanding.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Whether a source image has been accepted.
    #[must_use]
    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    /// Suggested filename for saving the current result, e.g.
    /// `animal_transform.png` or `ai_future_face.jpeg`.
    #[must_use]
    pub fn download_filename(&self) -> Option<String> {
        self.result
            .as_ref()
            .map(|image| image.download_filename(self.draft.filename_stem()))
    }

    /// Today's usage, shaped for the usage-bar display.
    pub fn usage(&self) -> mirae_quota::Result<UsageSnapshot> {
        self.tracker.snapshot()
    }
}
