//! Per-page form state.
//!
//! Each page edits a draft; [`Draft::validate`] turns a complete draft into
//! the [`Transform`] handed to the requester. The two pages share one shape
//! here instead of duplicating the whole flow.

use mirae_gen::{ArtStyle, Gender, Transform};

use crate::error::FlowError;
use crate::messages;

/// Editable parameters for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draft {
    /// Future-face page: gender selector.
    FutureFace {
        /// Selected gender, if any
        gender: Option<Gender>,
    },
    /// Animal page: free-text animal name plus a style selector.
    AnimalCharacter {
        /// Animal name as typed (trimmed during validation)
        animal: String,
        /// Selected style, if any
        style: Option<ArtStyle>,
    },
}

impl Draft {
    /// Empty future-face draft.
    #[must_use]
    pub const fn future_face() -> Self {
        Self::FutureFace { gender: None }
    }

    /// Empty animal-character draft.
    #[must_use]
    pub const fn animal_character() -> Self {
        Self::AnimalCharacter {
            animal: String::new(),
            style: None,
        }
    }

    /// Message shown when this page's required inputs are incomplete.
    /// Covers a missing photo too; each page reports photo and parameters
    /// with a single message.
    #[must_use]
    pub const fn input_message(&self) -> &'static str {
        match self {
            Self::FutureFace { .. } => messages::FUTURE_FACE_INPUT,
            Self::AnimalCharacter { .. } => messages::ANIMAL_INPUT,
        }
    }

    /// Stem of the download filename for this page's results.
    #[must_use]
    pub const fn filename_stem(&self) -> &'static str {
        match self {
            Self::FutureFace { .. } => "ai_future_face",
            Self::AnimalCharacter { .. } => "animal_transform",
        }
    }

    /// Turn a complete draft into transform parameters.
    ///
    /// A whitespace-only animal name counts as missing.
    pub fn validate(&self) -> Result<Transform, FlowError> {
        match self {
            Self::FutureFace { gender } => gender
                .map(|gender| Transform::FutureFace { gender })
                .ok_or(FlowError::Validation(messages::FUTURE_FACE_INPUT)),
            Self::AnimalCharacter { animal, style } => {
                let animal = animal.trim();
                match (animal.is_empty(), style) {
                    (false, Some(style)) => Ok(Transform::AnimalCharacter {
                        animal: animal.to_string(),
                        style: *style,
                    }),
                    _ => Err(FlowError::Validation(messages::ANIMAL_INPUT)),
                }
            }
        }
    }
}
