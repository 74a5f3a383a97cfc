//! The two supported transformations and their prompt construction.
//!
//! Both renderings share one shape — image in, image out, parameters
//! describable as text — so they are a single tagged union rather than two
//! parallel request paths.

/// Gender selector for the future-face rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    /// 남자아이
    Male,
    /// 여자아이
    Female,
}

impl Gender {
    /// UI label for the selector button.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "남자아이",
            Self::Female => "여자아이",
        }
    }

    /// Noun used inside the generation prompt.
    const fn prompt_noun(self) -> &'static str {
        match self {
            Self::Male => "남자",
            Self::Female => "여자",
        }
    }
}

/// Fixed art-style vocabulary for the animal-character rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtStyle {
    /// 지브리 스타일
    Ghibli,
    /// 디즈니 스타일
    Disney,
    /// 픽사 스타일
    Pixar,
    /// 일러스트 스타일
    Illustration,
    /// 수채화 스타일
    Watercolor,
    /// 만화 스타일
    Cartoon,
}

impl ArtStyle {
    /// Every selectable style, in menu order.
    pub const ALL: [ArtStyle; 6] = [
        ArtStyle::Ghibli,
        ArtStyle::Disney,
        ArtStyle::Pixar,
        ArtStyle::Illustration,
        ArtStyle::Watercolor,
        ArtStyle::Cartoon,
    ];

    /// Display label, also spliced into the prompt.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ghibli => "지브리 스타일",
            Self::Disney => "디즈니 스타일",
            Self::Pixar => "픽사 스타일",
            Self::Illustration => "일러스트 스타일",
            Self::Watercolor => "수채화 스타일",
            Self::Cartoon => "만화 스타일",
        }
    }
}

/// A fully specified transformation request parameter set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transform {
    /// Predicted adult version of the child, identity preserved.
    FutureFace {
        /// Styling to apply to the adult rendering
        gender: Gender,
    },
    /// The child as a named animal in a fixed art style, likeness preserved.
    AnimalCharacter {
        /// Free-text animal name, already trimmed and non-empty
        animal: String,
        /// One of the fixed style vocabulary
        style: ArtStyle,
    },
}

impl Transform {
    /// Natural-language instruction sent alongside the portrait.
    #[must_use]
    pub fn prompt(&self) -> String {
        match self {
            Self::FutureFace { gender } => format!(
                "이 아이가 어른이 된 모습을 그려줘. 얼굴의 특징과 분위기는 꼭 닮게 유지하고, \
                 자연스러운 성인 {}의 모습으로 표현해. 사실적인 인물 사진처럼 그려줘.",
                gender.prompt_noun()
            ),
            Self::AnimalCharacter { animal, style } => format!(
                "귀여운 {animal}으로 변신한 아기 그려진 {}의 그림. \
                 포즈와 배경은 {animal}과 어울리도록 바꿔. 꼭 얼굴은 닮도록 해야 해. \
                 그림은 전체적으로 귀엽고 사랑스러운 분위기로 해.",
                style.label()
            ),
        }
    }

    /// Stem of the suggested download filename for this rendering.
    #[must_use]
    pub const fn filename_stem(&self) -> &'static str {
        match self {
            Self::FutureFace { .. } => "ai_future_face",
            Self::AnimalCharacter { .. } => "animal_transform",
        }
    }

    /// Short name for logs.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::FutureFace { .. } => "future_face",
            Self::AnimalCharacter { .. } => "animal_character",
        }
    }
}
