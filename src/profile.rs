//! Upload-feed profiles: legal aspect bands and the story ideal ratio.

/// Upload destination class.
///
/// Selects the legal aspect-ratio band and, for story feeds, the ideal
/// target ratio used when the input violates a bound. A closed sum — host
/// feed tags are translated to one of these two classes at the boundary.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Feed {
    /// Timeline-style feed. Band `[0.8, 1.91]`; the violated bound itself is
    /// the retarget ratio.
    #[default]
    General,
    /// Story feed. Community-derived band `[0.56, 0.67]`, tight band
    /// `[0.56, 0.565]`, and a distinct ideal ratio of exactly 9:16.
    Story,
}

impl Feed {
    /// General-feed aspect band.
    pub const GENERAL_MIN_RATIO: f64 = 0.8;
    pub const GENERAL_MAX_RATIO: f64 = 1.91;

    /// Story-feed wide (community-derived) aspect band.
    pub const STORY_MIN_RATIO: f64 = 0.56;
    pub const STORY_MAX_RATIO: f64 = 0.67;

    /// Story-feed tight band: a narrow neighborhood of the ideal ratio.
    pub const BEST_STORY_MIN_RATIO: f64 = 0.56;
    pub const BEST_STORY_MAX_RATIO: f64 = 0.565;

    /// Story ideal ratio, exactly 9:16.
    pub const BEST_STORY_RATIO: f64 = 0.5625;

    /// Full legal band `(min, max)` for this feed. Configured aspect bounds
    /// must lie inside it.
    pub const fn legal_band(self) -> (f64, f64) {
        match self {
            Self::General => (Self::GENERAL_MIN_RATIO, Self::GENERAL_MAX_RATIO),
            Self::Story => (Self::STORY_MIN_RATIO, Self::STORY_MAX_RATIO),
        }
    }

    /// Default band `(min, max)` applied when the configuration leaves the
    /// aspect bounds unset. `use_best_story_ratio` narrows a story feed to
    /// the tight band.
    pub const fn default_band(self, use_best_story_ratio: bool) -> (f64, f64) {
        match self {
            Self::Story if use_best_story_ratio => {
                (Self::BEST_STORY_MIN_RATIO, Self::BEST_STORY_MAX_RATIO)
            }
            _ => self.legal_band(),
        }
    }

    /// The ratio to retarget to when the input aspect violates `bound`.
    /// Story feeds aim for the ideal 9:16 regardless of which bound was
    /// violated; general feeds aim for the bound itself.
    pub fn retarget_ratio(self, bound: f64) -> f64 {
        match self {
            Self::General => bound,
            Self::Story => Self::BEST_STORY_RATIO,
        }
    }
}
