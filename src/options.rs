//! Conformance configuration: an enumerated option record with defaulted
//! fields, validated once before any canvas math runs.

use crate::profile::Feed;

/// Whether an aspect mismatch cuts pixels or adds bars.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operation {
    /// Cut the overflowing dimension down to the target aspect.
    #[default]
    Crop,
    /// Grow the canvas and letterbox/pillarbox the input onto it.
    Expand,
}

/// Solid background color for expand (letterbox) rendering.
///
/// The core never touches pixels; this is handed through to the external
/// renderer for bar fill.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// White, the default bar fill.
    pub const fn white() -> Self {
        Self::new(255, 255, 255)
    }

    /// Black.
    pub const fn black() -> Self {
        Self::new(0, 0, 0)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::white()
    }
}

/// Crop-focus bias, `-50..=50` per axis.
///
/// Negative pulls the source window toward the top/left edge, positive
/// toward the bottom/right, zero centers it. The vertical default is `-50`
/// (keep the top of the frame).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CropFocus {
    pub horizontal: i32,
    pub vertical: i32,
}

impl Default for CropFocus {
    fn default() -> Self {
        Self {
            horizontal: 0,
            vertical: -50,
        }
    }
}

/// Configuration validation error. Raised before any canvas computation.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// `hor_crop_focus` outside `-50..=50`.
    #[error("horizontal crop focus {0} outside -50..=50")]
    HorCropFocus(i32),
    /// `ver_crop_focus` outside `-50..=50`.
    #[error("vertical crop focus {0} outside -50..=50")]
    VerCropFocus(i32),
    /// `min_aspect_ratio` outside the feed's legal band.
    #[error("minimum aspect ratio {value} outside the feed band [{band_min}, {band_max}]")]
    MinAspectRatio {
        value: f64,
        band_min: f64,
        band_max: f64,
    },
    /// `max_aspect_ratio` outside the feed's legal band.
    #[error("maximum aspect ratio {value} outside the feed band [{band_min}, {band_max}]")]
    MaxAspectRatio {
        value: f64,
        band_min: f64,
        band_max: f64,
    },
    /// Declared band is inverted (`min > max`).
    #[error("minimum aspect ratio {min} exceeds maximum {max}")]
    InvertedAspectBand { min: f64, max: f64 },
}

/// Conformance options.
///
/// A plain record with defaulted fields. Build one with the chaining
/// setters, then hand it to [`Conformer::new`](crate::Conformer::new), which
/// runs [`validate`](Self::validate) exactly once before any canvas math.
///
/// # Example
///
/// ```
/// use zenconform::{ConformOptions, Feed, Operation};
///
/// let options = ConformOptions::new()
///     .feed(Feed::Story)
///     .operation(Operation::Expand)
///     .use_best_story_ratio(true);
///
/// assert!(options.validate().is_ok());
/// assert_eq!(options.aspect_band(), (0.56, 0.565));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConformOptions {
    /// Upload destination class. Default: [`Feed::General`].
    pub feed: Feed,
    /// Crop or expand. Default: [`Operation::Crop`].
    pub operation: Operation,
    /// Lower aspect bound. `None` ⇒ feed-profile default.
    pub min_aspect_ratio: Option<f64>,
    /// Upper aspect bound. `None` ⇒ feed-profile default.
    pub max_aspect_ratio: Option<f64>,
    /// Horizontal crop bias in `-50..=50`. `None` ⇒ `0` (center).
    pub hor_crop_focus: Option<i32>,
    /// Vertical crop bias in `-50..=50`. `None` ⇒ `-50` (top).
    pub ver_crop_focus: Option<i32>,
    /// Narrow a story feed to the tight neighborhood of the ideal 9:16
    /// ratio. Default: `true`. No effect on general feeds.
    pub use_best_story_ratio: bool,
    /// Accept a canvas forced outside the declared band when no legal Mod2
    /// canvas exists. Default: `false`.
    pub allow_new_aspect_deviation: bool,
    /// Bar fill for expand rendering. Default: white.
    pub bg_color: Rgb,
}

impl Default for ConformOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ConformOptions {
    /// Options with every field at its default.
    pub fn new() -> Self {
        Self {
            feed: Feed::General,
            operation: Operation::Crop,
            min_aspect_ratio: None,
            max_aspect_ratio: None,
            hor_crop_focus: None,
            ver_crop_focus: None,
            use_best_story_ratio: true,
            allow_new_aspect_deviation: false,
            bg_color: Rgb::white(),
        }
    }

    /// Set the target feed.
    pub fn feed(mut self, feed: Feed) -> Self {
        self.feed = feed;
        self
    }

    /// Set the operation.
    pub fn operation(mut self, operation: Operation) -> Self {
        self.operation = operation;
        self
    }

    /// Set the lower aspect bound.
    pub fn min_aspect_ratio(mut self, ratio: f64) -> Self {
        self.min_aspect_ratio = Some(ratio);
        self
    }

    /// Set the upper aspect bound.
    pub fn max_aspect_ratio(mut self, ratio: f64) -> Self {
        self.max_aspect_ratio = Some(ratio);
        self
    }

    /// Set the horizontal crop focus.
    pub fn hor_crop_focus(mut self, focus: i32) -> Self {
        self.hor_crop_focus = Some(focus);
        self
    }

    /// Set the vertical crop focus.
    pub fn ver_crop_focus(mut self, focus: i32) -> Self {
        self.ver_crop_focus = Some(focus);
        self
    }

    /// Toggle the tight story band.
    pub fn use_best_story_ratio(mut self, enabled: bool) -> Self {
        self.use_best_story_ratio = enabled;
        self
    }

    /// Toggle acceptance of a forced aspect deviation.
    pub fn allow_new_aspect_deviation(mut self, enabled: bool) -> Self {
        self.allow_new_aspect_deviation = enabled;
        self
    }

    /// Set the expand bar fill color.
    pub fn bg_color(mut self, color: Rgb) -> Self {
        self.bg_color = color;
        self
    }

    /// Check every option against its legal range.
    ///
    /// The comparisons are written so that a non-finite bound also fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(focus) = self.hor_crop_focus
            && !(-50..=50).contains(&focus)
        {
            return Err(ConfigError::HorCropFocus(focus));
        }
        if let Some(focus) = self.ver_crop_focus
            && !(-50..=50).contains(&focus)
        {
            return Err(ConfigError::VerCropFocus(focus));
        }

        let (band_min, band_max) = self.feed.legal_band();
        if let Some(value) = self.min_aspect_ratio
            && !(value >= band_min && value <= band_max)
        {
            return Err(ConfigError::MinAspectRatio {
                value,
                band_min,
                band_max,
            });
        }
        if let Some(value) = self.max_aspect_ratio
            && !(value >= band_min && value <= band_max)
        {
            return Err(ConfigError::MaxAspectRatio {
                value,
                band_min,
                band_max,
            });
        }

        let (min, max) = self.aspect_band();
        if min > max {
            return Err(ConfigError::InvertedAspectBand { min, max });
        }

        Ok(())
    }

    /// Effective aspect band `(min, max)`: declared bounds where set,
    /// feed-profile defaults where not.
    pub fn aspect_band(&self) -> (f64, f64) {
        let (default_min, default_max) = self.feed.default_band(self.use_best_story_ratio);
        (
            self.min_aspect_ratio.unwrap_or(default_min),
            self.max_aspect_ratio.unwrap_or(default_max),
        )
    }

    /// Effective crop focus with defaults applied (`0` horizontal, `-50`
    /// vertical).
    pub fn crop_focus(&self) -> CropFocus {
        let default = CropFocus::default();
        CropFocus {
            horizontal: self.hor_crop_focus.unwrap_or(default.horizontal),
            vertical: self.ver_crop_focus.unwrap_or(default.vertical),
        }
    }
}
