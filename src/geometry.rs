//! Geometry primitives shared by the canvas calculator and the placement
//! planner.
//!
//! Pure value types — no pixel operations. All scaling goes through an
//! explicit [`Rounding`] mode because the floor/ceil/round choice at each
//! call site is part of the layout contract, not an implementation detail.

/// Rounding mode for fractional pixel counts.
///
/// Floor biases toward a smaller (wider-ratio) result, ceil toward a larger
/// (taller-ratio) one. Changing the mode at any call site changes the set of
/// legal canvases.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rounding {
    /// Round toward zero.
    Floor,
    /// Round away from zero.
    Ceil,
    /// Round half away from zero.
    Round,
}

impl Rounding {
    /// Apply this mode to a scalar.
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::Floor => value.floor(),
            Self::Ceil => value.ceil(),
            Self::Round => value.round(),
        }
    }
}

/// Width × height dimensions in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Create new dimensions.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Aspect ratio `width / height`. `1.0` is square, `< 1` portrait,
    /// `> 1` landscape.
    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Scale both sides by `factor`, rounding each per `rounding`.
    pub fn with_rescaling(self, factor: f64, rounding: Rounding) -> Self {
        Self {
            width: rounding.apply(self.width as f64 * factor) as u32,
            height: rounding.apply(self.height as f64 * factor) as u32,
        }
    }

    /// Swap width and height.
    pub const fn swap_axes(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }
}

/// Axis-aligned rectangle in pixel coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect covering `dimensions` with origin at `(0, 0)`.
    pub const fn covering(dimensions: Dimensions) -> Self {
        Self {
            x: 0,
            y: 0,
            width: dimensions.width,
            height: dimensions.height,
        }
    }

    /// Right edge, `x + width`.
    pub const fn x2(&self) -> u32 {
        self.x + self.width
    }

    /// Bottom edge, `y + height`.
    pub const fn y2(&self) -> u32 {
        self.y + self.height
    }

    /// Aspect ratio of the rect's extent.
    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Scale width and height by `factor`, rounding each per `rounding`.
    /// The origin is left as supplied.
    pub fn with_rescaling(self, factor: f64, rounding: Rounding) -> Self {
        Self {
            width: rounding.apply(self.width as f64 * factor) as u32,
            height: rounding.apply(self.height as f64 * factor) as u32,
            ..self
        }
    }

    /// Swap axes: `(x, y, w, h)` → `(y, x, h, w)`. Used for renderers whose
    /// pixel storage is rotated relative to the logical upright image.
    pub const fn swap_axes(self) -> Self {
        Self {
            x: self.y,
            y: self.x,
            width: self.height,
            height: self.width,
        }
    }

    /// Whether this rect lies entirely within `dimensions` (origin `(0, 0)`).
    pub const fn fits_within(&self, dimensions: Dimensions) -> bool {
        self.x2() <= dimensions.width && self.y2() <= dimensions.height
    }
}
