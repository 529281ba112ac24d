//! Canvas calculation: derive an output canvas satisfying width, aspect and
//! parity constraints simultaneously.
//!
//! The computation runs in four ordered stages — aspect conformance, square
//! sanity, width clamp, Mod2 adjustment — each of which may override the
//! previous one's output. The constraints interact: clamping the width moves
//! the height through the target aspect, the even-parity rule can
//! re-invalidate either dimension, and story feeds retarget to an ideal
//! ratio distinct from their legal band. Every floor/ceil choice below is
//! part of the contract.

use crate::geometry::{Dimensions, Rounding};
use crate::options::Operation;
use crate::profile::Feed;

/// Height offsets tried by the Mod2 adjustment, in preference order.
///
/// Bounded at ±6: beyond that the deviation from the target aspect dominates
/// any area gain. Leading 0 keeps the pre-Mod2 canvas whenever it is legal.
const MOD2_HEIGHT_OFFSETS: [i64; 7] = [0, 2, -2, 4, -4, 6, -6];

/// Inputs to the canvas calculator.
///
/// Width limits come from the renderer (photo and video carry different
/// bands); aspect bounds come from the validated configuration. Either
/// aspect bound may be absent, in which case that side of the band is open.
#[derive(Clone, Debug, PartialEq)]
pub struct CanvasConstraints {
    /// Target feed; selects the retarget ratio on a bound violation.
    pub feed: Feed,
    /// Crop or expand.
    pub operation: Operation,
    /// Require even width and height (H.264 and friends).
    pub mod2_required: bool,
    /// Smallest legal canvas width.
    pub min_width: u32,
    /// Largest legal canvas width.
    pub max_width: u32,
    /// Lower aspect bound, if any.
    pub min_aspect_ratio: Option<f64>,
    /// Upper aspect bound, if any.
    pub max_aspect_ratio: Option<f64>,
    /// Accept a final aspect outside the band when no legal Mod2 canvas
    /// exists.
    pub allow_aspect_deviation: bool,
}

/// A legal canvas plus how much the Mod2 stage perturbed it.
///
/// The diffs reconstruct the *ideal canvas* (the stage A–C result) for the
/// placement planner: `ideal = canvas - diff` per axis. Both can be
/// negative.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CanvasFit {
    /// Final canvas dimensions.
    pub canvas: Dimensions,
    /// `canvas.width - ideal width`.
    pub mod2_width_diff: i32,
    /// `canvas.height - ideal height`.
    pub mod2_height_diff: i32,
}

impl CanvasFit {
    /// The canvas that stages A–C produced, before Mod2 adjustment.
    pub fn ideal_canvas(&self) -> Dimensions {
        Dimensions::new(
            (self.canvas.width as i64 - self.mod2_width_diff as i64) as u32,
            (self.canvas.height as i64 - self.mod2_height_diff as i64) as u32,
        )
    }
}

/// The calculator cannot satisfy the constraints.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CanvasError {
    /// A dimension collapsed below one pixel.
    #[error("computed canvas {width}x{height} collapsed below one pixel")]
    Degenerate { width: i64, height: i64 },
    /// Final width escaped the renderer's band.
    #[error("canvas width {width} outside the allowed range {min}..={max}")]
    WidthOutOfRange { width: i64, min: u32, max: u32 },
    /// Final aspect escaped the declared band and deviation is not allowed.
    #[error(
        "canvas aspect {aspect:.4} outside the allowed band [{}, {}]",
        fmt_bound(.min),
        fmt_bound(.max)
    )]
    AspectOutOfBand {
        aspect: f64,
        min: Option<f64>,
        max: Option<f64>,
    },
}

fn fmt_bound(bound: &Option<f64>) -> String {
    match bound {
        Some(value) => format!("{value:.4}"),
        None => String::from("unbounded"),
    }
}

/// Mod2 candidate quality, best first. `Perfect` canvases are legal without
/// stretching the input; `Stretch` canvases are legal but taller than the
/// input; `Bad` canvases break the aspect band.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Mod2Bucket {
    Perfect,
    Stretch,
    Bad,
}

impl CanvasConstraints {
    /// Compute the canvas for `input`.
    ///
    /// Emits a `tracing` debug record per stage when a subscriber is
    /// installed; otherwise the computation is silent.
    pub fn compute(&self, input: Dimensions) -> Result<CanvasFit, CanvasError> {
        let input_aspect = input.aspect();
        let mut width = input.width as i64;
        let mut height = input.height as i64;
        let mut target_aspect = input_aspect;
        let height_bias;

        // Stage A: aspect conformance. Crop removes pixels from the
        // overflowing dimension; expand grows the other one. Boundary
        // aspects (ar == bound) take the already-legal branch.
        if let Some(min) = self.min_aspect_ratio
            && input_aspect < min
        {
            target_aspect = self.feed.retarget_ratio(min);
            height_bias = Rounding::Floor;
            match self.operation {
                Operation::Crop => height = (width as f64 / target_aspect).floor() as i64,
                Operation::Expand => width = (height as f64 * target_aspect).ceil() as i64,
            }
        } else if let Some(max) = self.max_aspect_ratio
            && input_aspect > max
        {
            target_aspect = self.feed.retarget_ratio(max);
            height_bias = Rounding::Ceil;
            match self.operation {
                Operation::Crop => width = (height as f64 * target_aspect).floor() as i64,
                Operation::Expand => height = (width as f64 / target_aspect).ceil() as i64,
            }
        } else {
            // Already legal. Bias later height recalculations toward the
            // nearer bound; an absent bound counts as 0 here.
            let min_distance = (input_aspect - self.min_aspect_ratio.unwrap_or(0.0)).abs();
            let max_distance = (input_aspect - self.max_aspect_ratio.unwrap_or(0.0)).abs();
            height_bias = if min_distance < max_distance {
                Rounding::Floor
            } else {
                Rounding::Ceil
            };
        }
        trace_stage("aspect", width, height);

        // Stage B: square sanity. A square target that came out non-square
        // (rounding) collapses to the shorter side under crop, the longer
        // under expand.
        if target_aspect == 1.0 && width != height {
            let side = match self.operation {
                Operation::Crop => width.min(height),
                Operation::Expand => width.max(height),
            };
            width = side;
            height = side;
            trace_stage("square", width, height);
        }

        // Stage C: width clamp, height follows through the target aspect.
        if width > self.max_width as i64 {
            width = self.max_width as i64;
            height = height_for(width, target_aspect, height_bias);
            trace_stage("clamp-max", width, height);
        }
        if width < self.min_width as i64 {
            width = self.min_width as i64;
            height = height_for(width, target_aspect, height_bias);
            trace_stage("clamp-min", width, height);
        }

        // Stage D: Mod2 adjustment.
        let mut mod2_width_diff = 0i32;
        let mut mod2_height_diff = 0i32;
        if self.mod2_required && (width % 2 != 0 || height % 2 != 0) {
            let (even_width, even_height) =
                self.adjust_mod2(width, height, input.height as i64, target_aspect, height_bias)?;
            mod2_width_diff = (even_width - width) as i32;
            mod2_height_diff = (even_height - height) as i32;
            width = even_width;
            height = even_height;
            trace_stage("mod2", width, height);
        }

        if width < 1 || height < 1 {
            return Err(CanvasError::Degenerate { width, height });
        }
        if width < self.min_width as i64 || width > self.max_width as i64 {
            return Err(CanvasError::WidthOutOfRange {
                width,
                min: self.min_width,
                max: self.max_width,
            });
        }
        let aspect = width as f64 / height as f64;
        if !self.aspect_is_legal(aspect) && !self.allow_aspect_deviation {
            return Err(CanvasError::AspectOutOfBand {
                aspect,
                min: self.min_aspect_ratio,
                max: self.max_aspect_ratio,
            });
        }

        Ok(CanvasFit {
            canvas: Dimensions::new(width as u32, height as u32),
            mod2_width_diff,
            mod2_height_diff,
        })
    }

    /// Turn `(width, height)` into an even-even pair as close as possible to
    /// the target aspect without escaping the width limits.
    ///
    /// Width moves first (down when there is room above `min_width`, up
    /// otherwise), the height follows through the aspect, then the best even
    /// height is picked from [`MOD2_HEIGHT_OFFSETS`].
    fn adjust_mod2(
        &self,
        width: i64,
        height: i64,
        input_height: i64,
        target_aspect: f64,
        height_bias: Rounding,
    ) -> Result<(i64, i64), CanvasError> {
        let can_cut_width = width > self.min_width as i64;
        let step = if can_cut_width { -1 } else { 1 };

        let mut width = width;
        let mut height = height;
        if width % 2 != 0 {
            width += step;
            height = height_for(width, target_aspect, height_bias);
        }
        if height % 2 != 0 {
            height += step;
        }

        let mut best: Option<(Mod2Bucket, f64, i64)> = None;
        for offset in MOD2_HEIGHT_OFFSETS {
            let candidate = height + offset;
            if candidate < 1 {
                // Could never validate, and would poison the aspect math.
                continue;
            }
            let aspect = width as f64 / candidate as f64;
            let stretch = (candidate - input_height).max(0);
            let bucket = if !self.aspect_is_legal(aspect) {
                Mod2Bucket::Bad
            } else if stretch > 0 {
                Mod2Bucket::Stretch
            } else {
                Mod2Bucket::Perfect
            };
            let deviation = (aspect - target_aspect).abs();
            // Strict comparisons keep the earliest candidate on ties,
            // preserving the offset-list order.
            let better = match best {
                None => true,
                Some((best_bucket, best_deviation, _)) => {
                    bucket < best_bucket || (bucket == best_bucket && deviation < best_deviation)
                }
            };
            if better {
                best = Some((bucket, deviation, candidate));
            }
        }

        let Some((bucket, _, chosen)) = best else {
            return Err(CanvasError::Degenerate { width, height });
        };
        if bucket == Mod2Bucket::Bad && !self.allow_aspect_deviation {
            return Err(CanvasError::AspectOutOfBand {
                aspect: width as f64 / chosen as f64,
                min: self.min_aspect_ratio,
                max: self.max_aspect_ratio,
            });
        }
        Ok((width, chosen))
    }

    /// Whether `aspect` lies within the declared band. An absent bound
    /// leaves that side open.
    fn aspect_is_legal(&self, aspect: f64) -> bool {
        self.min_aspect_ratio.is_none_or(|min| aspect >= min)
            && self.max_aspect_ratio.is_none_or(|max| aspect <= max)
    }
}

/// Height matching `width` at `target_aspect` under the stage's rounding
/// bias.
fn height_for(width: i64, target_aspect: f64, bias: Rounding) -> i64 {
    bias.apply(width as f64 / target_aspect) as i64
}

fn trace_stage(step: &str, width: i64, height: i64) {
    tracing::debug!(
        step,
        width,
        height,
        aspect = width as f64 / height as f64,
        "canvas stage"
    );
}
