//! Placement planning: the source and destination rectangles that realize a
//! computed canvas.
//!
//! Crop mode recovers the *ideal canvas* (the pre-Mod2 result) from the
//! [`CanvasFit`] deltas, projects it back into input space to find the
//! sampled window, and biases that window by the crop focus. Expand mode
//! fits the whole input inside the canvas and centers it. The planner never
//! fails — all validation happened in the calculator.

use crate::canvas::CanvasFit;
use crate::geometry::{Dimensions, Rect, Rounding};
use crate::options::{CropFocus, Operation};

/// Flip state reported by the renderer. A flipped axis inverts the crop
/// focus so the bias still points at the same visual content.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FlipState {
    pub horizontal: bool,
    pub vertical: bool,
}

/// A render placement: sample `src` from the input and paint it onto `dst`
/// within `canvas`.
///
/// Guaranteed by construction: `src` lies inside the input, `dst` inside the
/// canvas.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    /// Window of the input to sample.
    pub src: Rect,
    /// Where the sample lands on the canvas.
    pub dst: Rect,
    /// Output canvas dimensions.
    pub canvas: Dimensions,
}

impl Placement {
    /// Swap every axis, for renderers whose pixel storage is rotated
    /// relative to the logical upright image. Planning itself always runs
    /// in upright space; this adapter is applied last.
    pub const fn swap_axes(self) -> Self {
        Self {
            src: self.src.swap_axes(),
            dst: self.dst.swap_axes(),
            canvas: self.canvas.swap_axes(),
        }
    }
}

/// Plan the placement of `input` onto the canvas computed in `fit`.
pub fn plan(
    operation: Operation,
    input: Dimensions,
    fit: &CanvasFit,
    focus: CropFocus,
    flips: FlipState,
) -> Placement {
    match operation {
        Operation::Crop => plan_crop(input, fit, focus, flips),
        Operation::Expand => plan_expand(input, fit),
    }
}

fn plan_crop(input: Dimensions, fit: &CanvasFit, focus: CropFocus, flips: FlipState) -> Placement {
    let ideal = fit.ideal_canvas();

    // Which axis survived the crop decides the overall scale: comparing the
    // aspects tells us which dimension was cut, and the other one maps the
    // ideal canvas back onto the input 1:1.
    let scale_w = ideal.width as f64 / input.width as f64;
    let scale_h = ideal.height as f64 / input.height as f64;
    let overall = if ideal.aspect() < input.aspect() {
        scale_h // width was cropped
    } else {
        scale_w // height was cropped, or nothing was
    };

    // Ideal canvas in input space, then re-apply the Mod2 deltas there so
    // the sampled window matches the final canvas, not the ideal one.
    let projected = ideal.with_rescaling(1.0 / overall, Rounding::Round);
    let delta_w = (fit.mod2_width_diff as f64 / overall).round() as i64;
    let delta_h = (fit.mod2_height_diff as f64 / overall).round() as i64;
    let kept_w = (projected.width as i64 + delta_w).min(input.width as i64);
    let kept_h = (projected.height as i64 + delta_h).min(input.height as i64);

    let hor_focus = if flips.horizontal {
        -focus.horizontal
    } else {
        focus.horizontal
    };
    let ver_focus = if flips.vertical {
        -focus.vertical
    } else {
        focus.vertical
    };

    let (x1, x2) = focus_span(input.width, kept_w, hor_focus);
    let (y1, y2) = focus_span(input.height, kept_h, ver_focus);

    Placement {
        src: Rect::new(x1, y1, x2 - x1, y2 - y1),
        dst: Rect::covering(fit.canvas),
        canvas: fit.canvas,
    }
}

/// Distribute a crop deficit along one axis.
///
/// `focus` is `-50..=50`: `-50` keeps the near edge, `0` centers, `50`
/// keeps the far edge. Returns the kept span `(near, far)`.
fn focus_span(total: u32, kept: i64, focus: i32) -> (u32, u32) {
    let deficit = total as i64 - kept;
    if deficit <= 0 {
        return (0, total);
    }
    let focus = focus.clamp(-50, 50);
    let near = (deficit as f64 * (50 + focus) as f64 / 100.0).floor() as i64;
    let far = total as i64 - (deficit - near);
    (near as u32, far as u32)
}

fn plan_expand(input: Dimensions, fit: &CanvasFit) -> Placement {
    let canvas = fit.canvas;
    let src = Rect::covering(input);

    let scale = (canvas.width as f64 / input.width as f64)
        .min(canvas.height as f64 / input.height as f64);
    // The ceil can overshoot the canvas by one pixel when the scale itself
    // rounded up; the fitted image must stay inside the canvas.
    let scaled = src.with_rescaling(scale, Rounding::Ceil);
    let dst_w = scaled.width.min(canvas.width);
    let dst_h = scaled.height.min(canvas.height);

    let dst_x = (canvas.width - dst_w) / 2;
    let dst_y = (canvas.height - dst_h) / 2;

    Placement {
        src,
        dst: Rect::new(dst_x, dst_y, dst_w, dst_h),
        canvas,
    }
}
