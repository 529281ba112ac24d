//! The renderer capability interface and the conformance driver.
//!
//! The core computes geometry; an external renderer does the pixel work.
//! Concrete photo/video renderers are strategy objects implementing
//! [`Resizer`] — the driver never dispatches on their kind.

use std::error::Error;
use std::path::PathBuf;

use crate::canvas::{CanvasConstraints, CanvasError};
use crate::geometry::{Dimensions, Rect};
use crate::options::{ConfigError, ConformOptions};
use crate::placement::{self, FlipState, Placement};

/// Boxed error renderers report failures with. Propagated verbatim — the
/// core contributes nothing to its content.
pub type RendererError = Box<dyn Error + Send + Sync>;

/// Capability interface to an external renderer.
pub trait Resizer {
    /// Logical upright dimensions of the input, after any implicit axis
    /// swap the storage format performs.
    fn input_dimensions(&self) -> Dimensions;

    /// Smallest legal canvas width for this renderer.
    fn min_width(&self) -> u32;

    /// Largest legal canvas width for this renderer.
    fn max_width(&self) -> u32;

    /// Whether the canvas must be even on both axes (H.264 and friends).
    fn is_mod2_canvas_required(&self) -> bool;

    /// Renderer-side reason to process regardless of geometry, e.g. a
    /// container or codec that must be transcoded anyway.
    fn is_processing_required(&self) -> bool;

    /// Whether the input is stored horizontally mirrored.
    fn is_hor_flipped(&self) -> bool;

    /// Whether the input is stored vertically mirrored.
    fn is_ver_flipped(&self) -> bool;

    /// Whether the pixel storage is rotated a quarter turn relative to the
    /// logical upright image. When true, the placement is axis-swapped
    /// before rendering.
    fn is_axis_swapped(&self) -> bool;

    /// Render the placement and return the output path.
    fn resize(
        &mut self,
        src: Rect,
        dst: Rect,
        canvas: Dimensions,
    ) -> Result<PathBuf, RendererError>;
}

/// Conformance failure.
///
/// Nothing is retried or swallowed; every kind is fatal for the call.
#[derive(Debug, thiserror::Error)]
pub enum ConformError {
    /// The configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The calculator could not satisfy the constraints.
    #[error(transparent)]
    Canvas(#[from] CanvasError),
    /// The external renderer failed.
    #[error("renderer error: {0}")]
    Renderer(RendererError),
}

/// Orchestrates the should-process guard, the canvas calculator, the
/// placement planner and the renderer.
///
/// # Example
///
/// ```no_run
/// use zenconform::{ConformOptions, Conformer, Feed, Resizer};
/// # fn renderer() -> Box<dyn Resizer> { unimplemented!() }
///
/// let conformer = Conformer::new(ConformOptions::new().feed(Feed::Story))?;
/// let mut resizer = renderer();
/// match conformer.conform(&mut *resizer)? {
///     Some(path) => println!("conformed to {}", path.display()),
///     None => println!("already acceptable"),
/// }
/// # Ok::<(), zenconform::ConformError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Conformer {
    options: ConformOptions,
}

impl Conformer {
    /// Validate `options` once and build a conformer. Everything downstream
    /// trusts the record.
    pub fn new(options: ConformOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        Ok(Self { options })
    }

    /// The validated options.
    pub fn options(&self) -> &ConformOptions {
        &self.options
    }

    /// Whether the input needs processing at all.
    ///
    /// False means the file is already acceptable: width inside the
    /// renderer's band, aspect inside the effective band, and no
    /// renderer-side processing need. The caller then keeps the input path
    /// unchanged.
    pub fn should_process<R: Resizer + ?Sized>(&self, resizer: &R) -> bool {
        let input = resizer.input_dimensions();
        let (min_aspect, max_aspect) = self.options.aspect_band();
        let aspect = input.aspect();

        let width_ok =
            resizer.min_width() <= input.width && input.width <= resizer.max_width();
        let aspect_ok = min_aspect <= aspect && aspect <= max_aspect;

        !width_ok || !aspect_ok || resizer.is_processing_required()
    }

    /// Compute the canvas and placement for the renderer's input, in
    /// logical upright space.
    pub fn plan<R: Resizer + ?Sized>(&self, resizer: &R) -> Result<Placement, CanvasError> {
        let input = resizer.input_dimensions();
        let (min_aspect, max_aspect) = self.options.aspect_band();

        let constraints = CanvasConstraints {
            feed: self.options.feed,
            operation: self.options.operation,
            mod2_required: resizer.is_mod2_canvas_required(),
            min_width: resizer.min_width(),
            max_width: resizer.max_width(),
            min_aspect_ratio: Some(min_aspect),
            max_aspect_ratio: Some(max_aspect),
            allow_aspect_deviation: self.options.allow_new_aspect_deviation,
        };
        let fit = constraints.compute(input)?;

        let flips = FlipState {
            horizontal: resizer.is_hor_flipped(),
            vertical: resizer.is_ver_flipped(),
        };
        Ok(placement::plan(
            self.options.operation,
            input,
            &fit,
            self.options.crop_focus(),
            flips,
        ))
    }

    /// Conform the input. Returns `Ok(None)` when no processing is needed;
    /// otherwise renders and returns the output path.
    ///
    /// When the renderer stores its pixels rotated, the placement is
    /// axis-swapped before the handoff.
    pub fn conform<R: Resizer + ?Sized>(
        &self,
        resizer: &mut R,
    ) -> Result<Option<PathBuf>, ConformError> {
        if !self.should_process(resizer) {
            return Ok(None);
        }

        let mut placement = self.plan(resizer)?;
        if resizer.is_axis_swapped() {
            placement = placement.swap_axes();
        }

        let path = resizer
            .resize(placement.src, placement.dst, placement.canvas)
            .map_err(ConformError::Renderer)?;
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Operation;
    use crate::profile::Feed;

    struct StubResizer {
        input: Dimensions,
        processing_required: bool,
    }

    impl Resizer for StubResizer {
        fn input_dimensions(&self) -> Dimensions {
            self.input
        }
        fn min_width(&self) -> u32 {
            320
        }
        fn max_width(&self) -> u32 {
            1080
        }
        fn is_mod2_canvas_required(&self) -> bool {
            false
        }
        fn is_processing_required(&self) -> bool {
            self.processing_required
        }
        fn is_hor_flipped(&self) -> bool {
            false
        }
        fn is_ver_flipped(&self) -> bool {
            false
        }
        fn is_axis_swapped(&self) -> bool {
            false
        }
        fn resize(
            &mut self,
            _src: Rect,
            _dst: Rect,
            _canvas: Dimensions,
        ) -> Result<PathBuf, RendererError> {
            Ok(PathBuf::from("/tmp/out"))
        }
    }

    fn conformer() -> Conformer {
        Conformer::new(ConformOptions::new()).unwrap()
    }

    #[test]
    fn invalid_options_rejected_at_construction() {
        let err = Conformer::new(ConformOptions::new().hor_crop_focus(99)).unwrap_err();
        assert_eq!(err, ConfigError::HorCropFocus(99));
    }

    #[test]
    fn acceptable_input_skips_processing() {
        let mut resizer = StubResizer {
            input: Dimensions::new(1080, 1080),
            processing_required: false,
        };
        assert!(!conformer().should_process(&resizer));
        assert_eq!(conformer().conform(&mut resizer).unwrap(), None);
    }

    #[test]
    fn width_violation_triggers_processing() {
        let resizer = StubResizer {
            input: Dimensions::new(1100, 1100),
            processing_required: false,
        };
        assert!(conformer().should_process(&resizer));
    }

    #[test]
    fn aspect_violation_triggers_processing() {
        let resizer = StubResizer {
            input: Dimensions::new(1000, 400),
            processing_required: false,
        };
        assert!(conformer().should_process(&resizer));
    }

    #[test]
    fn renderer_need_triggers_processing() {
        let resizer = StubResizer {
            input: Dimensions::new(1080, 1080),
            processing_required: true,
        };
        assert!(conformer().should_process(&resizer));
    }

    #[test]
    fn plan_respects_operation() {
        let resizer = StubResizer {
            input: Dimensions::new(1000, 400),
            processing_required: false,
        };
        let crop = Conformer::new(ConformOptions::new().operation(Operation::Crop))
            .unwrap()
            .plan(&resizer)
            .unwrap();
        // Width cut down to the 1.91 band edge.
        assert_eq!(crop.canvas, Dimensions::new(764, 400));
        assert_eq!(crop.dst, Rect::covering(crop.canvas));

        let expand = Conformer::new(
            ConformOptions::new()
                .feed(Feed::General)
                .operation(Operation::Expand),
        )
        .unwrap()
        .plan(&resizer)
        .unwrap();
        // Height grown instead.
        assert_eq!(expand.canvas, Dimensions::new(1000, 524));
        assert_eq!(expand.src, Rect::covering(Dimensions::new(1000, 400)));
    }
}
