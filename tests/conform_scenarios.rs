//! End-to-end conformance scenarios driven through a scripted renderer.
//!
//! Each scenario feeds real feed constraints through the driver and checks
//! the exact canvas and rectangles handed to the renderer. The renderer
//! records what it was asked to draw instead of drawing anything.

use std::path::PathBuf;

use zenconform::{
    ConformError, ConformOptions, Conformer, Dimensions, Feed, Operation, Rect, RendererError,
    Resizer,
};

/// Renderer stand-in with scripted probe answers. Records the placement it
/// receives; optionally fails the render call.
struct ScriptedResizer {
    input: Dimensions,
    min_width: u32,
    max_width: u32,
    mod2: bool,
    processing_required: bool,
    hor_flipped: bool,
    ver_flipped: bool,
    axis_swapped: bool,
    fail_render: bool,
    rendered: Option<(Rect, Rect, Dimensions)>,
}

impl ScriptedResizer {
    /// Photo renderer: width band 320..=1080, no parity requirement.
    fn photo(width: u32, height: u32) -> Self {
        Self {
            input: Dimensions::new(width, height),
            min_width: 320,
            max_width: 1080,
            mod2: false,
            processing_required: false,
            hor_flipped: false,
            ver_flipped: false,
            axis_swapped: false,
            fail_render: false,
            rendered: None,
        }
    }

    /// Same width band with the H.264 even-parity requirement.
    fn mod2(mut self) -> Self {
        self.mod2 = true;
        self
    }

    fn axis_swapped(mut self) -> Self {
        self.axis_swapped = true;
        self
    }

    fn needs_processing(mut self) -> Self {
        self.processing_required = true;
        self
    }

    fn failing(mut self) -> Self {
        self.fail_render = true;
        self
    }
}

impl Resizer for ScriptedResizer {
    fn input_dimensions(&self) -> Dimensions {
        self.input
    }
    fn min_width(&self) -> u32 {
        self.min_width
    }
    fn max_width(&self) -> u32 {
        self.max_width
    }
    fn is_mod2_canvas_required(&self) -> bool {
        self.mod2
    }
    fn is_processing_required(&self) -> bool {
        self.processing_required
    }
    fn is_hor_flipped(&self) -> bool {
        self.hor_flipped
    }
    fn is_ver_flipped(&self) -> bool {
        self.ver_flipped
    }
    fn is_axis_swapped(&self) -> bool {
        self.axis_swapped
    }
    fn resize(
        &mut self,
        src: Rect,
        dst: Rect,
        canvas: Dimensions,
    ) -> Result<PathBuf, RendererError> {
        if self.fail_render {
            return Err("encoder exited with status 1".into());
        }
        self.rendered = Some((src, dst, canvas));
        Ok(PathBuf::from("/tmp/conformed.out"))
    }
}

// ── Concrete scenarios ──────────────────────────────────────────────────

#[test]
fn square_input_on_square_band_is_identity() {
    let conformer = Conformer::new(
        ConformOptions::new()
            .min_aspect_ratio(1.0)
            .max_aspect_ratio(1.0),
    )
    .unwrap();
    let resizer = ScriptedResizer::photo(1080, 1080);

    let placement = conformer.plan(&resizer).unwrap();
    assert_eq!(placement.canvas, Dimensions::new(1080, 1080));
    assert_eq!(placement.src, Rect::new(0, 0, 1080, 1080));
    assert_eq!(placement.dst, Rect::new(0, 0, 1080, 1080));
}

#[test]
fn wide_input_cropped_into_narrow_band() {
    let conformer = Conformer::new(
        ConformOptions::new()
            .operation(Operation::Crop)
            .min_aspect_ratio(1.2)
            .max_aspect_ratio(1.22),
    )
    .unwrap();
    let mut resizer = ScriptedResizer::photo(1080, 608);

    let path = conformer.conform(&mut resizer).unwrap();
    assert_eq!(path, Some(PathBuf::from("/tmp/conformed.out")));

    let (src, dst, canvas) = resizer.rendered.unwrap();
    assert_eq!(canvas, Dimensions::new(741, 608));
    let aspect = canvas.aspect();
    assert!(aspect >= 1.2 && aspect <= 1.22, "aspect {aspect} out of band");
    // Default horizontal focus centers the cut.
    assert_eq!(src, Rect::new(169, 0, 741, 608));
    assert_eq!(dst, Rect::new(0, 0, 741, 608));
}

#[test]
fn tiny_input_upscaled_to_width_floor() {
    let conformer = Conformer::new(ConformOptions::new()).unwrap();
    let mut resizer = ScriptedResizer::photo(100, 125);

    assert!(conformer.should_process(&resizer));
    conformer.conform(&mut resizer).unwrap().unwrap();

    let (src, dst, canvas) = resizer.rendered.unwrap();
    assert_eq!(canvas, Dimensions::new(320, 400));
    // Nothing to cut: the full input upscales onto the full canvas.
    assert_eq!(src, Rect::new(0, 0, 100, 125));
    assert_eq!(dst, Rect::new(0, 0, 320, 400));
}

#[test]
fn oversized_square_clamped_to_width_ceiling() {
    let conformer = Conformer::new(
        ConformOptions::new()
            .min_aspect_ratio(1.0)
            .max_aspect_ratio(1.0),
    )
    .unwrap();
    let mut resizer = ScriptedResizer::photo(1100, 1100);

    conformer.conform(&mut resizer).unwrap().unwrap();
    let (src, dst, canvas) = resizer.rendered.unwrap();
    assert_eq!(canvas, Dimensions::new(1080, 1080));
    assert_eq!(src, Rect::new(0, 0, 1100, 1100));
    assert_eq!(dst, Rect::new(0, 0, 1080, 1080));
}

#[test]
fn ideal_story_video_passes_untouched() {
    let conformer = Conformer::new(ConformOptions::new().feed(Feed::Story)).unwrap();
    let mut resizer = ScriptedResizer::photo(720, 1280).mod2();

    // 0.5625 sits inside the tight band and both sides are even.
    let placement = conformer.plan(&resizer).unwrap();
    assert_eq!(placement.canvas, Dimensions::new(720, 1280));

    // The guard agrees: nothing to do, the input path stays.
    assert!(!conformer.should_process(&resizer));
    assert_eq!(conformer.conform(&mut resizer).unwrap(), None);
    assert!(resizer.rendered.is_none());
}

#[test]
fn oversized_story_video_lands_on_1080x1920() {
    let conformer = Conformer::new(
        ConformOptions::new()
            .feed(Feed::Story)
            .allow_new_aspect_deviation(true),
    )
    .unwrap();
    let mut resizer = ScriptedResizer::photo(1081, 1921).mod2();

    conformer.conform(&mut resizer).unwrap().unwrap();
    let (src, _dst, canvas) = resizer.rendered.unwrap();
    assert_eq!(canvas, Dimensions::new(1080, 1920));
    assert_eq!(canvas.width % 2, 0);
    assert_eq!(canvas.height % 2, 0);
    assert!(src.fits_within(Dimensions::new(1081, 1921)));
}

// ── Guard behavior ──────────────────────────────────────────────────────

#[test]
fn acceptable_input_keeps_its_path() {
    let conformer = Conformer::new(ConformOptions::new()).unwrap();
    let mut resizer = ScriptedResizer::photo(1080, 1080);

    assert!(!conformer.should_process(&resizer));
    assert_eq!(conformer.conform(&mut resizer).unwrap(), None);
    assert!(resizer.rendered.is_none());
}

#[test]
fn renderer_side_need_forces_processing() {
    let conformer = Conformer::new(ConformOptions::new()).unwrap();
    let mut resizer = ScriptedResizer::photo(1080, 1080).needs_processing();

    assert!(conformer.should_process(&resizer));
    let path = conformer.conform(&mut resizer).unwrap();
    assert!(path.is_some());
    // Geometry was already legal, so the render is a straight re-encode.
    let (src, dst, canvas) = resizer.rendered.unwrap();
    assert_eq!(canvas, Dimensions::new(1080, 1080));
    assert_eq!(src, dst);
}

// ── Expand ──────────────────────────────────────────────────────────────

#[test]
fn expand_letterboxes_instead_of_cutting() {
    let conformer = Conformer::new(ConformOptions::new().operation(Operation::Expand)).unwrap();
    let mut resizer = ScriptedResizer::photo(1000, 400);

    conformer.conform(&mut resizer).unwrap().unwrap();
    let (src, dst, canvas) = resizer.rendered.unwrap();
    assert_eq!(canvas, Dimensions::new(1000, 524));
    assert_eq!(src, Rect::new(0, 0, 1000, 400));
    // Full input centered between the bars.
    assert_eq!(dst, Rect::new(0, 62, 1000, 400));
}

// ── Renderer interaction ────────────────────────────────────────────────

#[test]
fn axis_swapped_storage_receives_swapped_placement() {
    let conformer = Conformer::new(
        ConformOptions::new()
            .operation(Operation::Crop)
            .min_aspect_ratio(1.2)
            .max_aspect_ratio(1.22),
    )
    .unwrap();
    let mut resizer = ScriptedResizer::photo(1080, 608).axis_swapped();

    conformer.conform(&mut resizer).unwrap().unwrap();
    let (src, dst, canvas) = resizer.rendered.unwrap();
    // Same plan as the upright scenario, axes swapped at the handoff.
    assert_eq!(canvas, Dimensions::new(608, 741));
    assert_eq!(src, Rect::new(0, 169, 608, 741));
    assert_eq!(dst, Rect::new(0, 0, 608, 741));
}

#[test]
fn renderer_failure_propagates() {
    let conformer = Conformer::new(ConformOptions::new()).unwrap();
    let mut resizer = ScriptedResizer::photo(100, 125).failing();

    let err = conformer.conform(&mut resizer).unwrap_err();
    match err {
        ConformError::Renderer(inner) => {
            assert_eq!(inner.to_string(), "encoder exited with status 1");
        }
        other => panic!("expected renderer error, got {other:?}"),
    }
}

#[test]
fn canvas_failure_propagates() {
    // A pinned band leaves no even height to land on, so the Mod2 stage
    // cannot produce a legal canvas.
    let conformer = Conformer::new(
        ConformOptions::new()
            .feed(Feed::Story)
            .min_aspect_ratio(0.5625)
            .max_aspect_ratio(0.5625),
    )
    .unwrap();
    let mut resizer = ScriptedResizer::photo(562, 999).mod2();

    let err = conformer.conform(&mut resizer).unwrap_err();
    assert!(matches!(err, ConformError::Canvas(_)));
    assert!(resizer.rendered.is_none());
}
