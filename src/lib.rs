//! Canvas conformance planning for media uploads.
//!
//! Given an input photo or video and a set of feed constraints (width band,
//! aspect band, even-parity requirement), computes a legal output canvas and
//! the source/destination rectangles that re-render the input onto it by
//! cropping or by expanding (letterboxing). Pure geometry — no pixel
//! operations; rendering is delegated to a [`Resizer`] collaborator.
//!
//! # Modules
//!
//! - [`geometry`] — `Dimensions`, `Rect`, and the rounding contract
//! - [`profile`] — feed classes and their aspect bands
//! - [`options`] — the validated configuration record
//! - [`canvas`] — the canvas calculator (stages A–D)
//! - [`placement`] — source/destination planning and the axis-swap adapter
//! - [`resizer`] — the renderer capability trait and the driver
//!
//! # Example
//!
//! ```
//! use zenconform::{CanvasConstraints, Dimensions, Feed, Operation};
//!
//! let constraints = CanvasConstraints {
//!     feed: Feed::General,
//!     operation: Operation::Crop,
//!     mod2_required: false,
//!     min_width: 320,
//!     max_width: 1080,
//!     min_aspect_ratio: Some(1.2),
//!     max_aspect_ratio: Some(1.22),
//!     allow_aspect_deviation: false,
//! };
//!
//! let fit = constraints.compute(Dimensions::new(1080, 608)).unwrap();
//! assert_eq!(fit.canvas, Dimensions::new(741, 608));
//! ```

#![forbid(unsafe_code)]

pub mod canvas;
pub mod geometry;
pub mod options;
pub mod placement;
pub mod profile;
pub mod resizer;

pub use canvas::{CanvasConstraints, CanvasError, CanvasFit};
pub use geometry::{Dimensions, Rect, Rounding};
pub use options::{ConfigError, ConformOptions, CropFocus, Operation, Rgb};
pub use placement::{FlipState, Placement, plan};
pub use profile::Feed;
pub use resizer::{ConformError, Conformer, RendererError, Resizer};
