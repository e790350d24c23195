//! Peg target evaluation for a single video frame.
//!
//! The target is two upright retro-reflective strips side by side. Given the
//! contours an upstream vision stage extracted from one frame, this crate
//! decides whether the target is visible, whether both strips are visible,
//! where it is and how far away it is.
//!
//! ## Quickstart
//!
//! ```
//! use peg_target::{Contour, PegTargetDetector, PegTargetParams, PixelRect, TargetState};
//!
//! let detector = PegTargetDetector::new(PegTargetParams::default()).unwrap();
//! let frame = vec![
//!     Contour::from_rect(PixelRect::new(80, 15, 25, 45)),
//!     Contour::from_rect(PixelRect::new(10, 20, 30, 40)),
//! ];
//! let eval = detector.evaluate(&frame);
//! assert!(matches!(eval.state, TargetState::Complete { .. }));
//! assert_eq!(eval.geometry.center_x, 57);
//! ```
//!
//! Pipeline:
//! 1. Each contour is tested by a [`ContourClassifier`] (by default a
//!    [`StripShapeFilter`]).
//! 2. A two-slot scan keeps the two largest accepted contours and orders
//!    them left/right ([`select_strips`]).
//! 3. The strips are merged into one bounding box ([`TargetGeometry`]).
//! 4. The box height gives a pinhole-camera distance ([`CameraModel`]).
//!
//! Each frame is evaluated independently; nothing is kept between calls.

mod classifier;
mod descriptor;
mod detector;
mod distance;
pub mod io;
mod non_finite;
mod overlay;
mod params;
mod select;
mod target;

pub use classifier::{ContourClassifier, FilterParamsError, StripShapeFilter};
pub use descriptor::ContourDescriptor;
pub use detector::{evaluate_frame, PegTargetDetector};
pub use distance::{
    CameraModel, CameraModelError, ABSENT_DISTANCE, HORIZONTAL_FOV_DEG, INCHES_PER_METER,
    TARGET_HEIGHT_IN, TARGET_WIDTH_IN, VERTICAL_FOV_DEG, X_RESOLUTION, Y_RESOLUTION,
};
pub use overlay::{overlay_rects, OverlayColor, OverlayRect};
pub use params::{PegTargetParams, PegTargetParamsError};
pub use select::{select_from_descriptors, select_strips};
pub use target::{TargetEvaluation, TargetGeometry, TargetState};

pub use peg_target_core::{Contour, PixelRect};
