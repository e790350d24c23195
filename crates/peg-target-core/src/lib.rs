//! Contour geometry shared by the peg target evaluator.
//!
//! Everything here is plain integer/float geometry over contours that an
//! upstream vision stage already extracted. There is no image type and no
//! detection logic in this crate.

mod contour;
mod logger;
mod rect;

pub use contour::Contour;
pub use rect::PixelRect;

#[cfg(feature = "tracing")]
pub use logger::init_frame_tracing;

pub use logger::{init_frame_logger, level_for_verbosity};
