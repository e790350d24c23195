use peg_target_core::{Contour, PixelRect};
use serde::{Deserialize, Serialize};

/// Derived view of one contour accepted by the classifier.
///
/// Computed once per accepted contour and never mutated afterwards.
/// `index` is the position of the source contour in the frame's input list.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContourDescriptor {
    pub index: usize,
    pub rect: PixelRect,
    pub area: f64,
}

impl ContourDescriptor {
    pub fn new(index: usize, contour: &Contour) -> Self {
        Self {
            index,
            rect: contour.bounding_rect(),
            area: contour.area(),
        }
    }

    #[inline]
    pub fn bounding_rect(&self) -> PixelRect {
        self.rect
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Left edge of the bounding rectangle; used for left/right ordering.
    #[inline]
    pub fn left_edge(&self) -> i32 {
        self.rect.x
    }
}
