use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Upright pixel rectangle, origin at the top-left, `y` growing downward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    /// Exclusive right edge, `x + width`, saturating at `i32::MAX`.
    #[inline]
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    /// Exclusive bottom edge, `y + height`, saturating at `i32::MAX`.
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    #[inline]
    pub fn top_left(&self) -> Point2<i32> {
        Point2::new(self.left(), self.top())
    }

    #[inline]
    pub fn bottom_right(&self) -> Point2<i32> {
        Point2::new(self.right(), self.bottom())
    }

    pub fn area(&self) -> i64 {
        i64::from(self.width) * i64::from(self.height)
    }

    /// `width / height`. Infinite for a zero-height rectangle with non-zero
    /// width, NaN when both are zero.
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}
