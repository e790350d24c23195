//! Rectangles a renderer should draw for one evaluated frame.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::target::{TargetEvaluation, TargetState};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayColor {
    /// Left strip (or the lone strip of a partial target).
    Green,
    /// Right strip; only drawn for a complete target.
    Red,
    /// Aggregate target box.
    Yellow,
}

impl OverlayColor {
    pub fn rgb(self) -> [u8; 3] {
        match self {
            OverlayColor::Green => [0, 255, 0],
            OverlayColor::Red => [255, 0, 0],
            OverlayColor::Yellow => [255, 255, 0],
        }
    }
}

/// Outline from `top_left` to `bottom_right` (exclusive far corner).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayRect {
    pub top_left: Point2<i32>,
    pub bottom_right: Point2<i32>,
    pub color: OverlayColor,
}

/// Strip boxes first, aggregate box last. Empty for an absent target.
pub fn overlay_rects(eval: &TargetEvaluation) -> Vec<OverlayRect> {
    let strip_rect = |rect: peg_target_core::PixelRect, color| OverlayRect {
        top_left: rect.top_left(),
        bottom_right: rect.bottom_right(),
        color,
    };
    let mut out = match &eval.state {
        TargetState::Absent => return Vec::new(),
        TargetState::Partial { strip } => vec![strip_rect(strip.rect, OverlayColor::Green)],
        TargetState::Complete { left, right } => vec![
            strip_rect(left.rect, OverlayColor::Green),
            strip_rect(right.rect, OverlayColor::Red),
        ],
    };
    out.push(OverlayRect {
        top_left: eval.geometry.top_left(),
        bottom_right: eval.geometry.bottom_right(),
        color: OverlayColor::Yellow,
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ContourDescriptor;
    use crate::distance::CameraModel;
    use peg_target_core::PixelRect;

    fn strip(x: i32, y: i32, w: i32, h: i32) -> ContourDescriptor {
        ContourDescriptor {
            index: 0,
            rect: PixelRect::new(x, y, w, h),
            area: 1.0,
        }
    }

    #[test]
    fn absent_target_draws_nothing() {
        let eval = TargetEvaluation::new(TargetState::Absent, &CameraModel::default());
        assert!(overlay_rects(&eval).is_empty());
    }

    #[test]
    fn partial_target_has_no_red_box() {
        let state = TargetState::Partial {
            strip: strip(5, 5, 10, 30),
        };
        let rects = overlay_rects(&TargetEvaluation::new(state, &CameraModel::default()));
        let colors: Vec<_> = rects.iter().map(|r| r.color).collect();
        assert_eq!(colors, vec![OverlayColor::Green, OverlayColor::Yellow]);
        assert_eq!(rects[0].top_left, rects[1].top_left);
        assert_eq!(rects[0].bottom_right, rects[1].bottom_right);
    }

    #[test]
    fn complete_target_draws_both_strips_and_the_span() {
        let state = TargetState::Complete {
            left: strip(10, 20, 30, 40),
            right: strip(80, 15, 25, 45),
        };
        let rects = overlay_rects(&TargetEvaluation::new(state, &CameraModel::default()));
        assert_eq!(rects.len(), 3);
        assert_eq!(rects[1].color, OverlayColor::Red);
        assert_eq!(rects[1].top_left, Point2::new(80, 15));
        assert_eq!(rects[2].top_left, Point2::new(10, 15));
        assert_eq!(rects[2].bottom_right, Point2::new(105, 60));
    }
}
