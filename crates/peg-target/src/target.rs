//! Target state and the aggregate geometry derived from the selected strips.

use std::fmt;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::descriptor::ContourDescriptor;
use crate::distance::CameraModel;

/// How much of the two-strip target a frame shows.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetState {
    /// No qualifying strip.
    Absent,
    /// One strip; it stands for both the left and the right side.
    Partial { strip: ContourDescriptor },
    /// Two strips with `left.left_edge() <= right.left_edge()`.
    Complete {
        left: ContourDescriptor,
        right: ContourDescriptor,
    },
}

impl TargetState {
    /// At least one strip was found.
    #[inline]
    pub fn is_established(&self) -> bool {
        !matches!(self, TargetState::Absent)
    }

    /// Both strips were found.
    #[inline]
    pub fn is_complete(&self) -> bool {
        matches!(self, TargetState::Complete { .. })
    }

    pub fn left(&self) -> Option<&ContourDescriptor> {
        match self {
            TargetState::Absent => None,
            TargetState::Partial { strip } => Some(strip),
            TargetState::Complete { left, .. } => Some(left),
        }
    }

    pub fn right(&self) -> Option<&ContourDescriptor> {
        match self {
            TargetState::Absent => None,
            TargetState::Partial { strip } => Some(strip),
            TargetState::Complete { right, .. } => Some(right),
        }
    }
}

/// Aggregate bounding box of the selected strips, in pixels.
///
/// All zero for an absent target. `aspect_ratio` is infinite (or NaN) when
/// `max_height` is zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetGeometry {
    pub left_edge: i32,
    pub right_edge: i32,
    pub top_edge: i32,
    pub bottom_edge: i32,
    pub max_width: i32,
    pub max_height: i32,
    pub max_area: i64,
    #[serde(with = "crate::non_finite")]
    pub aspect_ratio: f64,
    pub center_x: i32,
}

impl TargetGeometry {
    pub fn from_state(state: &TargetState) -> Self {
        match state {
            TargetState::Absent => Self::default(),
            TargetState::Partial { strip } => Self::spanning(strip, strip),
            TargetState::Complete { left, right } => Self::spanning(left, right),
        }
    }

    /// Box from the left strip's left edge to the right strip's right edge,
    /// covering both strips vertically.
    fn spanning(left: &ContourDescriptor, right: &ContourDescriptor) -> Self {
        let (l, r) = (left.rect, right.rect);
        let left_edge = l.left();
        let right_edge = r.right();
        let top_edge = l.top().min(r.top());
        let bottom_edge = l.bottom().max(r.bottom());
        let max_width = right_edge.saturating_sub(left_edge);
        let max_height = bottom_edge.saturating_sub(top_edge);
        Self {
            left_edge,
            right_edge,
            top_edge,
            bottom_edge,
            max_width,
            max_height,
            max_area: i64::from(max_width) * i64::from(max_height),
            aspect_ratio: f64::from(max_width) / f64::from(max_height),
            center_x: left_edge.saturating_add(max_width.div_euclid(2)),
        }
    }

    #[inline]
    pub fn top_left(&self) -> Point2<i32> {
        Point2::new(self.left_edge, self.top_edge)
    }

    #[inline]
    pub fn bottom_right(&self) -> Point2<i32> {
        Point2::new(self.right_edge, self.bottom_edge)
    }
}

/// Everything one frame yields: state, geometry and distance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetEvaluation {
    pub state: TargetState,
    pub geometry: TargetGeometry,
    /// Meters; [`crate::ABSENT_DISTANCE`] when the target is absent.
    #[serde(with = "crate::non_finite")]
    pub distance_m: f64,
}

impl TargetEvaluation {
    pub fn new(state: TargetState, camera: &CameraModel) -> Self {
        let geometry = TargetGeometry::from_state(&state);
        let distance_m = camera.estimate_distance(&state, &geometry);
        Self {
            state,
            geometry,
            distance_m,
        }
    }

    #[inline]
    pub fn is_established(&self) -> bool {
        self.state.is_established()
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    #[inline]
    pub fn left(&self) -> Option<&ContourDescriptor> {
        self.state.left()
    }

    #[inline]
    pub fn right(&self) -> Option<&ContourDescriptor> {
        self.state.right()
    }
}

/// Multi-line statistics dump.
impl fmt::Display for TargetEvaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let g = &self.geometry;
        writeln!(f, "target statistics")?;
        writeln!(
            f,
            "  established={} complete={}",
            self.is_established(),
            self.is_complete()
        )?;
        for (name, strip) in [("left", self.left()), ("right", self.right())] {
            if let Some(s) = strip {
                let r = s.rect;
                writeln!(
                    f,
                    "  {name} strip #{}: x={} y={} width={} height={} area={}",
                    s.index, r.x, r.y, r.width, r.height, s.area
                )?;
            }
        }
        writeln!(f, "  left_edge={} right_edge={}", g.left_edge, g.right_edge)?;
        writeln!(f, "  top_edge={} bottom_edge={}", g.top_edge, g.bottom_edge)?;
        writeln!(f, "  max_width={} max_height={}", g.max_width, g.max_height)?;
        writeln!(
            f,
            "  max_area={} aspect_ratio={:.3}",
            g.max_area, g.aspect_ratio
        )?;
        write!(f, "  center_x={} distance={:.3}m", g.center_x, self.distance_m)
    }
}
