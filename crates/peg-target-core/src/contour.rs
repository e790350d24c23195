use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::PixelRect;

/// Closed polygon outlining one detected region, in pixel coordinates.
///
/// The last point connects back to the first. Point order is whatever the
/// upstream extractor produced and is kept verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Contour {
    points: Vec<Point2<i32>>,
}

impl Contour {
    pub fn new(points: Vec<Point2<i32>>) -> Self {
        Self { points }
    }

    /// Build a contour from `(x, y)` pairs.
    pub fn from_xy(points: &[(i32, i32)]) -> Self {
        Self::new(points.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    /// Axis-aligned rectangle traced clockwise from `rect.top_left()`.
    ///
    /// Corners are placed on the last covered pixel, so
    /// `Contour::from_rect(r).bounding_rect() == r` for any non-empty `r`.
    pub fn from_rect(rect: PixelRect) -> Self {
        let x1 = rect.x.saturating_add(rect.width.saturating_sub(1).max(0));
        let y1 = rect.y.saturating_add(rect.height.saturating_sub(1).max(0));
        Self::from_xy(&[(rect.x, rect.y), (x1, rect.y), (x1, y1), (rect.x, y1)])
    }

    #[inline]
    pub fn points(&self) -> &[Point2<i32>] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Smallest upright rectangle covering every point.
    ///
    /// Uses the inclusive pixel convention: a single point yields a 1×1
    /// rectangle. An empty contour yields the zero rectangle. Extents wider
    /// than `i32::MAX` saturate.
    pub fn bounding_rect(&self) -> PixelRect {
        let Some(first) = self.points.first() else {
            return PixelRect::default();
        };
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &self.points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        PixelRect::new(
            min_x,
            min_y,
            inclusive_extent(min_x, max_x),
            inclusive_extent(min_y, max_y),
        )
    }

    /// Enclosed area (absolute shoelace sum). Zero for fewer than 3 points.
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let twice: i128 = (0..n)
            .map(|i| {
                let a = self.points[i];
                let b = self.points[(i + 1) % n];
                i128::from(a.x) * i128::from(b.y) - i128::from(b.x) * i128::from(a.y)
            })
            .sum();
        twice.unsigned_abs() as f64 * 0.5
    }

    /// Closed arc length, including the edge from the last point back to the first.
    pub fn perimeter(&self) -> f64 {
        let n = self.points.len();
        if n < 2 {
            return 0.0;
        }
        (0..n)
            .map(|i| {
                let a = self.points[i].cast::<f64>();
                let b = self.points[(i + 1) % n].cast::<f64>();
                (b - a).norm()
            })
            .sum()
    }

    /// Convex hull (Andrew's monotone chain), counter-clockwise in `y`-up terms.
    ///
    /// Collinear points on the hull boundary are dropped.
    pub fn convex_hull(&self) -> Contour {
        let mut pts = self.points.clone();
        pts.sort_unstable_by_key(|p| (p.x, p.y));
        pts.dedup();
        if pts.len() < 3 {
            return Contour::new(pts);
        }

        let mut hull: Vec<Point2<i32>> = Vec::with_capacity(pts.len() * 2);
        push_chain(&mut hull, pts.iter().copied());
        push_chain(&mut hull, pts.iter().rev().copied());
        Contour::new(hull)
    }

    /// Contour area over convex hull area, in `[0, 1]`. Zero for degenerate hulls.
    pub fn solidity(&self) -> f64 {
        let hull_area = self.convex_hull().area();
        if hull_area <= 0.0 {
            return 0.0;
        }
        self.area() / hull_area
    }
}

impl From<Vec<Point2<i32>>> for Contour {
    fn from(points: Vec<Point2<i32>>) -> Self {
        Self::new(points)
    }
}

/// Append one monotone chain; its last point is dropped because it starts
/// the next chain.
fn push_chain(hull: &mut Vec<Point2<i32>>, pts: impl Iterator<Item = Point2<i32>>) {
    let floor = hull.len();
    for p in pts {
        while hull.len() >= floor + 2 {
            let n = hull.len();
            if cross(hull[n - 2], hull[n - 1], p) > 0 {
                break;
            }
            hull.pop();
        }
        hull.push(p);
    }
    hull.pop();
}

#[inline]
fn inclusive_extent(min: i32, max: i32) -> i32 {
    let extent = i64::from(max) - i64::from(min) + 1;
    i32::try_from(extent).unwrap_or(i32::MAX)
}

/// Z component of `(a - o) x (b - o)`; products of full-range `i32`
/// differences need `i128`.
#[inline]
fn cross(o: Point2<i32>, a: Point2<i32>, b: Point2<i32>) -> i128 {
    let (ax, ay) = (i128::from(a.x) - i128::from(o.x), i128::from(a.y) - i128::from(o.y));
    let (bx, by) = (i128::from(b.x) - i128::from(o.x), i128::from(b.y) - i128::from(o.y));
    ax * by - ay * bx
}
