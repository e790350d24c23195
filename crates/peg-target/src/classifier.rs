//! Shape predicate deciding whether a raw contour looks like a target strip.

use peg_target_core::Contour;
use serde::{Deserialize, Serialize};

/// Decides whether a contour matches the expected strip shape.
///
/// Implemented for any `Fn(&Contour) -> bool`, so callers with their own
/// matcher can pass a closure straight to the detector.
pub trait ContourClassifier {
    fn is_target_strip(&self, contour: &Contour) -> bool;
}

impl<F> ContourClassifier for F
where
    F: Fn(&Contour) -> bool,
{
    fn is_target_strip(&self, contour: &Contour) -> bool {
        self(contour)
    }
}

/// Invalid [`StripShapeFilter`] bounds.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FilterParamsError {
    #[error("{name} must be finite and >= 0 (got {value})")]
    NegativeBound { name: &'static str, value: f64 },
    #[error("{name} range is empty ({min} > {max})")]
    EmptyRange {
        name: &'static str,
        min: f64,
        max: f64,
    },
    #[error("solidity bounds must lie in [0, 1] (got [{min}, {max}])")]
    SolidityOutOfRange { min: f64, max: f64 },
}

/// Contour filter driven by bounding-box, area, perimeter, convexity and
/// vertex-count bounds.
///
/// Width, height and ratio are measured on the contour's bounding
/// rectangle; `ratio = width / height`. Empty contours never pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StripShapeFilter {
    pub min_area: f64,
    pub min_perimeter: f64,
    pub min_width: f64,
    pub max_width: f64,
    pub min_height: f64,
    pub max_height: f64,
    /// `[min, max]` of contour area over convex hull area.
    pub solidity: [f64; 2],
    pub min_vertices: usize,
    pub max_vertices: usize,
    pub min_ratio: f64,
    pub max_ratio: f64,
}

impl Default for StripShapeFilter {
    fn default() -> Self {
        Self {
            min_area: 0.0,
            min_perimeter: 0.0,
            min_width: 0.0,
            max_width: 1_000_000.0,
            min_height: 0.0,
            max_height: 1_000_000.0,
            solidity: [0.0, 1.0],
            min_vertices: 0,
            max_vertices: 1_000_000,
            min_ratio: 0.0,
            max_ratio: 1_000_000.0,
        }
    }
}

impl StripShapeFilter {
    /// Preset for one retro-reflective strip of the peg target: 2 in wide,
    /// 5 in tall, upright, filled.
    pub fn peg_strip() -> Self {
        Self {
            min_area: 20.0,
            min_height: 6.0,
            solidity: [0.75, 1.0],
            min_vertices: 4,
            min_ratio: 0.2,
            max_ratio: 0.8,
            ..Self::default()
        }
    }

    /// Check that every bound is non-negative and every range non-empty.
    pub fn validate(&self) -> Result<(), FilterParamsError> {
        for (name, value) in [
            ("min_area", self.min_area),
            ("min_perimeter", self.min_perimeter),
            ("min_width", self.min_width),
            ("min_height", self.min_height),
            ("min_ratio", self.min_ratio),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(FilterParamsError::NegativeBound { name, value });
            }
        }
        for (name, min, max) in [
            ("width", self.min_width, self.max_width),
            ("height", self.min_height, self.max_height),
            ("ratio", self.min_ratio, self.max_ratio),
            (
                "vertices",
                self.min_vertices as f64,
                self.max_vertices as f64,
            ),
        ] {
            if min > max {
                return Err(FilterParamsError::EmptyRange { name, min, max });
            }
        }
        let [min, max] = self.solidity;
        if !(0.0..=1.0).contains(&min) || !(0.0..=1.0).contains(&max) {
            return Err(FilterParamsError::SolidityOutOfRange { min, max });
        }
        if min > max {
            return Err(FilterParamsError::EmptyRange {
                name: "solidity",
                min,
                max,
            });
        }
        Ok(())
    }
}

impl ContourClassifier for StripShapeFilter {
    fn is_target_strip(&self, contour: &Contour) -> bool {
        if contour.is_empty() {
            return false;
        }
        let rect = contour.bounding_rect();
        let width = f64::from(rect.width);
        let height = f64::from(rect.height);
        if width < self.min_width || width > self.max_width {
            return false;
        }
        if height < self.min_height || height > self.max_height {
            return false;
        }
        let area = contour.area();
        if area < self.min_area {
            return false;
        }
        if contour.perimeter() < self.min_perimeter {
            return false;
        }
        let [min_solidity, max_solidity] = self.solidity;
        let solidity = contour.solidity();
        if solidity < min_solidity || solidity > max_solidity {
            return false;
        }
        let vertices = contour.len();
        if vertices < self.min_vertices || vertices > self.max_vertices {
            return false;
        }
        let ratio = width / height;
        ratio >= self.min_ratio && ratio <= self.max_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peg_target_core::PixelRect;

    fn strip(x: i32, y: i32, w: i32, h: i32) -> Contour {
        Contour::from_rect(PixelRect::new(x, y, w, h))
    }

    #[test]
    fn default_filter_accepts_any_non_empty_contour() {
        let filter = StripShapeFilter::default();
        assert!(filter.validate().is_ok());
        assert!(filter.is_target_strip(&strip(0, 0, 50, 3)));
        assert!(filter.is_target_strip(&Contour::from_xy(&[(4, 4)])));
        assert!(!filter.is_target_strip(&Contour::default()));
    }

    #[test]
    fn peg_strip_preset_prefers_upright_strips() {
        let filter = StripShapeFilter::peg_strip();
        assert!(filter.validate().is_ok());
        assert!(filter.is_target_strip(&strip(40, 30, 10, 25)));
        // lying on its side
        assert!(!filter.is_target_strip(&strip(40, 30, 25, 10)));
        // too small
        assert!(!filter.is_target_strip(&strip(40, 30, 2, 5)));
    }

    #[test]
    fn hollow_shapes_fail_solidity() {
        let filter = StripShapeFilter {
            solidity: [0.9, 1.0],
            ..StripShapeFilter::default()
        };
        // U shape: two legs joined at the bottom
        let u = Contour::from_xy(&[
            (0, 0),
            (3, 0),
            (3, 20),
            (7, 20),
            (7, 0),
            (10, 0),
            (10, 24),
            (0, 24),
        ]);
        assert!(u.solidity() < 0.9);
        assert!(!filter.is_target_strip(&u));
    }

    #[test]
    fn closures_are_classifiers() {
        let tall = |c: &Contour| c.bounding_rect().height > 10;
        assert!(tall.is_target_strip(&strip(0, 0, 4, 20)));
        assert!(!tall.is_target_strip(&strip(0, 0, 4, 5)));
    }

    #[test]
    fn validate_rejects_inverted_ranges() {
        let filter = StripShapeFilter {
            min_ratio: 2.0,
            max_ratio: 1.0,
            ..StripShapeFilter::default()
        };
        assert_eq!(
            filter.validate(),
            Err(FilterParamsError::EmptyRange {
                name: "ratio",
                min: 2.0,
                max: 1.0
            })
        );

        let filter = StripShapeFilter {
            min_area: -1.0,
            ..StripShapeFilter::default()
        };
        assert!(matches!(
            filter.validate(),
            Err(FilterParamsError::NegativeBound {
                name: "min_area",
                ..
            })
        ));

        let filter = StripShapeFilter {
            solidity: [0.5, 1.5],
            ..StripShapeFilter::default()
        };
        assert!(matches!(
            filter.validate(),
            Err(FilterParamsError::SolidityOutOfRange { .. })
        ));
    }
}
