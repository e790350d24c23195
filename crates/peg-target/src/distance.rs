//! Pinhole-camera distance estimate from the target's pixel height.

use serde::{Deserialize, Serialize};

use crate::target::{TargetGeometry, TargetState};

/// Outer height of the two-strip target, inches.
pub const TARGET_HEIGHT_IN: f64 = 5.0;
/// Outer width of the two-strip target (both strips plus the gap), inches.
pub const TARGET_WIDTH_IN: f64 = 10.25;
pub const INCHES_PER_METER: f64 = 39.37;
/// Horizontal field of view from the camera's published specs, degrees.
pub const HORIZONTAL_FOV_DEG: f64 = 49.0;
/// Vertical field of view, degrees (horizontal FOV scaled by 240/320).
pub const VERTICAL_FOV_DEG: f64 = 39.8;
pub const X_RESOLUTION: f64 = 320.0;
pub const Y_RESOLUTION: f64 = 240.0;
/// Distance reported when no strip was found, meters.
pub const ABSENT_DISTANCE: f64 = 99.9;

/// Invalid [`CameraModel`] values.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum CameraModelError {
    #[error("{name} must be finite and > 0 (got {value})")]
    NonPositive { name: &'static str, value: f64 },
    #[error("{name} must lie in (0, 90) degrees (got {value})")]
    FovOutOfRange { name: &'static str, value: f64 },
}

/// Target height and the vertical camera description the distance uses.
///
/// The defaults are the named constants of this module. Resolution is the
/// assumed capture resolution, not the size of whatever image the contours
/// came from. The width and horizontal constants have no field here: the
/// distance is measured on height only.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraModel {
    pub target_height_in: f64,
    pub vertical_fov_deg: f64,
    pub y_resolution: f64,
}

impl Default for CameraModel {
    fn default() -> Self {
        Self {
            target_height_in: TARGET_HEIGHT_IN,
            vertical_fov_deg: VERTICAL_FOV_DEG,
            y_resolution: Y_RESOLUTION,
        }
    }
}

impl CameraModel {
    pub fn validate(&self) -> Result<(), CameraModelError> {
        for (name, value) in [
            ("target_height_in", self.target_height_in),
            ("y_resolution", self.y_resolution),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CameraModelError::NonPositive { name, value });
            }
        }
        // tan() turns negative past a right angle
        let fov = self.vertical_fov_deg;
        if !(fov > 0.0 && fov < 90.0) {
            return Err(CameraModelError::FovOutOfRange {
                name: "vertical_fov_deg",
                value: fov,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn target_height_m(&self) -> f64 {
        self.target_height_in / INCHES_PER_METER
    }

    #[inline]
    pub fn vertical_fov_rad(&self) -> f64 {
        self.vertical_fov_deg.to_radians()
    }

    /// `height_m * y_resolution / (pixel_height * tan(vertical_fov))`.
    ///
    /// A zero pixel height gives `+inf`.
    pub fn distance_for_pixel_height(&self, pixel_height: i32) -> f64 {
        self.target_height_m() * self.y_resolution
            / (f64::from(pixel_height) * self.vertical_fov_rad().tan())
    }

    /// Distance in meters to the target described by `state`/`geometry`,
    /// or [`ABSENT_DISTANCE`] when no strip was found.
    pub fn estimate_distance(&self, state: &TargetState, geometry: &TargetGeometry) -> f64 {
        if !state.is_established() {
            return ABSENT_DISTANCE;
        }
        self.distance_for_pixel_height(geometry.max_height)
    }
}
