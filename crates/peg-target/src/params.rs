use serde::{Deserialize, Serialize};

use crate::classifier::{FilterParamsError, StripShapeFilter};
use crate::distance::{CameraModel, CameraModelError};

/// Errors returned when building a detector from invalid parameters.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum PegTargetParamsError {
    #[error("invalid strip filter: {0}")]
    Filter(#[from] FilterParamsError),
    #[error("invalid camera model: {0}")]
    Camera(#[from] CameraModelError),
}

/// Configuration for the peg target detector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PegTargetParams {
    /// Shape filter used as the strip classifier.
    ///
    /// Missing in JSON means [`StripShapeFilter::peg_strip`]; a partially
    /// given filter fills the remaining bounds from the permissive default.
    #[serde(default = "StripShapeFilter::peg_strip")]
    pub filter: StripShapeFilter,
    #[serde(default)]
    pub camera: CameraModel,
}

impl Default for PegTargetParams {
    fn default() -> Self {
        Self {
            filter: StripShapeFilter::peg_strip(),
            camera: CameraModel::default(),
        }
    }
}

impl PegTargetParams {
    pub fn validate(&self) -> Result<(), PegTargetParamsError> {
        self.filter.validate()?;
        self.camera.validate()?;
        Ok(())
    }
}
