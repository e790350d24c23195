//! JSON frame input, configuration and report helpers.

use std::{
    fs,
    path::{Path, PathBuf},
};

use peg_target_core::Contour;
use serde::{Deserialize, Serialize};

use crate::overlay::{overlay_rects, OverlayRect};
use crate::params::{PegTargetParams, PegTargetParamsError};
use crate::{PegTargetDetector, TargetEvaluation};

#[derive(thiserror::Error, Debug)]
pub enum PegIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Contours of one frame, in the order the extractor produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameContours {
    pub contours: Vec<Contour>,
}

impl FrameContours {
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, PegIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), PegIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Configuration for evaluating one frame file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PegDetectConfig {
    #[serde(default)]
    pub frame_path: Option<String>,
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub params: PegTargetParams,
}

impl PegDetectConfig {
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, PegIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), PegIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the output report path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("peg_target_report.json"))
    }

    pub fn build_detector(&self) -> Result<PegTargetDetector, PegTargetParamsError> {
        PegTargetDetector::new(self.params.clone())
    }
}

/// Result of evaluating one frame file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PegDetectReport {
    pub frame_path: String,
    pub num_contours: usize,
    pub num_accepted: usize,
    #[serde(default)]
    pub evaluation: Option<TargetEvaluation>,
    #[serde(default)]
    pub overlay: Vec<OverlayRect>,
}

impl PegDetectReport {
    pub fn new(frame_path: &Path, frame: &FrameContours) -> Self {
        Self {
            frame_path: frame_path.to_string_lossy().into_owned(),
            num_contours: frame.contours.len(),
            num_accepted: 0,
            evaluation: None,
            overlay: Vec::new(),
        }
    }

    /// Evaluate `frame` with `detector` and record the outcome.
    pub fn evaluate(&mut self, detector: &PegTargetDetector, frame: &FrameContours) {
        self.num_accepted = detector.count_accepted(&frame.contours);
        let eval = detector.evaluate(&frame.contours);
        self.set_evaluation(eval);
    }

    pub fn set_evaluation(&mut self, eval: TargetEvaluation) {
        self.overlay = overlay_rects(&eval);
        self.evaluation = Some(eval);
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, PegIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), PegIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
