use log::{debug, log_enabled, Level};
use peg_target_core::Contour;

use crate::classifier::ContourClassifier;
use crate::distance::CameraModel;
use crate::params::{PegTargetParams, PegTargetParamsError};
use crate::select::select_strips;
use crate::target::TargetEvaluation;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Evaluate one frame: classify, select up to two strips, aggregate, estimate distance.
///
/// Pure and stateless; frames can be evaluated concurrently.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(contours, classifier, camera), fields(contours = contours.len()))
)]
pub fn evaluate_frame<C>(
    contours: &[Contour],
    classifier: &C,
    camera: &CameraModel,
) -> TargetEvaluation
where
    C: ContourClassifier + ?Sized,
{
    let state = select_strips(contours, classifier);
    let eval = TargetEvaluation::new(state, camera);
    if log_enabled!(Level::Debug) {
        for line in eval.to_string().lines() {
            debug!("{line}");
        }
    }
    eval
}

/// Peg target detector: a validated parameter set around [`evaluate_frame`].
#[derive(Clone, Debug)]
pub struct PegTargetDetector {
    params: PegTargetParams,
}

impl PegTargetDetector {
    pub fn new(params: PegTargetParams) -> Result<Self, PegTargetParamsError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &PegTargetParams {
        &self.params
    }

    /// Evaluate a frame using the configured shape filter as classifier.
    pub fn evaluate(&self, contours: &[Contour]) -> TargetEvaluation {
        evaluate_frame(contours, &self.params.filter, &self.params.camera)
    }

    /// Evaluate a frame with an externally supplied classifier.
    pub fn evaluate_with<C>(&self, classifier: &C, contours: &[Contour]) -> TargetEvaluation
    where
        C: ContourClassifier + ?Sized,
    {
        evaluate_frame(contours, classifier, &self.params.camera)
    }

    /// Number of contours the configured filter accepts.
    pub fn count_accepted(&self, contours: &[Contour]) -> usize {
        contours
            .iter()
            .filter(|c| self.params.filter.is_target_strip(c))
            .count()
    }
}
