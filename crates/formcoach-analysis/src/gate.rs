//! Confidence gate.
//!
//! Rules only run on frames where every landmark they need is present and
//! confidently detected. Anything less is an expected condition of a live
//! stream, reported as a [`GateRejection`] rather than an error.

use formcoach_core::{
    Feedback, FormAnalysis, LandmarkId, PoseFrame, Position2D, MIN_LANDMARK_CONFIDENCE,
};
use thiserror::Error;

/// Why a frame was not evaluated
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GateRejection {
    #[error("required landmarks missing from frame: {missing:?}")]
    MissingLandmarks { missing: Vec<LandmarkId> },

    #[error("landmarks below confidence threshold: {low:?}")]
    LowConfidence { low: Vec<LandmarkId> },
}

impl GateRejection {
    pub fn feedback(&self) -> Feedback {
        match self {
            GateRejection::MissingLandmarks { .. } => Feedback::FullBodyNotInView,
            GateRejection::LowConfidence { .. } => Feedback::PoseUnclear,
        }
    }

    pub fn to_analysis(&self) -> FormAnalysis {
        FormAnalysis::incorrect(self.feedback())
    }
}

/// Presence and confidence check over a fixed set of required landmarks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceGate {
    threshold: f32,
}

impl ConfidenceGate {
    pub fn new() -> Self {
        Self {
            threshold: MIN_LANDMARK_CONFIDENCE,
        }
    }

    /// Positions of `required`, in order, if all pass
    ///
    /// Missing landmarks take precedence over low confidence. A landmark with
    /// a non-finite position is unreadable and counts as low confidence.
    pub fn check<const N: usize>(
        &self,
        frame: &PoseFrame,
        required: &[LandmarkId; N],
    ) -> Result<[Position2D; N], GateRejection> {
        let mut positions = [Position2D::origin(); N];
        let mut missing = Vec::new();
        let mut low = Vec::new();

        for (slot, id) in positions.iter_mut().zip(required) {
            match frame.get(*id) {
                None => missing.push(*id),
                Some(landmark) => {
                    // NaN confidence fails the comparison and counts as low
                    let readable =
                        landmark.position.x.is_finite() && landmark.position.y.is_finite();
                    if !readable || !(landmark.confidence >= self.threshold) {
                        low.push(*id);
                    }
                    *slot = landmark.position;
                }
            }
        }

        if !missing.is_empty() {
            tracing::trace!(?missing, "frame rejected: missing landmarks");
            return Err(GateRejection::MissingLandmarks { missing });
        }
        if !low.is_empty() {
            tracing::trace!(?low, "frame rejected: low confidence");
            return Err(GateRejection::LowConfidence { low });
        }

        Ok(positions)
    }
}

impl Default for ConfidenceGate {
    fn default() -> Self {
        Self::new()
    }
}
