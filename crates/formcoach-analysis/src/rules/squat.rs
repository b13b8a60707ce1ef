//! Squat: knee depth and knee-over-ankle tracking. Per-frame only.

use formcoach_core::{
    angle_between, horizontal_deviation, Feedback, FormAnalysis, LandmarkId, PoseFrame,
    SquatThresholds,
};

use crate::gate::{ConfidenceGate, GateRejection};

pub const REQUIRED: [LandmarkId; 6] = [
    LandmarkId::LeftHip,
    LandmarkId::RightHip,
    LandmarkId::LeftKnee,
    LandmarkId::RightKnee,
    LandmarkId::LeftAnkle,
    LandmarkId::RightAnkle,
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquatMetrics {
    pub knee_deg: f64,
    pub knee_over_ankle_px: f64,
}

impl SquatMetrics {
    pub fn measure(frame: &PoseFrame, gate: &ConfidenceGate) -> Result<Self, GateRejection> {
        let [l_hip, _r_hip, l_knee, _r_knee, l_ankle, _r_ankle] = gate.check(frame, &REQUIRED)?;

        Ok(Self {
            knee_deg: angle_between(&l_hip, &l_knee, &l_ankle),
            knee_over_ankle_px: horizontal_deviation(&l_knee, &l_ankle),
        })
    }

    pub fn classify(&self, thresholds: &SquatThresholds) -> FormAnalysis {
        if self.knee_over_ankle_px >= thresholds.knee_over_ankle_tolerance_px {
            FormAnalysis::incorrect(Feedback::KneesOverToes)
        } else if self.knee_deg < thresholds.min_knee_angle_deg {
            FormAnalysis::incorrect(Feedback::SquatTooLow)
        } else if self.knee_deg > thresholds.standing_knee_angle_deg {
            FormAnalysis::correct(Feedback::SquatLowerWithControl)
        } else {
            FormAnalysis::correct(Feedback::SquatGoodDepth)
        }
    }
}

pub fn evaluate(frame: &PoseFrame, gate: &ConfidenceGate) -> FormAnalysis {
    match SquatMetrics::measure(frame, gate) {
        Ok(metrics) => metrics.classify(&SquatThresholds::STANDARD),
        Err(rejection) => rejection.to_analysis(),
    }
}
