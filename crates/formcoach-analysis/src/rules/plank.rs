//! Plank: straight shoulder–hip–ankle line with level hips.

use formcoach_core::{
    body_line_deviation, vertical_deviation, Feedback, FormAnalysis, LandmarkId, PlankThresholds,
    PoseFrame,
};
use serde::{Deserialize, Serialize};

use crate::gate::{ConfidenceGate, GateRejection};

pub const REQUIRED: [LandmarkId; 6] = [
    LandmarkId::LeftShoulder,
    LandmarkId::RightShoulder,
    LandmarkId::LeftHip,
    LandmarkId::RightHip,
    LandmarkId::LeftAnkle,
    LandmarkId::RightAnkle,
];

/// How a sagging body line (hips below the shoulder–ankle line) is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlankPolicy {
    /// Sagging gets its own "raise your hips" feedback
    #[default]
    SignedBodyLine,
    /// Sagging is reported as "keep your hips level"
    FoldedHipLevel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlankMetrics {
    /// Signed deviation from straight at the left hip; positive = hips high
    pub body_line_deg: f64,
    /// Left/right hip height difference
    pub hip_deviation_px: f64,
}

impl PlankMetrics {
    pub fn measure(frame: &PoseFrame, gate: &ConfidenceGate) -> Result<Self, GateRejection> {
        let [l_shoulder, _r_shoulder, l_hip, r_hip, l_ankle, _r_ankle] =
            gate.check(frame, &REQUIRED)?;

        Ok(Self {
            body_line_deg: body_line_deviation(&l_shoulder, &l_hip, &l_ankle),
            hip_deviation_px: vertical_deviation(&l_hip, &r_hip),
        })
    }

    /// First matching condition wins: hip level, then body line
    pub fn classify(&self, policy: PlankPolicy, thresholds: &PlankThresholds) -> FormAnalysis {
        let tolerance = thresholds.body_line_tolerance_deg;

        if self.hip_deviation_px > thresholds.hip_level_tolerance_px {
            FormAnalysis::incorrect(Feedback::KeepHipsLevel)
        } else if self.body_line_deg > tolerance {
            FormAnalysis::incorrect(Feedback::LowerHips)
        } else if self.body_line_deg < -tolerance {
            match policy {
                PlankPolicy::SignedBodyLine => FormAnalysis::incorrect(Feedback::RaiseHips),
                PlankPolicy::FoldedHipLevel => FormAnalysis::incorrect(Feedback::KeepHipsLevel),
            }
        } else {
            FormAnalysis::correct(Feedback::PerfectPlank)
        }
    }
}

pub fn evaluate(frame: &PoseFrame, gate: &ConfidenceGate, policy: PlankPolicy) -> FormAnalysis {
    match PlankMetrics::measure(frame, gate) {
        Ok(metrics) => {
            tracing::trace!(
                body_line_deg = metrics.body_line_deg,
                hip_deviation_px = metrics.hip_deviation_px,
                "plank metrics"
            );
            metrics.classify(policy, &PlankThresholds::STANDARD)
        }
        Err(rejection) => rejection.to_analysis(),
    }
}
