//! Push-up: elbow angle and hip level.
//!
//! Only the stateless per-frame check lives here. Counting perfect reps
//! across frames is [`crate::repetition::RepetitionCounter`]'s job; it reads
//! both arms through [`PushUpMetrics::elbows`].

use formcoach_core::{
    try_angle_between, vertical_deviation, Feedback, FormAnalysis, LandmarkId, PoseFrame,
    PushUpThresholds,
};

use crate::gate::{ConfidenceGate, GateRejection};

pub const REQUIRED: [LandmarkId; 8] = [
    LandmarkId::LeftShoulder,
    LandmarkId::RightShoulder,
    LandmarkId::LeftElbow,
    LandmarkId::RightElbow,
    LandmarkId::LeftWrist,
    LandmarkId::RightWrist,
    LandmarkId::LeftHip,
    LandmarkId::RightHip,
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PushUpMetrics {
    pub left_elbow_deg: f64,
    pub right_elbow_deg: f64,
    pub hip_deviation_px: f64,
}

impl PushUpMetrics {
    /// Elbow angles and hip level, or a rejection when the gate fails or an
    /// arm collapses to a point and has no readable angle
    pub fn measure(frame: &PoseFrame, gate: &ConfidenceGate) -> Result<Self, GateRejection> {
        let [l_shoulder, r_shoulder, l_elbow, r_elbow, l_wrist, r_wrist, l_hip, r_hip] =
            gate.check(frame, &REQUIRED)?;

        let left = try_angle_between(&l_shoulder, &l_elbow, &l_wrist);
        let right = try_angle_between(&r_shoulder, &r_elbow, &r_wrist);

        match (left, right) {
            (Some(left_elbow_deg), Some(right_elbow_deg)) => Ok(Self {
                left_elbow_deg,
                right_elbow_deg,
                hip_deviation_px: vertical_deviation(&l_hip, &r_hip),
            }),
            _ => {
                let mut low = Vec::new();
                if left.is_none() {
                    low.extend([
                        LandmarkId::LeftShoulder,
                        LandmarkId::LeftElbow,
                        LandmarkId::LeftWrist,
                    ]);
                }
                if right.is_none() {
                    low.extend([
                        LandmarkId::RightShoulder,
                        LandmarkId::RightElbow,
                        LandmarkId::RightWrist,
                    ]);
                }
                tracing::trace!(?low, "frame rejected: unreadable arm geometry");
                Err(GateRejection::LowConfidence { low })
            }
        }
    }

    /// Both elbow angles, left first; repetition tracking checks each
    pub fn elbows(&self) -> [f64; 2] {
        [self.left_elbow_deg, self.right_elbow_deg]
    }

    /// The more bent arm
    pub fn min_elbow_deg(&self) -> f64 {
        self.left_elbow_deg.min(self.right_elbow_deg)
    }

    pub fn hips_level(&self, thresholds: &PushUpThresholds) -> bool {
        self.hip_deviation_px <= thresholds.hip_level_tolerance_px
    }

    pub fn classify(&self, thresholds: &PushUpThresholds) -> FormAnalysis {
        if self.min_elbow_deg() < thresholds.min_elbow_angle_deg {
            FormAnalysis::incorrect(Feedback::LowerBodyMore)
        } else if !self.hips_level(thresholds) {
            FormAnalysis::incorrect(Feedback::KeepHipsLevel)
        } else {
            FormAnalysis::correct(Feedback::PerfectPushUpForm)
        }
    }
}

pub fn evaluate(frame: &PoseFrame, gate: &ConfidenceGate) -> FormAnalysis {
    match PushUpMetrics::measure(frame, gate) {
        Ok(metrics) => metrics.classify(&PushUpThresholds::STANDARD),
        Err(rejection) => rejection.to_analysis(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{push_up_frame, with_confidence, without};
    use formcoach_core::Landmark;

    #[test]
    fn test_measures_elbow_angle() {
        let metrics = PushUpMetrics::measure(&push_up_frame(45.0, 0.0), &ConfidenceGate::new()).unwrap();

        assert!((metrics.left_elbow_deg - 45.0).abs() < 1e-6);
        assert!((metrics.right_elbow_deg - 45.0).abs() < 1e-6);
        assert_eq!(metrics.elbows(), [metrics.left_elbow_deg, metrics.right_elbow_deg]);
        assert_eq!(metrics.hip_deviation_px, 0.0);
    }

    #[test]
    fn test_elbow_band() {
        let gate = ConfidenceGate::new();

        let low = evaluate(&push_up_frame(60.0, 0.0), &gate);
        assert!(!low.is_correct);
        assert_eq!(low.feedback, Feedback::LowerBodyMore);

        let good = evaluate(&push_up_frame(90.0, 0.0), &gate);
        assert!(good.is_correct);
        assert_eq!(good.feedback, Feedback::PerfectPushUpForm);

        let straight = evaluate(&push_up_frame(170.0, 0.0), &gate);
        assert!(straight.is_correct);
    }

    #[test]
    fn test_uneven_hips() {
        let analysis = evaluate(&push_up_frame(120.0, 30.0), &ConfidenceGate::new());
        assert!(!analysis.is_correct);
        assert_eq!(analysis.feedback, Feedback::KeepHipsLevel);
    }

    #[test]
    fn test_one_bent_arm_is_enough_to_go_lower() {
        let metrics = PushUpMetrics {
            left_elbow_deg: 150.0,
            right_elbow_deg: 80.0,
            hip_deviation_px: 0.0,
        };
        assert_eq!(
            metrics.classify(&PushUpThresholds::STANDARD).feedback,
            Feedback::LowerBodyMore
        );
    }

    #[test]
    fn test_missing_wrists_are_not_measured() {
        let frame = without(
            push_up_frame(90.0, 0.0),
            &[LandmarkId::LeftWrist, LandmarkId::RightWrist],
        );
        let err = PushUpMetrics::measure(&frame, &ConfidenceGate::new()).unwrap_err();

        assert_eq!(
            err,
            GateRejection::MissingLandmarks {
                missing: vec![LandmarkId::LeftWrist, LandmarkId::RightWrist]
            }
        );
    }

    #[test]
    fn test_collapsed_arm_is_rejected() {
        let mut frame = push_up_frame(90.0, 0.0);
        let elbow = frame.get(LandmarkId::RightElbow).unwrap().position;
        frame.insert(Landmark::new(LandmarkId::RightWrist, elbow, 0.95));

        let err = PushUpMetrics::measure(&frame, &ConfidenceGate::new()).unwrap_err();
        assert_eq!(
            err,
            GateRejection::LowConfidence {
                low: vec![
                    LandmarkId::RightShoulder,
                    LandmarkId::RightElbow,
                    LandmarkId::RightWrist
                ]
            }
        );
        assert_eq!(evaluate(&frame, &ConfidenceGate::new()).feedback, Feedback::PoseUnclear);
    }

    #[test]
    fn test_low_confidence_frame() {
        let frame = with_confidence(push_up_frame(90.0, 0.0), 0.5);
        assert_eq!(
            evaluate(&frame, &ConfidenceGate::new()).feedback,
            Feedback::PoseUnclear
        );
    }
}
