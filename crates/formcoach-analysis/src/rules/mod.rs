//! Per-exercise form rules.
//!
//! Each supported kind has a pure evaluator `(frame) -> FormAnalysis` built
//! from the geometry primitives and the fixed thresholds. Kinds without a
//! rule set return a placeholder without touching the frame.

pub mod plank;
pub mod push_up;
pub mod squat;

use formcoach_core::{ExerciseKind, FormAnalysis, LandmarkId, PoseFrame};

use crate::gate::ConfidenceGate;

pub use plank::{PlankMetrics, PlankPolicy};
pub use push_up::PushUpMetrics;
pub use squat::SquatMetrics;

/// Landmarks the rule set for `kind` needs; empty for unsupported kinds
pub fn required_landmarks(kind: ExerciseKind) -> &'static [LandmarkId] {
    match kind {
        ExerciseKind::Plank => &plank::REQUIRED,
        ExerciseKind::PushUp => &push_up::REQUIRED,
        ExerciseKind::Squat => &squat::REQUIRED,
        ExerciseKind::HollowBody | ExerciseKind::RussianTwist | ExerciseKind::WallSit => &[],
    }
}

/// Stateless per-frame form check
///
/// For push-ups this is the elbow-band check only; repetition counting
/// lives in [`crate::FormSession`].
pub fn check_form(
    kind: ExerciseKind,
    frame: &PoseFrame,
    gate: &ConfidenceGate,
    plank_policy: PlankPolicy,
) -> FormAnalysis {
    match kind {
        ExerciseKind::Plank => plank::evaluate(frame, gate, plank_policy),
        ExerciseKind::PushUp => push_up::evaluate(frame, gate),
        ExerciseKind::Squat => squat::evaluate(frame, gate),
        ExerciseKind::HollowBody | ExerciseKind::RussianTwist | ExerciseKind::WallSit => {
            FormAnalysis::unsupported(kind)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcoach_core::Feedback;

    #[test]
    fn test_unsupported_kinds_skip_the_gate() {
        // An empty frame would fail the gate; stubs never look at it
        let frame = PoseFrame::new();
        let gate = ConfidenceGate::new();

        for kind in [
            ExerciseKind::HollowBody,
            ExerciseKind::RussianTwist,
            ExerciseKind::WallSit,
        ] {
            let analysis = check_form(kind, &frame, &gate, PlankPolicy::default());
            assert_eq!(analysis, FormAnalysis::unsupported(kind));
            assert_eq!(analysis.feedback, Feedback::NotSupported(kind));
            assert!(required_landmarks(kind).is_empty());
        }
    }

    #[test]
    fn test_supported_kinds_gate_empty_frames() {
        let frame = PoseFrame::new();
        let gate = ConfidenceGate::new();

        for kind in [ExerciseKind::Plank, ExerciseKind::PushUp, ExerciseKind::Squat] {
            let analysis = check_form(kind, &frame, &gate, PlankPolicy::default());
            assert_eq!(analysis.feedback, Feedback::FullBodyNotInView);
            assert!(!required_landmarks(kind).is_empty());
        }
    }
}
