//! Perfect-repetition state machine for push-ups.
//!
//! A rep is credited only on an `Idle → InStartPosition → Idle` cycle: the
//! performer must first reach the start position (both elbows folded below
//! the start threshold, hips level) and then bring both elbows into the
//! perfect band. Being in the perfect band without first arming does nothing,
//! so holding a pose can never count twice. Either elbow opening past the
//! high threshold abandons the rep.

use formcoach_core::{Feedback, FormAnalysis, PushUpThresholds};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepetitionState {
    #[default]
    Idle,
    InStartPosition,
    /// Reported for the frame that credited a rep; behaves as `Idle` after
    PerfectRepJustCompleted,
}

impl RepetitionState {
    pub fn is_armed(&self) -> bool {
        matches!(self, RepetitionState::InStartPosition)
    }
}

/// What one frame did to the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepEvent {
    /// Idle and hips not level; cannot arm
    HipsNotLevel,
    /// Idle, elbows not yet folded enough to arm
    AwaitingStartPosition,
    EnteredStartPosition,
    /// Armed, still between the start position and the perfect band
    Holding,
    PerfectRep,
    /// Armed, then overshot the high threshold without hitting the band
    IncompleteRep,
}

impl RepEvent {
    pub fn to_analysis(self) -> FormAnalysis {
        match self {
            RepEvent::HipsNotLevel => FormAnalysis::incorrect(Feedback::KeepHipsLevel),
            RepEvent::AwaitingStartPosition => {
                FormAnalysis::incorrect(Feedback::LowerToStartPosition)
            }
            RepEvent::EnteredStartPosition => {
                FormAnalysis::correct(Feedback::StartPositionReached)
            }
            RepEvent::Holding => FormAnalysis::correct(Feedback::KeepPushing),
            RepEvent::PerfectRep => FormAnalysis::perfect_rep(),
            RepEvent::IncompleteRep => FormAnalysis::incorrect(Feedback::IncompleteRep),
        }
    }
}

/// Tracks phase and the perfect-rep count across frames
#[derive(Debug, Clone)]
pub struct RepetitionCounter {
    thresholds: PushUpThresholds,
    state: RepetitionState,
    perfect_reps: u32,
}

impl RepetitionCounter {
    pub fn new() -> Self {
        Self::with_thresholds(PushUpThresholds::STANDARD)
    }

    pub fn with_thresholds(thresholds: PushUpThresholds) -> Self {
        Self {
            thresholds,
            state: RepetitionState::Idle,
            perfect_reps: 0,
        }
    }

    pub fn state(&self) -> RepetitionState {
        self.state
    }

    pub fn perfect_reps(&self) -> u32 {
        self.perfect_reps
    }

    /// Advance with one frame's left and right elbow angles and hip alignment
    pub fn update(&mut self, elbows: [f64; 2], hips_level: bool) -> RepEvent {
        let t = &self.thresholds;
        let band = t.perfect_band();

        let (next, event) = match self.state {
            RepetitionState::Idle | RepetitionState::PerfectRepJustCompleted => {
                if !hips_level {
                    (RepetitionState::Idle, RepEvent::HipsNotLevel)
                } else if elbows.iter().all(|&deg| deg < t.start_position_max_deg) {
                    (RepetitionState::InStartPosition, RepEvent::EnteredStartPosition)
                } else {
                    (RepetitionState::Idle, RepEvent::AwaitingStartPosition)
                }
            }
            RepetitionState::InStartPosition => {
                if elbows.iter().all(|deg| band.contains(deg)) {
                    (RepetitionState::PerfectRepJustCompleted, RepEvent::PerfectRep)
                } else if elbows.iter().any(|&deg| deg > t.rep_high_deg) {
                    (RepetitionState::Idle, RepEvent::IncompleteRep)
                } else {
                    (RepetitionState::InStartPosition, RepEvent::Holding)
                }
            }
        };

        if event == RepEvent::PerfectRep {
            self.perfect_reps = self.perfect_reps.saturating_add(1);
        }
        if next != self.state {
            tracing::debug!(from = ?self.state, to = ?next, ?elbows, "repetition state change");
        }
        self.state = next;

        event
    }

    /// Back to `Idle` with a zero count. The only way the count goes down.
    pub fn reset(&mut self) {
        self.state = RepetitionState::Idle;
        self.perfect_reps = 0;
    }
}

impl Default for RepetitionCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_cycle_credits_once() {
        let mut counter = RepetitionCounter::new();

        assert_eq!(counter.update([15.0, 15.0], true), RepEvent::EnteredStartPosition);
        assert_eq!(counter.state(), RepetitionState::InStartPosition);

        assert_eq!(counter.update([50.0, 50.0], true), RepEvent::Holding);
        assert_eq!(counter.update([90.0, 90.0], true), RepEvent::PerfectRep);
        assert_eq!(counter.state(), RepetitionState::PerfectRepJustCompleted);
        assert_eq!(counter.perfect_reps(), 1);

        // Staying in the band is not another rep
        assert_eq!(counter.update([90.0, 90.0], true), RepEvent::AwaitingStartPosition);
        assert_eq!(counter.update([88.0, 88.0], true), RepEvent::AwaitingStartPosition);
        assert_eq!(counter.state(), RepetitionState::Idle);
        assert_eq!(counter.perfect_reps(), 1);
    }

    #[test]
    fn test_perfect_band_from_idle_is_ignored() {
        let mut counter = RepetitionCounter::new();
        for _ in 0..5 {
            assert_eq!(counter.update([90.0, 90.0], true), RepEvent::AwaitingStartPosition);
        }
        assert_eq!(counter.perfect_reps(), 0);
    }

    #[test]
    fn test_overshoot_abandons_rep_without_resetting_count() {
        let mut counter = RepetitionCounter::new();
        counter.update([10.0, 10.0], true);
        counter.update([90.0, 90.0], true);
        assert_eq!(counter.perfect_reps(), 1);

        counter.update([10.0, 10.0], true);
        assert_eq!(counter.update([140.0, 140.0], true), RepEvent::IncompleteRep);
        assert_eq!(counter.state(), RepetitionState::Idle);
        assert_eq!(counter.perfect_reps(), 1);
    }

    #[test]
    fn test_band_edges_are_inclusive() {
        for angle in [85.0, 95.0] {
            let mut counter = RepetitionCounter::new();
            counter.update([5.0, 5.0], true);
            assert_eq!(counter.update([angle, angle], true), RepEvent::PerfectRep);
        }

        let mut counter = RepetitionCounter::new();
        counter.update([5.0, 5.0], true);
        assert_eq!(counter.update([95.5, 95.5], true), RepEvent::IncompleteRep);
    }

    #[test]
    fn test_uneven_hips_block_arming_only() {
        let mut counter = RepetitionCounter::new();
        assert_eq!(counter.update([10.0, 10.0], false), RepEvent::HipsNotLevel);
        assert_eq!(counter.state(), RepetitionState::Idle);

        counter.update([10.0, 10.0], true);
        // Once armed, hip alignment does not cancel the rep
        assert_eq!(counter.update([90.0, 90.0], false), RepEvent::PerfectRep);
    }

    #[test]
    fn test_rearm_directly_after_credit() {
        let mut counter = RepetitionCounter::new();
        counter.update([10.0, 10.0], true);
        counter.update([90.0, 90.0], true);
        assert_eq!(counter.update([10.0, 10.0], true), RepEvent::EnteredStartPosition);
        assert_eq!(counter.update([92.0, 92.0], true), RepEvent::PerfectRep);
        assert_eq!(counter.perfect_reps(), 2);
    }

    #[test]
    fn test_each_elbow_must_meet_each_threshold() {
        let mut counter = RepetitionCounter::new();

        // One arm folded is not a start position
        assert_eq!(counter.update([10.0, 60.0], true), RepEvent::AwaitingStartPosition);
        assert_eq!(counter.update([10.0, 15.0], true), RepEvent::EnteredStartPosition);

        // Averages to 90 but neither arm is in the band
        assert_eq!(counter.update([10.0, 170.0], true), RepEvent::IncompleteRep);
        assert_eq!(counter.state(), RepetitionState::Idle);

        counter.update([10.0, 10.0], true);
        assert_eq!(counter.update([90.0, 70.0], true), RepEvent::Holding);
        assert_eq!(counter.update([88.0, 93.0], true), RepEvent::PerfectRep);
        assert_eq!(counter.perfect_reps(), 1);
    }

    #[test]
    fn test_reset() {
        let mut counter = RepetitionCounter::new();
        counter.update([10.0, 10.0], true);
        counter.update([90.0, 90.0], true);
        counter.update([10.0, 10.0], true);

        counter.reset();
        assert_eq!(counter.state(), RepetitionState::Idle);
        assert_eq!(counter.perfect_reps(), 0);
        assert_eq!(counter.update([90.0, 90.0], true), RepEvent::AwaitingStartPosition);
        assert_eq!(counter.perfect_reps(), 0);
    }

    #[test]
    fn test_event_analysis() {
        let perfect = RepEvent::PerfectRep.to_analysis();
        assert!(perfect.is_correct && perfect.rep_completed);
        assert_eq!(perfect.feedback, Feedback::PerfectRep);

        let incomplete = RepEvent::IncompleteRep.to_analysis();
        assert!(!incomplete.is_correct && !incomplete.rep_completed);
        assert_eq!(
            incomplete.message(),
            "Lower body more until elbows are at 90°"
        );
    }
}
