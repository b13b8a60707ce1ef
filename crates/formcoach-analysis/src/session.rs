//! Form analysis session: the per-frame entry point.
//!
//! One session per camera stream and exercise attempt. Each frame runs
//! mirror → gate → rules → repetition update synchronously; the only state
//! carried between frames is the repetition counter and the last feedback.

use formcoach_core::{
    ExerciseKind, Feedback, FormAnalysis, PoseFrame, PushUpThresholds, Result, SessionId,
};
use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::gate::ConfidenceGate;
use crate::mirror::MirrorNormalizer;
use crate::repetition::{RepetitionCounter, RepetitionState};
use crate::rules::{self, PushUpMetrics};

/// Perfect reps so far against the session goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepProgress {
    pub count: u32,
    pub goal: u32,
}

impl RepProgress {
    pub fn remaining(&self) -> u32 {
        self.goal.saturating_sub(self.count)
    }

    pub fn is_complete(&self) -> bool {
        self.count >= self.goal
    }
}

pub struct FormSession {
    id: SessionId,
    config: SessionConfig,
    gate: ConfidenceGate,
    mirror: Option<MirrorNormalizer>,
    reps: RepetitionCounter,
    last_feedback: Option<Feedback>,
    feedback_changed: bool,
}

impl FormSession {
    pub fn new(config: SessionConfig) -> Self {
        let mirror = config
            .mirrored
            .then(|| MirrorNormalizer::new(config.image_width));

        let id = SessionId::new();
        tracing::debug!(session = %id, exercise = %config.exercise, mirrored = config.mirrored, "session created");

        Self {
            id,
            config,
            gate: ConfidenceGate::new(),
            mirror,
            reps: RepetitionCounter::new(),
            last_feedback: None,
            feedback_changed: false,
        }
    }

    /// Like [`FormSession::new`] but validates the configuration first
    pub fn try_new(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn exercise(&self) -> ExerciseKind {
        self.config.exercise
    }

    /// Analyze one frame, advancing repetition tracking where it applies
    pub fn analyze(&mut self, mut frame: PoseFrame) -> FormAnalysis {
        self.normalize(&mut frame);

        let kind = self.config.exercise;
        let analysis = if kind.tracks_repetitions() {
            self.track_push_up(&frame)
        } else {
            rules::check_form(kind, &frame, &self.gate, self.config.plank_policy)
        };

        self.feedback_changed = self.last_feedback != Some(analysis.feedback);
        self.last_feedback = Some(analysis.feedback);

        analysis
    }

    /// Stateless per-frame form check; never touches repetition state
    pub fn check_form(&self, mut frame: PoseFrame) -> FormAnalysis {
        self.normalize(&mut frame);
        rules::check_form(
            self.config.exercise,
            &frame,
            &self.gate,
            self.config.plank_policy,
        )
    }

    pub fn perfect_rep_count(&self) -> u32 {
        self.reps.perfect_reps()
    }

    pub fn repetition_state(&self) -> RepetitionState {
        self.reps.state()
    }

    pub fn progress(&self) -> RepProgress {
        RepProgress {
            count: self.reps.perfect_reps(),
            goal: self.config.rep_goal,
        }
    }

    pub fn goal_reached(&self) -> bool {
        self.progress().is_complete()
    }

    pub fn last_feedback(&self) -> Option<Feedback> {
        self.last_feedback
    }

    /// Whether the last analyzed frame's feedback differs from the one before
    pub fn feedback_changed(&self) -> bool {
        self.feedback_changed
    }

    /// Back to `Idle` with a zero perfect-rep count
    pub fn reset(&mut self) {
        tracing::debug!(session = %self.id, reps = self.reps.perfect_reps(), "session reset");
        self.reps.reset();
        self.last_feedback = None;
        self.feedback_changed = false;
    }

    fn normalize(&self, frame: &mut PoseFrame) {
        if let Some(mirror) = &self.mirror {
            mirror.normalize(frame);
        }
    }

    fn track_push_up(&mut self, frame: &PoseFrame) -> FormAnalysis {
        let thresholds = PushUpThresholds::STANDARD;
        // A rejected frame leaves the repetition state untouched
        let metrics = match PushUpMetrics::measure(frame, &self.gate) {
            Ok(metrics) => metrics,
            Err(rejection) => return rejection.to_analysis(),
        };

        let event = self
            .reps
            .update(metrics.elbows(), metrics.hips_level(&thresholds));
        let analysis = event.to_analysis();

        if analysis.rep_completed {
            let progress = self.progress();
            tracing::info!(
                session = %self.id,
                count = progress.count,
                goal = progress.goal,
                "perfect rep"
            );
        }

        analysis
    }
}
