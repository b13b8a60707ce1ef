//! Per-session configuration.
//!
//! Rule thresholds are compiled in (see `formcoach_core::thresholds`); only
//! the choices a caller makes per attempt live here.

use formcoach_core::{Error, ExerciseKind, Result};
use serde::{Deserialize, Serialize};

use crate::rules::PlankPolicy;

/// Perfect reps per attempt, matching the coaching app's target
pub const DEFAULT_REP_GOAL: u32 = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Exercise being performed for the whole session
    pub exercise: ExerciseKind,

    /// Frames come from a front-facing camera and need an x flip
    pub mirrored: bool,

    /// Source image width in pixels, used for the mirror flip
    pub image_width: f64,

    /// Reporting of sagging hips in a plank
    pub plank_policy: PlankPolicy,

    /// Perfect reps that complete the attempt
    pub rep_goal: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            exercise: ExerciseKind::Plank,
            mirrored: false,
            image_width: 480.0,
            plank_policy: PlankPolicy::default(),
            rep_goal: DEFAULT_REP_GOAL,
        }
    }
}

impl SessionConfig {
    pub fn new(exercise: ExerciseKind) -> Self {
        Self {
            exercise,
            ..Self::default()
        }
    }

    pub fn with_mirroring(mut self, image_width: f64) -> Self {
        self.mirrored = true;
        self.image_width = image_width;
        self
    }

    pub fn with_plank_policy(mut self, policy: PlankPolicy) -> Self {
        self.plank_policy = policy;
        self
    }

    pub fn with_rep_goal(mut self, rep_goal: u32) -> Self {
        self.rep_goal = rep_goal;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.mirrored && !(self.image_width.is_finite() && self.image_width > 0.0) {
            return Err(Error::Config(format!(
                "mirrored session needs a positive image width, got {}",
                self.image_width
            )));
        }
        if self.rep_goal == 0 {
            return Err(Error::Config("rep_goal must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Load configuration from file, with `FORMCOACH_*` environment overrides
    pub fn from_file(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("FORMCOACH"))
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;

        Self::finish(settings)
    }

    /// Load from `FORMCOACH_*` environment variables only
    pub fn from_env() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("FORMCOACH"))
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;

        Self::finish(settings)
    }

    fn finish(settings: config::Config) -> Result<Self> {
        let config: Self = settings
            .try_deserialize()
            .map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
