//! Fixed rule thresholds.
//!
//! These are compiled in and shared by every session so that results are
//! reproducible. Angles are in degrees, tolerances in image pixels.

use std::ops::RangeInclusive;

/// Minimum in-frame likelihood for a landmark to be trusted
pub const MIN_LANDMARK_CONFIDENCE: f32 = 0.7;

/// Plank straightness thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlankThresholds {
    /// Maximum left/right hip height difference
    pub hip_level_tolerance_px: f64,
    /// Maximum signed body-line deviation from straight, either direction
    pub body_line_tolerance_deg: f64,
}

impl PlankThresholds {
    pub const STANDARD: Self = Self {
        hip_level_tolerance_px: 20.0,
        body_line_tolerance_deg: 15.0,
    };
}

/// Push-up thresholds for both the per-frame check and repetition tracking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PushUpThresholds {
    /// Maximum left/right hip height difference
    pub hip_level_tolerance_px: f64,
    /// Elbow angle below which the per-frame check asks to go lower
    pub min_elbow_angle_deg: f64,
    /// Elbow angle below which the start position is reached
    pub start_position_max_deg: f64,
    /// Elbow angle above which an armed rep is abandoned
    pub rep_high_deg: f64,
    /// Elbow angle band that credits a perfect rep
    pub perfect_band_low_deg: f64,
    pub perfect_band_high_deg: f64,
}

impl PushUpThresholds {
    pub const STANDARD: Self = Self {
        hip_level_tolerance_px: 20.0,
        min_elbow_angle_deg: 90.0,
        start_position_max_deg: 20.0,
        rep_high_deg: 90.0,
        perfect_band_low_deg: 85.0,
        perfect_band_high_deg: 95.0,
    };

    pub fn perfect_band(&self) -> RangeInclusive<f64> {
        self.perfect_band_low_deg..=self.perfect_band_high_deg
    }
}

/// Squat depth and knee tracking thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquatThresholds {
    /// Maximum knee/ankle horizontal offset
    pub knee_over_ankle_tolerance_px: f64,
    pub min_knee_angle_deg: f64,
    /// Knee angle above which the performer is considered standing
    pub standing_knee_angle_deg: f64,
}

impl SquatThresholds {
    pub const STANDARD: Self = Self {
        knee_over_ankle_tolerance_px: 30.0,
        min_knee_angle_deg: 90.0,
        standing_knee_angle_deg: 170.0,
    };
}
