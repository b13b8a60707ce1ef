//! # FormCoach-Analysis
//!
//! Turns a stream of pose frames into form feedback and perfect-rep counts.
//!
//! ## Per-frame pipeline
//!
//! 1. **Mirror**: flip x for front-camera input
//! 2. **Gate**: require the exercise's landmarks, each with confidence ≥ 0.7
//! 3. **Rules**: classify the frame from joint angles and alignments
//! 4. **Repetitions**: for push-ups, advance the perfect-rep state machine
//!
//! Missing or unclear landmarks are normal in a live stream and come back as
//! ordinary incorrect analyses with a distinct message, never as errors.

pub mod config;
pub mod gate;
pub mod mirror;
pub mod repetition;
pub mod rules;
pub mod session;

#[cfg(test)]
mod test_support;

pub use config::*;
pub use gate::*;
pub use mirror::*;
pub use repetition::*;
pub use rules::{check_form, required_landmarks, PlankMetrics, PlankPolicy, PushUpMetrics, SquatMetrics};
pub use session::*;
