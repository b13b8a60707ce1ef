//! # FormCoach-Core
//!
//! Core types and geometry for the FormCoach exercise form analyzer.
//!
//! A pose frame is a set of 2D body landmarks in image-plane coordinates
//! (pixels, y growing downward) with a per-landmark detection confidence.
//! Everything in this crate is stateless: the stateful session lives in
//! `formcoach-analysis`.

pub mod error;
pub mod geometry;
pub mod thresholds;
pub mod types;

pub use error::{Error, Result};
pub use geometry::*;
pub use thresholds::*;
pub use types::*;
