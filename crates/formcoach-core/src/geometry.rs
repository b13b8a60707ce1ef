//! 2D geometry on image-plane landmark positions.
//!
//! All functions are pure. Degenerate input (a zero-length ray or a
//! non-finite coordinate) yields an angle of 0 rather than NaN. Callers that
//! must not mistake unreadable geometry for a real 0° use [`try_angle_between`].

use nalgebra::Vector2;

use crate::types::Position2D;

/// Rays shorter than this are treated as coincident points
const DEGENERATE_EPSILON: f64 = 1e-9;

/// Rays `vertex→a` and `vertex→c`, or `None` when either is degenerate
fn rays(a: &Position2D, vertex: &Position2D, c: &Position2D) -> Option<(Vector2<f64>, Vector2<f64>)> {
    let ray_a = vertex.vector_to(a);
    let ray_c = vertex.vector_to(c);

    let usable = |v: &Vector2<f64>| {
        let n = v.norm();
        n.is_finite() && n >= DEGENERATE_EPSILON
    };

    (usable(&ray_a) && usable(&ray_c)).then_some((ray_a, ray_c))
}

/// Undirected angle in degrees at vertex `b`, in [0, 180]
///
/// Symmetric in `a` and `c`. Returns 0 when `b` coincides with `a` or `c`.
pub fn angle_between(a: &Position2D, b: &Position2D, c: &Position2D) -> f64 {
    try_angle_between(a, b, c).unwrap_or(0.0)
}

/// Like [`angle_between`], but `None` for degenerate or non-finite input
pub fn try_angle_between(a: &Position2D, b: &Position2D, c: &Position2D) -> Option<f64> {
    let (ray_a, ray_c) = rays(a, b, c)?;

    let angle = (ray_c.y.atan2(ray_c.x) - ray_a.y.atan2(ray_a.x))
        .to_degrees()
        .abs();
    let folded = if angle > 180.0 { 360.0 - angle } else { angle };

    Some(folded.clamp(0.0, 180.0))
}

/// Signed deviation from a straight line at `vertex`, in degrees
///
/// Magnitude is `180 - angle_between(start, vertex, end)`. Positive when
/// `vertex` lies above the `start→end` line in image coordinates (smaller
/// y), negative when it lies below. Degenerate input yields 0.
pub fn body_line_deviation(start: &Position2D, vertex: &Position2D, end: &Position2D) -> f64 {
    if rays(start, vertex, end).is_none() {
        return 0.0;
    }

    let deviation = 180.0 - angle_between(start, vertex, end);
    let line = start.vector_to(end);
    let offset = start.vector_to(vertex);

    // y grows downward, so "above" flips with the direction of the line
    if line.perp(&offset) * line.x.signum() > 0.0 {
        -deviation
    } else {
        deviation
    }
}

/// Absolute y difference; 0 means the two points are level
pub fn vertical_deviation(p: &Position2D, q: &Position2D) -> f64 {
    (p.y - q.y).abs()
}

/// Absolute x difference; 0 means the two points are stacked vertically
pub fn horizontal_deviation(p: &Position2D, q: &Position2D) -> f64 {
    (p.x - q.x).abs()
}
