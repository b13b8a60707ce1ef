//! Synthetic frames for unit tests.

use formcoach_core::{Landmark, LandmarkId, PoseFrame, Position2D};

pub const CONFIDENT: f32 = 0.95;

pub fn frame(points: &[(LandmarkId, f64, f64)]) -> PoseFrame {
    PoseFrame::from_landmarks(
        points
            .iter()
            .map(|&(id, x, y)| Landmark::new(id, Position2D::new(x, y), CONFIDENT)),
    )
}

pub fn without(mut frame: PoseFrame, ids: &[LandmarkId]) -> PoseFrame {
    for id in ids {
        frame.remove(*id);
    }
    frame
}

/// Same frame with every landmark at `confidence`
pub fn with_confidence(frame: PoseFrame, confidence: f32) -> PoseFrame {
    PoseFrame::from_landmarks(frame.landmarks().map(|lm| Landmark {
        confidence,
        ..*lm
    }))
}

/// Side-view plank, shoulders at x=100 and ankles at x=500, both at y=200.
/// The left hip sits at (300, `left_hip_y`); the right hip is `right_hip_drop`
/// pixels lower.
pub fn plank_frame(left_hip_y: f64, right_hip_drop: f64) -> PoseFrame {
    use LandmarkId::*;
    frame(&[
        (LeftShoulder, 100.0, 200.0),
        (RightShoulder, 100.0, 200.0),
        (LeftHip, 300.0, left_hip_y),
        (RightHip, 300.0, left_hip_y + right_hip_drop),
        (LeftAnkle, 500.0, 200.0),
        (RightAnkle, 500.0, 200.0),
    ])
}

/// Push-up with both elbows bent to `elbow_deg`; the right hip is
/// `right_hip_drop` pixels lower than the left.
pub fn push_up_frame(elbow_deg: f64, right_hip_drop: f64) -> PoseFrame {
    push_up_arms_frame(elbow_deg, elbow_deg, right_hip_drop)
}

/// Push-up with each elbow bent to its own angle
pub fn push_up_arms_frame(left_deg: f64, right_deg: f64, right_hip_drop: f64) -> PoseFrame {
    use LandmarkId::*;
    let wrist = |deg: f64| {
        let (sin, cos) = deg.to_radians().sin_cos();
        (200.0 + 100.0 * cos, 300.0 - 100.0 * sin)
    };
    let (left_wrist, right_wrist) = (wrist(left_deg), wrist(right_deg));

    frame(&[
        (LeftShoulder, 300.0, 300.0),
        (RightShoulder, 300.0, 300.0),
        (LeftElbow, 200.0, 300.0),
        (RightElbow, 200.0, 300.0),
        (LeftWrist, left_wrist.0, left_wrist.1),
        (RightWrist, right_wrist.0, right_wrist.1),
        (LeftHip, 500.0, 300.0),
        (RightHip, 500.0, 300.0 + right_hip_drop),
    ])
}

/// Side-view squat with the knee at (300, 300) bent to `knee_deg`. The ankle
/// is 200px below the knee, shifted `ankle_offset` pixels along x.
pub fn squat_frame(knee_deg: f64, ankle_offset: f64) -> PoseFrame {
    use LandmarkId::*;
    let (sin, cos) = knee_deg.to_radians().sin_cos();
    let hip = (300.0 + 200.0 * sin, 300.0 + 200.0 * cos);

    frame(&[
        (LeftHip, hip.0, hip.1),
        (RightHip, hip.0, hip.1),
        (LeftKnee, 300.0, 300.0),
        (RightKnee, 300.0, 300.0),
        (LeftAnkle, 300.0 + ankle_offset, 500.0),
        (RightAnkle, 300.0 + ankle_offset, 500.0),
    ])
}
