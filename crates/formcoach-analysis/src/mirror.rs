//! Front-camera mirror normalization.
//!
//! A front-facing camera delivers a horizontally mirrored image. Flipping x
//! before anything else reads the frame keeps left/right landmarks on the
//! performer's actual left/right.

use formcoach_core::{PoseFrame, Position2D};

/// Flips x coordinates around the image width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MirrorNormalizer {
    image_width: f64,
}

impl MirrorNormalizer {
    pub fn new(image_width: f64) -> Self {
        Self { image_width }
    }

    /// Flip the frame in place. A frame already marked mirrored is left alone.
    pub fn normalize(&self, frame: &mut PoseFrame) {
        if frame.is_mirrored() {
            return;
        }

        let width = self.image_width;
        frame.map_positions(|p| Position2D::new(width - p.x, p.y));
        frame.set_mirrored(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcoach_core::{Landmark, LandmarkId};

    #[test]
    fn test_flips_x_only() {
        let mut frame = PoseFrame::from_landmarks([
            Landmark::new(LandmarkId::LeftWrist, Position2D::new(100.0, 50.0), 0.9),
            Landmark::new(LandmarkId::RightWrist, Position2D::new(600.0, 70.0), 0.8),
        ]);

        MirrorNormalizer::new(640.0).normalize(&mut frame);

        let left = frame.get(LandmarkId::LeftWrist).unwrap();
        let right = frame.get(LandmarkId::RightWrist).unwrap();
        assert_eq!(left.position, Position2D::new(540.0, 50.0));
        assert_eq!(right.position, Position2D::new(40.0, 70.0));
        assert_eq!(right.confidence, 0.8);
        assert!(frame.is_mirrored());
    }

    #[test]
    fn test_already_mirrored_frame_is_untouched() {
        let mut frame = PoseFrame::from_landmarks([Landmark::new(
            LandmarkId::Nose,
            Position2D::new(100.0, 50.0),
            0.9,
        )]);
        let mirror = MirrorNormalizer::new(640.0);

        mirror.normalize(&mut frame);
        mirror.normalize(&mut frame);

        assert_eq!(frame.get(LandmarkId::Nose).unwrap().position.x, 540.0);
    }
}
