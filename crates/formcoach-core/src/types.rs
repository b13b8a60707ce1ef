//! Fundamental types for the FormCoach system.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Identifier for one form analysis session (one camera stream, one attempt)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// 2D position in image-plane coordinates (pixels, y grows downward)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position2D {
    pub x: f64,
    pub y: f64,
}

impl Position2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn to_nalgebra(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    /// Vector pointing from `self` to `other`
    pub fn vector_to(&self, other: &Self) -> Vector2<f64> {
        other.to_nalgebra() - self.to_nalgebra()
    }
}

/// 33-point body landmark set (BlazePose / ML Kit layout)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum LandmarkId {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    LeftMouth = 9,
    RightMouth = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl LandmarkId {
    pub const COUNT: usize = 33;

    pub const ALL: [LandmarkId; Self::COUNT] = [
        Self::Nose,
        Self::LeftEyeInner,
        Self::LeftEye,
        Self::LeftEyeOuter,
        Self::RightEyeInner,
        Self::RightEye,
        Self::RightEyeOuter,
        Self::LeftEar,
        Self::RightEar,
        Self::LeftMouth,
        Self::RightMouth,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftPinky,
        Self::RightPinky,
        Self::LeftIndex,
        Self::RightIndex,
        Self::LeftThumb,
        Self::RightThumb,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
        Self::LeftHeel,
        Self::RightHeel,
        Self::LeftFootIndex,
        Self::RightFootIndex,
    ];

    pub fn from_index(idx: u8) -> Option<Self> {
        Self::ALL.get(idx as usize).copied()
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// A single detected body joint for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub id: LandmarkId,
    pub position: Position2D,
    /// In-frame likelihood reported by the detector, in [0, 1]
    pub confidence: f32,
}

impl Landmark {
    pub fn new(id: LandmarkId, position: Position2D, confidence: f32) -> Self {
        Self {
            id,
            position,
            confidence,
        }
    }

    /// Like [`Landmark::new`] but rejects a confidence outside [0, 1]
    pub fn try_new(id: LandmarkId, position: Position2D, confidence: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(Error::InvalidInput(format!(
                "confidence for {:?} must be in [0, 1], got {}",
                id, confidence
            )));
        }
        Ok(Self::new(id, position, confidence))
    }
}

/// One frame of detected landmarks. Absent joints are simply missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PoseFrameRecord", into = "PoseFrameRecord")]
pub struct PoseFrame {
    landmarks: HashMap<LandmarkId, Landmark>,
    mirrored: bool,
}

impl PoseFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_landmarks(landmarks: impl IntoIterator<Item = Landmark>) -> Self {
        let mut frame = Self::new();
        for landmark in landmarks {
            frame.insert(landmark);
        }
        frame
    }

    /// Decode a frame from its JSON record form
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Insert or replace the landmark with the same id
    pub fn insert(&mut self, landmark: Landmark) -> Option<Landmark> {
        self.landmarks.insert(landmark.id, landmark)
    }

    pub fn remove(&mut self, id: LandmarkId) -> Option<Landmark> {
        self.landmarks.remove(&id)
    }

    pub fn get(&self, id: LandmarkId) -> Option<&Landmark> {
        self.landmarks.get(&id)
    }

    pub fn contains(&self, id: LandmarkId) -> bool {
        self.landmarks.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    pub fn landmarks(&self) -> impl Iterator<Item = &Landmark> {
        self.landmarks.values()
    }

    /// Whether x coordinates have already been flipped for a front camera
    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    pub fn set_mirrored(&mut self, mirrored: bool) {
        self.mirrored = mirrored;
    }

    /// Rewrite every landmark position in place. Identities are untouched.
    pub fn map_positions(&mut self, mut f: impl FnMut(Position2D) -> Position2D) {
        for landmark in self.landmarks.values_mut() {
            landmark.position = f(landmark.position);
        }
    }
}

/// Wire form of a [`PoseFrame`]: a flat landmark list
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PoseFrameRecord {
    landmarks: Vec<Landmark>,
    #[serde(default)]
    mirrored: bool,
}

impl TryFrom<PoseFrameRecord> for PoseFrame {
    type Error = Error;

    fn try_from(record: PoseFrameRecord) -> Result<Self> {
        let mut frame = PoseFrame::new();
        for lm in record.landmarks {
            frame.insert(Landmark::try_new(lm.id, lm.position, lm.confidence)?);
        }
        frame.mirrored = record.mirrored;
        Ok(frame)
    }
}

impl From<PoseFrame> for PoseFrameRecord {
    fn from(frame: PoseFrame) -> Self {
        let mut landmarks: Vec<Landmark> = frame.landmarks.into_values().collect();
        landmarks.sort_by_key(|lm| lm.id);
        Self {
            landmarks,
            mirrored: frame.mirrored,
        }
    }
}

/// Exercises the analyzer knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExerciseKind {
    Plank,
    PushUp,
    Squat,
    HollowBody,
    RussianTwist,
    WallSit,
}

impl ExerciseKind {
    pub const ALL: [ExerciseKind; 6] = [
        Self::Plank,
        Self::PushUp,
        Self::Squat,
        Self::HollowBody,
        Self::RussianTwist,
        Self::WallSit,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ExerciseKind::Plank => "plank",
            ExerciseKind::PushUp => "push-up",
            ExerciseKind::Squat => "squat",
            ExerciseKind::HollowBody => "hollow-body",
            ExerciseKind::RussianTwist => "russian-twist",
            ExerciseKind::WallSit => "wall-sit",
        }
    }

    /// Whether a rule set exists for this kind
    pub fn is_supported(&self) -> bool {
        matches!(
            self,
            ExerciseKind::Plank | ExerciseKind::PushUp | ExerciseKind::Squat
        )
    }

    /// Whether perfect repetitions are counted for this kind
    pub fn tracks_repetitions(&self) -> bool {
        matches!(self, ExerciseKind::PushUp)
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExerciseKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted || (wanted == "pushup" && *kind == Self::PushUp))
            .ok_or_else(|| Error::InvalidInput(format!("unknown exercise: {}", s)))
    }
}

/// Fixed feedback vocabulary; [`Feedback::message`] is the user-facing text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    // Frame diagnostics
    FullBodyNotInView,
    PoseUnclear,
    NotSupported(ExerciseKind),

    // Plank
    KeepHipsLevel,
    LowerHips,
    RaiseHips,
    PerfectPlank,

    // Push-up, per-frame check
    LowerBodyMore,
    PerfectPushUpForm,

    // Push-up, repetition tracking
    LowerToStartPosition,
    StartPositionReached,
    KeepPushing,
    IncompleteRep,
    PerfectRep,

    // Squat
    KneesOverToes,
    SquatTooLow,
    SquatLowerWithControl,
    SquatGoodDepth,
}

impl Feedback {
    pub fn message(&self) -> &'static str {
        match self {
            Feedback::FullBodyNotInView => "Please position your full body in the camera view",
            Feedback::PoseUnclear => "Cannot detect pose clearly. Please adjust your position",
            Feedback::NotSupported(kind) => match kind {
                ExerciseKind::HollowBody => "Hollow body analysis is not supported yet",
                ExerciseKind::RussianTwist => "Russian twist analysis is not supported yet",
                ExerciseKind::WallSit => "Wall sit analysis is not supported yet",
                _ => "Exercise type not supported",
            },
            Feedback::KeepHipsLevel => "Keep your hips level",
            Feedback::LowerHips => "Lower your hips to maintain a straight line",
            Feedback::RaiseHips => "Raise your hips to maintain a straight line",
            Feedback::PerfectPlank => "Perfect plank form!",
            Feedback::LowerBodyMore => "Lower your body more",
            Feedback::PerfectPushUpForm => "Perfect push-up form!",
            Feedback::LowerToStartPosition => "Lower your chest to the start position",
            Feedback::StartPositionReached => "Good start position! Now push up",
            Feedback::KeepPushing => "Keep pushing until elbows are at 90°",
            Feedback::IncompleteRep => "Lower body more until elbows are at 90°",
            Feedback::PerfectRep => "Perfect form!",
            Feedback::KneesOverToes => "Keep your knees in line with your toes",
            Feedback::SquatTooLow => "You're going too low, maintain at least 90 degrees at knees",
            Feedback::SquatLowerWithControl => "Good! Now lower down with control",
            Feedback::SquatGoodDepth => "Good depth! Keep your chest up",
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Result of analyzing one frame
///
/// Serializes `feedback` as its message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormAnalysis {
    pub is_correct: bool,
    #[serde(serialize_with = "serialize_feedback_message")]
    pub feedback: Feedback,
    /// Set only on the frame that credits a perfect repetition
    pub rep_completed: bool,
}

impl FormAnalysis {
    pub fn correct(feedback: Feedback) -> Self {
        Self {
            is_correct: true,
            feedback,
            rep_completed: false,
        }
    }

    pub fn incorrect(feedback: Feedback) -> Self {
        Self {
            is_correct: false,
            feedback,
            rep_completed: false,
        }
    }

    pub fn perfect_rep() -> Self {
        Self {
            is_correct: true,
            feedback: Feedback::PerfectRep,
            rep_completed: true,
        }
    }

    /// Placeholder result for kinds without a rule set
    pub fn unsupported(kind: ExerciseKind) -> Self {
        Self::incorrect(Feedback::NotSupported(kind))
    }

    pub fn message(&self) -> &'static str {
        self.feedback.message()
    }
}

fn serialize_feedback_message<S: serde::Serializer>(
    feedback: &Feedback,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(feedback.message())
}
