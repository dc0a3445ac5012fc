//! Keypoint Data Structures
//!
//! Defines the fixed 17-point anatomical topology (MoveNet ordering) and the
//! immutable pose observation consumed from the external pose source.

use serde::{Deserialize, Serialize};

/// Number of keypoints in a pose observation
pub const KEYPOINT_COUNT: usize = 17;

/// The 17 fixed anatomical landmarks, identified by index 0-16
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeypointName {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

/// All keypoint names in topology order
pub const KEYPOINT_NAMES: [KeypointName; KEYPOINT_COUNT] = [
    KeypointName::Nose,
    KeypointName::LeftEye,
    KeypointName::RightEye,
    KeypointName::LeftEar,
    KeypointName::RightEar,
    KeypointName::LeftShoulder,
    KeypointName::RightShoulder,
    KeypointName::LeftElbow,
    KeypointName::RightElbow,
    KeypointName::LeftWrist,
    KeypointName::RightWrist,
    KeypointName::LeftHip,
    KeypointName::RightHip,
    KeypointName::LeftKnee,
    KeypointName::RightKnee,
    KeypointName::LeftAnkle,
    KeypointName::RightAnkle,
];

impl KeypointName {
    /// Topology index of this keypoint (0-16)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Keypoint at a topology index, if in range
    pub fn from_index(index: usize) -> Option<Self> {
        KEYPOINT_NAMES.get(index).copied()
    }
}

/// One tracked anatomical landmark with 2D position and detection confidence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub x: f64,
    pub y: f64,
    /// Detection confidence in [0, 1]
    pub score: f64,
    pub name: KeypointName,
}

impl Keypoint {
    pub fn new(x: f64, y: f64, score: f64, name: KeypointName) -> Self {
        Self { x, y, score, name }
    }

    /// Euclidean distance to another keypoint
    pub fn distance_to(&self, other: &Keypoint) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// One pose sample from the external pose source
///
/// Immutable once produced. `confidence` is the mean of the keypoint scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseObservation {
    /// Sample time in seconds from video start
    pub time: f64,
    /// Always [`KEYPOINT_COUNT`] keypoints in topology order
    pub keypoints: Vec<Keypoint>,
    /// Mean keypoint score
    pub confidence: f64,
}

impl PoseObservation {
    /// Build an observation, deriving `confidence` from the keypoint scores
    pub fn new(time: f64, keypoints: Vec<Keypoint>) -> Self {
        let confidence = if keypoints.is_empty() {
            0.0
        } else {
            keypoints.iter().map(|kp| kp.score).sum::<f64>() / keypoints.len() as f64
        };
        Self {
            time,
            keypoints,
            confidence,
        }
    }

    /// Keypoint by anatomical name, if the topology is complete
    pub fn keypoint(&self, name: KeypointName) -> Option<&Keypoint> {
        self.keypoints.get(name.index())
    }

    /// True when the observation carries the full 17-point topology
    pub fn has_full_topology(&self) -> bool {
        self.keypoints.len() == KEYPOINT_COUNT
    }
}
