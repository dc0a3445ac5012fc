//! Body-Scale Coordinate Normalization
//!
//! Rescales and recenters the tennis landmarks into a body-relative frame:
//! the mid-hip point becomes the origin and the torso length (mid-shoulder
//! to mid-hip distance) becomes the unit. This removes camera distance,
//! zoom, and horizontal framing as confounds, so velocity thresholds can be
//! expressed in body-relative units instead of pixels.

use super::features::TennisFeatures;
use super::keypoints::Keypoint;

/// Minimum torso length in raw pixel units below which a detection is
/// considered unreliable (hips/shoulders collapsed or occluded)
pub const MIN_TORSO_LENGTH: f64 = 10.0;

/// A 2D point in the normalized body frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point2) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Tennis landmarks in the body-centered, torso-scaled frame
///
/// Positions are offsets from mid-hip measured in torso lengths. Image
/// convention is preserved: y grows downward, so negative y is above the
/// hips.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedFeatures {
    pub left_wrist: Point2,
    pub right_wrist: Point2,
    pub left_elbow: Point2,
    pub right_elbow: Point2,
    pub left_shoulder: Point2,
    pub right_shoulder: Point2,
    pub left_hip: Point2,
    pub right_hip: Point2,
    pub nose: Point2,
    /// Midpoint of the shoulder line, normalized
    pub mid_shoulder: Point2,

    /// Torso length in raw pixel units (the scale that was divided out)
    pub torso_length: f64,
    /// Minimum score of the four arm/shoulder keypoints (both wrists, both
    /// shoulders); the per-frame confidence floor used by motion analysis
    pub arm_confidence: f64,
    /// Overall observation confidence
    pub confidence: f64,
    /// Sample time in seconds
    pub time: f64,
}

fn raw_midpoint(a: &Keypoint, b: &Keypoint) -> (f64, f64) {
    ((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Normalize tennis features into the body-relative frame
///
/// Returns `None` when the torso length is below [`MIN_TORSO_LENGTH`]; the
/// frame is then excluded from handedness, motion, and segmentation, but
/// does not abort the batch.
pub fn normalize_features(features: &TennisFeatures) -> Option<NormalizedFeatures> {
    let (hip_x, hip_y) = raw_midpoint(&features.left_hip, &features.right_hip);
    let (shoulder_x, shoulder_y) = raw_midpoint(&features.left_shoulder, &features.right_shoulder);

    let dx = shoulder_x - hip_x;
    let dy = shoulder_y - hip_y;
    let torso_length = (dx * dx + dy * dy).sqrt();

    if torso_length < MIN_TORSO_LENGTH {
        return None;
    }

    let project = |kp: &Keypoint| Point2::new((kp.x - hip_x) / torso_length, (kp.y - hip_y) / torso_length);

    let arm_confidence = features
        .left_wrist
        .score
        .min(features.right_wrist.score)
        .min(features.left_shoulder.score)
        .min(features.right_shoulder.score);

    Some(NormalizedFeatures {
        left_wrist: project(&features.left_wrist),
        right_wrist: project(&features.right_wrist),
        left_elbow: project(&features.left_elbow),
        right_elbow: project(&features.right_elbow),
        left_shoulder: project(&features.left_shoulder),
        right_shoulder: project(&features.right_shoulder),
        left_hip: project(&features.left_hip),
        right_hip: project(&features.right_hip),
        nose: project(&features.nose),
        mid_shoulder: Point2::new(
            (shoulder_x - hip_x) / torso_length,
            (shoulder_y - hip_y) / torso_length,
        ),
        torso_length,
        arm_confidence,
        confidence: features.confidence,
        time: features.time,
    })
}
