//! Tennis Feature Extraction
//!
//! Projects a raw pose observation onto the nine landmarks relevant to swing
//! analysis: both wrists, elbows, shoulders, hips, and the nose. A pure
//! projection with no state; computed on demand from a single observation.

use super::keypoints::{Keypoint, KeypointName, PoseObservation};

/// The swing-relevant subset of one pose observation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TennisFeatures {
    pub left_wrist: Keypoint,
    pub right_wrist: Keypoint,
    pub left_elbow: Keypoint,
    pub right_elbow: Keypoint,
    pub left_shoulder: Keypoint,
    pub right_shoulder: Keypoint,
    pub left_hip: Keypoint,
    pub right_hip: Keypoint,
    pub nose: Keypoint,

    /// Overall observation confidence (mean keypoint score)
    pub confidence: f64,
    /// Sample time in seconds
    pub time: f64,
}

/// Extract tennis-relevant features from one observation
///
/// Returns `None` when the observation does not carry the full 17-point
/// topology; the frame is then skipped by all downstream steps.
pub fn extract_features(observation: &PoseObservation) -> Option<TennisFeatures> {
    if !observation.has_full_topology() {
        return None;
    }

    let kp = |name: KeypointName| observation.keypoints[name.index()];

    Some(TennisFeatures {
        left_wrist: kp(KeypointName::LeftWrist),
        right_wrist: kp(KeypointName::RightWrist),
        left_elbow: kp(KeypointName::LeftElbow),
        right_elbow: kp(KeypointName::RightElbow),
        left_shoulder: kp(KeypointName::LeftShoulder),
        right_shoulder: kp(KeypointName::RightShoulder),
        left_hip: kp(KeypointName::LeftHip),
        right_hip: kp(KeypointName::RightHip),
        nose: kp(KeypointName::Nose),
        confidence: observation.confidence,
        time: observation.time,
    })
}
