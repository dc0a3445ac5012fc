//! Racket-Hand Inference
//!
//! A single forward pass over the whole observation stream producing one
//! global racket-hand decision. Each wrist's normalized velocity is weighted
//! by its horizontal distance from the body center: swing motion happens out
//! to the side of the body, so a wrist that moves fast while far from the
//! centerline is the better racket-hand signal. The decision is computed
//! once and reused by every later step; it is never re-evaluated per segment.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::motion::MIN_DT_SECONDS;
use crate::pose::features::extract_features;
use crate::pose::keypoints::PoseObservation;
use crate::pose::normalize::normalize_features;

/// The inferred dominant arm used for swinging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RacketHand {
    Left,
    Right,
}

impl std::fmt::Display for RacketHand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RacketHand::Left => write!(f, "left"),
            RacketHand::Right => write!(f, "right"),
        }
    }
}

/// Global racket-hand decision for one analyzed video
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Handedness {
    pub racket_hand: RacketHand,
    pub confidence: f64,
}

impl Handedness {
    /// Conservative default when the stream is too short to decide
    pub fn default_right() -> Self {
        Self {
            racket_hand: RacketHand::Right,
            confidence: 0.5,
        }
    }
}

/// Tunable knobs for handedness inference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandednessConfig {
    /// One hand's score must exceed the other's by this ratio to decide
    pub dominance_ratio: f64,
    /// Minimum observations required before attempting a decision
    pub min_observations: usize,
    /// Cap on the reported decision confidence
    pub confidence_cap: f64,
}

impl Default for HandednessConfig {
    fn default() -> Self {
        Self {
            dominance_ratio: 1.2,
            min_observations: 3,
            confidence_cap: 0.95,
        }
    }
}

/// Detect the racket hand from a complete observation stream
///
/// Requires at least `min_observations` samples; otherwise returns the
/// conservative default (right, 0.5). Frames whose features cannot be
/// extracted or normalized are skipped.
pub fn detect_handedness(observations: &[PoseObservation], config: &HandednessConfig) -> Handedness {
    if observations.len() < config.min_observations {
        return Handedness::default_right();
    }

    let mut left_weighted = 0.0;
    let mut right_weighted = 0.0;
    let mut pair_count = 0usize;

    for pair in observations.windows(2) {
        let prev = extract_features(&pair[0]).and_then(|f| normalize_features(&f));
        let curr = extract_features(&pair[1]).and_then(|f| normalize_features(&f));
        let (Some(prev), Some(curr)) = (prev, curr) else {
            continue;
        };

        let dt = (curr.time - prev.time).max(MIN_DT_SECONDS);

        let left_velocity = prev.left_wrist.distance(&curr.left_wrist) / dt;
        let right_velocity = prev.right_wrist.distance(&curr.right_wrist) / dt;

        // Weight by horizontal distance from the body centerline
        left_weighted += left_velocity * curr.left_wrist.x.abs();
        right_weighted += right_velocity * curr.right_wrist.x.abs();
        pair_count += 1;
    }

    if pair_count == 0 {
        return Handedness::default_right();
    }

    let left_score = left_weighted / pair_count as f64;
    let right_score = right_weighted / pair_count as f64;
    let total = left_score + right_score;

    debug!(left_score, right_score, pair_count, "handedness scores");

    if right_score > left_score * config.dominance_ratio {
        Handedness {
            racket_hand: RacketHand::Right,
            confidence: (right_score / total).min(config.confidence_cap),
        }
    } else if left_score > right_score * config.dominance_ratio {
        Handedness {
            racket_hand: RacketHand::Left,
            confidence: (left_score / total).min(config.confidence_cap),
        }
    } else {
        // No decisive winner: default right at coin-flip confidence
        Handedness::default_right()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::keypoints::{Keypoint, KeypointName, KEYPOINT_NAMES};

    /// Body at torso length 100 with one wrist displaced per frame
    fn make_observation(time: f64, left_wrist_x: f64, right_wrist_x: f64) -> PoseObservation {
        let keypoints = KEYPOINT_NAMES
            .iter()
            .map(|&name| {
                let (x, y) = match name {
                    KeypointName::LeftShoulder => (260.0, 100.0),
                    KeypointName::RightShoulder => (340.0, 100.0),
                    KeypointName::LeftWrist => (left_wrist_x, 180.0),
                    KeypointName::RightWrist => (right_wrist_x, 180.0),
                    KeypointName::LeftHip => (270.0, 200.0),
                    KeypointName::RightHip => (330.0, 200.0),
                    _ => (300.0, 150.0),
                };
                Keypoint::new(x, y, 0.9, name)
            })
            .collect();
        PoseObservation::new(time, keypoints)
    }

    fn right_dominant_stream() -> Vec<PoseObservation> {
        (0..10)
            .map(|i| {
                let t = i as f64 * 0.1;
                // Right wrist sweeps outward; left wrist barely moves
                make_observation(t, 230.0 + i as f64, 370.0 + i as f64 * 25.0)
            })
            .collect()
    }

    #[test]
    fn test_too_few_observations_returns_default() {
        let stream = vec![make_observation(0.0, 230.0, 370.0), make_observation(0.1, 230.0, 370.0)];
        let handedness = detect_handedness(&stream, &HandednessConfig::default());
        assert_eq!(handedness.racket_hand, RacketHand::Right);
        assert_eq!(handedness.confidence, 0.5);
    }

    #[test]
    fn test_right_dominant_motion_detected() {
        let handedness = detect_handedness(&right_dominant_stream(), &HandednessConfig::default());
        assert_eq!(handedness.racket_hand, RacketHand::Right);
        assert!(handedness.confidence > 0.5);
        assert!(handedness.confidence <= 0.95);
    }

    #[test]
    fn test_left_dominant_motion_detected() {
        let stream: Vec<_> = (0..10)
            .map(|i| {
                let t = i as f64 * 0.1;
                make_observation(t, 230.0 - i as f64 * 25.0, 370.0 + i as f64)
            })
            .collect();
        let handedness = detect_handedness(&stream, &HandednessConfig::default());
        assert_eq!(handedness.racket_hand, RacketHand::Left);
    }

    #[test]
    fn test_determinism() {
        let stream = right_dominant_stream();
        let config = HandednessConfig::default();
        let a = detect_handedness(&stream, &config);
        let b = detect_handedness(&stream, &config);
        assert_eq!(a, b);
    }

    #[test]
    fn test_stationary_stream_returns_default() {
        let stream: Vec<_> = (0..10)
            .map(|i| make_observation(i as f64 * 0.1, 230.0, 370.0))
            .collect();
        let handedness = detect_handedness(&stream, &HandednessConfig::default());
        // Both scores zero: neither exceeds the dominance ratio
        assert_eq!(handedness.racket_hand, RacketHand::Right);
        assert_eq!(handedness.confidence, 0.5);
    }

    #[test]
    fn test_duplicate_timestamps_do_not_blow_up() {
        let mut stream = right_dominant_stream();
        for obs in stream.iter_mut() {
            obs.time = 1.0;
        }
        let handedness = detect_handedness(&stream, &HandednessConfig::default());
        assert!(handedness.confidence.is_finite());
    }
}
