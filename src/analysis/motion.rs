//! Per-Frame Motion Analysis
//!
//! Computes a racket-hand-aware motion descriptor for each consecutive pair
//! of normalized frames: wrist velocities, shoulder-line rotation rate,
//! hands-together distance, wrist heights relative to the shoulder line, and
//! direction flags. All distances are in torso lengths, all velocities in
//! torso lengths per second.

use super::handedness::RacketHand;
use crate::pose::normalize::{NormalizedFeatures, Point2};

/// Numeric-safety floor for frame time deltas. Prevents divide-by-zero on
/// duplicate timestamps at the velocity computation boundary.
pub const MIN_DT_SECONDS: f64 = 1e-3;

/// Motion descriptor for one consecutive-frame pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionDescriptor {
    /// Racket-hand wrist velocity (torso lengths / second)
    pub racket_wrist_velocity: f64,
    /// Off-hand wrist velocity
    pub off_wrist_velocity: f64,
    /// Shoulder-line rotation rate (radians / second, signed)
    pub shoulder_rotation_rate: f64,
    /// Distance between the two wrists; flags two-handed strokes
    pub hands_distance: f64,
    /// Racket wrist height relative to the shoulder line (negative = above)
    pub racket_wrist_height: f64,
    /// Off-hand wrist height relative to the shoulder line
    pub off_wrist_height: f64,
    /// Racket wrist's oriented horizontal offset from mid-shoulder:
    /// positive on the dominant side, negative when swung cross-body
    pub side_sign: f64,
    /// Horizontal displacement dominates vertical
    pub is_horizontal: bool,
    /// Vertical displacement dominates horizontal
    pub is_vertical: bool,
    /// Racket wrist moved upward (toward smaller y)
    pub is_upward: bool,
    /// Mean of racket and off-hand wrist velocities
    pub movement_intensity: f64,
    /// Minimum arm/shoulder keypoint score for the current frame
    pub keypoint_confidence: f64,
}

fn wrists(features: &NormalizedFeatures, hand: RacketHand) -> (Point2, Point2) {
    match hand {
        RacketHand::Right => (features.right_wrist, features.left_wrist),
        RacketHand::Left => (features.left_wrist, features.right_wrist),
    }
}

fn racket_shoulder(features: &NormalizedFeatures, hand: RacketHand) -> Point2 {
    match hand {
        RacketHand::Right => features.right_shoulder,
        RacketHand::Left => features.left_shoulder,
    }
}

fn shoulder_angle(features: &NormalizedFeatures) -> f64 {
    let dx = features.right_shoulder.x - features.left_shoulder.x;
    let dy = features.right_shoulder.y - features.left_shoulder.y;
    dy.atan2(dx)
}

/// Analyze motion between two normalized frames
///
/// The caller guarantees both frames normalized successfully; frames that
/// fail extraction or normalization never reach this function.
pub fn analyze_motion(
    curr: &NormalizedFeatures,
    prev: &NormalizedFeatures,
    hand: RacketHand,
) -> MotionDescriptor {
    let dt = (curr.time - prev.time).max(MIN_DT_SECONDS);

    let (racket_curr, off_curr) = wrists(curr, hand);
    let (racket_prev, off_prev) = wrists(prev, hand);

    let racket_wrist_velocity = racket_prev.distance(&racket_curr) / dt;
    let off_wrist_velocity = off_prev.distance(&off_curr) / dt;

    let shoulder_rotation_rate = (shoulder_angle(curr) - shoulder_angle(prev)) / dt;

    let dx = racket_curr.x - racket_prev.x;
    let dy = racket_curr.y - racket_prev.y;

    // Orient the wrist's x-offset so that positive always means "on the
    // racket arm's own side of the body", independent of handedness and of
    // which way the camera faces the player.
    let offset = racket_curr.x - curr.mid_shoulder.x;
    let shoulder_side = racket_shoulder(curr, hand).x - curr.mid_shoulder.x;
    let side_sign = if shoulder_side < 0.0 { -offset } else { offset };

    MotionDescriptor {
        racket_wrist_velocity,
        off_wrist_velocity,
        shoulder_rotation_rate,
        hands_distance: racket_curr.distance(&off_curr),
        racket_wrist_height: racket_curr.y - curr.mid_shoulder.y,
        off_wrist_height: off_curr.y - curr.mid_shoulder.y,
        side_sign,
        is_horizontal: dx.abs() > dy.abs(),
        is_vertical: dy.abs() > dx.abs(),
        is_upward: dy < 0.0,
        movement_intensity: (racket_wrist_velocity + off_wrist_velocity) / 2.0,
        keypoint_confidence: curr.arm_confidence,
    }
}
