//! Shot Classification
//!
//! Scores a closed segment against three archetypes (serve, forehand,
//! backhand) using hand-tuned, confidence-weighted heuristics, then derives
//! an overall confidence and a human-readable reasoning trail. There is no
//! learned model here; every weight is an empirical tuning knob exposed in
//! [`ClassifierConfig`].

use serde::{Deserialize, Serialize};

use super::handedness::Handedness;
use super::segmentation::ShotSegment;

/// Classified shot archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShotType {
    Forehand,
    Backhand,
    Serve,
    Unknown,
}

impl std::fmt::Display for ShotType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShotType::Forehand => write!(f, "forehand"),
            ShotType::Backhand => write!(f, "backhand"),
            ShotType::Serve => write!(f, "serve"),
            ShotType::Unknown => write!(f, "unknown"),
        }
    }
}

/// A classified, immutable shot event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotEvent {
    pub shot_type: ShotType,
    /// Always within [confidence_floor, confidence_cap]
    pub confidence: f64,
    /// Ordered human-readable justification
    pub reasoning: Vec<String>,
    pub start_time: f64,
    pub end_time: f64,
    pub duration: f64,
    /// Highest movement intensity in the segment
    pub max_velocity: f64,
    /// Highest racket-wrist velocity in the segment
    pub peak_velocity: f64,
    /// Time of the velocity peak
    pub peak_time: f64,
    /// Mean racket-wrist velocity over segment frames
    pub average_velocity: f64,
}

/// Classifier tuning knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Per-frame score for the serve cue (upward motion, wrist high)
    pub serve_weight: f64,
    /// Per-frame score for a dominant-side or cross-body horizontal swing
    pub groundstroke_weight: f64,
    /// Extra backhand score when the hands are close together
    pub two_handed_bonus: f64,
    /// Wrist must be above the shoulder line by this fraction of torso
    /// length (negative = above) to count toward a serve
    pub serve_wrist_height: f64,
    /// Hands-together distance (torso lengths) flagging a two-handed grip
    pub two_handed_distance: f64,
    /// Score normalizer for serves
    pub serve_divisor: f64,
    /// Score normalizer for forehands/backhands
    pub groundstroke_divisor: f64,
    /// Frames above this keypoint confidence count as well-observed
    pub coverage_threshold: f64,
    /// Peak velocity at which the velocity factor saturates
    pub peak_velocity_norm: f64,
    /// Peak velocity that earns the confidence boost
    pub high_peak_velocity: f64,
    pub high_peak_boost: f64,
    /// Duration that earns the confidence boost
    pub long_duration: f64,
    pub long_duration_boost: f64,
    /// Every classified segment reports at least this confidence
    pub confidence_floor: f64,
    pub confidence_cap: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            serve_weight: 2.0,
            groundstroke_weight: 1.5,
            two_handed_bonus: 0.5,
            serve_wrist_height: -0.1,
            two_handed_distance: 0.5,
            serve_divisor: 1.5,
            groundstroke_divisor: 1.2,
            coverage_threshold: 0.5,
            peak_velocity_norm: 3.0,
            high_peak_velocity: 5.0,
            high_peak_boost: 1.5,
            long_duration: 1.5,
            long_duration_boost: 1.2,
            confidence_floor: 0.1,
            confidence_cap: 0.95,
        }
    }
}

/// Heuristic shot classifier
pub struct ShotClassifier {
    pub config: ClassifierConfig,
}

impl ShotClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Classify a closed segment into a shot event
    pub fn classify(&self, segment: &ShotSegment, handedness: &Handedness) -> ShotEvent {
        let cfg = &self.config;

        let mut serve_score = 0.0;
        let mut forehand_score = 0.0;
        let mut backhand_score = 0.0;
        let mut covered_frames = 0usize;
        let mut two_handed_frames = 0usize;

        for frame in &segment.frames {
            let motion = &frame.motion;
            let weight = motion.keypoint_confidence;

            if motion.keypoint_confidence > cfg.coverage_threshold {
                covered_frames += 1;
            }

            // Serve: upward motion with the wrist above the shoulder line
            if motion.is_upward && motion.racket_wrist_height < cfg.serve_wrist_height {
                serve_score += cfg.serve_weight * weight;
            }

            // Forehand: dominant-side horizontal swing
            if motion.is_horizontal && motion.side_sign > 0.0 {
                forehand_score += cfg.groundstroke_weight * weight;
            }

            // Backhand: cross-body horizontal swing, with a two-handed bonus
            if motion.is_horizontal && motion.side_sign < 0.0 {
                backhand_score += cfg.groundstroke_weight * weight;
                if motion.hands_distance < cfg.two_handed_distance {
                    backhand_score += cfg.two_handed_bonus * weight;
                    two_handed_frames += 1;
                }
            }
        }

        // Strictly highest score wins; evaluation order (serve, forehand,
        // backhand) is the tie-break policy.
        let mut shot_type = ShotType::Unknown;
        let mut winning_score = 0.0;
        for (candidate, score) in [
            (ShotType::Serve, serve_score),
            (ShotType::Forehand, forehand_score),
            (ShotType::Backhand, backhand_score),
        ] {
            if score > winning_score {
                shot_type = candidate;
                winning_score = score;
            }
        }

        let duration = segment.duration();
        let frame_count = segment.frames.len().max(1) as f64;
        let coverage = covered_frames as f64 / frame_count;
        let peak_factor = (segment.peak_velocity / cfg.peak_velocity_norm).min(1.0);

        let divisor = match shot_type {
            ShotType::Serve => cfg.serve_divisor,
            ShotType::Forehand | ShotType::Backhand => cfg.groundstroke_divisor,
            ShotType::Unknown => 1.0,
        };

        let mut confidence = if shot_type == ShotType::Unknown {
            0.0
        } else {
            (winning_score / (frame_count * divisor)).min(cfg.confidence_cap) * coverage * peak_factor
        };

        if segment.peak_velocity > cfg.high_peak_velocity {
            confidence = (confidence * cfg.high_peak_boost).min(cfg.confidence_cap);
        }
        if duration > cfg.long_duration {
            confidence = (confidence * cfg.long_duration_boost).min(cfg.confidence_cap);
        }
        confidence = confidence.max(cfg.confidence_floor);

        let two_handed = two_handed_frames * 2 > segment.frames.len();
        let reasoning = self.build_reasoning(shot_type, segment, handedness, two_handed, duration);

        ShotEvent {
            shot_type,
            confidence,
            reasoning,
            start_time: segment.start_time,
            end_time: segment.end_time,
            duration,
            max_velocity: segment.max_velocity,
            peak_velocity: segment.peak_velocity,
            peak_time: segment.peak_time,
            average_velocity: segment.average_velocity(),
        }
    }

    fn build_reasoning(
        &self,
        shot_type: ShotType,
        segment: &ShotSegment,
        handedness: &Handedness,
        two_handed: bool,
        duration: f64,
    ) -> Vec<String> {
        let mut reasoning = vec![
            format!(
                "Racket hand: {} ({:.0}% confidence)",
                handedness.racket_hand,
                handedness.confidence * 100.0
            ),
            format!(
                "Peak wrist velocity {:.1} torso lengths/s",
                segment.peak_velocity
            ),
            format!("Swing duration {:.2}s", duration),
        ];

        match shot_type {
            ShotType::Serve => {
                reasoning.push("Upward motion detected".to_string());
                reasoning.push("Wrist above shoulder level".to_string());
            }
            ShotType::Forehand => {
                reasoning.push("Dominant-side horizontal swing".to_string());
            }
            ShotType::Backhand => {
                reasoning.push("Cross-body horizontal swing".to_string());
                if two_handed {
                    reasoning.push("Hands close together (two-handed grip)".to_string());
                }
            }
            ShotType::Unknown => {
                reasoning.push("Insufficient movement patterns".to_string());
                reasoning.push("Low confidence classification".to_string());
            }
        }

        reasoning
    }
}

impl Default for ShotClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::handedness::RacketHand;
    use crate::analysis::motion::MotionDescriptor;
    use crate::analysis::segmentation::SegmentFrame;
    use crate::pose::features::TennisFeatures;
    use crate::pose::keypoints::{Keypoint, KeypointName};

    fn dummy_features(time: f64) -> TennisFeatures {
        let kp = |x: f64, y: f64, name| Keypoint::new(x, y, 0.9, name);
        TennisFeatures {
            left_wrist: kp(230.0, 180.0, KeypointName::LeftWrist),
            right_wrist: kp(370.0, 180.0, KeypointName::RightWrist),
            left_elbow: kp(240.0, 150.0, KeypointName::LeftElbow),
            right_elbow: kp(360.0, 150.0, KeypointName::RightElbow),
            left_shoulder: kp(260.0, 100.0, KeypointName::LeftShoulder),
            right_shoulder: kp(340.0, 100.0, KeypointName::RightShoulder),
            left_hip: kp(270.0, 200.0, KeypointName::LeftHip),
            right_hip: kp(330.0, 200.0, KeypointName::RightHip),
            nose: kp(300.0, 50.0, KeypointName::Nose),
            confidence: 0.9,
            time,
        }
    }

    fn quiet_motion() -> MotionDescriptor {
        MotionDescriptor {
            racket_wrist_velocity: 2.0,
            off_wrist_velocity: 0.4,
            shoulder_rotation_rate: 0.0,
            hands_distance: 1.4,
            racket_wrist_height: 0.5,
            off_wrist_height: 0.5,
            side_sign: 0.0,
            is_horizontal: false,
            is_vertical: false,
            is_upward: false,
            movement_intensity: 1.2,
            keypoint_confidence: 0.9,
        }
    }

    fn make_segment(motions: Vec<MotionDescriptor>) -> ShotSegment {
        let frames: Vec<SegmentFrame> = motions
            .into_iter()
            .enumerate()
            .map(|(i, motion)| SegmentFrame {
                time: 1.0 + i as f64 * 0.1,
                motion,
                features: dummy_features(1.0 + i as f64 * 0.1),
            })
            .collect();
        let n = frames.len();
        let peak = frames
            .iter()
            .map(|f| f.motion.racket_wrist_velocity)
            .fold(0.0, f64::max);
        let total: f64 = frames.iter().map(|f| f.motion.racket_wrist_velocity).sum();
        ShotSegment {
            start_time: 1.0,
            end_time: 1.0 + n as f64 * 0.1,
            frames,
            max_velocity: peak,
            peak_velocity: peak,
            peak_time: 1.0,
            total_velocity: total,
        }
    }

    fn handedness() -> Handedness {
        Handedness {
            racket_hand: RacketHand::Right,
            confidence: 0.8,
        }
    }

    #[test]
    fn test_forehand_classification() {
        let motions: Vec<_> = (0..8)
            .map(|_| MotionDescriptor {
                is_horizontal: true,
                side_sign: 0.7,
                ..quiet_motion()
            })
            .collect();
        let event = ShotClassifier::default().classify(&make_segment(motions), &handedness());
        assert_eq!(event.shot_type, ShotType::Forehand);
        assert!(event.confidence >= 0.25);
        assert!(event
            .reasoning
            .iter()
            .any(|r| r.contains("Dominant-side horizontal swing")));
    }

    #[test]
    fn test_backhand_classification_with_two_handed_bonus() {
        let motions: Vec<_> = (0..8)
            .map(|_| MotionDescriptor {
                is_horizontal: true,
                side_sign: -0.4,
                hands_distance: 0.3,
                ..quiet_motion()
            })
            .collect();
        let event = ShotClassifier::default().classify(&make_segment(motions), &handedness());
        assert_eq!(event.shot_type, ShotType::Backhand);
        assert!(event
            .reasoning
            .iter()
            .any(|r| r.contains("two-handed grip")));
    }

    #[test]
    fn test_serve_classification() {
        let motions: Vec<_> = (0..8)
            .map(|_| MotionDescriptor {
                is_upward: true,
                is_vertical: true,
                racket_wrist_height: -0.4,
                ..quiet_motion()
            })
            .collect();
        let event = ShotClassifier::default().classify(&make_segment(motions), &handedness());
        assert_eq!(event.shot_type, ShotType::Serve);
        assert!(event.reasoning.iter().any(|r| r == "Upward motion detected"));
        assert!(event
            .reasoning
            .iter()
            .any(|r| r == "Wrist above shoulder level"));
    }

    #[test]
    fn test_no_cues_yields_unknown_at_floor() {
        let motions = vec![quiet_motion(); 6];
        let event = ShotClassifier::default().classify(&make_segment(motions), &handedness());
        assert_eq!(event.shot_type, ShotType::Unknown);
        assert!((event.confidence - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_serve_wins_ties_by_evaluation_order() {
        // One frame scores the serve cue, another scores forehand with the
        // same accumulated weight; adjust weights so totals are equal.
        let mut config = ClassifierConfig::default();
        config.serve_weight = 1.5; // equal to groundstroke_weight
        let serve_frame = MotionDescriptor {
            is_upward: true,
            racket_wrist_height: -0.4,
            ..quiet_motion()
        };
        let forehand_frame = MotionDescriptor {
            is_horizontal: true,
            side_sign: 0.7,
            ..quiet_motion()
        };
        let event = ShotClassifier::new(config)
            .classify(&make_segment(vec![serve_frame, forehand_frame]), &handedness());
        assert_eq!(event.shot_type, ShotType::Serve);
    }

    #[test]
    fn test_confidence_bounds() {
        // Extreme segment: very fast, long, fully covered
        let motions: Vec<_> = (0..20)
            .map(|_| MotionDescriptor {
                is_horizontal: true,
                side_sign: 0.7,
                racket_wrist_velocity: 8.0,
                ..quiet_motion()
            })
            .collect();
        let event = ShotClassifier::default().classify(&make_segment(motions), &handedness());
        assert!(event.confidence <= 0.95);
        assert!(event.confidence >= 0.1);
    }

    #[test]
    fn test_low_coverage_reduces_confidence() {
        let strong = MotionDescriptor {
            is_horizontal: true,
            side_sign: 0.7,
            ..quiet_motion()
        };
        let weak = MotionDescriptor {
            keypoint_confidence: 0.3,
            ..strong
        };

        let covered = ShotClassifier::default().classify(&make_segment(vec![strong; 8]), &handedness());
        let sparse = ShotClassifier::default().classify(&make_segment(vec![weak; 8]), &handedness());
        assert!(sparse.confidence < covered.confidence);
    }

    #[test]
    fn test_high_peak_velocity_boost() {
        let base = MotionDescriptor {
            is_horizontal: true,
            side_sign: 0.7,
            racket_wrist_velocity: 2.0,
            keypoint_confidence: 0.55,
            ..quiet_motion()
        };
        let fast = MotionDescriptor {
            racket_wrist_velocity: 6.0,
            ..base
        };

        let slow_event = ShotClassifier::default().classify(&make_segment(vec![base; 4]), &handedness());
        let fast_event = ShotClassifier::default().classify(&make_segment(vec![fast; 4]), &handedness());
        assert!(fast_event.confidence > slow_event.confidence);
    }

    #[test]
    fn test_reasoning_is_ordered() {
        let motions: Vec<_> = (0..4)
            .map(|_| MotionDescriptor {
                is_horizontal: true,
                side_sign: 0.7,
                ..quiet_motion()
            })
            .collect();
        let event = ShotClassifier::default().classify(&make_segment(motions), &handedness());
        assert!(event.reasoning[0].starts_with("Racket hand"));
        assert!(event.reasoning[1].starts_with("Peak wrist velocity"));
        assert!(event.reasoning[2].starts_with("Swing duration"));
    }
}
