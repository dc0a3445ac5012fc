//! Shot Segmentation
//!
//! A stateful scan over the motion-frame sequence producing candidate shot
//! segments. Detection uses adaptive hysteresis thresholding: a rolling
//! window of recent racket-wrist velocities sets a high bar to open a
//! segment and a lower bar to close it, so detection does not flicker around
//! a single static cutoff. The scan carries its accumulator state (open
//! segment plus velocity window) explicitly; there is no process-wide state.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::motion::MotionDescriptor;
use crate::pose::features::TennisFeatures;

/// Segmenter tuning knobs
///
/// The fixed thresholds and statistical factors are empirical tuning knobs,
/// not derived constants; they are grouped here so they can be retuned and
/// tested independently of the scan's control flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmenterConfig {
    /// Minimum shot duration in seconds
    pub min_shot_duration: f64,
    /// Maximum shot duration in seconds (forced close past this)
    pub max_shot_duration: f64,
    /// Floor for the segment-entry velocity threshold (torso lengths/s)
    pub fixed_high_threshold: f64,
    /// Floor for the segment-exit velocity threshold
    pub fixed_low_threshold: f64,
    /// Standard-deviation factor for the adaptive entry threshold
    pub high_sigma_factor: f64,
    /// Standard-deviation factor for the adaptive exit threshold
    pub low_sigma_factor: f64,
    /// Minimum classification confidence to accept a segment as a shot
    pub min_confidence: f64,
    /// Frames below this arm-joint confidence are skipped entirely
    pub min_keypoint_confidence: f64,
    /// Minimum spacing between accepted shots in seconds
    pub min_time_between_shots: f64,
    /// Rolling velocity window capacity
    pub velocity_window: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            min_shot_duration: 0.8,
            max_shot_duration: 3.0,
            fixed_high_threshold: 1.0,
            fixed_low_threshold: 0.3,
            high_sigma_factor: 1.5,
            low_sigma_factor: 0.3,
            min_confidence: 0.25,
            min_keypoint_confidence: 0.2,
            min_time_between_shots: 1.0,
            velocity_window: 10,
        }
    }
}

/// One analyzed frame fed to the segmenter
#[derive(Debug, Clone)]
pub struct SegmentFrame {
    /// Time of the current observation in the pair
    pub time: f64,
    pub motion: MotionDescriptor,
    pub features: TennisFeatures,
}

/// A contiguous span of high-velocity frames considered a candidate shot
///
/// Transient: lives only during the scan, then is classified into a
/// [`super::classifier::ShotEvent`] or discarded.
#[derive(Debug, Clone)]
pub struct ShotSegment {
    pub start_time: f64,
    pub end_time: f64,
    /// Frames that exceeded the entry threshold
    pub frames: Vec<SegmentFrame>,
    /// Highest movement intensity seen
    pub max_velocity: f64,
    /// Highest racket-wrist velocity seen
    pub peak_velocity: f64,
    /// Time of the racket-wrist velocity peak
    pub peak_time: f64,
    /// Sum of racket-wrist velocities over recorded frames
    pub total_velocity: f64,
}

impl ShotSegment {
    fn seeded(frame: SegmentFrame) -> Self {
        let velocity = frame.motion.racket_wrist_velocity;
        let intensity = frame.motion.movement_intensity;
        let time = frame.time;
        Self {
            start_time: time,
            end_time: time,
            frames: vec![frame],
            max_velocity: intensity,
            peak_velocity: velocity,
            peak_time: time,
            total_velocity: velocity,
        }
    }

    fn record(&mut self, frame: SegmentFrame) {
        let velocity = frame.motion.racket_wrist_velocity;
        self.max_velocity = self.max_velocity.max(frame.motion.movement_intensity);
        if velocity > self.peak_velocity {
            self.peak_velocity = velocity;
            self.peak_time = frame.time;
        }
        self.total_velocity += velocity;
        self.frames.push(frame);
    }

    /// Segment duration in seconds
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Mean racket-wrist velocity over recorded frames
    pub fn average_velocity(&self) -> f64 {
        if self.frames.is_empty() {
            0.0
        } else {
            self.total_velocity / self.frames.len() as f64
        }
    }
}

/// Fixed-capacity rolling window of gated racket-wrist velocities
#[derive(Debug, Clone)]
struct VelocityWindow {
    values: VecDeque<f64>,
    capacity: usize,
}

impl VelocityWindow {
    fn new(capacity: usize) -> Self {
        Self {
            values: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    fn push(&mut self, velocity: f64) {
        self.values.push_back(velocity);
        if self.values.len() > self.capacity {
            self.values.pop_front();
        }
    }

    fn mean(&self) -> f64 {
        if self.values.is_empty() {
            0.0
        } else {
            self.values.iter().sum::<f64>() / self.values.len() as f64
        }
    }

    fn stddev(&self) -> f64 {
        if self.values.len() < 2 {
            return 0.0;
        }
        let mean = self.mean();
        let variance =
            self.values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / self.values.len() as f64;
        variance.sqrt()
    }
}

/// Scan accumulator: the possibly-open segment and the velocity window
struct ScanState {
    current: Option<OpenSegment>,
    window: VelocityWindow,
}

struct OpenSegment {
    segment: ShotSegment,
    high_frames: usize,
}

/// Adaptive-threshold shot segmenter
pub struct ShotSegmenter {
    pub config: SegmenterConfig,
}

impl ShotSegmenter {
    pub fn new(config: SegmenterConfig) -> Self {
        Self { config }
    }

    /// Entry threshold for the current window contents
    fn high_threshold(&self, window: &VelocityWindow) -> f64 {
        (window.mean() + self.config.high_sigma_factor * window.stddev())
            .max(self.config.fixed_high_threshold)
    }

    /// Exit threshold; always below the entry threshold (hysteresis band)
    fn low_threshold(&self, window: &VelocityWindow) -> f64 {
        (window.mean() + self.config.low_sigma_factor * window.stddev())
            .max(self.config.fixed_low_threshold)
    }

    /// Scan a time-ordered frame sequence into candidate shot segments
    ///
    /// Segments returned here satisfy the structural rules (at least two
    /// high-velocity frames, duration within bounds); classification and the
    /// confidence acceptance test happen downstream.
    pub fn scan(&self, frames: impl IntoIterator<Item = SegmentFrame>) -> Vec<ShotSegment> {
        let mut state = ScanState {
            current: None,
            window: VelocityWindow::new(self.config.velocity_window),
        };
        let mut segments = Vec::new();
        let mut last_time: Option<f64> = None;

        for frame in frames {
            // Confidence gate: unreliable frames neither start nor extend a
            // segment, and never enter the velocity window.
            if frame.motion.keypoint_confidence < self.config.min_keypoint_confidence {
                continue;
            }

            let velocity = frame.motion.racket_wrist_velocity;
            let high = self.high_threshold(&state.window);
            let low = self.low_threshold(&state.window);
            last_time = Some(frame.time);

            match state.current.take() {
                None => {
                    if velocity > high {
                        debug!(time = frame.time, velocity, high, "segment opened");
                        state.current = Some(OpenSegment {
                            segment: ShotSegment::seeded(frame),
                            high_frames: 1,
                        });
                    }
                }
                Some(mut open) => {
                    let duration = frame.time - open.segment.start_time;

                    if duration > self.config.max_shot_duration {
                        // Forced close: a sustained high-velocity artifact must
                        // not accumulate without bound.
                        open.segment.end_time = frame.time;
                        debug!(
                            start = open.segment.start_time,
                            end = open.segment.end_time,
                            "segment force-closed at max duration"
                        );
                        if open.high_frames >= 2 {
                            segments.push(open.segment);
                        }
                    } else if velocity > high {
                        open.segment.record(frame);
                        open.high_frames += 1;
                        state.current = Some(open);
                    } else if velocity < low {
                        if duration > self.config.min_shot_duration && open.high_frames >= 2 {
                            open.segment.end_time = frame.time;
                            debug!(
                                start = open.segment.start_time,
                                end = open.segment.end_time,
                                frames = open.segment.frames.len(),
                                "segment closed"
                            );
                            segments.push(open.segment);
                        } else {
                            // Not enough evidence to close yet; keep the
                            // segment open through the lull.
                            state.current = Some(open);
                        }
                    } else {
                        // Between thresholds: ignored for the exit test, but
                        // the segment is not closed.
                        state.current = Some(open);
                    }
                }
            }

            state.window.push(velocity);
        }

        // End of stream: finalize a still-open segment under the same rules
        if let (Some(open), Some(end_time)) = (state.current, last_time) {
            let duration = end_time - open.segment.start_time;
            if open.high_frames >= 2 && duration >= self.config.min_shot_duration {
                let mut segment = open.segment;
                segment.end_time = end_time;
                segments.push(segment);
            }
        }

        segments
    }
}

impl Default for ShotSegmenter {
    fn default() -> Self {
        Self::new(SegmenterConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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

    fn make_frame(time: f64, velocity: f64, keypoint_confidence: f64) -> SegmentFrame {
        SegmentFrame {
            time,
            motion: MotionDescriptor {
                racket_wrist_velocity: velocity,
                off_wrist_velocity: velocity * 0.2,
                shoulder_rotation_rate: 0.0,
                hands_distance: 1.4,
                racket_wrist_height: 0.5,
                off_wrist_height: 0.5,
                side_sign: 0.7,
                is_horizontal: true,
                is_vertical: false,
                is_upward: false,
                movement_intensity: velocity * 0.6,
                keypoint_confidence,
            },
            features: dummy_features(time),
        }
    }

    /// Velocity series at 0.1s spacing
    fn frames_from(velocities: &[f64]) -> Vec<SegmentFrame> {
        velocities
            .iter()
            .enumerate()
            .map(|(i, &v)| make_frame(i as f64 * 0.1, v, 0.9))
            .collect()
    }

    #[test]
    fn test_quiet_stream_yields_no_segments() {
        let frames = frames_from(&[0.1; 30]);
        let segments = ShotSegmenter::default().scan(frames);
        assert!(segments.is_empty());
    }

    #[test]
    fn test_hysteresis_single_segment() {
        // Rise above the fixed high threshold, stay there long enough to
        // satisfy the minimum duration, then fall below the low threshold.
        let mut velocities = vec![0.1; 10];
        velocities.extend_from_slice(&[2.0; 10]); // t = 1.0 .. 1.9
        velocities.extend_from_slice(&[0.1; 10]); // fall at t = 2.0

        let segments = ShotSegmenter::default().scan(frames_from(&velocities));
        assert_eq!(segments.len(), 1);

        let segment = &segments[0];
        assert!((segment.start_time - 1.0).abs() < 1e-9);
        assert!((segment.end_time - 2.0).abs() < 1e-9);
        assert!(segment.duration() > 0.8);
        assert!(segment.frames.len() >= 2);
        assert!((segment.peak_velocity - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_short_burst_not_closed_early() {
        // High burst of 0.3s: below the minimum duration when velocity
        // falls, so the segment stays open and is dropped at end of stream.
        let mut velocities = vec![0.1; 10];
        velocities.extend_from_slice(&[2.0, 2.0, 2.0]);
        velocities.extend_from_slice(&[0.1; 3]);

        let segments = ShotSegmenter::default().scan(frames_from(&velocities));
        // End-of-stream duration (1.5 - 1.0 = 0.5s) is still below minimum
        assert!(segments.is_empty());
    }

    #[test]
    fn test_low_confidence_frames_skipped() {
        let mut frames = frames_from(&[0.1; 10]);
        // A violent spike with untrusted keypoints must not open a segment
        for i in 0..10 {
            frames.push(make_frame(1.0 + i as f64 * 0.1, 5.0, 0.1));
        }
        frames.extend((0..10).map(|i| make_frame(2.0 + i as f64 * 0.1, 0.1, 0.9)));

        let segments = ShotSegmenter::default().scan(frames);
        assert!(segments.is_empty());
    }

    #[test]
    fn test_forced_close_at_max_duration() {
        // Velocity stays high for 4 seconds; the segment must be closed at
        // the maximum duration instead of accumulating without bound.
        let mut velocities = vec![0.1; 5];
        velocities.extend_from_slice(&[6.0; 40]);

        let segments = ShotSegmenter::default().scan(frames_from(&velocities));
        assert_eq!(segments.len(), 1);
        assert!(segments[0].duration() <= 3.0 + 0.1 + 1e-9);
    }

    #[test]
    fn test_end_of_stream_finalizes_open_segment() {
        let mut velocities = vec![0.1; 10];
        velocities.extend_from_slice(&[2.0; 12]); // stream ends while hot

        let segments = ShotSegmenter::default().scan(frames_from(&velocities));
        assert_eq!(segments.len(), 1);
        assert!((segments[0].end_time - 2.1).abs() < 1e-9);
        assert!(segments[0].duration() >= 0.8);
    }

    #[test]
    fn test_adaptive_threshold_rises_with_noise() {
        // A noisy baseline around 2.0 raises the adaptive entry threshold
        // above the fixed floor, so a 2.2 "spike" no longer opens a segment.
        let velocities: Vec<f64> = (0..20).map(|i| 1.8 + 0.5 * ((i % 2) as f64)).collect();
        let segmenter = ShotSegmenter::default();

        let mut window = VelocityWindow::new(segmenter.config.velocity_window);
        for v in &velocities[..20] {
            window.push(*v);
        }
        assert!(segmenter.high_threshold(&window) > 2.3);
    }

    #[test]
    fn test_segment_statistics() {
        let mut velocities = vec![0.1; 10];
        velocities.extend_from_slice(&[1.5, 2.5, 3.5, 2.5, 1.5, 1.5, 1.5, 1.5, 1.5]);
        velocities.extend_from_slice(&[0.1; 5]);

        let segments = ShotSegmenter::default().scan(frames_from(&velocities));
        assert_eq!(segments.len(), 1);
        let segment = &segments[0];
        assert!((segment.peak_velocity - 3.5).abs() < 1e-9);
        assert!((segment.peak_time - 1.2).abs() < 1e-9);
        assert!(segment.average_velocity() > 0.0);
        assert!(segment.average_velocity() <= segment.peak_velocity);
    }

    #[test]
    fn test_velocity_window_statistics() {
        let mut window = VelocityWindow::new(3);
        window.push(1.0);
        window.push(2.0);
        window.push(3.0);
        assert!((window.mean() - 2.0).abs() < 1e-12);
        window.push(4.0); // evicts 1.0
        assert!((window.mean() - 3.0).abs() < 1e-12);
        assert!(window.stddev() > 0.0);
    }
}
