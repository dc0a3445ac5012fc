//! Velocity-Blended Pose Interpolation
//!
//! Answers "pose at time t" queries against the immutable observation
//! stream. Pure linear interpolation looks robotic at low sample rates and
//! pure velocity extrapolation overshoots at acceleration changes, so each
//! keypoint blends a velocity-based linear prediction with a quartic-eased
//! linear interpolation: the blend favors momentum while damping overshoot.
//!
//! Stateless and read-only: any number of concurrent queries against the
//! same stream are safe without synchronization.

use serde::{Deserialize, Serialize};

use super::easing::quartic_ease_in_out;
use crate::analysis::motion::MIN_DT_SECONDS;
use crate::pose::keypoints::{Keypoint, PoseObservation};

/// Interpolator tuning knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterpolatorConfig {
    /// Weight of the velocity-based prediction; the eased-linear component
    /// gets the remainder
    pub prediction_weight: f64,
}

impl Default for InterpolatorConfig {
    fn default() -> Self {
        Self {
            prediction_weight: 0.7,
        }
    }
}

/// A pose synthesized for an arbitrary playback time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpolatedPose {
    pub time: f64,
    pub keypoints: Vec<Keypoint>,
    pub confidence: f64,
}

impl InterpolatedPose {
    fn from_observation(observation: &PoseObservation) -> Self {
        Self {
            time: observation.time,
            keypoints: observation.keypoints.clone(),
            confidence: observation.confidence,
        }
    }
}

/// Stateless pose interpolator over a time-ascending observation slice
pub struct PoseInterpolator<'a> {
    observations: &'a [PoseObservation],
    config: InterpolatorConfig,
}

impl<'a> PoseInterpolator<'a> {
    pub fn new(observations: &'a [PoseObservation]) -> Self {
        Self::with_config(observations, InterpolatorConfig::default())
    }

    pub fn with_config(observations: &'a [PoseObservation], config: InterpolatorConfig) -> Self {
        Self {
            observations,
            config,
        }
    }

    /// Pose at time `t`, or `None` for an empty stream
    ///
    /// Between two observations the result is the velocity/eased blend; with
    /// only one bracketing side (before the first sample or after the last)
    /// the nearest observation is returned verbatim -- no extrapolation
    /// beyond the sampled range.
    pub fn interpolate(&self, t: f64) -> Option<InterpolatedPose> {
        if self.observations.is_empty() {
            return None;
        }

        // Observations are time-ascending: everything at or before t is a
        // "before" candidate, the first strictly-later sample is "after".
        let split = self.observations.partition_point(|obs| obs.time <= t);
        let before = split.checked_sub(1).map(|i| &self.observations[i]);
        let after = self.observations.get(split);

        match (before, after) {
            (Some(before), Some(after)) => Some(self.blend(before, after, t)),
            (Some(only), None) | (None, Some(only)) => {
                Some(InterpolatedPose::from_observation(only))
            }
            (None, None) => None,
        }
    }

    fn blend(&self, before: &PoseObservation, after: &PoseObservation, t: f64) -> InterpolatedPose {
        let span = (after.time - before.time).max(MIN_DT_SECONDS);
        let elapsed = t - before.time;
        let raw_factor = elapsed / span;
        let eased = quartic_ease_in_out(raw_factor);

        let w_predicted = self.config.prediction_weight;
        let w_eased = 1.0 - w_predicted;

        let keypoints = before
            .keypoints
            .iter()
            .zip(after.keypoints.iter())
            .map(|(b, a)| {
                // Momentum component: linear prediction from the velocity
                // between the bracketing samples
                let vx = (a.x - b.x) / span;
                let vy = (a.y - b.y) / span;
                let predicted_x = b.x + vx * elapsed;
                let predicted_y = b.y + vy * elapsed;

                // Eased component
                let eased_x = b.x + (a.x - b.x) * eased;
                let eased_y = b.y + (a.y - b.y) * eased;

                Keypoint {
                    x: predicted_x * w_predicted + eased_x * w_eased,
                    y: predicted_y * w_predicted + eased_y * w_eased,
                    // Scalar fields interpolate by the eased factor alone
                    score: b.score + (a.score - b.score) * eased,
                    name: b.name,
                }
            })
            .collect();

        InterpolatedPose {
            time: t,
            keypoints,
            confidence: before.confidence + (after.confidence - before.confidence) * eased,
        }
    }
}

/// Pose at time `t` against a stream, with default tuning
pub fn interpolate(observations: &[PoseObservation], t: f64) -> Option<InterpolatedPose> {
    PoseInterpolator::new(observations).interpolate(t)
}
