//! Pose playback interpolation
//!
//! Read-only, idempotent queries against the immutable observation stream:
//! "what did the pose look like at time t?". Independent of the shot
//! detection pipeline.

pub mod easing;
pub mod interpolator;

pub use easing::quartic_ease_in_out;
pub use interpolator::{interpolate, InterpolatedPose, PoseInterpolator};
