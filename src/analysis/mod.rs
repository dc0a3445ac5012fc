//! Shot detection engines
//!
//! The sequential, stateful part of the pipeline:
//! - global racket-hand inference over the whole stream
//! - per-frame-pair motion descriptors
//! - adaptive-threshold hysteresis segmentation
//! - archetype scoring and classification
//! - overlap filtering with minimum inter-shot spacing

pub mod handedness;
pub mod motion;
pub mod segmentation;
pub mod classifier;
pub mod filter;

pub use classifier::{ShotClassifier, ShotEvent, ShotType};
pub use filter::filter_shot_events;
pub use handedness::{detect_handedness, Handedness, RacketHand};
pub use motion::{analyze_motion, MotionDescriptor};
pub use segmentation::{SegmentFrame, ShotSegment, ShotSegmenter};
