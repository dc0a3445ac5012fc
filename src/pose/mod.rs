//! Pose data model and per-observation projections
//!
//! This module defines the 17-point keypoint topology consumed from the
//! external pose source, and the two pure projections applied before any
//! motion analysis:
//! - tennis-relevant feature extraction
//! - body-centered, torso-scaled coordinate normalization

pub mod keypoints;
pub mod features;
pub mod normalize;

pub use features::{extract_features, TennisFeatures};
pub use keypoints::{Keypoint, KeypointName, PoseObservation, KEYPOINT_COUNT};
pub use normalize::{normalize_features, NormalizedFeatures, Point2};
