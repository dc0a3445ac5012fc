//! # Swing Analyzer
//!
//! A tennis swing analysis engine that turns a time-ordered sequence of
//! human-pose observations (sampled from a video) into two things:
//!
//! - a continuously queryable, smoothly interpolated pose trajectory for
//!   synchronized overlay rendering at arbitrary playback times, and
//! - a set of discrete, classified shot events (forehand, backhand, serve)
//!   with time bounds, confidence, and human-readable reasoning.
//!
//! ## Quick Start
//!
//! ```no_run
//! use swing_analyzer::pipeline::analyzer::ShotAnalyzer;
//! use swing_analyzer::pipeline::stream::ObservationStream;
//!
//! let stream = ObservationStream::load("match.json".as_ref()).expect("load stream");
//! let analyzer = ShotAnalyzer::new();
//! let report = analyzer.analyze(&stream.observations);
//!
//! for shot in &report.shots {
//!     println!("{} at {:.1}s ({:.0}%)", shot.shot_type, shot.start_time, shot.confidence * 100.0);
//! }
//! ```
//!
//! ## Architecture
//!
//! The system is organized into the following modules:
//!
//! - [`pose`]: Keypoint data model, tennis feature extraction, body-scale normalization
//! - [`analysis`]: Handedness inference, motion analysis, shot segmentation and classification
//! - [`playback`]: Velocity-blended pose interpolation for overlay rendering
//! - [`pipeline`]: Observation stream I/O and batch analysis orchestration
//! - [`app`]: CLI and configuration management
//!
//! ## Analysis Pipeline
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │ Observation │───▶│   Feature   │───▶│  Normalize  │───▶│ Handedness  │
//! │   Stream    │    │  Extraction │    │ (body scale)│    │  (global)   │
//! └─────────────┘    └─────────────┘    └─────────────┘    └─────────────┘
//!        │                                                        │
//!        ▼                                                        ▼
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │    Pose     │    │   Overlap   │◀───│  Classifier │◀───│  Segmenter  │
//! │ Interpolator│    │   Filter    │    │ (archetypes)│    │ (hysteresis)│
//! └─────────────┘    └─────────────┘    └─────────────┘    └─────────────┘
//! ```
//!
//! The interpolator reads the raw observation stream directly and does not
//! depend on segmentation output. All engines are pure batch transformations
//! over a finite, already-collected stream.

pub mod pose;
pub mod analysis;
pub mod playback;
pub mod pipeline;
pub mod app;

// Re-export commonly used types
pub use analysis::classifier::{ShotEvent, ShotType};
pub use analysis::handedness::{Handedness, RacketHand};
pub use analysis::motion::MotionDescriptor;
pub use pipeline::analyzer::{classify_shots, AnalysisReport, AnalysisStats, ShotAnalyzer};
pub use pipeline::stream::ObservationStream;
pub use playback::interpolator::{interpolate, InterpolatedPose, PoseInterpolator};
pub use pose::keypoints::{Keypoint, KeypointName, PoseObservation};

/// Result type alias for the swing analyzer
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the swing analyzer
///
/// Data-quality conditions (missing keypoints, degenerate body scale, too few
/// observations) are not errors: they skip the affected frame or fall back to
/// a conservative default. Errors are reserved for malformed input files,
/// invalid configuration, and I/O.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Observation stream error: {0}")]
    Stream(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
