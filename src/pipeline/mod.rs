//! Batch orchestration and observation stream I/O

pub mod stream;
pub mod analyzer;

pub use analyzer::{AnalysisReport, AnalysisStats, ShotAnalyzer};
pub use stream::{ObservationStream, StreamMetadata};
