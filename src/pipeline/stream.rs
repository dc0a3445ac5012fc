//! Observation Stream Format
//!
//! The serialized form of a pre-collected pose observation sequence, as
//! produced by the external pose source for one video. The analysis engines
//! consume the observation list; metadata travels alongside for reporting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

use crate::pose::keypoints::{PoseObservation, KEYPOINT_COUNT};
use crate::{Error, Result};

/// Stream provenance and sampling parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamMetadata {
    /// Unique stream ID
    pub id: Uuid,
    /// Source video description (file name, URL)
    pub source: Option<String>,
    /// Video duration in seconds
    pub video_duration: f64,
    /// Sampling interval in seconds
    pub sample_interval: f64,
    /// When the stream was collected
    pub created_at: DateTime<Utc>,
}

impl Default for StreamMetadata {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            source: None,
            video_duration: 0.0,
            sample_interval: 0.0,
            created_at: Utc::now(),
        }
    }
}

/// A complete, time-ordered pose observation sequence for one video
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationStream {
    pub metadata: StreamMetadata,
    pub observations: Vec<PoseObservation>,
}

impl ObservationStream {
    /// Create an empty stream
    pub fn new(source: Option<String>) -> Self {
        Self {
            metadata: StreamMetadata {
                source,
                ..Default::default()
            },
            observations: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Append an observation
    pub fn push(&mut self, observation: PoseObservation) {
        self.observations.push(observation);
    }

    /// Structural validation
    ///
    /// Checks that observation times are strictly ascending and that every
    /// observation carries the full 17-point topology. Low scores and
    /// all-zero keypoints are tolerated: the engines gate those per frame.
    pub fn validate(&self) -> Result<()> {
        for (i, obs) in self.observations.iter().enumerate() {
            if obs.keypoints.len() != KEYPOINT_COUNT {
                return Err(Error::Stream(format!(
                    "observation {} has {} keypoints, expected {}",
                    i,
                    obs.keypoints.len(),
                    KEYPOINT_COUNT
                )));
            }
            if !obs.time.is_finite() {
                return Err(Error::Stream(format!(
                    "observation {} has non-finite time",
                    i
                )));
            }
        }
        for (i, pair) in self.observations.windows(2).enumerate() {
            if pair[1].time <= pair[0].time {
                return Err(Error::Stream(format!(
                    "observation times not strictly ascending at index {} ({} -> {})",
                    i + 1,
                    pair[0].time,
                    pair[1].time
                )));
            }
        }
        Ok(())
    }

    /// Load and validate a stream from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let stream: Self = serde_json::from_str(&content)?;
        stream.validate()?;
        Ok(stream)
    }

    /// Save the stream as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
