//! Batch Shot Analysis
//!
//! Orchestrates the full pipeline over a complete observation stream:
//! feature extraction, normalization, global handedness, motion analysis,
//! segmentation, classification, and overlap filtering. Invoked once per
//! video; the worst outcome is an empty shot list, never a failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};
use uuid::Uuid;

use crate::analysis::classifier::{ClassifierConfig, ShotClassifier, ShotEvent};
use crate::analysis::filter::filter_shot_events;
use crate::analysis::handedness::{detect_handedness, Handedness, HandednessConfig};
use crate::analysis::motion::analyze_motion;
use crate::analysis::segmentation::{SegmentFrame, SegmenterConfig, ShotSegmenter};
use crate::pose::features::extract_features;
use crate::pose::keypoints::PoseObservation;
use crate::pose::normalize::normalize_features;
use crate::Result;

/// Aggregate counters for one analysis run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisStats {
    /// Observations supplied
    pub total_frames: usize,
    /// Observations with extractable features
    pub feature_frames: usize,
    /// Observations that survived body-scale normalization
    pub normalized_frames: usize,
    /// Consecutive pairs that produced a motion descriptor
    pub analyzed_pairs: usize,
    /// Mean observation confidence over the stream
    pub mean_confidence: f64,
}

/// The result of one batch analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Source description carried over from the stream, if any
    pub source: Option<String>,
    pub handedness: Handedness,
    pub stats: AnalysisStats,
    /// Filtered, non-overlapping shot events sorted by start time
    pub shots: Vec<ShotEvent>,
}

impl AnalysisReport {
    /// Save the report as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Full-pipeline batch analyzer
///
/// A pure transformation: no shared mutable state between invocations, so
/// one analyzer may serve any number of streams.
pub struct ShotAnalyzer {
    pub handedness_config: HandednessConfig,
    pub segmenter: ShotSegmenter,
    pub classifier: ShotClassifier,
}

impl ShotAnalyzer {
    /// Analyzer with default tuning
    pub fn new() -> Self {
        Self::with_config(
            HandednessConfig::default(),
            SegmenterConfig::default(),
            ClassifierConfig::default(),
        )
    }

    pub fn with_config(
        handedness: HandednessConfig,
        segmenter: SegmenterConfig,
        classifier: ClassifierConfig,
    ) -> Self {
        Self {
            handedness_config: handedness,
            segmenter: ShotSegmenter::new(segmenter),
            classifier: ShotClassifier::new(classifier),
        }
    }

    /// Run the full pipeline over one complete observation stream
    pub fn analyze(&self, observations: &[PoseObservation]) -> AnalysisReport {
        self.analyze_with_source(observations, None)
    }

    /// As [`analyze`](Self::analyze), carrying a source description into the report
    pub fn analyze_with_source(
        &self,
        observations: &[PoseObservation],
        source: Option<String>,
    ) -> AnalysisReport {
        let handedness = detect_handedness(observations, &self.handedness_config);
        info!(
            racket_hand = %handedness.racket_hand,
            confidence = handedness.confidence,
            "handedness detected"
        );

        let mut stats = AnalysisStats {
            total_frames: observations.len(),
            ..Default::default()
        };
        if !observations.is_empty() {
            stats.mean_confidence =
                observations.iter().map(|o| o.confidence).sum::<f64>() / observations.len() as f64;
        }

        // Per-observation projections; each depends only on its own frame
        let normalized: Vec<_> = observations
            .iter()
            .map(|obs| {
                let features = extract_features(obs);
                if features.is_some() {
                    stats.feature_frames += 1;
                }
                let norm = features.as_ref().and_then(normalize_features);
                if norm.is_some() {
                    stats.normalized_frames += 1;
                }
                features.zip(norm)
            })
            .collect();

        // Strictly time-ordered motion frames; frames that failed either
        // projection drop out of the pair sequence entirely
        let mut frames = Vec::with_capacity(observations.len());
        for pair in normalized.windows(2) {
            let (Some((_, prev)), Some((features, curr))) = (&pair[0], &pair[1]) else {
                continue;
            };
            let motion = analyze_motion(curr, prev, handedness.racket_hand);
            stats.analyzed_pairs += 1;
            frames.push(SegmentFrame {
                time: curr.time,
                motion,
                features: *features,
            });
        }

        let segments = self.segmenter.scan(frames);
        debug!(candidates = segments.len(), "segmentation complete");

        let min_confidence = self.segmenter.config.min_confidence;
        let accepted: Vec<ShotEvent> = segments
            .iter()
            .map(|segment| self.classifier.classify(segment, &handedness))
            .filter(|event| event.confidence >= min_confidence)
            .collect();

        let shots = filter_shot_events(accepted, self.segmenter.config.min_time_between_shots);
        info!(shots = shots.len(), frames = stats.total_frames, "analysis complete");

        AnalysisReport {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            source,
            handedness,
            stats,
            shots,
        }
    }
}

impl Default for ShotAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Detect and classify shots in a stream with default tuning
///
/// Convenience entry point; an empty result means "no shots found", not an
/// error.
pub fn classify_shots(observations: &[PoseObservation]) -> Vec<ShotEvent> {
    ShotAnalyzer::new().analyze(observations).shots
}
