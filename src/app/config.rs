//! Configuration Management
//!
//! All heuristic thresholds in the engines are empirical tuning knobs, so
//! they live in one TOML-backed configuration structure that can be retuned
//! without touching the algorithms.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::analysis::classifier::ClassifierConfig;
use crate::analysis::handedness::HandednessConfig;
use crate::analysis::segmentation::SegmenterConfig;
use crate::playback::interpolator::InterpolatorConfig;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Handedness inference settings
    pub handedness: HandednessConfig,
    /// Shot segmentation settings
    pub segmenter: SegmenterConfig,
    /// Shot classification settings
    pub classifier: ClassifierConfig,
    /// Playback interpolation settings
    pub interpolator: InterpolatorConfig,
}

impl Config {
    /// Validate config values are within acceptable ranges.
    /// Returns Ok(()) if valid, or Err with a description of the first invalid field.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.handedness.dominance_ratio < 1.0 {
            return Err(crate::Error::Config(format!(
                "handedness.dominance_ratio must be >= 1, got {}",
                self.handedness.dominance_ratio
            )));
        }
        if self.handedness.min_observations == 0 {
            return Err(crate::Error::Config(
                "handedness.min_observations must be > 0".to_string(),
            ));
        }
        if self.segmenter.min_shot_duration <= 0.0
            || self.segmenter.min_shot_duration >= self.segmenter.max_shot_duration
        {
            return Err(crate::Error::Config(format!(
                "segmenter shot duration bounds invalid: min {} max {}",
                self.segmenter.min_shot_duration, self.segmenter.max_shot_duration
            )));
        }
        if self.segmenter.fixed_low_threshold <= 0.0
            || self.segmenter.fixed_low_threshold >= self.segmenter.fixed_high_threshold
        {
            return Err(crate::Error::Config(format!(
                "segmenter velocity thresholds invalid: low {} high {}",
                self.segmenter.fixed_low_threshold, self.segmenter.fixed_high_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.segmenter.min_confidence) {
            return Err(crate::Error::Config(format!(
                "segmenter.min_confidence must be in [0, 1], got {}",
                self.segmenter.min_confidence
            )));
        }
        if !(0.0..=1.0).contains(&self.segmenter.min_keypoint_confidence) {
            return Err(crate::Error::Config(format!(
                "segmenter.min_keypoint_confidence must be in [0, 1], got {}",
                self.segmenter.min_keypoint_confidence
            )));
        }
        if self.segmenter.velocity_window < 2 {
            return Err(crate::Error::Config(format!(
                "segmenter.velocity_window must be >= 2, got {}",
                self.segmenter.velocity_window
            )));
        }
        if self.segmenter.min_time_between_shots < 0.0 {
            return Err(crate::Error::Config(
                "segmenter.min_time_between_shots must be >= 0".to_string(),
            ));
        }
        if self.classifier.confidence_floor >= self.classifier.confidence_cap {
            return Err(crate::Error::Config(format!(
                "classifier confidence bounds invalid: floor {} cap {}",
                self.classifier.confidence_floor, self.classifier.confidence_cap
            )));
        }
        if !(0.0..=1.0).contains(&self.classifier.confidence_cap) {
            return Err(crate::Error::Config(format!(
                "classifier.confidence_cap must be in [0, 1], got {}",
                self.classifier.confidence_cap
            )));
        }
        if !(0.0..=1.0).contains(&self.interpolator.prediction_weight) {
            return Err(crate::Error::Config(format!(
                "interpolator.prediction_weight must be in [0, 1], got {}",
                self.interpolator.prediction_weight
            )));
        }
        Ok(())
    }

    /// Load config from file
    pub fn load(path: &PathBuf) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from default location
    pub fn load_default() -> Result<Self, crate::Error> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &PathBuf) -> Result<(), crate::Error> {
        let content = toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save to default location
    pub fn save_default(&self) -> Result<(), crate::Error> {
        self.save(&Self::default_path())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".swing_analyzer").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Generate TOML representation
    pub fn to_toml(&self) -> Result<String, crate::Error> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }
}
