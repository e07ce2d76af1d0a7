//! Tracker configuration.
//!
//! A single value object passed by reference into each component. Every
//! section falls back to its defaults, so a partial JSON file is valid.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrackerConfig {
    pub database: DatabaseConfig,
    pub glucose_ranges: GlucoseRanges,
    pub analysis: AnalysisConfig,
    pub prediction: PredictionConfig,
    pub default_user: DefaultUser,
}

impl TrackerConfig {
    /// Load configuration from a JSON file, writing the defaults if the file
    /// does not exist yet.
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        if path.exists() {
            let raw = fs::read_to_string(path)?;
            let config = serde_json::from_str(&raw)?;
            tracing::info!(path = %path.display(), "Loaded configuration");
            return Ok(config);
        }

        let config = Self::default();
        config.save(path)?;
        tracing::info!(path = %path.display(), "Wrote default configuration");
        Ok(config)
    }

    /// Write configuration as pretty JSON, creating parent directories.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Database location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
    /// Directory that receives timestamped backup copies
    pub backup_dir: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "glucose_readings.db".into(),
            backup_dir: "data/backups".into(),
        }
    }
}

/// Glucose band thresholds in mg/dL.
///
/// Bands: `< dangerous_low`, `< low`, `<= normal_max`, `<= high`, above.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GlucoseRanges {
    pub dangerous_low: f64,
    pub low: f64,
    pub normal_max: f64,
    pub high: f64,
}

impl Default for GlucoseRanges {
    fn default() -> Self {
        Self {
            dangerous_low: 70.0,
            low: 80.0,
            normal_max: 140.0,
            high: 180.0,
        }
    }
}

/// Trend analyzer settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Minimum readings before any statistics are computed
    pub min_readings: usize,
    /// Slope magnitude (mg/dL per reading) separating rising/falling from stable
    pub slope_threshold: f64,
    /// Size of the recent/older windows for the short-term comparison
    pub short_term_window: usize,
    /// Difference between window averages that counts as a short-term change
    pub short_term_delta: f64,
    /// Crisis band lower bound
    pub crisis_low: f64,
    /// Crisis band upper bound
    pub crisis_high: f64,
    /// Days of history pulled for pattern analysis
    pub recent_days: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_readings: 5,
            slope_threshold: 0.5,
            short_term_window: 5,
            short_term_delta: 10.0,
            crisis_low: 70.0,
            crisis_high: 180.0,
            recent_days: 30,
        }
    }
}

/// Naive predictor settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PredictionConfig {
    /// Raw readings required before training
    pub min_readings: usize,
    /// Usable rows required after feature extraction
    pub min_feature_rows: usize,
    /// Hours either side of the query hour that count as neighbours
    pub hour_window: u32,
    /// Neighbour count that maps to confidence 1.0 before capping
    pub neighbours_for_full_confidence: f64,
    pub max_confidence: f64,
    /// Confidence reported when falling back to the global mean
    pub fallback_confidence: f64,
    /// Forecast hours must exceed this confidence to be flagged critical
    pub critical_confidence: f64,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            min_readings: 10,
            min_feature_rows: 5,
            hour_window: 2,
            neighbours_for_full_confidence: 10.0,
            max_confidence: 0.9,
            fallback_confidence: 0.3,
            critical_confidence: 0.5,
        }
    }
}

/// Profile seeded for user 1 on a fresh database.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DefaultUser {
    pub username: String,
    pub age: i64,
    pub gender: String,
    pub target_glucose_min: i64,
    pub target_glucose_max: i64,
}

impl Default for DefaultUser {
    fn default() -> Self {
        Self {
            username: "کاربر پیش‌فرض".into(),
            age: 30,
            gender: "نامشخص".into(),
            target_glucose_min: 80,
            target_glucose_max: 140,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "glucose_ranges": { "normal_max": 180.0 } }"#;
        let config: TrackerConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.glucose_ranges.normal_max, 180.0);
        assert_eq!(config.glucose_ranges.dangerous_low, 70.0);
        assert_eq!(config.analysis, AnalysisConfig::default());
        assert_eq!(config.prediction.min_readings, 10);
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config").join("tracker.json");

        let created = TrackerConfig::load_or_create(&path).unwrap();
        assert!(path.exists());
        assert_eq!(created, TrackerConfig::default());

        let loaded = TrackerConfig::load_or_create(&path).unwrap();
        assert_eq!(loaded, created);
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tracker.json");
        fs::write(&path, "{ not json").unwrap();

        let result = TrackerConfig::load_or_create(&path);
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }
}
