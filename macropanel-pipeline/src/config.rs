//! Serializable pipeline configuration.
//!
//! Every knob the pipeline consults lives here, scoped to a single run;
//! nothing is read from module globals or the environment.

use chrono::NaiveDate;
use macropanel_core::{ClassRules, CurateOptions, Frequency};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for a single pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory of raw per-series CSV files.
    pub raw_dir: PathBuf,

    /// Directory the curated panel is written into.
    pub clean_dir: PathBuf,

    /// Output file name within `clean_dir`.
    pub output_name: String,

    /// Rows strictly before this date are dropped during curation.
    pub start_cutoff: NaiveDate,

    /// Columns whose missing-fraction over the post-cutoff range reaches
    /// this threshold are dropped.
    pub sparse_threshold: f64,

    /// Target resample frequency.
    pub frequency: Frequency,

    /// Identifier rules for the class-specific fill policy.
    pub rules: ClassRules,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            raw_dir: "raw".into(),
            clean_dir: "clean".into(),
            output_name: "master.csv".into(),
            start_cutoff: NaiveDate::from_ymd_opt(1954, 1, 31).unwrap(),
            sparse_threshold: 0.95,
            frequency: Frequency::MonthEnd,
            rules: ClassRules::default(),
        }
    }
}

impl PipelineConfig {
    /// Load a config from a TOML file and validate it.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string and validate it. Missing keys fall
    /// back to the defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.sparse_threshold > 0.0 && self.sparse_threshold <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "sparse_threshold must be in (0, 1], got {}",
                self.sparse_threshold
            )));
        }
        if self.rules.yield_prefix.is_empty() {
            return Err(ConfigError::Invalid(
                "yield_prefix must not be empty (it would match every column)".into(),
            ));
        }
        if self.rules.recession_id.is_empty() {
            return Err(ConfigError::Invalid("recession_id must not be empty".into()));
        }
        if self.output_name.is_empty() {
            return Err(ConfigError::Invalid("output_name must not be empty".into()));
        }
        Ok(())
    }

    /// Full path of the curated panel file.
    pub fn output_path(&self) -> PathBuf {
        self.clean_dir.join(&self.output_name)
    }

    /// Full path of the run report written beside the panel.
    pub fn report_path(&self) -> PathBuf {
        self.clean_dir.join("report.json")
    }

    pub fn curate_options(&self) -> CurateOptions {
        CurateOptions {
            start_cutoff: self.start_cutoff,
            sparse_threshold: self.sparse_threshold,
            rules: self.rules.clone(),
        }
    }
}
