//! Analysis configuration
//!
//! Every field has a default, so a JSON file only needs to name what it
//! changes:
//!
//! ```json
//! { "output": { "dir": "out" }, "thresholds": { "task_small_below": 100 } }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::classify::SizeThresholds;
use crate::{Error, Result};

/// Where and under which names the four tables are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory, created if missing
    pub dir: PathBuf,
    /// Quality table file name
    pub quality_file: String,
    /// Scalability table file name
    pub scalability_file: String,
    /// Comparison detail table file name
    pub comparison_detail_file: String,
    /// Comparison summary table file name
    pub comparison_summary_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("results"),
            quality_file: "1_quality.csv".to_string(),
            scalability_file: "4_scalability.csv".to_string(),
            comparison_detail_file: "5_comparison_detail.csv".to_string(),
            comparison_summary_file: "5_comparison_summary.csv".to_string(),
        }
    }
}

impl OutputConfig {
    /// Default file names under a different directory.
    #[must_use]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Self::default()
        }
    }

    /// Full path of a file in the output directory.
    #[must_use]
    pub fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Size classification thresholds
    pub thresholds: SizeThresholds,
    /// Raw results locations tried when no input path is given
    pub input_candidates: Vec<PathBuf>,
    /// Output location
    pub output: OutputConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            thresholds: SizeThresholds::default(),
            input_candidates: vec![
                PathBuf::from("result.txt"),
                PathBuf::from("results").join("raw_result.txt"),
            ],
            output: OutputConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Parse configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns `Json` for invalid JSON or `Config` for inconsistent values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, parsed, or validated.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&json)
    }

    /// Check cross-field consistency.
    ///
    /// # Errors
    ///
    /// Returns `Config` if thresholds are inverted or a file name is empty.
    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate().map_err(Error::Config)?;
        let files = [
            &self.output.quality_file,
            &self.output.scalability_file,
            &self.output.comparison_detail_file,
            &self.output.comparison_summary_file,
        ];
        if files.iter().any(|name| name.trim().is_empty()) {
            return Err(Error::Config("output file names must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.thresholds, SizeThresholds::default());
        assert_eq!(config.input_candidates[0], PathBuf::from("result.txt"));
        assert_eq!(
            config.output.path(&config.output.quality_file),
            PathBuf::from("results").join("1_quality.csv")
        );
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = AnalysisConfig::from_json_str(
            r#"{ "output": { "dir": "out" }, "thresholds": { "task_small_below": 100 } }"#,
        )
        .unwrap();

        assert_eq!(config.output.dir, PathBuf::from("out"));
        assert_eq!(config.output.scalability_file, "4_scalability.csv");
        assert_eq!(config.thresholds.task_small_below, 100);
        assert_eq!(config.thresholds.task_medium_below, 1000);
        assert_eq!(config.input_candidates.len(), 2);
    }

    #[test]
    fn test_invalid_json() {
        let err = AnalysisConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_inverted_thresholds() {
        let err = AnalysisConfig::from_json_str(
            r#"{ "thresholds": { "task_small_below": 5000 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_empty_file_name_rejected() {
        let err = AnalysisConfig::from_json_str(r#"{ "output": { "quality_file": " " } }"#)
            .unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn test_missing_config_file() {
        let err = AnalysisConfig::from_json_file("/nonexistent/config.json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
