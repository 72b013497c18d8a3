//! Analysis engine
//!
//! Runs the three independent aggregations over one `RecordStore`
//! snapshot and writes the four tables. Every invocation derives fresh
//! rows; nothing is carried over between runs.

use std::path::PathBuf;

use tracing::info;

use crate::aggregate::{QualityAggregator, QualitySummaryRow, ScalabilityAggregator, ScalabilityRow};
use crate::classify::SizeThresholds;
use crate::compare::{ComparisonDetailRow, ComparisonEngine, ComparisonReport, ComparisonSummaryRow};
use crate::config::{AnalysisConfig, OutputConfig};
use crate::experiment::{ExperimentRecord, RecordStore};
use crate::report::Tabular;
use crate::{Error, Result};

/// Aggregation and comparison engine
#[derive(Debug, Clone, Copy)]
pub struct AnalysisEngine {
    quality: QualityAggregator,
    scalability: ScalabilityAggregator,
    comparison: ComparisonEngine,
}

impl AnalysisEngine {
    /// Create a new engine builder
    #[must_use]
    pub fn builder() -> AnalysisEngineBuilder {
        AnalysisEngineBuilder::default()
    }

    /// Create an engine from a loaded configuration
    #[must_use]
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::builder().thresholds(config.thresholds).build()
    }

    /// Run every aggregation over the store.
    ///
    /// # Errors
    ///
    /// Returns `NoData` if the store is empty.
    pub fn run(&self, store: &RecordStore) -> Result<AnalysisReport> {
        if store.is_empty() {
            return Err(Error::NoData);
        }

        let records = store.records();
        let (quality, (scalability, comparison)) = self.run_independent(records);

        info!(
            records = records.len(),
            quality_rows = quality.len(),
            scalability_rows = scalability.len(),
            comparison_rows = comparison.details.len(),
            "Analysis complete"
        );

        Ok(AnalysisReport {
            quality,
            scalability,
            comparison,
        })
    }

    #[cfg(feature = "rayon")]
    fn run_independent(
        &self,
        records: &[ExperimentRecord],
    ) -> (Vec<QualitySummaryRow>, (Vec<ScalabilityRow>, ComparisonReport)) {
        rayon::join(
            || self.quality.aggregate(records),
            || {
                rayon::join(
                    || self.scalability.aggregate(records),
                    || self.comparison.compare(records),
                )
            },
        )
    }

    #[cfg(not(feature = "rayon"))]
    fn run_independent(
        &self,
        records: &[ExperimentRecord],
    ) -> (Vec<QualitySummaryRow>, (Vec<ScalabilityRow>, ComparisonReport)) {
        (
            self.quality.aggregate(records),
            (
                self.scalability.aggregate(records),
                self.comparison.compare(records),
            ),
        )
    }
}

/// Engine builder
#[derive(Debug, Default)]
pub struct AnalysisEngineBuilder {
    thresholds: SizeThresholds,
}

impl AnalysisEngineBuilder {
    /// Set size classification thresholds
    #[must_use]
    pub const fn thresholds(mut self, thresholds: SizeThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Build the engine
    #[must_use]
    pub const fn build(self) -> AnalysisEngine {
        AnalysisEngine {
            quality: QualityAggregator::new(),
            scalability: ScalabilityAggregator::new(self.thresholds),
            comparison: ComparisonEngine::new(),
        }
    }
}

/// All derived tables of one engine run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    /// Quality table
    pub quality: Vec<QualitySummaryRow>,
    /// Scalability table
    pub scalability: Vec<ScalabilityRow>,
    /// Comparison detail and summary tables
    pub comparison: ComparisonReport,
}

impl AnalysisReport {
    /// Write the four tables, creating the output directory if needed.
    ///
    /// Returns the written paths in table order.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created or a file written.
    pub fn write_csv(&self, output: &OutputConfig) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(&output.dir)?;

        let quality = output.path(&output.quality_file);
        QualitySummaryRow::write_csv(&quality, &self.quality)?;

        let scalability = output.path(&output.scalability_file);
        ScalabilityRow::write_csv(&scalability, &self.scalability)?;

        let detail = output.path(&output.comparison_detail_file);
        ComparisonDetailRow::write_csv(&detail, &self.comparison.details)?;

        let summary = output.path(&output.comparison_summary_file);
        ComparisonSummaryRow::write_csv(&summary, &self.comparison.summary)?;

        let written = vec![quality, scalability, detail, summary];
        for path in &written {
            info!(path = %path.display(), "Wrote table");
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment::{Alfa, Heuristic};

    fn store() -> RecordStore {
        RecordStore::from_records(vec![
            ExperimentRecord::builder(Heuristic::Mlr, 10, 2, 1)
                .value(50)
                .time(0.1)
                .build(),
            ExperimentRecord::builder(Heuristic::Sa, 10, 2, 1)
                .value(55)
                .time(0.05)
                .iterations(500)
                .alfa(Alfa::new(0.9))
                .build(),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_store_is_no_data() {
        let err = AnalysisEngine::builder()
            .build()
            .run(&RecordStore::new())
            .unwrap_err();
        assert!(matches!(err, Error::NoData));
    }

    #[test]
    fn test_run_produces_all_tables() {
        let report = AnalysisEngine::builder().build().run(&store()).unwrap();
        assert_eq!(report.quality.len(), 2);
        assert_eq!(report.scalability.len(), 2);
        assert_eq!(report.comparison.details.len(), 1);
        assert_eq!(report.comparison.summary.len(), 1);
    }

    #[test]
    fn test_write_csv_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let output = OutputConfig::in_dir(dir.path().join("nested").join("results"));

        let report = AnalysisEngine::builder().build().run(&store()).unwrap();
        let written = report.write_csv(&output).unwrap();

        assert_eq!(written.len(), 4);
        for path in written {
            assert!(path.is_file(), "{} missing", path.display());
        }
    }

    #[test]
    fn test_from_config_uses_thresholds() {
        let mut config = AnalysisConfig::default();
        config.thresholds.task_small_below = 5;
        config.thresholds.task_medium_below = 8;
        let report = AnalysisEngine::from_config(&config).run(&store()).unwrap();
        assert!(report
            .scalability
            .iter()
            .all(|row| row.size_class_n == crate::classify::SizeClass::Large));
    }
}
