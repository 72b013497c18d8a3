//! Head-to-head comparison of MLR and SA on matched replications
//!
//! Two-stage pipeline:
//!
//! ```text
//! records ──pair_records──> ComparisonDetailRow (N) ──summarize──> ComparisonSummaryRow (N)
//! ```
//!
//! Stage 2 consumes the complete stage-1 output as a batch, never the
//! raw records.

mod detail;
mod summary;

use tracing::info;

pub use detail::{pair_records, percent_difference, winner, ComparisonDetailRow, Pairing};
pub use summary::{summarize, ComparisonSummaryRow};

use crate::experiment::ExperimentRecord;

/// Output of both comparison stages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonReport {
    /// Stage 1 rows
    pub details: Vec<ComparisonDetailRow>,
    /// Stage 2 rows
    pub summary: Vec<ComparisonSummaryRow>,
    /// SA runs excluded for lack of an MLR counterpart
    pub unmatched: usize,
}

/// Pairs SA runs with their MLR baseline and summarizes the outcome.
#[derive(Debug, Default, Clone, Copy)]
pub struct ComparisonEngine;

impl ComparisonEngine {
    /// Create a new comparison engine
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Run stage 1 then stage 2.
    #[must_use]
    pub fn compare(&self, records: &[ExperimentRecord]) -> ComparisonReport {
        let Pairing { rows, unmatched } = pair_records(records);
        let summary = summarize(&rows);

        info!(
            pairs = rows.len(),
            groups = summary.len(),
            unmatched,
            "Comparison complete"
        );

        ComparisonReport {
            details: rows,
            summary,
            unmatched,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment::{Alfa, Heuristic};

    #[test]
    fn test_compare_end_to_end() {
        let records = vec![
            ExperimentRecord::builder(Heuristic::Mlr, 10, 2, 1)
                .value(50)
                .time(0.1)
                .build(),
            ExperimentRecord::builder(Heuristic::Sa, 10, 2, 1)
                .value(55)
                .time(0.05)
                .alfa(Alfa::new(0.9))
                .build(),
            ExperimentRecord::builder(Heuristic::Sa, 10, 2, 7)
                .value(45)
                .time(0.05)
                .alfa(Alfa::new(0.9))
                .build(),
        ];

        let report = ComparisonEngine::new().compare(&records);

        assert_eq!(report.details.len(), 1);
        assert_eq!(report.unmatched, 1);
        assert_eq!(report.summary.len(), 1);
        assert_eq!(report.summary[0].pairs, 1);
        assert!((report.summary[0].mean_diff_pct_value - 10.0).abs() < 1e-12);
        assert_eq!(report.summary[0].wins_sa_time, 1);
    }
}
