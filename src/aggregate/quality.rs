//! Solution quality per (heuristic, n, m, alfa)
//!
//! The objective is a makespan, so lower is better: `best_value` is the
//! group minimum and `worst_value` the maximum.

use serde::Serialize;
use tracing::debug;

use super::fold_groups;
use super::stats::{round_to, RunningStats};
use crate::experiment::{Alfa, ExperimentRecord, Heuristic};

/// One row per `(heuristic, n, m, alfa)` group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualitySummaryRow {
    /// Heuristic
    pub heuristic: Heuristic,
    /// Task count
    pub n: u32,
    /// Machine count
    pub m: u32,
    /// Control parameter (`None` = not applicable)
    pub alfa: Option<Alfa>,
    /// Number of runs in the group
    pub count: usize,
    /// Mean objective value, 4 decimals
    pub mean_value: f64,
    /// Minimum objective value
    pub best_value: u64,
    /// Maximum objective value
    pub worst_value: u64,
    /// Sample standard deviation of the objective value, 4 decimals
    pub stdev: f64,
    /// Mean wall-clock time, 6 decimals
    pub mean_time: f64,
    /// Mean iteration count, 2 decimals
    pub mean_iterations: f64,
}

type QualityKey = (Heuristic, u32, u32, Option<Alfa>);

struct QualityAccumulator {
    value: RunningStats,
    best: u64,
    worst: u64,
    time: RunningStats,
    iterations: RunningStats,
}

impl QualityAccumulator {
    #[allow(clippy::cast_precision_loss)]
    fn new(record: &ExperimentRecord) -> Self {
        Self {
            value: RunningStats::new(record.value() as f64),
            best: record.value(),
            worst: record.value(),
            time: RunningStats::new(record.time()),
            iterations: RunningStats::new(record.iterations() as f64),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn push(&mut self, record: &ExperimentRecord) {
        self.value.push(record.value() as f64);
        self.best = self.best.min(record.value());
        self.worst = self.worst.max(record.value());
        self.time.push(record.time());
        self.iterations.push(record.iterations() as f64);
    }
}

/// Groups records by `(heuristic, n, m, alfa)` and reduces each group to
/// descriptive statistics of the objective value.
#[derive(Debug, Default, Clone, Copy)]
pub struct QualityAggregator;

impl QualityAggregator {
    /// Create a new aggregator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Aggregate records into quality rows, sorted by key.
    ///
    /// An empty input yields no rows.
    #[must_use]
    pub fn aggregate(&self, records: &[ExperimentRecord]) -> Vec<QualitySummaryRow> {
        let groups = fold_groups(
            records,
            |r| (r.heuristic(), r.n(), r.m(), r.alfa()),
            QualityAccumulator::new,
            QualityAccumulator::push,
        );

        let rows: Vec<QualitySummaryRow> = groups
            .into_iter()
            .map(|((heuristic, n, m, alfa), acc): (QualityKey, QualityAccumulator)| {
                QualitySummaryRow {
                    heuristic,
                    n,
                    m,
                    alfa,
                    count: acc.value.count(),
                    mean_value: round_to(acc.value.mean(), 4),
                    best_value: acc.best,
                    worst_value: acc.worst,
                    stdev: round_to(acc.value.sample_stdev(), 4),
                    mean_time: round_to(acc.time.mean(), 6),
                    mean_iterations: round_to(acc.iterations.mean(), 2),
                }
            })
            .collect();

        debug!(groups = rows.len(), "Quality aggregation complete");
        rows
    }
}
