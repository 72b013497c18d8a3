//! Growth of time and objective value with instance size

use serde::Serialize;
use tracing::debug;

use super::fold_groups;
use super::stats::{round_to, RunningStats};
use crate::classify::{SizeClass, SizeThresholds};
use crate::experiment::{Alfa, ExperimentRecord, Heuristic};

/// One row per `(n, m, heuristic, alfa)` group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalabilityRow {
    /// Task count
    pub n: u32,
    /// Machine count
    pub m: u32,
    /// Heuristic
    pub heuristic: Heuristic,
    /// Control parameter (`None` = not applicable)
    pub alfa: Option<Alfa>,
    /// Mean wall-clock time, 6 decimals
    pub mean_time: f64,
    /// Mean objective value, 4 decimals
    pub mean_value: f64,
    /// Size class of `n`
    pub size_class_n: SizeClass,
    /// Size class of `m`
    pub size_class_m: SizeClass,
}

/// Groups records by `(n, m, heuristic, alfa)`; means only, no dispersion.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScalabilityAggregator {
    thresholds: SizeThresholds,
}

impl ScalabilityAggregator {
    /// Create an aggregator classifying sizes with `thresholds`
    #[must_use]
    pub const fn new(thresholds: SizeThresholds) -> Self {
        Self { thresholds }
    }

    /// Aggregate records into scalability rows, sorted by key.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn aggregate(&self, records: &[ExperimentRecord]) -> Vec<ScalabilityRow> {
        let groups = fold_groups(
            records,
            |r| (r.n(), r.m(), r.heuristic(), r.alfa()),
            |r| (RunningStats::new(r.time()), RunningStats::new(r.value() as f64)),
            |(time, value): &mut (RunningStats, RunningStats), r| {
                time.push(r.time());
                value.push(r.value() as f64);
            },
        );

        let rows: Vec<ScalabilityRow> = groups
            .into_iter()
            .map(|((n, m, heuristic, alfa), (time, value))| ScalabilityRow {
                n,
                m,
                heuristic,
                alfa,
                mean_time: round_to(time.mean(), 6),
                mean_value: round_to(value.mean(), 4),
                size_class_n: self.thresholds.task_class(n),
                size_class_m: self.thresholds.machine_class(m),
            })
            .collect();

        debug!(groups = rows.len(), "Scalability aggregation complete");
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(heuristic: Heuristic, n: u32, m: u32, rep: u32, time: f64, value: u64) -> ExperimentRecord {
        let alfa = match heuristic {
            Heuristic::Mlr => None,
            Heuristic::Sa => Alfa::new(0.9),
        };
        ExperimentRecord::builder(heuristic, n, m, rep)
            .time(time)
            .value(value)
            .alfa(alfa)
            .build()
    }

    #[test]
    fn test_scalability_means_and_classes() {
        let records = vec![
            run(Heuristic::Mlr, 500, 40, 1, 1.0, 100),
            run(Heuristic::Mlr, 500, 40, 2, 2.0, 103),
        ];
        let rows = ScalabilityAggregator::default().aggregate(&records);

        assert_eq!(rows.len(), 1);
        assert!((rows[0].mean_time - 1.5).abs() < 1e-12);
        assert!((rows[0].mean_value - 101.5).abs() < 1e-12);
        assert_eq!(rows[0].size_class_n, SizeClass::Medium);
        assert_eq!(rows[0].size_class_m, SizeClass::Large);
    }

    #[test]
    fn test_scalability_key_order_is_size_first() {
        let records = vec![
            run(Heuristic::Mlr, 2000, 5, 1, 1.0, 10),
            run(Heuristic::Sa, 10, 5, 1, 1.0, 10),
            run(Heuristic::Mlr, 10, 5, 1, 1.0, 10),
            run(Heuristic::Mlr, 10, 3, 1, 1.0, 10),
        ];
        let rows = ScalabilityAggregator::default().aggregate(&records);
        let keys: Vec<(u32, u32, Heuristic)> =
            rows.iter().map(|r| (r.n, r.m, r.heuristic)).collect();

        assert_eq!(
            keys,
            vec![
                (10, 3, Heuristic::Mlr),
                (10, 5, Heuristic::Mlr),
                (10, 5, Heuristic::Sa),
                (2000, 5, Heuristic::Mlr),
            ]
        );
        assert_eq!(rows[3].size_class_n, SizeClass::Large);
    }

    #[test]
    fn test_scalability_custom_thresholds() {
        let thresholds = SizeThresholds {
            task_small_below: 5,
            task_medium_below: 8,
            ..SizeThresholds::default()
        };
        let rows = ScalabilityAggregator::new(thresholds)
            .aggregate(&[run(Heuristic::Mlr, 10, 2, 1, 0.1, 5)]);
        assert_eq!(rows[0].size_class_n, SizeClass::Large);
        assert_eq!(rows[0].size_class_m, SizeClass::Small);
    }
}
