//! Stage 1: pair every SA run with the MLR run of the same replication

use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::debug;

use crate::aggregate::stats::round_to;
use crate::experiment::{Alfa, ExperimentRecord, Heuristic};

/// One row per matched `(n, m, alfa, replication)` pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonDetailRow {
    /// Task count
    pub n: u32,
    /// Machine count
    pub m: u32,
    /// SA control parameter of the pair
    pub alfa: Option<Alfa>,
    /// Shared replication index
    pub replication: u32,
    /// MLR objective value
    pub mlr_value: u64,
    /// SA objective value
    pub sa_value: u64,
    /// MLR time, 6 decimals
    pub mlr_time: f64,
    /// SA time, 6 decimals
    pub sa_time: f64,
    /// `(sa - mlr) / mlr * 100` on the objective, 2 decimals
    pub diff_pct_value: f64,
    /// `(sa - mlr) / mlr * 100` on time, 2 decimals
    pub diff_pct_time: f64,
    /// Lower-or-equal objective wins; ties go to MLR
    pub winner_quality: Heuristic,
    /// Lower-or-equal time wins; ties go to MLR
    pub winner_time: Heuristic,
}

/// Result of pairing: matched rows plus the count of SA runs left out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pairing {
    /// Matched rows sorted by `(n, m, alfa, replication)`
    pub rows: Vec<ComparisonDetailRow>,
    /// SA runs with no MLR run for their `(n, m, replication)`
    pub unmatched: usize,
}

/// Relative difference of `sa` against the `mlr` baseline, in percent.
///
/// A zero baseline yields `0.0`. This also covers the case where both
/// values are zero, which is indistinguishable in the output.
#[must_use]
pub fn percent_difference(sa: f64, mlr: f64) -> f64 {
    if mlr == 0.0 {
        0.0
    } else {
        (sa - mlr) / mlr * 100.0
    }
}

/// Winner on a minimization axis; MLR keeps ties.
#[must_use]
pub fn winner<T: PartialOrd>(mlr: T, sa: T) -> Heuristic {
    if mlr <= sa {
        Heuristic::Mlr
    } else {
        Heuristic::Sa
    }
}

/// Match SA runs against MLR runs by `(n, m, replication)`.
///
/// SA runs without a counterpart are skipped and only counted.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn pair_records(records: &[ExperimentRecord]) -> Pairing {
    let mlr_index: FxHashMap<(u32, u32, u32), &ExperimentRecord> = records
        .iter()
        .filter(|r| r.heuristic() == Heuristic::Mlr)
        .map(|r| ((r.n(), r.m(), r.replication()), r))
        .collect();

    let mut pairing = Pairing::default();
    for sa in records.iter().filter(|r| r.heuristic() == Heuristic::Sa) {
        let Some(mlr) = mlr_index.get(&(sa.n(), sa.m(), sa.replication())) else {
            debug!(
                n = sa.n(),
                m = sa.m(),
                replication = sa.replication(),
                "Skipping SA run without MLR counterpart"
            );
            pairing.unmatched += 1;
            continue;
        };

        pairing.rows.push(ComparisonDetailRow {
            n: sa.n(),
            m: sa.m(),
            alfa: sa.alfa(),
            replication: sa.replication(),
            mlr_value: mlr.value(),
            sa_value: sa.value(),
            mlr_time: round_to(mlr.time(), 6),
            sa_time: round_to(sa.time(), 6),
            diff_pct_value: round_to(
                percent_difference(sa.value() as f64, mlr.value() as f64),
                2,
            ),
            diff_pct_time: round_to(percent_difference(sa.time(), mlr.time()), 2),
            winner_quality: winner(mlr.value(), sa.value()),
            winner_time: winner(mlr.time(), sa.time()),
        });
    }

    pairing
        .rows
        .sort_by_key(|row| (row.n, row.m, row.alfa, row.replication));
    pairing
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mlr(n: u32, rep: u32, value: u64, time: f64) -> ExperimentRecord {
        ExperimentRecord::builder(Heuristic::Mlr, n, 2, rep)
            .value(value)
            .time(time)
            .build()
    }

    fn sa(n: u32, rep: u32, alfa: f64, value: u64, time: f64) -> ExperimentRecord {
        ExperimentRecord::builder(Heuristic::Sa, n, 2, rep)
            .value(value)
            .time(time)
            .alfa(Alfa::new(alfa))
            .build()
    }

    #[test]
    fn test_reference_pair() {
        let pairing = pair_records(&[mlr(10, 1, 50, 0.1), sa(10, 1, 0.9, 55, 0.05)]);

        assert_eq!(pairing.unmatched, 0);
        assert_eq!(pairing.rows.len(), 1);
        let row = &pairing.rows[0];
        assert!((row.diff_pct_value - 10.0).abs() < 1e-12);
        assert!((row.diff_pct_time + 50.0).abs() < 1e-12);
        assert_eq!(row.winner_quality, Heuristic::Mlr);
        assert_eq!(row.winner_time, Heuristic::Sa);
        assert_eq!(row.alfa, Alfa::new(0.9));
    }

    #[test]
    fn test_tie_goes_to_mlr() {
        let pairing = pair_records(&[mlr(10, 1, 50, 0.1), sa(10, 1, 0.9, 50, 0.1)]);
        let row = &pairing.rows[0];
        assert_eq!(row.winner_quality, Heuristic::Mlr);
        assert_eq!(row.winner_time, Heuristic::Mlr);
        assert!(row.diff_pct_value.abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_baseline_gives_zero_difference() {
        assert!(percent_difference(12.0, 0.0).abs() < f64::EPSILON);
        assert!(percent_difference(0.0, 0.0).abs() < f64::EPSILON);

        let pairing = pair_records(&[mlr(10, 1, 0, 0.0), sa(10, 1, 0.9, 5, 0.2)]);
        let row = &pairing.rows[0];
        assert!(row.diff_pct_value.abs() < f64::EPSILON);
        assert!(row.diff_pct_time.abs() < f64::EPSILON);
        assert_eq!(row.winner_quality, Heuristic::Mlr);
    }

    #[test]
    fn test_unmatched_sa_skipped() {
        let pairing = pair_records(&[
            mlr(10, 1, 50, 0.1),
            sa(10, 2, 0.9, 40, 0.1),
            sa(20, 1, 0.9, 40, 0.1),
        ]);
        assert!(pairing.rows.is_empty());
        assert_eq!(pairing.unmatched, 2);
    }

    #[test]
    fn test_multiple_alfas_share_one_mlr_run() {
        let pairing = pair_records(&[
            sa(10, 1, 0.95, 48, 0.1),
            mlr(10, 1, 50, 0.1),
            sa(10, 1, 0.9, 52, 0.1),
        ]);
        assert_eq!(pairing.rows.len(), 2);
        assert_eq!(pairing.rows[0].alfa, Alfa::new(0.9));
        assert_eq!(pairing.rows[0].winner_quality, Heuristic::Mlr);
        assert_eq!(pairing.rows[1].alfa, Alfa::new(0.95));
        assert_eq!(pairing.rows[1].winner_quality, Heuristic::Sa);
        assert!((pairing.rows[1].diff_pct_value + 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_rows_sorted_by_replication() {
        let pairing = pair_records(&[
            mlr(10, 3, 50, 0.1),
            mlr(10, 1, 50, 0.1),
            sa(10, 3, 0.9, 50, 0.1),
            sa(10, 1, 0.9, 50, 0.1),
        ]);
        let reps: Vec<u32> = pairing.rows.iter().map(|r| r.replication).collect();
        assert_eq!(reps, vec![1, 3]);
    }
}
