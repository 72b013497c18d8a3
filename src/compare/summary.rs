//! Stage 2: instance-level summary of the matched pairs
//!
//! Grouping is re-derived from stage-1 rows alone; raw records are never
//! consulted here.

use serde::Serialize;

use super::ComparisonDetailRow;
use crate::aggregate::fold_groups;
use crate::aggregate::stats::{round_to, RunningStats};
use crate::experiment::{Alfa, Heuristic};

/// One row per `(n, m, alfa)` group of matched pairs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonSummaryRow {
    /// Task count
    pub n: u32,
    /// Machine count
    pub m: u32,
    /// SA control parameter
    pub alfa: Option<Alfa>,
    /// Number of matched pairs in the group
    pub pairs: usize,
    /// Mean objective difference in percent, 2 decimals
    pub mean_diff_pct_value: f64,
    /// Mean time difference in percent, 2 decimals
    pub mean_diff_pct_time: f64,
    /// Pairs where MLR won on quality
    pub wins_mlr_quality: usize,
    /// Pairs where SA won on quality
    pub wins_sa_quality: usize,
    /// Pairs where MLR won on time
    pub wins_mlr_time: usize,
    /// Pairs where SA won on time
    pub wins_sa_time: usize,
}

#[derive(Debug, Default, Clone, Copy)]
struct WinCounts {
    mlr: usize,
    sa: usize,
}

impl WinCounts {
    fn tally(&mut self, winner: Heuristic) {
        match winner {
            Heuristic::Mlr => self.mlr += 1,
            Heuristic::Sa => self.sa += 1,
        }
    }
}

struct SummaryAccumulator {
    diff_value: RunningStats,
    diff_time: RunningStats,
    quality: WinCounts,
    time: WinCounts,
}

impl SummaryAccumulator {
    fn new(row: &ComparisonDetailRow) -> Self {
        let mut acc = Self {
            diff_value: RunningStats::new(row.diff_pct_value),
            diff_time: RunningStats::new(row.diff_pct_time),
            quality: WinCounts::default(),
            time: WinCounts::default(),
        };
        acc.quality.tally(row.winner_quality);
        acc.time.tally(row.winner_time);
        acc
    }

    fn push(&mut self, row: &ComparisonDetailRow) {
        self.diff_value.push(row.diff_pct_value);
        self.diff_time.push(row.diff_pct_time);
        self.quality.tally(row.winner_quality);
        self.time.tally(row.winner_time);
    }
}

/// Summarize detail rows by `(n, m, alfa)`, sorted by key.
#[must_use]
pub fn summarize(details: &[ComparisonDetailRow]) -> Vec<ComparisonSummaryRow> {
    fold_groups(
        details,
        |row| (row.n, row.m, row.alfa),
        SummaryAccumulator::new,
        SummaryAccumulator::push,
    )
    .into_iter()
    .map(|((n, m, alfa), acc)| ComparisonSummaryRow {
        n,
        m,
        alfa,
        pairs: acc.diff_value.count(),
        mean_diff_pct_value: round_to(acc.diff_value.mean(), 2),
        mean_diff_pct_time: round_to(acc.diff_time.mean(), 2),
        wins_mlr_quality: acc.quality.mlr,
        wins_sa_quality: acc.quality.sa,
        wins_mlr_time: acc.time.mlr,
        wins_sa_time: acc.time.sa,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(n: u32, alfa: f64, rep: u32, diff: f64, quality: Heuristic, time: Heuristic) -> ComparisonDetailRow {
        ComparisonDetailRow {
            n,
            m: 2,
            alfa: Alfa::new(alfa),
            replication: rep,
            mlr_value: 100,
            sa_value: 100,
            mlr_time: 1.0,
            sa_time: 1.0,
            diff_pct_value: diff,
            diff_pct_time: -diff,
            winner_quality: quality,
            winner_time: time,
        }
    }

    #[test]
    fn test_summary_means_and_wins() {
        let details = vec![
            detail(10, 0.9, 1, 10.0, Heuristic::Mlr, Heuristic::Sa),
            detail(10, 0.9, 2, -5.0, Heuristic::Sa, Heuristic::Mlr),
            detail(10, 0.9, 3, 0.0, Heuristic::Mlr, Heuristic::Mlr),
        ];
        let summary = summarize(&details);

        assert_eq!(summary.len(), 1);
        let row = &summary[0];
        assert_eq!(row.pairs, 3);
        assert!((row.mean_diff_pct_value - 1.67).abs() < 1e-12);
        assert!((row.mean_diff_pct_time + 1.67).abs() < 1e-12);
        assert_eq!((row.wins_mlr_quality, row.wins_sa_quality), (2, 1));
        assert_eq!((row.wins_mlr_time, row.wins_sa_time), (2, 1));
    }

    #[test]
    fn test_summary_groups_by_alfa() {
        let details = vec![
            detail(10, 0.95, 1, 1.0, Heuristic::Mlr, Heuristic::Mlr),
            detail(10, 0.9, 1, 2.0, Heuristic::Sa, Heuristic::Sa),
            detail(5, 0.9, 1, 3.0, Heuristic::Sa, Heuristic::Sa),
        ];
        let summary = summarize(&details);
        let keys: Vec<(u32, Option<f64>)> = summary
            .iter()
            .map(|r| (r.n, r.alfa.map(Alfa::value)))
            .collect();
        assert_eq!(keys, vec![(5, Some(0.9)), (10, Some(0.9)), (10, Some(0.95))]);
        for row in &summary {
            assert_eq!(row.wins_mlr_quality + row.wins_sa_quality, row.pairs);
            assert_eq!(row.wins_mlr_time + row.wins_sa_time, row.pairs);
        }
    }

    #[test]
    fn test_summary_of_nothing() {
        assert!(summarize(&[]).is_empty());
    }
}
