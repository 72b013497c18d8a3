//! Record Store - in-memory snapshot of every loaded experiment run
//!
//! The store is the single input of every aggregator. It enforces the
//! replication-key uniqueness invariant at load time so that pairing in
//! the comparison stage is always 1:1.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use tracing::{info, warn};

use super::{Alfa, ExperimentRecord, Heuristic};
use crate::storage;
use crate::{Error, Result};

/// In-memory, append-only store of experiment records.
///
/// ## Design
///
/// Records are kept in load order in a single vector. Aggregators never
/// depend on this order: every derived table is sorted by its grouping key.
#[derive(Debug, Default, Clone)]
pub struct RecordStore {
    records: Vec<ExperimentRecord>,
}

impl RecordStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from already-typed records.
    ///
    /// # Errors
    ///
    /// Returns `MalformedRecord` if a record fails validation, or
    /// `DuplicateRecord` if two records share a replication key.
    pub fn from_records(records: Vec<ExperimentRecord>) -> Result<Self> {
        for (i, record) in records.iter().enumerate() {
            record
                .validate()
                .map_err(|e| Error::MalformedRecord(format!("data row {}: {e}", i + 1)))?;
        }
        check_unique(&records)?;
        Ok(Self { records })
    }

    /// Load raw results, choosing the reader by file extension
    /// (`.parquet` for Parquet, anything else is delimited text).
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or any record is malformed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let is_parquet = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("parquet"));
        if is_parquet {
            Self::load_parquet(path)
        } else {
            Self::load_csv(path)
        }
    }

    /// Load a delimited raw results file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or any record is malformed.
    pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let batches = storage::read_csv_batches(path)?;
        let store = Self::from_records(storage::records_from_batches(&batches)?)?;
        info!(path = %path.display(), records = store.len(), "Loaded experiment records");
        Ok(store)
    }

    /// Load raw results from a Parquet file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or any record is malformed.
    pub fn load_parquet<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let batches = storage::read_parquet_batches(path)?;
        let store = Self::from_records(storage::records_from_batches(&batches)?)?;
        info!(path = %path.display(), records = store.len(), "Loaded experiment records");
        Ok(store)
    }

    /// Locate the raw results file.
    ///
    /// An explicit path wins if it names an existing file; otherwise the
    /// candidates are tried in order.
    ///
    /// # Errors
    ///
    /// Returns `MissingInput` if no candidate exists.
    pub fn discover_input(explicit: Option<&Path>, candidates: &[PathBuf]) -> Result<PathBuf> {
        if let Some(path) = explicit {
            if path.is_file() {
                return Ok(path.to_path_buf());
            }
            warn!(path = %path.display(), "Input path is not a file, trying default locations");
        }

        candidates
            .iter()
            .find(|candidate| candidate.is_file())
            .cloned()
            .ok_or_else(|| {
                let tried: Vec<String> = explicit
                    .into_iter()
                    .map(Path::to_path_buf)
                    .chain(candidates.iter().cloned())
                    .map(|p| p.display().to_string())
                    .collect();
                Error::MissingInput(format!("no results file found (tried: {})", tried.join(", ")))
            })
    }

    /// Check if the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Get all records in load order.
    #[must_use]
    pub fn records(&self) -> &[ExperimentRecord] {
        &self.records
    }

    /// Iterate over the records of one heuristic.
    pub fn by_heuristic(&self, heuristic: Heuristic) -> impl Iterator<Item = &ExperimentRecord> {
        self.records
            .iter()
            .filter(move |r| r.heuristic() == heuristic)
    }
}

/// Replication key: parameter is ignored for MLR, which has none.
type ReplicationKey = (Heuristic, u32, u32, Option<Alfa>, u32);

fn replication_key(record: &ExperimentRecord) -> ReplicationKey {
    let alfa = match record.heuristic() {
        Heuristic::Mlr => None,
        Heuristic::Sa => record.alfa(),
    };
    (
        record.heuristic(),
        record.n(),
        record.m(),
        alfa,
        record.replication(),
    )
}

fn check_unique(records: &[ExperimentRecord]) -> Result<()> {
    let mut seen: FxHashSet<ReplicationKey> = FxHashSet::default();
    for record in records {
        if !seen.insert(replication_key(record)) {
            let alfa = record.alfa().map_or_else(|| "NA".to_string(), |a| a.to_string());
            return Err(Error::DuplicateRecord(format!(
                "{} n={} m={} alfa={} replication={} appears more than once",
                record.heuristic(),
                record.n(),
                record.m(),
                alfa,
                record.replication()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mlr(n: u32, m: u32, rep: u32) -> ExperimentRecord {
        ExperimentRecord::builder(Heuristic::Mlr, n, m, rep)
            .value(50)
            .build()
    }

    fn sa(n: u32, m: u32, rep: u32, alfa: f64) -> ExperimentRecord {
        ExperimentRecord::builder(Heuristic::Sa, n, m, rep)
            .value(50)
            .alfa(Alfa::new(alfa))
            .build()
    }

    #[test]
    fn test_store_default() {
        let store = RecordStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_from_records_and_filter() {
        let store =
            RecordStore::from_records(vec![mlr(10, 2, 1), sa(10, 2, 1, 0.9), sa(10, 2, 1, 0.8)])
                .unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.by_heuristic(Heuristic::Mlr).count(), 1);
        assert_eq!(store.by_heuristic(Heuristic::Sa).count(), 2);
    }

    #[test]
    fn test_duplicate_mlr_rejected() {
        let err = RecordStore::from_records(vec![mlr(10, 2, 1), mlr(10, 2, 1)]).unwrap_err();
        assert!(matches!(err, Error::DuplicateRecord(_)));
    }

    #[test]
    fn test_duplicate_sa_same_alfa_rejected() {
        let err =
            RecordStore::from_records(vec![sa(10, 2, 3, 0.9), sa(10, 2, 3, 0.9)]).unwrap_err();
        assert!(err.to_string().contains("alfa=0.9"));
    }

    #[test]
    fn test_invalid_record_rejected() {
        let err = RecordStore::from_records(vec![mlr(0, 2, 1)]).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord(_)));
    }

    #[test]
    fn test_discover_input_prefers_explicit() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("mine.txt");
        let fallback = dir.path().join("result.txt");
        std::fs::write(&explicit, "x").unwrap();
        std::fs::write(&fallback, "x").unwrap();

        let found =
            RecordStore::discover_input(Some(explicit.as_path()), &[fallback.clone()]).unwrap();
        assert_eq!(found, explicit);

        let missing = dir.path().join("nope.txt");
        let found = RecordStore::discover_input(Some(missing.as_path()), &[fallback.clone()]).unwrap();
        assert_eq!(found, fallback);
    }

    #[test]
    fn test_discover_input_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = RecordStore::discover_input(None, &[dir.path().join("result.txt")]).unwrap_err();
        assert!(matches!(err, Error::MissingInput(_)));
    }
}
