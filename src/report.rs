//! Tabular artifacts
//!
//! Converts each derived row type into an Arrow `RecordBatch` whose column
//! order is fixed for downstream chart/report consumers:
//!
//! | Table | Columns |
//! |-------|---------|
//! | Quality | `heuristic, n, m, alfa, mean_value, best_value, worst_value, stdev, mean_time, mean_iterations` |
//! | Scalability | `n, m, heuristic, alfa, mean_time, mean_value, size_class_n, size_class_m` |
//! | Comparison detail | `n, m, alfa, replication, mlr_value, sa_value, mlr_time, sa_time, diff_pct_value, diff_pct_time, winner_quality, winner_time` |
//! | Comparison summary | `n, m, alfa, mean_diff_pct_value, mean_diff_pct_time, wins_mlr_quality, wins_sa_quality, wins_mlr_time, wins_sa_time` |
//!
//! A missing `alfa` is a null cell, which the CSV writer renders empty.
//! Floats are written in their shortest round-trip form, so very small
//! values use exponent notation without zero padding (`1e-6`, not `1e-06`).

use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, RecordBatch, StringArray, UInt32Array, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};

use crate::aggregate::{QualitySummaryRow, ScalabilityRow};
use crate::compare::{ComparisonDetailRow, ComparisonSummaryRow};
use crate::experiment::Alfa;
use crate::storage::{self, float_column};
use crate::Result;

/// A row type with a fixed output layout.
pub trait Tabular: Sized {
    /// Output schema, in column order
    fn schema() -> SchemaRef;

    /// Column arrays for `rows`, in schema order
    fn columns(rows: &[Self]) -> Vec<ArrayRef>;

    /// Build a record batch from rows.
    ///
    /// # Errors
    ///
    /// Returns error if the columns do not match the schema.
    fn to_batch(rows: &[Self]) -> Result<RecordBatch> {
        Ok(RecordBatch::try_new(Self::schema(), Self::columns(rows))?)
    }

    /// Write rows as a CSV table with a header line.
    ///
    /// # Errors
    ///
    /// Returns error if the batch cannot be built or the file written.
    fn write_csv<P: AsRef<Path>>(path: P, rows: &[Self]) -> Result<()> {
        storage::write_csv(path, &Self::to_batch(rows)?)
    }
}

fn schema(fields: &[(&str, DataType)]) -> SchemaRef {
    Arc::new(Schema::new(
        fields
            .iter()
            .map(|(name, data_type)| Field::new(*name, data_type.clone(), *name == "alfa"))
            .collect::<Vec<_>>(),
    ))
}

fn strings<T>(rows: &[T], f: impl Fn(&T) -> &'static str) -> ArrayRef {
    Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
}

fn u32s<T>(rows: &[T], f: impl Fn(&T) -> u32) -> ArrayRef {
    Arc::new(UInt32Array::from(rows.iter().map(f).collect::<Vec<_>>()))
}

fn u64s<T>(rows: &[T], f: impl Fn(&T) -> u64) -> ArrayRef {
    Arc::new(UInt64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
}

fn f64s<T>(rows: &[T], f: impl Fn(&T) -> f64) -> ArrayRef {
    float_column(rows.iter().map(f).collect())
}

fn alfas<T>(rows: &[T], f: impl Fn(&T) -> Option<Alfa>) -> ArrayRef {
    Arc::new(Float64Array::from(
        rows.iter()
            .map(|row| f(row).map(Alfa::value))
            .collect::<Vec<_>>(),
    ))
}

#[allow(clippy::cast_possible_truncation)]
const fn count(value: usize) -> u64 {
    value as u64
}

impl Tabular for QualitySummaryRow {
    fn schema() -> SchemaRef {
        schema(&[
            ("heuristic", DataType::Utf8),
            ("n", DataType::UInt32),
            ("m", DataType::UInt32),
            ("alfa", DataType::Float64),
            ("mean_value", DataType::Float64),
            ("best_value", DataType::UInt64),
            ("worst_value", DataType::UInt64),
            ("stdev", DataType::Float64),
            ("mean_time", DataType::Float64),
            ("mean_iterations", DataType::Float64),
        ])
    }

    fn columns(rows: &[Self]) -> Vec<ArrayRef> {
        vec![
            strings(rows, |r| r.heuristic.label()),
            u32s(rows, |r| r.n),
            u32s(rows, |r| r.m),
            alfas(rows, |r| r.alfa),
            f64s(rows, |r| r.mean_value),
            u64s(rows, |r| r.best_value),
            u64s(rows, |r| r.worst_value),
            f64s(rows, |r| r.stdev),
            f64s(rows, |r| r.mean_time),
            f64s(rows, |r| r.mean_iterations),
        ]
    }
}

impl Tabular for ScalabilityRow {
    fn schema() -> SchemaRef {
        schema(&[
            ("n", DataType::UInt32),
            ("m", DataType::UInt32),
            ("heuristic", DataType::Utf8),
            ("alfa", DataType::Float64),
            ("mean_time", DataType::Float64),
            ("mean_value", DataType::Float64),
            ("size_class_n", DataType::Utf8),
            ("size_class_m", DataType::Utf8),
        ])
    }

    fn columns(rows: &[Self]) -> Vec<ArrayRef> {
        vec![
            u32s(rows, |r| r.n),
            u32s(rows, |r| r.m),
            strings(rows, |r| r.heuristic.label()),
            alfas(rows, |r| r.alfa),
            f64s(rows, |r| r.mean_time),
            f64s(rows, |r| r.mean_value),
            strings(rows, |r| r.size_class_n.label()),
            strings(rows, |r| r.size_class_m.label()),
        ]
    }
}

impl Tabular for ComparisonDetailRow {
    fn schema() -> SchemaRef {
        schema(&[
            ("n", DataType::UInt32),
            ("m", DataType::UInt32),
            ("alfa", DataType::Float64),
            ("replication", DataType::UInt32),
            ("mlr_value", DataType::UInt64),
            ("sa_value", DataType::UInt64),
            ("mlr_time", DataType::Float64),
            ("sa_time", DataType::Float64),
            ("diff_pct_value", DataType::Float64),
            ("diff_pct_time", DataType::Float64),
            ("winner_quality", DataType::Utf8),
            ("winner_time", DataType::Utf8),
        ])
    }

    fn columns(rows: &[Self]) -> Vec<ArrayRef> {
        vec![
            u32s(rows, |r| r.n),
            u32s(rows, |r| r.m),
            alfas(rows, |r| r.alfa),
            u32s(rows, |r| r.replication),
            u64s(rows, |r| r.mlr_value),
            u64s(rows, |r| r.sa_value),
            f64s(rows, |r| r.mlr_time),
            f64s(rows, |r| r.sa_time),
            f64s(rows, |r| r.diff_pct_value),
            f64s(rows, |r| r.diff_pct_time),
            strings(rows, |r| r.winner_quality.label()),
            strings(rows, |r| r.winner_time.label()),
        ]
    }
}

impl Tabular for ComparisonSummaryRow {
    fn schema() -> SchemaRef {
        schema(&[
            ("n", DataType::UInt32),
            ("m", DataType::UInt32),
            ("alfa", DataType::Float64),
            ("mean_diff_pct_value", DataType::Float64),
            ("mean_diff_pct_time", DataType::Float64),
            ("wins_mlr_quality", DataType::UInt64),
            ("wins_sa_quality", DataType::UInt64),
            ("wins_mlr_time", DataType::UInt64),
            ("wins_sa_time", DataType::UInt64),
        ])
    }

    fn columns(rows: &[Self]) -> Vec<ArrayRef> {
        vec![
            u32s(rows, |r| r.n),
            u32s(rows, |r| r.m),
            alfas(rows, |r| r.alfa),
            f64s(rows, |r| r.mean_diff_pct_value),
            f64s(rows, |r| r.mean_diff_pct_time),
            u64s(rows, |r| count(r.wins_mlr_quality)),
            u64s(rows, |r| count(r.wins_sa_quality)),
            u64s(rows, |r| count(r.wins_mlr_time)),
            u64s(rows, |r| count(r.wins_sa_time)),
        ]
    }
}
