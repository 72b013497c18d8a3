//! Storage boundary (Arrow CSV / Parquet)
//!
//! Raw result files are read into Arrow `RecordBatch`es against a fixed
//! typed schema and only then converted into `ExperimentRecord`s. Report
//! tables travel the other way: rows become batches, batches become CSV.
//!
//! Columns of the raw file are positional:
//!
//! ```text
//! heuristic, n, m, replication, time, iterations, value, parameter
//! ```

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array, PrimitiveArray, RecordBatch, StringArray};
use arrow::compute::kernels::cast::{cast_with_options, CastOptions};
use arrow::datatypes::{
    ArrowPrimitiveType, DataType, Field, Float64Type, Schema, SchemaRef, UInt32Type, UInt64Type,
};
use tracing::debug;

use crate::experiment::{Alfa, ExperimentRecord, Heuristic};
use crate::{Error, Result};

/// Column names of the canonical raw schema, in file order.
pub const RAW_COLUMNS: [&str; 8] = [
    "heuristic",
    "n",
    "m",
    "replication",
    "time",
    "iterations",
    "value",
    "parameter",
];

const COL_HEURISTIC: usize = 0;
const COL_N: usize = 1;
const COL_M: usize = 2;
const COL_REPLICATION: usize = 3;
const COL_TIME: usize = 4;
const COL_ITERATIONS: usize = 5;
const COL_VALUE: usize = 6;
const COL_PARAMETER: usize = 7;

/// Canonical typed schema of a raw result file.
///
/// Every field is nullable at the Arrow level so that an empty required
/// field surfaces as a `MalformedRecord` naming the column instead of a
/// generic batch construction failure.
#[must_use]
pub fn raw_schema() -> SchemaRef {
    let types = [
        DataType::Utf8,
        DataType::UInt32,
        DataType::UInt32,
        DataType::UInt32,
        DataType::Float64,
        DataType::UInt64,
        DataType::UInt64,
        DataType::Utf8,
    ];
    Arc::new(Schema::new(
        RAW_COLUMNS
            .iter()
            .zip(types)
            .map(|(name, data_type)| Field::new(*name, data_type, true))
            .collect::<Vec<_>>(),
    ))
}

/// Read a delimited raw result file into typed batches.
///
/// The first line is a header and is skipped; names are not interpreted.
///
/// # Errors
///
/// Returns `MalformedRecord` if any field fails to parse as its column type.
pub fn read_csv_batches<P: AsRef<Path>>(path: P) -> Result<Vec<RecordBatch>> {
    let file = File::open(path.as_ref())?;
    let reader = arrow::csv::ReaderBuilder::new(raw_schema())
        .with_header(true)
        .build(file)?;

    let mut batches = Vec::new();
    for batch in reader {
        let batch = batch.map_err(|e| Error::MalformedRecord(e.to_string()))?;
        batches.push(batch);
    }
    Ok(batches)
}

/// Read a Parquet file and normalize it to the canonical raw schema.
///
/// Columns are located by name and cast to the canonical types.
///
/// # Errors
///
/// Returns `StorageError` if the file cannot be read, or `MalformedRecord`
/// if a column is missing or cannot be cast.
pub fn read_parquet_batches<P: AsRef<Path>>(path: P) -> Result<Vec<RecordBatch>> {
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    let file = File::open(path.as_ref())
        .map_err(|e| Error::StorageError(format!("Failed to open Parquet file: {e}")))?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| Error::StorageError(format!("Failed to parse Parquet file: {e}")))?;

    let reader = builder
        .build()
        .map_err(|e| Error::StorageError(format!("Failed to create Parquet reader: {e}")))?;

    let mut batches = Vec::new();
    for batch in reader {
        let batch = batch
            .map_err(|e| Error::StorageError(format!("Failed to read record batch: {e}")))?;
        batches.push(normalize_batch(&batch)?);
    }
    Ok(batches)
}

/// Project and cast an arbitrary batch onto the canonical raw schema.
fn normalize_batch(batch: &RecordBatch) -> Result<RecordBatch> {
    let schema = raw_schema();
    let options = CastOptions {
        safe: false,
        ..CastOptions::default()
    };

    let mut columns: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len());
    for field in schema.fields() {
        let column = batch.column_by_name(field.name()).ok_or_else(|| {
            Error::MalformedRecord(format!("Column not found: {}", field.name()))
        })?;
        let cast = cast_with_options(column, field.data_type(), &options).map_err(|e| {
            Error::MalformedRecord(format!("Column {} has wrong type: {e}", field.name()))
        })?;
        columns.push(cast);
    }

    Ok(RecordBatch::try_new(schema, columns)?)
}

/// Convert canonical batches into validated records.
///
/// `data_row` numbers in error messages are 1-based and exclude the header.
///
/// # Errors
///
/// Returns `MalformedRecord` for missing required fields, unknown
/// heuristic labels, unparseable parameters, or out-of-domain values.
pub fn records_from_batches(batches: &[RecordBatch]) -> Result<Vec<ExperimentRecord>> {
    let mut records = Vec::with_capacity(batches.iter().map(RecordBatch::num_rows).sum());
    let mut first_row = 1;

    for batch in batches {
        let heuristics = string_column(batch, COL_HEURISTIC)?;
        let ns = primitive_column::<UInt32Type>(batch, COL_N)?;
        let ms = primitive_column::<UInt32Type>(batch, COL_M)?;
        let replications = primitive_column::<UInt32Type>(batch, COL_REPLICATION)?;
        let times = primitive_column::<Float64Type>(batch, COL_TIME)?;
        let iterations = primitive_column::<UInt64Type>(batch, COL_ITERATIONS)?;
        let values = primitive_column::<UInt64Type>(batch, COL_VALUE)?;
        let parameters = string_column(batch, COL_PARAMETER)?;

        for i in 0..batch.num_rows() {
            let row = first_row + i;
            let malformed = |message: String| Error::MalformedRecord(format!("data row {row}: {message}"));

            if heuristics.is_null(i) {
                return Err(malformed("missing value for column heuristic".to_string()));
            }
            let heuristic: Heuristic = heuristics.value(i).parse().map_err(malformed)?;

            let alfa = if parameters.is_null(i) {
                None
            } else {
                Alfa::parse_parameter(parameters.value(i)).map_err(malformed)?
            };

            let record = ExperimentRecord::builder(
                heuristic,
                required(ns, i, COL_N).map_err(malformed)?,
                required(ms, i, COL_M).map_err(malformed)?,
                required(replications, i, COL_REPLICATION).map_err(malformed)?,
            )
            .time(required(times, i, COL_TIME).map_err(malformed)?)
            .iterations(required(iterations, i, COL_ITERATIONS).map_err(malformed)?)
            .value(required(values, i, COL_VALUE).map_err(malformed)?)
            .alfa(alfa)
            .build();

            record.validate().map_err(malformed)?;
            records.push(record);
        }

        first_row += batch.num_rows();
    }

    debug!(rows = records.len(), batches = batches.len(), "Decoded raw batches");
    Ok(records)
}

fn string_column(batch: &RecordBatch, index: usize) -> Result<&StringArray> {
    batch
        .column(index)
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| {
            Error::MalformedRecord(format!("Column {} is not a string column", RAW_COLUMNS[index]))
        })
}

fn primitive_column<T: ArrowPrimitiveType>(
    batch: &RecordBatch,
    index: usize,
) -> Result<&PrimitiveArray<T>> {
    batch
        .column(index)
        .as_any()
        .downcast_ref::<PrimitiveArray<T>>()
        .ok_or_else(|| {
            Error::MalformedRecord(format!(
                "Column {} is not of type {}",
                RAW_COLUMNS[index],
                T::DATA_TYPE
            ))
        })
}

fn required<T: ArrowPrimitiveType>(
    array: &PrimitiveArray<T>,
    i: usize,
    index: usize,
) -> std::result::Result<T::Native, String> {
    if array.is_null(i) {
        Err(format!("missing value for column {}", RAW_COLUMNS[index]))
    } else {
        Ok(array.value(i))
    }
}

/// Write one batch as a CSV table with a header row.
///
/// Null cells are written as empty fields. The header is written even
/// when the batch has no rows.
///
/// # Errors
///
/// Returns error if the file cannot be created or written.
pub fn write_csv<P: AsRef<Path>>(path: P, batch: &RecordBatch) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = arrow::csv::WriterBuilder::new()
        .with_header(true)
        .build(file);
    writer.write(batch)?;
    Ok(())
}

/// Convenience: wrap a float vector as an Arrow column.
pub(crate) fn float_column(values: Vec<f64>) -> ArrayRef {
    Arc::new(Float64Array::from(values))
}
