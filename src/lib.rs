//! # heuristic-analytics: MLR vs SA Experiment Analysis
//!
//! Aggregation and head-to-head comparison engine for scheduling
//! experiments that pit a deterministic constructive heuristic (MLR)
//! against simulated annealing (SA) on instances parameterized by task
//! count `n`, machine count `m`, and (for SA) the cooling factor `alfa`.
//!
//! ## Design Principles
//!
//! - **Deterministic output**: every table is emitted in ascending key order,
//!   so re-running on identical input yields byte-identical files
//! - **Fail at the boundary**: malformed input aborts the load before any
//!   aggregation; unmatched SA runs are filtered, never raised
//! - **Non-empty groups by construction**: statistics are seeded from a
//!   group's first observation
//!
//! ## Pipeline
//!
//! ```text
//! raw CSV/Parquet ──> RecordStore ─┬─> QualityAggregator      ──> 1_quality.csv
//!                                  ├─> ScalabilityAggregator  ──> 4_scalability.csv
//!                                  └─> ComparisonEngine
//!                                        stage 1 (pairing)    ──> 5_comparison_detail.csv
//!                                        stage 2 (summary)    ──> 5_comparison_summary.csv
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use heuristic_analytics::config::AnalysisConfig;
//! use heuristic_analytics::experiment::RecordStore;
//! use heuristic_analytics::AnalysisEngine;
//!
//! let config = AnalysisConfig::default();
//! let path = RecordStore::discover_input(None, &config.input_candidates)?;
//! let store = RecordStore::load(&path)?;
//!
//! let report = AnalysisEngine::from_config(&config).run(&store)?;
//! report.write_csv(&config.output)?;
//! # Ok::<(), heuristic_analytics::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod aggregate;
pub mod classify;
pub mod compare;
pub mod config;
pub mod engine;
pub mod error;
pub mod experiment;
pub mod report;
pub mod storage;

pub use engine::{AnalysisEngine, AnalysisEngineBuilder, AnalysisReport};
pub use error::{Error, Result};
