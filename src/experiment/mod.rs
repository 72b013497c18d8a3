//! Experiment Record Schema
//!
//! Typed per-run observations produced by the two competing scheduling
//! heuristics, and the in-memory store every aggregator reads from.
//!
//! ## Schema Overview
//!
//! ```text
//! RecordStore ──< ExperimentRecord (N)
//!                    ├── Heuristic   (MLR | SA)
//!                    └── Option<Alfa> (SA control parameter, None = NA)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use heuristic_analytics::experiment::{Alfa, ExperimentRecord, Heuristic, RecordStore};
//!
//! let mlr = ExperimentRecord::builder(Heuristic::Mlr, 10, 2, 1)
//!     .value(50)
//!     .time(0.1)
//!     .build();
//! let sa = ExperimentRecord::builder(Heuristic::Sa, 10, 2, 1)
//!     .value(55)
//!     .time(0.05)
//!     .alfa(Alfa::new(0.9))
//!     .build();
//!
//! let store = RecordStore::from_records(vec![mlr, sa])?;
//! assert_eq!(store.len(), 2);
//! # Ok::<(), heuristic_analytics::Error>(())
//! ```

mod experiment_record;
mod heuristic;
mod store;

pub use experiment_record::{ExperimentRecord, ExperimentRecordBuilder};
pub use heuristic::{Alfa, Heuristic};
pub use store::RecordStore;
