//! Experiment Record - one completed heuristic run

use serde::{Deserialize, Serialize};

use super::{Alfa, Heuristic};

/// Experiment Record represents a single completed run.
///
/// Records are immutable once built; aggregators only derive new rows
/// from them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExperimentRecord {
    heuristic: Heuristic,
    n: u32,
    m: u32,
    replication: u32,
    time: f64,
    iterations: u64,
    value: u64,
    alfa: Option<Alfa>,
}

impl ExperimentRecord {
    /// Create a builder with the identifying fields of a run.
    ///
    /// # Arguments
    ///
    /// * `heuristic` - Which heuristic produced the run
    /// * `n` - Task count
    /// * `m` - Machine count
    /// * `replication` - Trial index shared by matched MLR/SA runs
    #[must_use]
    pub const fn builder(
        heuristic: Heuristic,
        n: u32,
        m: u32,
        replication: u32,
    ) -> ExperimentRecordBuilder {
        ExperimentRecordBuilder::new(heuristic, n, m, replication)
    }

    /// Get the heuristic.
    #[must_use]
    pub const fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    /// Get the task count.
    #[must_use]
    pub const fn n(&self) -> u32 {
        self.n
    }

    /// Get the machine count.
    #[must_use]
    pub const fn m(&self) -> u32 {
        self.m
    }

    /// Get the replication index.
    #[must_use]
    pub const fn replication(&self) -> u32 {
        self.replication
    }

    /// Get the wall-clock time in seconds.
    #[must_use]
    pub const fn time(&self) -> f64 {
        self.time
    }

    /// Get the iteration count.
    #[must_use]
    pub const fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Get the objective value (makespan) achieved.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.value
    }

    /// Get the control parameter, `None` when not applicable.
    #[must_use]
    pub const fn alfa(&self) -> Option<Alfa> {
        self.alfa
    }

    /// Check the field domains that the column types alone cannot express.
    ///
    /// # Errors
    ///
    /// Returns a description of the first violated constraint.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.n == 0 {
            return Err("task count n must be positive".to_string());
        }
        if self.m == 0 {
            return Err("machine count m must be positive".to_string());
        }
        if !self.time.is_finite() || self.time < 0.0 {
            return Err(format!(
                "time must be a non-negative finite number, got {}",
                self.time
            ));
        }
        Ok(())
    }
}

/// Builder for `ExperimentRecord`.
#[derive(Debug)]
pub struct ExperimentRecordBuilder {
    heuristic: Heuristic,
    n: u32,
    m: u32,
    replication: u32,
    time: f64,
    iterations: u64,
    value: u64,
    alfa: Option<Alfa>,
}

impl ExperimentRecordBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub const fn new(heuristic: Heuristic, n: u32, m: u32, replication: u32) -> Self {
        Self {
            heuristic,
            n,
            m,
            replication,
            time: 0.0,
            iterations: 0,
            value: 0,
            alfa: None,
        }
    }

    /// Set the wall-clock time in seconds.
    #[must_use]
    pub const fn time(mut self, time: f64) -> Self {
        self.time = time;
        self
    }

    /// Set the iteration count.
    #[must_use]
    pub const fn iterations(mut self, iterations: u64) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the objective value.
    #[must_use]
    pub const fn value(mut self, value: u64) -> Self {
        self.value = value;
        self
    }

    /// Set the control parameter.
    #[must_use]
    pub const fn alfa(mut self, alfa: Option<Alfa>) -> Self {
        self.alfa = alfa;
        self
    }

    /// Build the `ExperimentRecord`.
    #[must_use]
    pub const fn build(self) -> ExperimentRecord {
        ExperimentRecord {
            heuristic: self.heuristic,
            n: self.n,
            m: self.m,
            replication: self.replication,
            time: self.time,
            iterations: self.iterations,
            value: self.value,
            alfa: self.alfa,
        }
    }
}
