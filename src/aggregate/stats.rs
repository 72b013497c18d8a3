//! Running descriptive statistics
//!
//! `RunningStats` can only be created from a first observation, so an
//! empty group is unrepresentable and no statistic ever needs a default.

/// Single-pass mean and sample variance (Welford).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunningStats {
    count: usize,
    sum: f64,
    welford_mean: f64,
    m2: f64,
}

impl RunningStats {
    /// Start from the first observation.
    #[must_use]
    pub const fn new(first: f64) -> Self {
        Self {
            count: 1,
            sum: first,
            welford_mean: first,
            m2: 0.0,
        }
    }

    /// Add an observation.
    pub fn push(&mut self, x: f64) {
        self.count += 1;
        self.sum += x;

        let delta = x - self.welford_mean;
        #[allow(clippy::cast_precision_loss)]
        let count = self.count as f64;
        self.welford_mean += delta / count;
        self.m2 += delta * (x - self.welford_mean);
    }

    /// Number of observations (always at least one).
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Arithmetic mean.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }

    /// Sample standard deviation (n - 1 denominator); exactly `0.0` for a
    /// single observation.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn sample_stdev(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        (self.m2.max(0.0) / (self.count - 1) as f64).sqrt()
    }
}

/// Round the stored value to `places` decimal places.
///
/// Goes through the exact decimal expansion of `value`, so a double just
/// below a decimal tie (2.675 is 2.67499...) rounds down, and exact binary
/// ties round to even.
#[must_use]
pub fn round_to(value: f64, places: usize) -> f64 {
    format!("{value:.places$}").parse().unwrap_or(value)
}
