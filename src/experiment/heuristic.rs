//! Heuristic identity and the SA control parameter

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The two competing heuristics.
///
/// Declaration order is the output order: `MLR` sorts before `SA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Heuristic {
    /// Deterministic constructive method (monotone list rule).
    #[serde(rename = "MLR")]
    Mlr,
    /// Stochastic local search (simulated annealing).
    #[serde(rename = "SA")]
    Sa,
}

impl Heuristic {
    /// All heuristics in output order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Mlr, Self::Sa]
    }

    /// Label used in every output table.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mlr => "MLR",
            Self::Sa => "SA",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Heuristic {
    type Err = String;

    /// Accepts the output labels and the names the solver writes into raw
    /// result files (`monotona`, `temperasimulada`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mlr" | "monotona" => Ok(Self::Mlr),
            "sa" | "temperasimulada" => Ok(Self::Sa),
            other => Err(format!("unknown heuristic label: {other:?}")),
        }
    }
}

/// Real-valued SA control parameter (cooling factor `alfa`).
///
/// Totally ordered so it can sit inside grouping keys. Only finite values
/// are representable, and `-0.0` is normalized to `0.0` so that equal
/// settings always land in the same group.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Alfa(f64);

impl Alfa {
    /// Wrap a finite value. Returns `None` for NaN or infinities.
    #[must_use]
    pub fn new(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        Some(Self(if value == 0.0 { 0.0 } else { value }))
    }

    /// Get the raw value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Parse a raw `parameter` field.
    ///
    /// `NA` (any case) and empty fields mean "not applicable".
    ///
    /// # Errors
    ///
    /// Returns a description of the problem if the field is neither a
    /// sentinel nor a finite real.
    pub fn parse_parameter(raw: &str) -> Result<Option<Self>, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("NA") {
            return Ok(None);
        }
        trimmed.parse::<Self>().map(Some)
    }
}

impl FromStr for Alfa {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| format!("invalid parameter value: {s:?}"))?;
        Self::new(value).ok_or_else(|| format!("parameter must be finite: {s:?}"))
    }
}

impl PartialEq for Alfa {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Alfa {}

impl PartialOrd for Alfa {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Alfa {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for Alfa {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Display for Alfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
