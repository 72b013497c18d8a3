//! Instance size classification
//!
//! Maps task count `n` and machine count `m` to ordinal size classes.
//! Thresholds are fixed policy, not learned from data:
//!
//! | Axis | small | medium | large |
//! |------|-------|--------|-------|
//! | `n`  | `< 200` | `200..1000` | `>= 1000` |
//! | `m`  | `< 20`  | `20..40`    | `>= 40`   |

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default upper bound (exclusive) of a small task count.
pub const TASK_SMALL_BELOW: u32 = 200;
/// Default upper bound (exclusive) of a medium task count.
pub const TASK_MEDIUM_BELOW: u32 = 1000;
/// Default upper bound (exclusive) of a small machine count.
pub const MACHINE_SMALL_BELOW: u32 = 20;
/// Default upper bound (exclusive) of a medium machine count.
pub const MACHINE_MEDIUM_BELOW: u32 = 40;

/// Ordinal size class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    /// Below the first threshold
    Small,
    /// Between the two thresholds
    Medium,
    /// At or above the second threshold
    Large,
}

impl SizeClass {
    /// Label used in output tables.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    const fn from_bounds(value: u32, small_below: u32, medium_below: u32) -> Self {
        if value < small_below {
            Self::Small
        } else if value < medium_below {
            Self::Medium
        } else {
            Self::Large
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classification thresholds (exclusive upper bounds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeThresholds {
    /// `n` below this is small
    pub task_small_below: u32,
    /// `n` below this (and not small) is medium
    pub task_medium_below: u32,
    /// `m` below this is small
    pub machine_small_below: u32,
    /// `m` below this (and not small) is medium
    pub machine_medium_below: u32,
}

impl Default for SizeThresholds {
    fn default() -> Self {
        Self {
            task_small_below: TASK_SMALL_BELOW,
            task_medium_below: TASK_MEDIUM_BELOW,
            machine_small_below: MACHINE_SMALL_BELOW,
            machine_medium_below: MACHINE_MEDIUM_BELOW,
        }
    }
}

impl SizeThresholds {
    /// Check that each axis has `small_below <= medium_below`.
    ///
    /// # Errors
    ///
    /// Returns a description of the inverted axis.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.task_small_below > self.task_medium_below {
            return Err(format!(
                "task thresholds inverted: small below {} > medium below {}",
                self.task_small_below, self.task_medium_below
            ));
        }
        if self.machine_small_below > self.machine_medium_below {
            return Err(format!(
                "machine thresholds inverted: small below {} > medium below {}",
                self.machine_small_below, self.machine_medium_below
            ));
        }
        Ok(())
    }

    /// Classify a task count.
    #[must_use]
    pub const fn task_class(&self, n: u32) -> SizeClass {
        SizeClass::from_bounds(n, self.task_small_below, self.task_medium_below)
    }

    /// Classify a machine count.
    #[must_use]
    pub const fn machine_class(&self, m: u32) -> SizeClass {
        SizeClass::from_bounds(m, self.machine_small_below, self.machine_medium_below)
    }
}

/// Classify a task count with the default thresholds.
#[must_use]
pub const fn classify_task_count(n: u32) -> SizeClass {
    SizeClass::from_bounds(n, TASK_SMALL_BELOW, TASK_MEDIUM_BELOW)
}

/// Classify a machine count with the default thresholds.
#[must_use]
pub const fn classify_machine_count(m: u32) -> SizeClass {
    SizeClass::from_bounds(m, MACHINE_SMALL_BELOW, MACHINE_MEDIUM_BELOW)
}
