//! Policies that decide how incomplete or malformed input is treated.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decides which hour buckets make it into the output.
///
/// There is deliberately no `Default`: both policies are used in practice and
/// the caller has to pick one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AggregationPolicy {
    /// Every bucket that holds at least one sample becomes a record, however
    /// sparse its coverage.
    BestEffort,
    /// Only buckets holding exactly `samples_per_hour` samples are kept
    /// (12 for 5-minute exports, 6 for 10-minute exports).
    CompleteHoursOnly { samples_per_hour: u32 },
}

impl AggregationPolicy {
    /// Complete-hours policy for an export with the given sample cadence.
    ///
    /// Returns `None` when the cadence does not divide an hour evenly.
    pub fn complete_hours_for_cadence(cadence_minutes: u32) -> Option<Self> {
        if cadence_minutes == 0 || 60 % cadence_minutes != 0 {
            return None;
        }
        Some(AggregationPolicy::CompleteHoursOnly {
            samples_per_hour: 60 / cadence_minutes,
        })
    }
}

impl fmt::Display for AggregationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregationPolicy::BestEffort => write!(f, "best-effort"),
            AggregationPolicy::CompleteHoursOnly { samples_per_hour } => {
                write!(f, "complete hours only ({samples_per_hour} samples/hour)")
            }
        }
    }
}

/// What to do when the time column cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampFallback {
    /// Abort the run.
    #[default]
    Fail,
    /// Replace the whole time axis with evenly spaced timestamps, one per row,
    /// starting at `start`. Logged as a warning.
    Synthetic {
        start: NaiveDateTime,
        step_minutes: u32,
    },
}
