//! Parsing the time axis of an export.

use crate::error::ProcessingError;
use crate::types::policy::TimestampFallback;
use chrono::{Duration, NaiveDateTime, Timelike};
use log::warn;

/// Formats tried for each timestamp cell, in order. Two-digit-year forms
/// come first: `%Y` would happily read `24` as the year 24.
const DEFAULT_TIMESTAMP_FORMATS: &[&str] = &[
    "%m/%d/%y %I:%M %p",
    "%m/%d/%y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%y %H:%M",
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%d-%b-%y %H:%M:%S",
];

pub fn default_timestamp_formats() -> Vec<String> {
    DEFAULT_TIMESTAMP_FORMATS
        .iter()
        .map(|format| format.to_string())
        .collect()
}

/// Where a timeline's timestamps came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineSource {
    Parsed,
    /// Generated because the time column could not be parsed.
    Synthetic,
}

/// One timestamp per input row.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    pub timestamps: Vec<NaiveDateTime>,
    pub source: TimelineSource,
}

pub fn parse_timestamp(value: &str, formats: &[String]) -> Option<NaiveDateTime> {
    let value = value.trim();
    formats
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Evenly spaced timestamps, `len` of them, starting at `start`.
pub fn synthetic_timeline(len: usize, start: NaiveDateTime, step_minutes: u32) -> Vec<NaiveDateTime> {
    (0..len)
        .map(|i| start + Duration::minutes(step_minutes as i64 * i as i64))
        .collect()
}

/// Truncates a timestamp to the top of its hour.
pub fn floor_to_hour(ts: NaiveDateTime) -> NaiveDateTime {
    ts.with_minute(0)
        .and_then(|dt| dt.with_second(0))
        .and_then(|dt| dt.with_nanosecond(0))
        .unwrap_or(ts)
}

/// Parses every cell of the time column. A single unparseable cell makes the
/// whole axis unusable: the run either fails or, if the caller opted in,
/// continues on a synthetic timeline.
pub fn parse_timeline(
    column: &str,
    cells: &[Option<String>],
    formats: &[String],
    fallback: TimestampFallback,
) -> Result<Timeline, ProcessingError> {
    let mut timestamps = Vec::with_capacity(cells.len());
    for (row, cell) in cells.iter().enumerate() {
        let value = cell.as_deref().unwrap_or("");
        match parse_timestamp(value, formats) {
            Some(ts) => timestamps.push(ts),
            None => {
                return match fallback {
                    TimestampFallback::Fail => Err(ProcessingError::UnparseableTimestamp {
                        column: column.to_string(),
                        row,
                        value: value.to_string(),
                    }),
                    TimestampFallback::Synthetic {
                        start,
                        step_minutes,
                    } => {
                        warn!(
                            "Could not parse '{}' (row {}) in '{}' as a timestamp. \
                             Using a synthetic {}-minute timeline starting {} instead.",
                            value, row, column, step_minutes, start
                        );
                        Ok(Timeline {
                            timestamps: synthetic_timeline(cells.len(), start, step_minutes),
                            source: TimelineSource::Synthetic,
                        })
                    }
                };
            }
        }
    }
    Ok(Timeline {
        timestamps,
        source: TimelineSource::Parsed,
    })
}
