//! Reduction of raw samples into one-hour buckets.

use crate::error::ProcessingError;
use crate::hourly::columns::ColumnReduction;
use crate::hourly::timestamps::floor_to_hour;
use crate::types::policy::AggregationPolicy;
use chrono::{DateTime, NaiveDateTime};
use log::{debug, info};
use polars::prelude::*;

const BUCKET_KEY: &str = "bucket_start";
const SAMPLE_COUNT: &str = "sample_count";

/// One hour of samples, reduced.
#[derive(Debug, Clone, PartialEq)]
pub struct HourBucket {
    pub start: NaiveDateTime,
    pub sample_count: u32,
    /// One value per measurement column, `None` when no sample in the hour
    /// carried a usable value for it.
    pub values: Vec<Option<f64>>,
}

/// A measurement column ready for aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementColumn {
    pub name: String,
    pub values: Vec<Option<f64>>,
    /// Non-empty cells that did not parse as numbers and became nulls.
    pub rejected_cells: usize,
}

impl MeasurementColumn {
    /// Parses text cells. Empty cells are missing readings; anything else
    /// that is not a number is counted as rejected.
    pub fn from_text_cells(name: &str, cells: &[Option<String>]) -> Self {
        let mut rejected_cells = 0;
        let values = cells
            .iter()
            .map(|cell| match cell.as_deref().map(str::trim) {
                None | Some("") => None,
                Some(text) => {
                    let parsed = text.parse::<f64>().ok();
                    if parsed.is_none() {
                        rejected_cells += 1;
                    }
                    parsed
                }
            })
            .collect();
        Self {
            name: name.to_string(),
            values,
            rejected_cells,
        }
    }
}

// Measurement columns enter the grouped frame under positional names, so no
// input header can clash with the key or count columns.
fn value_alias(idx: usize) -> String {
    format!("value_{idx}")
}

fn valid_count_alias(idx: usize) -> String {
    format!("valid_{idx}")
}

fn bucket_key_to_datetime(key: i64) -> PolarsResult<NaiveDateTime> {
    DateTime::from_timestamp(key, 0)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| PolarsError::ComputeError("hour bucket key out of range".into()))
}

/// Groups samples by the hour their timestamp falls in and reduces every
/// measurement column per bucket: mean, or sum for accumulation columns.
///
/// Buckets come out in ascending order and only exist where samples exist.
/// Under [`AggregationPolicy::CompleteHoursOnly`] buckets whose sample count
/// differs from the expected one are dropped.
pub fn aggregate_buckets(
    timestamps: &[NaiveDateTime],
    columns: &[MeasurementColumn],
    policy: AggregationPolicy,
) -> Result<Vec<HourBucket>, ProcessingError> {
    let keys: Vec<i64> = timestamps
        .iter()
        .map(|ts| floor_to_hour(*ts).and_utc().timestamp())
        .collect();

    let mut frame_columns = Vec::with_capacity(columns.len() + 1);
    frame_columns.push(Series::new(BUCKET_KEY.into(), keys).into_column());
    for (idx, column) in columns.iter().enumerate() {
        frame_columns.push(Series::new(value_alias(idx).into(), &column.values).into_column());
    }
    let frame = DataFrame::new(frame_columns)?;

    let mut aggs = vec![len().cast(DataType::Int64).alias(SAMPLE_COUNT)];
    for (idx, column) in columns.iter().enumerate() {
        let value = col(value_alias(idx));
        let reduced = match ColumnReduction::for_column(&column.name) {
            ColumnReduction::Mean => value.clone().mean(),
            ColumnReduction::Sum => value.clone().sum(),
        };
        aggs.push(reduced.alias(value_alias(idx)));
        aggs.push(
            value
                .count()
                .cast(DataType::Int64)
                .alias(valid_count_alias(idx)),
        );
    }

    let mut lazy = frame.lazy().group_by([col(BUCKET_KEY)]).agg(aggs);
    if let AggregationPolicy::CompleteHoursOnly { samples_per_hour } = policy {
        lazy = lazy.filter(col(SAMPLE_COUNT).eq(lit(samples_per_hour as i64)));
    }
    let reduced = lazy
        .sort_by_exprs([col(BUCKET_KEY)], SortMultipleOptions::default())
        .collect()?;

    let keys = reduced.column(BUCKET_KEY)?.i64()?;
    let counts = reduced.column(SAMPLE_COUNT)?.i64()?;
    let mut value_columns = Vec::with_capacity(columns.len());
    for (idx, column) in columns.iter().enumerate() {
        let values = reduced.column(&value_alias(idx))?.f64()?;
        let valid = reduced.column(&valid_count_alias(idx))?.i64()?;
        value_columns.push((column.name.as_str(), values, valid));
    }

    let mut buckets = Vec::with_capacity(reduced.height());
    for row in 0..reduced.height() {
        let start = bucket_key_to_datetime(keys.get(row).unwrap_or_default())?;
        let values = value_columns
            .iter()
            .map(|(name, values, valid)| {
                if valid.get(row).unwrap_or(0) == 0 {
                    debug!("No usable '{}' values in hour starting {}", name, start);
                    None
                } else {
                    values.get(row)
                }
            })
            .collect();
        buckets.push(HourBucket {
            start,
            sample_count: counts.get(row).unwrap_or(0) as u32,
            values,
        });
    }

    info!(
        "Reduced {} samples into {} hourly buckets ({})",
        timestamps.len(),
        buckets.len(),
        policy
    );
    Ok(buckets)
}
