//! Configuration for a processing run.

use crate::hourly::timestamps::default_timestamp_formats;
use crate::loading::header::WEATHERLINK_STRIPPED_COLUMNS;
use crate::types::policy::{AggregationPolicy, TimestampFallback};
use crate::types::site_location::SiteLocation;
use bon::Builder;

/// Everything a [`crate::HourlyProcessor`] needs to know about the input
/// format and the deployment.
///
/// `location` and `policy` are required; the rest default to a plain CSV with
/// the header on the first line and no columns stripped.
///
/// # Examples
///
/// ```
/// use station_hourly::{AggregationPolicy, ProcessingOptions, SiteLocation};
///
/// let options = ProcessingOptions::builder()
///     .location(SiteLocation::new(7.0707, 125.6113, 7.0))
///     .policy(AggregationPolicy::BestEffort)
///     .skip_rows(5)
///     .build();
/// assert_eq!(options.skip_rows, 5);
/// assert!(options.strip_columns.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct ProcessingOptions {
    pub location: SiteLocation,
    pub policy: AggregationPolicy,
    /// Non-data lines before the header row.
    #[builder(default)]
    pub skip_rows: usize,
    /// Spreadsheet-style letters (`"D"`, `"AB"`) of columns to drop on load.
    #[builder(default)]
    pub strip_columns: Vec<String>,
    #[builder(default)]
    pub timestamp_fallback: TimestampFallback,
    /// chrono formats tried, in order, for every timestamp cell.
    #[builder(default = default_timestamp_formats())]
    pub timestamp_formats: Vec<String>,
}

impl ProcessingOptions {
    /// Options for the vendor dashboard export: five preamble lines before the
    /// header and a fixed set of irrelevant columns.
    pub fn weatherlink_export(location: SiteLocation, policy: AggregationPolicy) -> Self {
        ProcessingOptions::builder()
            .location(location)
            .policy(policy)
            .skip_rows(5)
            .strip_columns(
                WEATHERLINK_STRIPPED_COLUMNS
                    .iter()
                    .map(|letter| letter.to_string())
                    .collect(),
            )
            .build()
    }
}
