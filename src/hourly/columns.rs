//! Column names and the numeric-column heuristic.

use crate::error::ProcessingError;
use crate::utils::{column_names, text_cells};
use log::{info, warn};
use polars::prelude::DataFrame;

pub const COL_DATE: &str = "Date";
pub const COL_START_PERIOD: &str = "Start Period";
pub const COL_END_PERIOD: &str = "End Period";
pub const COL_GHI: &str = "GHI - W/m^2";
pub const COL_GHI_LAG: &str = "GHI_lag (t-1)";
pub const COL_DAY_OF_YEAR: &str = "Day of Year";
pub const COL_MONTH_OF_YEAR: &str = "Month of Year";
pub const COL_HOUR_OF_DAY: &str = "Hour of Day";
pub const COL_SOLAR_ZENITH: &str = "Solar Zenith Angle";
pub const COL_SEASON: &str = "Season";
pub const COL_DAYTIME: &str = "Daytime";

/// Names the engine writes itself. An input column carrying one of them would
/// clash with the derived output column.
const DERIVED_COLUMNS: &[&str] = &[
    COL_DATE,
    COL_START_PERIOD,
    COL_END_PERIOD,
    COL_DAY_OF_YEAR,
    COL_MONTH_OF_YEAR,
    COL_HOUR_OF_DAY,
    COL_SOLAR_ZENITH,
    COL_SEASON,
    COL_GHI_LAG,
    COL_DAYTIME,
];

/// Name fragment marking accumulated quantities, summed rather than averaged.
const ACCUMULATION_MARKER: &str = "Wind Run";

/// How a measurement column collapses into one value per hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnReduction {
    Mean,
    Sum,
}

impl ColumnReduction {
    pub fn for_column(name: &str) -> Self {
        if name.contains(ACCUMULATION_MARKER) {
            ColumnReduction::Sum
        } else {
            ColumnReduction::Mean
        }
    }
}

/// Result of sorting an input table's columns into disjoint groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnClassification {
    /// The column holding sample timestamps.
    pub time: String,
    /// Measurement columns that get aggregated, in table order.
    pub numeric: Vec<String>,
    /// Columns left out of the output because they do not look numeric.
    pub excluded: Vec<String>,
}

/// Whether a set of column names is the hourly output layout.
pub fn has_hourly_layout(names: &[String]) -> bool {
    [COL_DATE, COL_START_PERIOD, COL_END_PERIOD]
        .iter()
        .all(|required| names.iter().any(|name| name == required))
}

/// Whether a column name looks like a date or time column.
pub fn is_time_column_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.contains("date") || lower.contains("time")
}

/// Whether a single cell reads as a number. An empty cell is a missing
/// reading, not text, so it counts as numeric.
fn looks_numeric(cell: Option<&str>) -> bool {
    match cell.map(str::trim) {
        None | Some("") => true,
        Some(value) => value.parse::<f64>().is_ok(),
    }
}

/// Picks the time column and splits the rest into numeric and excluded.
///
/// The time column is the first whose name mentions a date or time. A column
/// counts as numeric when its *first* cell parses as a number. That is a
/// cheap heuristic: a column whose first cell is text but whose later cells
/// are numbers is excluded, and a column that starts numeric but holds text
/// further down is aggregated with those cells treated as missing.
pub fn classify_columns(df: &DataFrame) -> Result<ColumnClassification, ProcessingError> {
    let names = column_names(df);
    let time = names
        .iter()
        .find(|name| is_time_column_name(name))
        .cloned()
        .ok_or_else(|| ProcessingError::NoTimeColumn {
            available: names.clone(),
        })?;
    info!("Using '{}' as the date & time column", time);

    let mut numeric = Vec::new();
    let mut excluded = Vec::new();
    for name in names.iter().filter(|name| **name != time) {
        let first = text_cells(df, name)
            .map_err(|e| ProcessingError::ColumnNotFound(name.clone(), e))?
            .into_iter()
            .next()
            .flatten();
        if DERIVED_COLUMNS.contains(&name.as_str()) {
            warn!(
                "Skipping input column '{}': the output derives a column of that name",
                name
            );
            excluded.push(name.clone());
        } else if looks_numeric(first.as_deref()) {
            numeric.push(name.clone());
        } else {
            warn!(
                "Skipping non-numeric column '{}' (first value {:?})",
                name, first
            );
            excluded.push(name.clone());
        }
    }
    info!("Numeric columns that will be aggregated: {:?}", numeric);

    Ok(ColumnClassification {
        time,
        numeric,
        excluded,
    })
}
