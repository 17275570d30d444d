//! The aggregation engine: raw export table in, hourly dataset out.

use crate::error::ProcessingError;
use crate::hourly::bucketing::{aggregate_buckets, MeasurementColumn};
use crate::hourly::columns::{classify_columns, has_hourly_layout};
use crate::hourly::dataset::HourlyDataset;
use crate::hourly::features::build_records;
use crate::hourly::timestamps::parse_timeline;
use crate::loading::header::normalize_headers;
use crate::types::options::ProcessingOptions;
use crate::utils::{column_names, text_cells};
use log::{info, warn};
use polars::prelude::DataFrame;

/// Whether a table already has the hourly output layout.
pub fn is_already_processed(df: &DataFrame) -> bool {
    has_hourly_layout(&column_names(df))
}

/// Picks the column the GHI lag is computed from: the first aggregated column
/// mentioning GHI that is not itself a lag.
fn find_ghi_column(measurement_columns: &[String]) -> Option<usize> {
    measurement_columns
        .iter()
        .position(|name| name.contains("GHI") && !name.to_lowercase().contains("lag"))
}

/// Aggregates a raw export table into hourly records with derived features.
///
/// Pure: the input is not modified and nothing is written anywhere.
pub fn aggregate_table(
    table: &DataFrame,
    options: &ProcessingOptions,
) -> Result<HourlyDataset, ProcessingError> {
    let mut df = table.clone();
    normalize_headers(&mut df)?;

    let classes = classify_columns(&df)?;
    let time_cells = text_cells(&df, &classes.time)
        .map_err(|e| ProcessingError::ColumnNotFound(classes.time.clone(), e))?;
    let timeline = parse_timeline(
        &classes.time,
        &time_cells,
        &options.timestamp_formats,
        options.timestamp_fallback,
    )?;

    let mut measurements = Vec::with_capacity(classes.numeric.len());
    for name in &classes.numeric {
        let cells =
            text_cells(&df, name).map_err(|e| ProcessingError::ColumnNotFound(name.clone(), e))?;
        let column = MeasurementColumn::from_text_cells(name, &cells);
        if column.rejected_cells > 0 {
            warn!(
                "{} non-numeric cells in '{}' treated as missing",
                column.rejected_cells, name
            );
        }
        measurements.push(column);
    }

    let buckets = aggregate_buckets(&timeline.timestamps, &measurements, options.policy)?;
    let ghi_index = find_ghi_column(&classes.numeric);
    let records = build_records(&options.location, buckets, ghi_index);

    info!(
        "Processed {} measurements into {} hourly records",
        df.height(),
        records.len()
    );
    Ok(HourlyDataset {
        time_column: classes.time,
        ghi_column: ghi_index.map(|i| classes.numeric[i].clone()),
        measurement_columns: classes.numeric,
        excluded_columns: classes.excluded,
        timeline_source: timeline.source,
        input_rows: df.height(),
        records,
    })
}

/// What the engine made of one input table.
#[derive(Debug, Clone)]
pub enum ProcessedTable {
    /// The input already had the hourly layout and is kept as is.
    Unchanged(DataFrame),
    Aggregated {
        frame: DataFrame,
        dataset: HourlyDataset,
    },
}

impl ProcessedTable {
    pub fn frame(&self) -> &DataFrame {
        match self {
            ProcessedTable::Unchanged(frame) => frame,
            ProcessedTable::Aggregated { frame, .. } => frame,
        }
    }

    pub fn into_frame(self) -> DataFrame {
        match self {
            ProcessedTable::Unchanged(frame) => frame,
            ProcessedTable::Aggregated { frame, .. } => frame,
        }
    }
}

/// Runs the engine over `table`. A table that already has the hourly layout
/// is passed through, so re-running on output is harmless.
pub fn process(
    table: DataFrame,
    options: &ProcessingOptions,
) -> Result<ProcessedTable, ProcessingError> {
    if is_already_processed(&table) {
        info!("Dataset appears to be already processed, keeping it as is");
        return Ok(ProcessedTable::Unchanged(table));
    }
    let dataset = aggregate_table(&table, options)?;
    Ok(ProcessedTable::Aggregated {
        frame: dataset.to_dataframe()?,
        dataset,
    })
}

/// Produces the export table for `table`.
pub fn process_table(
    table: &DataFrame,
    options: &ProcessingOptions,
) -> Result<DataFrame, ProcessingError> {
    Ok(process(table.clone(), options)?.into_frame())
}
