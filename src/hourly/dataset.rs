use crate::hourly::columns::*;
use crate::hourly::timestamps::TimelineSource;
use crate::output::ordering::order_columns;
use crate::types::hourly_record::HourlyRecord;
use crate::utils::column_names;
use polars::prelude::*;

/// The engine's result: hourly records plus what it learned about the input.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyDataset {
    pub time_column: String,
    /// Names of the aggregated columns, matching each record's `measurements`.
    pub measurement_columns: Vec<String>,
    pub excluded_columns: Vec<String>,
    /// Aggregated column the GHI lag was taken from, if any.
    pub ghi_column: Option<String>,
    pub timeline_source: TimelineSource,
    pub input_rows: usize,
    pub records: Vec<HourlyRecord>,
}

impl HourlyDataset {
    pub fn measurement(&self, record: usize, column: &str) -> Option<f64> {
        let idx = self.measurement_columns.iter().position(|c| c == column)?;
        self.records.get(record)?.measurements.get(idx).copied().flatten()
    }

    /// Output table with period columns, measurements and derived features,
    /// ordered for export.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let records = &self.records;
        let mut columns: Vec<Column> = Vec::with_capacity(self.measurement_columns.len() + 10);

        let text = |name: &str, f: fn(&HourlyRecord) -> String| -> Column {
            let values: Vec<String> = records.iter().map(f).collect();
            Series::new(name.into(), values).into_column()
        };
        columns.push(text(COL_DATE, HourlyRecord::date_label));
        columns.push(text(COL_START_PERIOD, HourlyRecord::start_period_label));
        columns.push(text(COL_END_PERIOD, HourlyRecord::end_period_label));

        for (idx, name) in self.measurement_columns.iter().enumerate() {
            let values: Vec<Option<f64>> = records
                .iter()
                .map(|r| r.measurements.get(idx).copied().flatten())
                .collect();
            columns.push(Series::new(name.as_str().into(), values).into_column());
        }

        let day: Vec<u32> = records.iter().map(|r| r.features.day_of_year).collect();
        let month: Vec<f64> = records.iter().map(|r| r.features.month_of_year).collect();
        let hour: Vec<u32> = records.iter().map(|r| r.features.hour_of_day).collect();
        let zenith: Vec<f64> = records
            .iter()
            .map(|r| r.features.solar_zenith_angle)
            .collect();
        let season: Vec<u32> = records.iter().map(|r| r.features.season.code()).collect();
        let daytime: Vec<u32> = records.iter().map(|r| r.features.daytime as u32).collect();
        columns.push(Series::new(COL_DAY_OF_YEAR.into(), day).into_column());
        columns.push(Series::new(COL_MONTH_OF_YEAR.into(), month).into_column());
        columns.push(Series::new(COL_HOUR_OF_DAY.into(), hour).into_column());
        columns.push(Series::new(COL_SOLAR_ZENITH.into(), zenith).into_column());
        columns.push(Series::new(COL_SEASON.into(), season).into_column());
        if self.ghi_column.is_some() {
            let lag: Vec<Option<f64>> = records.iter().map(|r| r.features.ghi_lag).collect();
            columns.push(Series::new(COL_GHI_LAG.into(), lag).into_column());
        }
        columns.push(Series::new(COL_DAYTIME.into(), daytime).into_column());

        let df = DataFrame::new(columns)?;
        df.select(order_columns(&column_names(&df)))
    }
}
