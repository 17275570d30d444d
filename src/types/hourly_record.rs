use crate::types::season::Season;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

pub const DATE_FORMAT: &str = "%-d-%b-%y";
pub const PERIOD_FORMAT: &str = "%H:%M:%S";

/// Features derived from the bucket's date and hour, plus the GHI lag.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct HourlyFeatures {
    pub day_of_year: u32,
    pub month_of_year: f64,
    pub hour_of_day: u32,
    pub solar_zenith_angle: f64,
    pub season: Season,
    pub ghi_lag: Option<f64>,
    pub daytime: bool,
}

/// One aggregated hour of station data.
#[derive(Debug, PartialEq, Clone)]
pub struct HourlyRecord {
    /// Top of the hour the bucket covers.
    pub start: NaiveDateTime,
    pub sample_count: u32,
    /// One entry per measurement column of the owning dataset, same order.
    /// `None` means the cell could not be aggregated.
    pub measurements: Vec<Option<f64>>,
    pub features: HourlyFeatures,
}

impl HourlyRecord {
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn end(&self) -> NaiveDateTime {
        self.start + Duration::hours(1)
    }

    pub fn start_period(&self) -> NaiveTime {
        self.start.time()
    }

    /// Clock time at the end of the hour; the last bucket of a day ends at 00:00.
    pub fn end_period(&self) -> NaiveTime {
        self.end().time()
    }

    /// `7-Mar-24` style date.
    pub fn date_label(&self) -> String {
        self.date().format(DATE_FORMAT).to_string()
    }

    pub fn start_period_label(&self) -> String {
        self.start_period().format(PERIOD_FORMAT).to_string()
    }

    pub fn end_period_label(&self) -> String {
        self.end_period().format(PERIOD_FORMAT).to_string()
    }
}
