//! Per-hour feature derivation.

use crate::calendar::{day_of_year, hour_of_day, is_daytime, month_of_year};
use crate::hourly::bucketing::HourBucket;
use crate::solar::solar_zenith_angle;
use crate::types::hourly_record::{HourlyFeatures, HourlyRecord};
use crate::types::season::Season;
use crate::types::site_location::SiteLocation;
use chrono::{Duration, NaiveDateTime};

/// Features for the hour starting at `start`. Calendar features use the date
/// the hour starts on; the hour of day uses its end, so the 23:00 bucket is
/// hour 24 of that same date.
pub fn derive_features(
    location: &SiteLocation,
    start: NaiveDateTime,
    ghi_lag: Option<f64>,
) -> HourlyFeatures {
    let date = start.date();
    let day = day_of_year(date);
    let month = month_of_year(date);
    let hour = hour_of_day((start + Duration::hours(1)).time());
    HourlyFeatures {
        day_of_year: day,
        month_of_year: month,
        hour_of_day: hour,
        solar_zenith_angle: solar_zenith_angle(location, day, hour as f64),
        season: Season::from_month_of_year(month),
        ghi_lag,
        daytime: is_daytime(hour),
    }
}

/// Turns reduced buckets into records. The GHI lag is the previous emitted
/// record's GHI value (a plain row shift), `None` for the first record and
/// whenever there is no GHI column.
pub fn build_records(
    location: &SiteLocation,
    buckets: Vec<HourBucket>,
    ghi_index: Option<usize>,
) -> Vec<HourlyRecord> {
    let mut previous_ghi = None;
    buckets
        .into_iter()
        .map(|bucket| {
            let ghi_lag = previous_ghi;
            previous_ghi = ghi_index.and_then(|i| bucket.values.get(i).copied().flatten());
            HourlyRecord {
                start: bucket.start,
                sample_count: bucket.sample_count,
                features: derive_features(location, bucket.start, ghi_lag),
                measurements: bucket.values,
            }
        })
        .collect()
}
