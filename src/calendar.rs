//! Calendar features derived from a bucket's date and end time.

use crate::types::season::Season;
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

/// Day of the year, 1-366.
pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal()
}

/// Month plus a coarse quarter fraction: days 1-7 add `.00`, 8-14 `.25`,
/// 15-21 `.50` and everything later `.75`, whatever the month's length.
pub fn month_of_year(date: NaiveDate) -> f64 {
    let quarter = match date.day() {
        1..=7 => 0.0,
        8..=14 => 0.25,
        15..=21 => 0.5,
        _ => 0.75,
    };
    date.month() as f64 + quarter
}

pub fn season(date: NaiveDate) -> Season {
    Season::from_month(date.month())
}

/// Hour of day taken from a bucket's end time, in 1-24: the bucket ending at
/// midnight is hour 24 of the day it started in, never hour 0.
pub fn hour_of_day(end_period: NaiveTime) -> u32 {
    match end_period.hour() {
        0 => 24,
        hour => hour,
    }
}

/// Daytime when the hour of day lies within `[6, 18]`.
pub fn is_daytime(hour_of_day: u32) -> bool {
    (6..=18).contains(&hour_of_day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_of_year_breakpoints() {
        assert_eq!(month_of_year(date(2024, 1, 7)), 1.00);
        assert_eq!(month_of_year(date(2024, 1, 8)), 1.25);
        assert_eq!(month_of_year(date(2024, 1, 14)), 1.25);
        assert_eq!(month_of_year(date(2024, 1, 15)), 1.50);
        assert_eq!(month_of_year(date(2024, 1, 21)), 1.50);
        assert_eq!(month_of_year(date(2024, 1, 22)), 1.75);
        assert_eq!(month_of_year(date(2024, 1, 31)), 1.75);
        assert_eq!(month_of_year(date(2024, 2, 1)), 2.00);
        assert_eq!(month_of_year(date(2024, 2, 29)), 2.75);
    }

    #[test]
    fn test_month_of_year_monotonic_within_month() {
        let mut day = date(2023, 1, 1);
        let mut previous = month_of_year(day);
        while day < date(2024, 1, 1) {
            let next = day.succ_opt().unwrap();
            let value = month_of_year(next);
            if next.month() == day.month() {
                assert!(value >= previous, "{next} went backwards");
            } else {
                assert_eq!(value, next.month() as f64, "{next} did not reset");
            }
            previous = value;
            day = next;
        }
    }

    #[test]
    fn test_day_of_year() {
        assert_eq!(day_of_year(date(2024, 1, 1)), 1);
        assert_eq!(day_of_year(date(2024, 3, 7)), 67);
        assert_eq!(day_of_year(date(2024, 12, 31)), 366);
        assert_eq!(day_of_year(date(2023, 12, 31)), 365);
    }

    #[test]
    fn test_hour_of_day_midnight_is_24() {
        assert_eq!(hour_of_day(NaiveTime::from_hms_opt(0, 0, 0).unwrap()), 24);
        assert_eq!(hour_of_day(NaiveTime::from_hms_opt(1, 0, 0).unwrap()), 1);
        assert_eq!(hour_of_day(NaiveTime::from_hms_opt(23, 0, 0).unwrap()), 23);
    }

    #[test]
    fn test_daytime_bounds() {
        assert!(!is_daytime(5));
        assert!(is_daytime(6));
        assert!(is_daytime(18));
        assert!(!is_daytime(19));
        assert!(!is_daytime(24));
    }

    #[test]
    fn test_season_from_date() {
        assert_eq!(season(date(2024, 12, 25)), Season::CoolDry);
        assert_eq!(season(date(2024, 4, 1)), Season::HotDry);
        assert_eq!(season(date(2024, 9, 1)), Season::Rainy);
    }
}
