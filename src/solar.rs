//! Solar geometry for a fixed observer site.
//!
//! All trigonometry runs in radians; inputs and outputs are degrees.

use crate::types::site_location::SiteLocation;

/// Solar declination in radians for a day of the year (1-366), using
/// Cooper's approximation `23.45° · sin(360/365 · (n + 284))`.
pub fn declination(day_of_year: u32) -> f64 {
    let angle = (360.0 / 365.0 * (day_of_year as f64 + 284.0)).to_radians();
    (23.45 * angle.sin()).to_radians()
}

/// Hour angle in radians. `hour_of_day` uses the 1-24 convention, so 24 is
/// the midnight that closes the day.
pub fn hour_angle(hour_of_day: f64) -> f64 {
    (15.0 * (hour_of_day - 12.0)).to_radians()
}

/// Solar zenith angle in degrees, always within `[0, 180]`.
///
/// # Examples
///
/// ```
/// use station_hourly::{solar, SiteLocation};
///
/// let site = SiteLocation::new(7.0707, 125.6113, 7.0);
/// let noon = solar::solar_zenith_angle(&site, 80, 12.0);
/// assert!(noon < 10.0);
/// ```
pub fn solar_zenith_angle(location: &SiteLocation, day_of_year: u32, hour_of_day: f64) -> f64 {
    let decl = declination(day_of_year);
    let lat = location.latitude.to_radians();
    let sin_elevation =
        lat.sin() * decl.sin() + lat.cos() * decl.cos() * hour_angle(hour_of_day).cos();
    // Rounding can push the argument a hair past ±1.
    let elevation = sin_elevation.clamp(-1.0, 1.0).asin();
    (std::f64::consts::FRAC_PI_2 - elevation).to_degrees()
}
