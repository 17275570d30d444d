//! The fixed observer location used for solar geometry.

use crate::loading::error::LoadError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Latitude, longitude (degrees) and elevation (meters) of the station site.
///
/// The site is a property of the deployment, not of the data: it is never
/// inferred from the input file. Pass it explicitly into
/// [`crate::solar::solar_zenith_angle`] or via [`crate::ProcessingOptions`].
///
/// # Examples
///
/// ```
/// use station_hourly::SiteLocation;
///
/// let davao = SiteLocation::new(7.0707, 125.6113, 7.0);
/// assert_eq!(davao.latitude, 7.0707);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiteLocation {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub elevation_m: f64,
}

impl SiteLocation {
    pub fn new(latitude: f64, longitude: f64, elevation_m: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation_m,
        }
    }

    /// Reads a site from a JSON file such as
    /// `{"latitude": 7.0707, "longitude": 125.6113, "elevation_m": 7}`.
    pub fn from_json_file(path: &Path) -> Result<Self, LoadError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| LoadError::SiteConfigRead(path.to_path_buf(), e))?;
        serde_json::from_str(&raw).map_err(|e| LoadError::SiteConfig(path.to_path_buf(), e))
    }
}
