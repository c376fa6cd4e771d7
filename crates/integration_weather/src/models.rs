//! Open-Meteo response models
//!
//! The hourly block carries the time-series envelope the API reports:
//! series start, series end (exclusive), and sampling interval, all in
//! unix seconds, plus one sample array per requested variable. The
//! variable arrays are captured through a flattened map so any subset of
//! the hourly variables deserializes with the same model.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Top-level hourly weather response
#[derive(Debug, Clone, Deserialize)]
pub struct HourlyResponse {
    /// Latitude of the model grid cell
    pub latitude: f64,
    /// Longitude of the model grid cell
    pub longitude: f64,
    /// Offset of the requested timezone from UTC, seconds
    #[serde(default)]
    pub utc_offset_seconds: i32,
    /// Resolved timezone name
    #[serde(default)]
    pub timezone: Option<String>,
    /// The hourly series block
    pub hourly: HourlyBlock,
}

/// Hourly time-series envelope
#[derive(Debug, Clone, Deserialize)]
pub struct HourlyBlock {
    /// First sample time, unix seconds UTC (inclusive)
    pub time: i64,
    /// End of the sampled window, unix seconds UTC (exclusive)
    pub time_end: i64,
    /// Sampling interval in seconds
    pub interval: u32,
    /// Sample arrays keyed by hourly variable name
    #[serde(flatten)]
    pub series: BTreeMap<String, Vec<Option<f64>>>,
}
