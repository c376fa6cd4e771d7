//! Hourly weather variable value object

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// One of the six hourly sensor series this system works with
///
/// The serialized names are the Open-Meteo hourly variable names, which are
/// also the wire names in requests, responses, and database columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HourlyVariable {
    /// Air temperature at 2 m, degrees Celsius
    #[serde(rename = "temperature_2m")]
    Temperature2m,
    /// Relative humidity at 2 m, percent
    #[serde(rename = "relative_humidity_2m")]
    RelativeHumidity2m,
    /// Dew point at 2 m, degrees Celsius
    #[serde(rename = "dew_point_2m")]
    DewPoint2m,
    /// Total cloud cover, percent
    #[serde(rename = "cloud_cover")]
    CloudCover,
    /// Wind direction at 10 m, degrees
    #[serde(rename = "wind_direction_10m")]
    WindDirection10m,
    /// Wind gust speed at 10 m, km/h
    #[serde(rename = "wind_gusts_10m")]
    WindGusts10m,
}

impl HourlyVariable {
    /// All six known variables, in the order the history fetch requests them
    pub const ALL: [Self; 6] = [
        Self::Temperature2m,
        Self::RelativeHumidity2m,
        Self::DewPoint2m,
        Self::CloudCover,
        Self::WindDirection10m,
        Self::WindGusts10m,
    ];

    /// The Open-Meteo wire name of this variable
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Temperature2m => "temperature_2m",
            Self::RelativeHumidity2m => "relative_humidity_2m",
            Self::DewPoint2m => "dew_point_2m",
            Self::CloudCover => "cloud_cover",
            Self::WindDirection10m => "wind_direction_10m",
            Self::WindGusts10m => "wind_gusts_10m",
        }
    }

    /// The accepted range for a moderate-value override of this variable
    #[must_use]
    pub const fn override_range(&self) -> (f64, f64) {
        match self {
            Self::Temperature2m => (0.0, 40.0),
            Self::RelativeHumidity2m => (45.0, 100.0),
            Self::DewPoint2m => (4.0, 10.0),
            Self::CloudCover => (0.0, 100.0),
            Self::WindDirection10m => (0.0, 360.0),
            Self::WindGusts10m => (0.0, 100.0),
        }
    }
}

impl FromStr for HourlyVariable {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "temperature_2m" => Ok(Self::Temperature2m),
            "relative_humidity_2m" => Ok(Self::RelativeHumidity2m),
            "dew_point_2m" => Ok(Self::DewPoint2m),
            "cloud_cover" => Ok(Self::CloudCover),
            "wind_direction_10m" => Ok(Self::WindDirection10m),
            "wind_gusts_10m" => Ok(Self::WindGusts10m),
            other => Err(DomainError::UnknownVariable(other.to_string())),
        }
    }
}

impl fmt::Display for HourlyVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
