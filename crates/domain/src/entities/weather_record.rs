//! Weather record entity
//!
//! One record per (Eircode, hourly timestamp), holding the six sensor
//! readings for that hour. Records are created by the history
//! fetch-and-persist operation and immutable afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analytics::round2;
use crate::value_objects::{Eircode, GeoLocation, HourlyVariable};

/// A persisted hourly weather observation for a postal code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    eircode: Eircode,
    location: GeoLocation,
    recorded_at: DateTime<Utc>,
    temperature_2m: Option<f64>,
    relative_humidity_2m: Option<f64>,
    dew_point_2m: Option<f64>,
    cloud_cover: Option<f64>,
    wind_direction_10m: Option<f64>,
    wind_gusts_10m: Option<f64>,
}

impl WeatherRecord {
    /// Create a record from raw sensor readings
    ///
    /// Sensor values are rounded to two decimal places; missing readings
    /// stay absent. `sensors` pairs each variable with its reading for this
    /// hour — variables not present in the slice stay absent too.
    #[must_use]
    pub fn new(
        eircode: Eircode,
        location: GeoLocation,
        recorded_at: DateTime<Utc>,
        sensors: &[(HourlyVariable, Option<f64>)],
    ) -> Self {
        let mut record = Self {
            eircode,
            location,
            recorded_at,
            temperature_2m: None,
            relative_humidity_2m: None,
            dew_point_2m: None,
            cloud_cover: None,
            wind_direction_10m: None,
            wind_gusts_10m: None,
        };
        for (variable, value) in sensors {
            *record.sensor_mut(*variable) = value.map(round2);
        }
        record
    }

    /// Restore a record from storage without re-rounding
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn restore(
        eircode: Eircode,
        location: GeoLocation,
        recorded_at: DateTime<Utc>,
        temperature_2m: Option<f64>,
        relative_humidity_2m: Option<f64>,
        dew_point_2m: Option<f64>,
        cloud_cover: Option<f64>,
        wind_direction_10m: Option<f64>,
        wind_gusts_10m: Option<f64>,
    ) -> Self {
        Self {
            eircode,
            location,
            recorded_at,
            temperature_2m,
            relative_humidity_2m,
            dew_point_2m,
            cloud_cover,
            wind_direction_10m,
            wind_gusts_10m,
        }
    }

    /// The postal code this record belongs to
    #[must_use]
    pub const fn eircode(&self) -> &Eircode {
        &self.eircode
    }

    /// The resolved coordinates of the postal code
    #[must_use]
    pub const fn location(&self) -> GeoLocation {
        self.location
    }

    /// The hourly sample time
    #[must_use]
    pub const fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    /// The reading for one sensor variable
    #[must_use]
    pub const fn sensor(&self, variable: HourlyVariable) -> Option<f64> {
        match variable {
            HourlyVariable::Temperature2m => self.temperature_2m,
            HourlyVariable::RelativeHumidity2m => self.relative_humidity_2m,
            HourlyVariable::DewPoint2m => self.dew_point_2m,
            HourlyVariable::CloudCover => self.cloud_cover,
            HourlyVariable::WindDirection10m => self.wind_direction_10m,
            HourlyVariable::WindGusts10m => self.wind_gusts_10m,
        }
    }

    fn sensor_mut(&mut self, variable: HourlyVariable) -> &mut Option<f64> {
        match variable {
            HourlyVariable::Temperature2m => &mut self.temperature_2m,
            HourlyVariable::RelativeHumidity2m => &mut self.relative_humidity_2m,
            HourlyVariable::DewPoint2m => &mut self.dew_point_2m,
            HourlyVariable::CloudCover => &mut self.cloud_cover,
            HourlyVariable::WindDirection10m => &mut self.wind_direction_10m,
            HourlyVariable::WindGusts10m => &mut self.wind_gusts_10m,
        }
    }
}
