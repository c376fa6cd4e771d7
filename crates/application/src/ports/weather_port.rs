//! Weather data port
//!
//! Defines the interface for retrieving hourly weather series and the
//! series type shared by the analytics and archive pipelines.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use domain::value_objects::{GeoLocation, HourlyVariable};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// An hourly time series for one location
///
/// The upstream service reports the sampling grid as a start time, an end
/// time, and an interval; the concrete timestamps are reconstructed from
/// those three values as a half-open range (end excluded).
#[derive(Debug, Clone, PartialEq)]
pub struct HourlySeries {
    /// First sample time (inclusive)
    pub start: DateTime<Utc>,
    /// End of the sampled window (exclusive)
    pub end: DateTime<Utc>,
    /// Sampling interval in seconds
    pub interval_seconds: u32,
    /// Per-variable sample arrays, in the order they were requested
    pub series: Vec<(HourlyVariable, Vec<Option<f64>>)>,
}

impl HourlySeries {
    /// Reconstruct the sample timestamps for this series
    ///
    /// Steps from `start` to `end` in `interval_seconds` increments, end
    /// excluded. A zero or negative window yields an empty sequence.
    #[must_use]
    pub fn sample_times(&self) -> Vec<DateTime<Utc>> {
        if self.interval_seconds == 0 {
            return Vec::new();
        }
        let step = Duration::seconds(i64::from(self.interval_seconds));
        let mut times = Vec::new();
        let mut current = self.start;
        while current < self.end {
            times.push(current);
            current += step;
        }
        times
    }

    /// The sample values for one variable, if present
    #[must_use]
    pub fn values_for(&self, variable: HourlyVariable) -> Option<&[Option<f64>]> {
        self.series
            .iter()
            .find(|(v, _)| *v == variable)
            .map(|(_, values)| values.as_slice())
    }
}

/// Port for hourly weather data retrieval
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherDataPort: Send + Sync {
    /// Fetch an hourly forecast series for the requested variables
    async fn fetch_forecast(
        &self,
        location: GeoLocation,
        variables: &[HourlyVariable],
        forecast_days: u8,
    ) -> Result<HourlySeries, ApplicationError>;

    /// Fetch an hourly history series covering the past `past_days` days
    async fn fetch_history(
        &self,
        location: GeoLocation,
        variables: &[HourlyVariable],
        past_days: u8,
    ) -> Result<HourlySeries, ApplicationError>;
}
