//! Forecast analytics pipeline
//!
//! Fetches an hourly forecast for the requested variables and derives the
//! moderate-value crossing statistics and per-provider cost estimates.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain::analytics::{ModerateValues, ProviderRates, crossing_count, estimate_costs};
use domain::value_objects::{GeoLocation, HourlyVariable};
use domain::DomainError;
use tracing::{debug, instrument};

use crate::error::ApplicationError;
use crate::ports::WeatherDataPort;

/// Open-Meteo accepts forecast horizons of 1 to 16 days
const MAX_FORECAST_DAYS: u8 = 16;

/// A validated analytics request
#[derive(Debug, Clone)]
pub struct AnalyticsQuery {
    /// Location to forecast for
    pub location: GeoLocation,
    /// Requested hourly variables, in caller order
    pub variables: Vec<HourlyVariable>,
    /// Forecast horizon in days (1-16)
    pub forecast_days: u8,
}

/// Derived statistics for one requested variable
#[derive(Debug, Clone, PartialEq)]
pub struct VariableReport {
    /// The variable the statistics belong to
    pub variable: HourlyVariable,
    /// Raw hourly samples, unrounded, missing samples preserved
    pub values: Vec<Option<f64>>,
    /// The configured threshold, if any
    pub moderate_value: Option<f64>,
    /// Hours strictly below the threshold; absent without a threshold
    pub working_hours: Option<u32>,
    /// Estimated cost per provider; empty without a threshold
    pub cost_by_provider: BTreeMap<String, f64>,
}

/// The assembled analytics result
#[derive(Debug, Clone)]
pub struct AnalyticsReport {
    /// Shared hourly timestamps, shared by every variable
    pub sample_times: Vec<DateTime<Utc>>,
    /// Per-variable statistics, in request order
    pub variables: Vec<VariableReport>,
}

/// Service computing forecast analytics
pub struct AnalyticsService {
    weather: Arc<dyn WeatherDataPort>,
    moderate_values: ModerateValues,
    provider_rates: ProviderRates,
}

impl std::fmt::Debug for AnalyticsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyticsService")
            .field("weather", &"<WeatherDataPort>")
            .field("moderate_values", &self.moderate_values)
            .field("provider_rates", &self.provider_rates)
            .finish()
    }
}

impl AnalyticsService {
    /// Create the service over a weather port and the configured tables
    #[must_use]
    pub fn new(
        weather: Arc<dyn WeatherDataPort>,
        moderate_values: ModerateValues,
        provider_rates: ProviderRates,
    ) -> Self {
        Self {
            weather,
            moderate_values,
            provider_rates,
        }
    }

    /// Run the analytics pipeline for one request
    ///
    /// # Errors
    ///
    /// Fails with `MissingParameter` when no variables are requested, a
    /// validation error for an out-of-range horizon, and otherwise with
    /// whatever the weather port reports. No partial results are produced.
    #[instrument(
        skip(self, query),
        fields(
            lat = query.location.latitude(),
            lon = query.location.longitude(),
            days = query.forecast_days
        )
    )]
    pub async fn analyse(&self, query: AnalyticsQuery) -> Result<AnalyticsReport, ApplicationError> {
        if query.variables.is_empty() {
            return Err(ApplicationError::MissingParameter("hourly".to_string()));
        }
        if query.forecast_days == 0 || query.forecast_days > MAX_FORECAST_DAYS {
            return Err(DomainError::ValidationError(format!(
                "forecast_days must be between 1 and {MAX_FORECAST_DAYS}"
            ))
            .into());
        }

        let series = self
            .weather
            .fetch_forecast(query.location, &query.variables, query.forecast_days)
            .await?;

        let sample_times = series.sample_times();
        debug!(samples = sample_times.len(), "Computing variable statistics");

        let mut variables = Vec::with_capacity(query.variables.len());
        for variable in &query.variables {
            let values = series.values_for(*variable).ok_or_else(|| {
                ApplicationError::MalformedResponse(format!(
                    "hourly series is missing values for {variable}"
                ))
            })?;

            let moderate_value = self.moderate_values.threshold(*variable);
            let working_hours = moderate_value.map(|threshold| crossing_count(values, threshold));
            let cost_by_provider = working_hours
                .map(|hours| estimate_costs(hours, &self.provider_rates))
                .unwrap_or_default();

            variables.push(VariableReport {
                variable: *variable,
                values: values.to_vec(),
                moderate_value,
                working_hours,
                cost_by_provider,
            });
        }

        Ok(AnalyticsReport {
            sample_times,
            variables,
        })
    }
}
