//! Forecast analytics handler
//!
//! POST /environmental_analytics/analytics/
//!
//! Every failure on this endpoint, from missing parameters to upstream
//! errors, collapses to a 404 with a descriptive message; no partial
//! results are returned.

use std::collections::BTreeMap;

use application::{AnalyticsQuery, AnalyticsReport, ApplicationError};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use domain::value_objects::{GeoLocation, HourlyVariable};
use domain::DomainError;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for the analytics endpoint
///
/// All four fields are required; they are modelled as optional so that a
/// missing field becomes a handled 404 instead of a deserialization
/// rejection.
#[derive(Debug, Deserialize)]
pub struct AnalyticsRequest {
    /// Latitude in degrees
    pub latitude: Option<f64>,
    /// Longitude in degrees
    pub longitude: Option<f64>,
    /// Requested hourly variable names
    pub hourly: Option<Vec<String>>,
    /// Forecast horizon in days (1-16)
    pub forecast_days: Option<u8>,
}

/// Response body for the analytics endpoint
#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    /// The analytics payload
    pub data: AnalyticsData,
}

/// The analytics payload
#[derive(Debug, Serialize)]
pub struct AnalyticsData {
    /// Shared hourly timestamps, ISO-8601 UTC
    pub date: Vec<String>,
    /// Per-variable statistics, keyed by variable name
    pub variables: BTreeMap<String, VariableData>,
}

/// Statistics for one requested variable
#[derive(Debug, Serialize)]
pub struct VariableData {
    /// Raw hourly samples, unrounded
    pub values: Vec<Option<f64>>,
    /// The configured threshold, or null
    pub moderate_value: Option<f64>,
    /// Hours strictly below the threshold, or null
    pub working_hours: Option<u32>,
    /// Estimated cost per electricity provider
    pub electricity_total_rate_per_brand: BTreeMap<String, f64>,
}

impl AnalyticsResponse {
    fn from_report(report: AnalyticsReport) -> Self {
        let date = report
            .sample_times
            .iter()
            .map(chrono::DateTime::to_rfc3339)
            .collect();

        let variables = report
            .variables
            .into_iter()
            .map(|v| {
                (
                    v.variable.as_str().to_string(),
                    VariableData {
                        values: v.values,
                        moderate_value: v.moderate_value,
                        working_hours: v.working_hours,
                        electricity_total_rate_per_brand: v.cost_by_provider,
                    },
                )
            })
            .collect();

        Self {
            data: AnalyticsData { date, variables },
        }
    }
}

/// Compute forecast analytics for a location
#[instrument(skip(state, request))]
pub async fn run_analytics(
    State(state): State<AppState>,
    Json(request): Json<AnalyticsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let query = build_query(request).map_err(analytics_failure)?;

    let report = state
        .analytics
        .analyse(query)
        .await
        .map_err(analytics_failure)?;

    info!(
        samples = report.sample_times.len(),
        variables = report.variables.len(),
        "Computed forecast analytics"
    );

    Ok((StatusCode::OK, Json(AnalyticsResponse::from_report(report))))
}

/// Validate presence of the four required inputs and build the query
fn build_query(request: AnalyticsRequest) -> Result<AnalyticsQuery, ApplicationError> {
    let latitude = request
        .latitude
        .ok_or_else(|| ApplicationError::MissingParameter("latitude".to_string()))?;
    let longitude = request
        .longitude
        .ok_or_else(|| ApplicationError::MissingParameter("longitude".to_string()))?;
    let hourly = request
        .hourly
        .ok_or_else(|| ApplicationError::MissingParameter("hourly".to_string()))?;
    let forecast_days = request
        .forecast_days
        .ok_or_else(|| ApplicationError::MissingParameter("forecast_days".to_string()))?;

    let location = GeoLocation::new(latitude, longitude)
        .map_err(|e| DomainError::ValidationError(e.to_string()))?;

    let variables = hourly
        .iter()
        .map(|name| name.parse::<HourlyVariable>())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AnalyticsQuery {
        location,
        variables,
        forecast_days,
    })
}

/// Collapse any failure on this endpoint to a 404 condition
fn analytics_failure(err: ApplicationError) -> ApiError {
    warn!(error = %err, "Analytics request failed");
    ApiError::NotFound(err.to_string())
}
