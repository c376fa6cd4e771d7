//! Eircode coordinate lookup handler
//!
//! GET /environmental_analytics/coordinates/?eircode=<code>

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use domain::value_objects::Eircode;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for the coordinate lookup
#[derive(Debug, Deserialize)]
pub struct CoordinatesParams {
    /// The Eircode to resolve
    pub eircode: Option<String>,
}

/// Response body for a resolved Eircode
#[derive(Debug, Serialize, Deserialize)]
pub struct CoordinatesResponse {
    /// The resolved coordinates
    pub coordinates: Coordinates,
}

/// A latitude/longitude pair
#[derive(Debug, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

/// Resolve an Eircode to coordinates
#[instrument(skip(state, params))]
pub async fn lookup_coordinates(
    State(state): State<AppState>,
    Query(params): Query<CoordinatesParams>,
) -> Result<impl IntoResponse, ApiError> {
    let raw = params.eircode.unwrap_or_default();
    let eircode = Eircode::parse(&raw).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let location = state.geocoding.resolve_eircode(&eircode).await?;

    info!(%eircode, %location, "Resolved Eircode to coordinates");

    Ok((
        StatusCode::OK,
        Json(CoordinatesResponse {
            coordinates: Coordinates {
                latitude: location.latitude(),
                longitude: location.longitude(),
            },
        }),
    ))
}
