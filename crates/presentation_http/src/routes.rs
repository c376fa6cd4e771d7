//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoint
        .route("/health", get(handlers::health::health_check))
        // Environmental analytics API
        .route(
            "/environmental_analytics/coordinates/",
            get(handlers::coordinates::lookup_coordinates),
        )
        .route(
            "/environmental_analytics/analytics/",
            post(handlers::analytics::run_analytics),
        )
        .route(
            "/environmental_analytics/eircode_weather/",
            get(handlers::archive::archive_eircode_weather),
        )
        // Attach state
        .with_state(state)
}
