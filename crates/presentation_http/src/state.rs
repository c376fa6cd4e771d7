//! Application state shared across handlers

use std::sync::Arc;

use application::{AnalyticsService, WeatherArchiveService, ports::GeocodingPort};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Geocoding port for Eircode resolution
    pub geocoding: Arc<dyn GeocodingPort>,
    /// Forecast analytics service
    pub analytics: Arc<AnalyticsService>,
    /// Weather history archive service
    pub archive: Arc<WeatherArchiveService>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("geocoding", &"<GeocodingPort>")
            .field("analytics", &"<AnalyticsService>")
            .field("archive", &"<WeatherArchiveService>")
            .finish()
    }
}
