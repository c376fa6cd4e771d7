//! Geocoding adapter - implements `GeocodingPort` using `integration_geocoding`
//!
//! Non-OK upstream statuses are passed through verbatim as the not-found
//! condition so the handler can surface them unchanged.

use application::error::ApplicationError;
use application::ports::GeocodingPort;
use async_trait::async_trait;
use domain::value_objects::{Eircode, GeoLocation};
use integration_geocoding::{
    GeocodingClient, GeocodingConfig, GeocodingError, GoogleGeocodingClient,
};
use tracing::{debug, instrument};

/// Adapter for postal code resolution via the Google Geocoding API
pub struct GeocodingAdapter {
    client: GoogleGeocodingClient,
}

impl std::fmt::Debug for GeocodingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingAdapter")
            .field("client", &"GoogleGeocodingClient")
            .finish()
    }
}

impl GeocodingAdapter {
    /// Create an adapter from a client configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: GeocodingConfig) -> Result<Self, ApplicationError> {
        let client = GoogleGeocodingClient::new(config)
            .map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self { client })
    }

    /// Map integration geocoding errors to application errors
    fn map_error(err: GeocodingError) -> ApplicationError {
        match err {
            GeocodingError::StatusNotOk { status } => ApplicationError::NotFound(status),
            GeocodingError::ParseError(e) => ApplicationError::MalformedResponse(e),
            GeocodingError::ConnectionFailed(e)
            | GeocodingError::RequestFailed(e)
            | GeocodingError::ServiceUnavailable(e) => ApplicationError::ExternalService(e),
            GeocodingError::RateLimitExceeded => {
                ApplicationError::ExternalService("rate limit exceeded".to_string())
            },
        }
    }
}

#[async_trait]
impl GeocodingPort for GeocodingAdapter {
    #[instrument(skip(self), fields(eircode = %eircode))]
    async fn resolve_eircode(&self, eircode: &Eircode) -> Result<GeoLocation, ApplicationError> {
        let resolved = self
            .client
            .geocode(eircode.as_str())
            .await
            .map_err(Self::map_error)?;

        let location = GeoLocation::new(resolved.latitude, resolved.longitude).map_err(|_| {
            ApplicationError::MalformedResponse(format!(
                "geocoding returned out-of-range coordinates {}, {}",
                resolved.latitude, resolved.longitude
            ))
        })?;

        debug!(%location, "Resolved postal code");
        Ok(location)
    }
}
