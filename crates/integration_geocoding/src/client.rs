//! Google Geocoding API client
//!
//! HTTP client for resolving free-text addresses (Eircodes here) to
//! coordinates. The request carries a fixed country restriction and the
//! API key; the upstream `status` field drives the error taxonomy.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{GeocodeResponse, ResolvedLocation};

/// Geocoding client errors
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Connection to the geocoding service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the geocoding service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse the response from the geocoding service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The service answered with a non-success status field
    #[error("Geocoding status {status}")]
    StatusNotOk {
        /// The verbatim upstream status (e.g. "ZERO_RESULTS")
        status: String,
    },

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Geocoding service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Geocoding API base URL (default: <https://maps.googleapis.com/maps/api/geocode>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key sent with every request
    pub api_key: String,

    /// Country bias region code (default: "ie")
    #[serde(default = "default_region")]
    pub region: String,

    /// Connection timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://maps.googleapis.com/maps/api/geocode".to_string()
}

fn default_region() -> String {
    "ie".to_string()
}

const fn default_timeout() -> u64 {
    30
}

impl GeocodingConfig {
    /// Create a configuration with defaults around the given API key
    #[must_use]
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            base_url: default_base_url(),
            api_key: api_key.into(),
            region: default_region(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Geocoding client trait for address resolution
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Resolve a free-text address to the first candidate's coordinates
    async fn geocode(&self, address: &str) -> Result<ResolvedLocation, GeocodingError>;
}

/// Google Geocoding API HTTP client implementation
#[derive(Debug)]
pub struct GoogleGeocodingClient {
    client: Client,
    config: GeocodingConfig,
}

impl GoogleGeocodingClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: GeocodingConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/json", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl GeocodingClient for GoogleGeocodingClient {
    #[instrument(skip(self), fields(address = %address))]
    async fn geocode(&self, address: &str) -> Result<ResolvedLocation, GeocodingError> {
        let url = self.endpoint();
        debug!(url = %url, region = %self.config.region, "Geocoding address");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("address", address),
                ("region", self.config.region.as_str()),
                ("key", self.config.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| GeocodingError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodingError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(GeocodingError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(GeocodingError::RequestFailed(format!("HTTP {status}")));
        }

        let body: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        if body.status != "OK" {
            debug!(status = %body.status, error_message = ?body.error_message, "Non-OK geocoding status");
            return Err(GeocodingError::StatusNotOk {
                status: body.status,
            });
        }

        let first = body.results.first().ok_or_else(|| {
            GeocodingError::ParseError("status OK but results list is empty".to_string())
        })?;

        Ok(ResolvedLocation {
            latitude: first.geometry.location.lat,
            longitude: first.geometry.location.lng,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = GeocodingConfig::with_api_key("test-key");
        assert_eq!(config.base_url, "https://maps.googleapis.com/maps/api/geocode");
        assert_eq!(config.region, "ie");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.api_key, "test-key");
    }

    #[test]
    fn test_endpoint_appends_json() {
        let client =
            GoogleGeocodingClient::new(GeocodingConfig::with_api_key("k")).expect("client");
        assert_eq!(
            client.endpoint(),
            "https://maps.googleapis.com/maps/api/geocode/json"
        );
    }

    #[test]
    fn test_endpoint_tolerates_trailing_slash() {
        let mut config = GeocodingConfig::with_api_key("k");
        config.base_url = "http://localhost:9999/".to_string();
        let client = GoogleGeocodingClient::new(config).expect("client");
        assert_eq!(client.endpoint(), "http://localhost:9999/json");
    }

    #[test]
    fn test_status_error_carries_upstream_status() {
        let err = GeocodingError::StatusNotOk {
            status: "ZERO_RESULTS".to_string(),
        };
        assert_eq!(err.to_string(), "Geocoding status ZERO_RESULTS");
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: GeocodingConfig =
            serde_json::from_str(r#"{"api_key": "secret"}"#).expect("deserialize");
        assert_eq!(config.region, "ie");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_client_creation() {
        assert!(GoogleGeocodingClient::new(GeocodingConfig::with_api_key("k")).is_ok());
    }
}
