//! Open-Meteo weather client
//!
//! HTTP client for the Open-Meteo forecast endpoint. Both the forecast and
//! the history fetch use the same endpoint; history is expressed through
//! `past_days` with a zero-day forecast horizon.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::HourlyResponse;

/// Fixed daily aggregate requested alongside the hourly series
const DAILY_AGGREGATE: &str = "sunshine_duration";

/// Fixed timezone the series is requested in
const REQUEST_TIMEZONE: &str = "Europe/London";

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid coordinates provided
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Weather service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Open-Meteo API base URL (default: <https://api.open-meteo.com/v1>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Connection timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

const fn default_timeout() -> u64 {
    30
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Weather client trait for fetching hourly series
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Fetch an hourly forecast series for the requested variables
    async fn hourly_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        variables: &[&str],
        forecast_days: u8,
    ) -> Result<HourlyResponse, WeatherError>;

    /// Fetch an hourly history series covering the past `past_days` days
    async fn hourly_history(
        &self,
        latitude: f64,
        longitude: f64,
        variables: &[&str],
        past_days: u8,
    ) -> Result<HourlyResponse, WeatherError>;
}

/// Open-Meteo HTTP client implementation
#[derive(Debug)]
pub struct OpenMeteoClient {
    client: Client,
    config: WeatherConfig,
}

impl OpenMeteoClient {
    /// Create a new Open-Meteo client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, WeatherError> {
        Self::new(WeatherConfig::default())
    }

    /// Validate coordinates
    fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), WeatherError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherError::InvalidCoordinates);
        }
        Ok(())
    }

    /// Issue one forecast-endpoint request with the given window parameters
    async fn fetch_hourly(
        &self,
        latitude: f64,
        longitude: f64,
        variables: &[&str],
        forecast_days: u8,
        past_days: Option<u8>,
    ) -> Result<HourlyResponse, WeatherError> {
        Self::validate_coordinates(latitude, longitude)?;

        let url = format!("{}/forecast", self.config.base_url.trim_end_matches('/'));
        let mut query: Vec<(&str, String)> = vec![
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("hourly", variables.join(",")),
            ("daily", DAILY_AGGREGATE.to_string()),
            ("timezone", REQUEST_TIMEZONE.to_string()),
            ("timeformat", "unixtime".to_string()),
            ("forecast_days", forecast_days.to_string()),
        ];
        if let Some(days) = past_days {
            query.push(("past_days", days.to_string()));
        }

        debug!(url = %url, hourly = %variables.join(","), "Fetching hourly weather series");

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| WeatherError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(WeatherError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(WeatherError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(WeatherError::RequestFailed(format!("HTTP {status}")));
        }

        let body: HourlyResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))?;

        if body.hourly.interval == 0 {
            return Err(WeatherError::ParseError(
                "hourly interval must be positive".to_string(),
            ));
        }

        Ok(body)
    }
}

#[async_trait]
impl WeatherClient for OpenMeteoClient {
    #[instrument(skip(self, variables), fields(lat = %latitude, lon = %longitude, days = %forecast_days))]
    async fn hourly_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        variables: &[&str],
        forecast_days: u8,
    ) -> Result<HourlyResponse, WeatherError> {
        let days = forecast_days.clamp(1, 16);
        self.fetch_hourly(latitude, longitude, variables, days, None)
            .await
    }

    #[instrument(skip(self, variables), fields(lat = %latitude, lon = %longitude, days = %past_days))]
    async fn hourly_history(
        &self,
        latitude: f64,
        longitude: f64,
        variables: &[&str],
        past_days: u8,
    ) -> Result<HourlyResponse, WeatherError> {
        self.fetch_hourly(latitude, longitude, variables, 0, Some(past_days))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = WeatherConfig::default();
        assert_eq!(config.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_validate_coordinates_valid() {
        assert!(OpenMeteoClient::validate_coordinates(0.0, 0.0).is_ok());
        assert!(OpenMeteoClient::validate_coordinates(90.0, 180.0).is_ok());
        assert!(OpenMeteoClient::validate_coordinates(-90.0, -180.0).is_ok());
        assert!(OpenMeteoClient::validate_coordinates(53.35, -6.26).is_ok());
    }

    #[test]
    fn test_validate_coordinates_invalid() {
        assert!(OpenMeteoClient::validate_coordinates(91.0, 0.0).is_err());
        assert!(OpenMeteoClient::validate_coordinates(-91.0, 0.0).is_err());
        assert!(OpenMeteoClient::validate_coordinates(0.0, 181.0).is_err());
        assert!(OpenMeteoClient::validate_coordinates(0.0, -181.0).is_err());
    }

    #[test]
    fn test_client_creation() {
        assert!(OpenMeteoClient::with_defaults().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = WeatherConfig {
            base_url: "https://custom.api.com".to_string(),
            timeout_secs: 60,
        };

        let json = serde_json::to_string(&config).expect("should serialize");
        let deserialized: WeatherConfig = serde_json::from_str(&json).expect("should deserialize");

        assert_eq!(deserialized.base_url, "https://custom.api.com");
        assert_eq!(deserialized.timeout_secs, 60);
    }

    #[test]
    fn test_weather_error_display() {
        let err = WeatherError::InvalidCoordinates;
        assert!(err.to_string().contains("latitude"));
        assert!(err.to_string().contains("longitude"));

        let err = WeatherError::RateLimitExceeded;
        assert!(err.to_string().contains("Rate limit"));
    }
}
