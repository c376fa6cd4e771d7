//! Integration configurations: geocoding and weather clients.

use application::ApplicationError;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::retry::RetryConfig;

/// Environment variable holding the geocoding API key
pub const GEOCODING_API_KEY_ENV: &str = "EIRMET_GEOCODING_API_KEY";

// ==============================
// Geocoding Configuration
// ==============================

/// Geocoding service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingAppConfig {
    /// Geocoding API base URL
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,

    /// API key (sensitive - uses `SecretString`); falls back to the
    /// `EIRMET_GEOCODING_API_KEY` environment variable when unset
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Country bias region code
    #[serde(default = "default_region")]
    pub region: String,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_geocoding_base_url() -> String {
    "https://maps.googleapis.com/maps/api/geocode".to_string()
}

fn default_region() -> String {
    "ie".to_string()
}

const fn default_timeout() -> u64 {
    30
}

impl Default for GeocodingAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            api_key: None,
            region: default_region(),
            timeout_secs: default_timeout(),
        }
    }
}

impl GeocodingAppConfig {
    /// Convert to the `integration_geocoding` client configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no API key is set in the config
    /// file or the process environment.
    pub fn to_client_config(
        &self,
    ) -> Result<integration_geocoding::GeocodingConfig, ApplicationError> {
        let api_key = self
            .api_key
            .as_ref()
            .map(|key| key.expose_secret().to_string())
            .or_else(|| std::env::var(GEOCODING_API_KEY_ENV).ok())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                ApplicationError::Configuration(format!(
                    "geocoding API key is not set (config geocoding.api_key or {GEOCODING_API_KEY_ENV})"
                ))
            })?;

        Ok(integration_geocoding::GeocodingConfig {
            base_url: self.base_url.clone(),
            api_key,
            region: self.region.clone(),
            timeout_secs: self.timeout_secs,
        })
    }
}

// ==============================
// Weather Configuration
// ==============================

/// Weather service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherAppConfig {
    /// Open-Meteo API base URL
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Response cache TTL in seconds (default: one hour)
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Retry policy for outbound weather calls
    #[serde(default)]
    pub retry: RetryConfig,
}

fn default_weather_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

const fn default_cache_ttl_secs() -> u64 {
    3600
}

impl Default for WeatherAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            timeout_secs: default_timeout(),
            cache_ttl_secs: default_cache_ttl_secs(),
            retry: RetryConfig::default(),
        }
    }
}

impl WeatherAppConfig {
    /// Convert to the `integration_weather` client configuration
    #[must_use]
    pub fn to_client_config(&self) -> integration_weather::WeatherConfig {
        integration_weather::WeatherConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}
