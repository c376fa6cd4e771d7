//! Application configuration
//!
//! Split into focused sub-modules by domain:
//! - `server`: HTTP server settings
//! - `database`: SQLite database settings
//! - `integrations`: Geocoding and weather client settings
//! - `analytics`: Moderate-value and provider-rate tables

mod analytics;
mod database;
mod integrations;
mod server;

use serde::{Deserialize, Serialize};

pub use analytics::AnalyticsConfig;
pub use database::DatabaseConfig;
pub use integrations::{GeocodingAppConfig, WeatherAppConfig};
pub use server::ServerConfig;

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Geocoding client configuration
    #[serde(default)]
    pub geocoding: GeocodingAppConfig,

    /// Weather client configuration
    #[serde(default)]
    pub weather: WeatherAppConfig,

    /// Analytics tables (moderate values, provider rates)
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    ///
    /// Reads `config.toml` when present, then applies `EIRMET_`-prefixed
    /// environment variable overrides (e.g. `EIRMET_SERVER_PORT`).
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("EIRMET")
                    .separator("_")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
