//! Infrastructure layer - Adapters for external systems
//!
//! Implements the ports defined in the application layer: the geocoding
//! and weather adapters, SQLite persistence, configuration loading, and
//! the retry policy for outbound calls.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod retry;

pub use adapters::{GeocodingAdapter, WeatherDataAdapter};
pub use config::{
    AnalyticsConfig, AppConfig, DatabaseConfig, GeocodingAppConfig, ServerConfig,
    WeatherAppConfig,
};
pub use persistence::{ConnectionPool, DatabaseError, SqliteWeatherRecordStore, create_pool};
pub use retry::{RetryConfig, RetryResult, Retryable, with_retry};
