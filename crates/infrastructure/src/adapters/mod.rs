//! Adapters binding the integration clients to the application ports

mod geocoding_adapter;
mod weather_adapter;

pub use geocoding_adapter::GeocodingAdapter;
pub use weather_adapter::WeatherDataAdapter;
