//! Port definitions for the application layer

mod geocoding_port;
mod weather_port;
mod weather_record_store;

pub use geocoding_port::GeocodingPort;
pub use weather_port::{HourlySeries, WeatherDataPort};
pub use weather_record_store::WeatherRecordStore;

#[cfg(test)]
pub use geocoding_port::MockGeocodingPort;
#[cfg(test)]
pub use weather_port::MockWeatherDataPort;
#[cfg(test)]
pub use weather_record_store::MockWeatherRecordStore;
