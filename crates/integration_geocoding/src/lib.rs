//! Google Geocoding API integration
//!
//! Client for resolving postal codes to coordinates via the Google
//! Geocoding API (<https://developers.google.com/maps/documentation/geocoding>).
//! Requires an API key.

pub mod client;
mod models;

pub use client::{GeocodingClient, GeocodingConfig, GeocodingError, GoogleGeocodingClient};
pub use models::ResolvedLocation;
