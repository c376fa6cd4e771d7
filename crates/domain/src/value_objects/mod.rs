//! Value objects for the EirMet domain

mod eircode;
mod geo_location;
mod hourly_variable;

pub use eircode::Eircode;
pub use geo_location::{GeoLocation, InvalidCoordinates};
pub use hourly_variable::HourlyVariable;
