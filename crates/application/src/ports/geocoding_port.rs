//! Geocoding service port

use async_trait::async_trait;
use domain::value_objects::{Eircode, GeoLocation};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for resolving postal codes to coordinates
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Resolve an Eircode to geographic coordinates
    ///
    /// Implementations return `ApplicationError::NotFound` carrying the
    /// upstream status string verbatim when the service reports anything
    /// other than success, `ExternalService` on transport failures, and
    /// `MalformedResponse` when expected fields are missing.
    async fn resolve_eircode(&self, eircode: &Eircode) -> Result<GeoLocation, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn GeocodingPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn GeocodingPort>();
    }
}
