//! History fetch-and-persist pipeline
//!
//! Resolves an Eircode to coordinates, fetches the fixed six hourly
//! variables over the 30-day lookback window, and persists one weather
//! record per hourly timestamp in a single batch.

use std::sync::Arc;

use domain::entities::WeatherRecord;
use domain::value_objects::{Eircode, GeoLocation, HourlyVariable};
use tracing::{debug, info, instrument};

use crate::error::ApplicationError;
use crate::ports::{GeocodingPort, WeatherDataPort, WeatherRecordStore};

/// Fixed lookback window for the history fetch, in days
pub const HISTORY_LOOKBACK_DAYS: u8 = 30;

/// Result of a completed archive run
#[derive(Debug, Clone)]
pub struct ArchiveOutcome {
    /// The postal code the run was for
    pub eircode: Eircode,
    /// The resolved coordinates
    pub location: GeoLocation,
    /// Number of records written
    pub records_written: usize,
}

/// Service persisting 30 days of hourly history for a postal code
pub struct WeatherArchiveService {
    geocoding: Arc<dyn GeocodingPort>,
    weather: Arc<dyn WeatherDataPort>,
    store: Arc<dyn WeatherRecordStore>,
}

impl std::fmt::Debug for WeatherArchiveService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherArchiveService")
            .field("geocoding", &"<GeocodingPort>")
            .field("weather", &"<WeatherDataPort>")
            .field("store", &"<WeatherRecordStore>")
            .finish()
    }
}

impl WeatherArchiveService {
    /// Create the service over its three ports
    #[must_use]
    pub fn new(
        geocoding: Arc<dyn GeocodingPort>,
        weather: Arc<dyn WeatherDataPort>,
        store: Arc<dyn WeatherRecordStore>,
    ) -> Self {
        Self {
            geocoding,
            weather,
            store,
        }
    }

    /// Fetch and persist the lookback window for one Eircode
    ///
    /// Any geocoding, fetch, or storage failure aborts the whole run; the
    /// batch write is atomic, so a failed run leaves no partial records.
    #[instrument(skip(self), fields(eircode = %eircode))]
    pub async fn archive_for_eircode(
        &self,
        eircode: &Eircode,
    ) -> Result<ArchiveOutcome, ApplicationError> {
        let location = self.geocoding.resolve_eircode(eircode).await?;
        debug!(%location, "Resolved Eircode");

        let series = self
            .weather
            .fetch_history(location, &HourlyVariable::ALL, HISTORY_LOOKBACK_DAYS)
            .await?;

        let times = series.sample_times();
        let mut records = Vec::with_capacity(times.len());
        for (index, recorded_at) in times.into_iter().enumerate() {
            let sensors: Vec<(HourlyVariable, Option<f64>)> = HourlyVariable::ALL
                .iter()
                .map(|variable| {
                    let reading = series
                        .values_for(*variable)
                        .and_then(|values| values.get(index).copied())
                        .flatten();
                    (*variable, reading)
                })
                .collect();
            records.push(WeatherRecord::new(
                eircode.clone(),
                location,
                recorded_at,
                &sensors,
            ));
        }

        let records_written = self.store.insert_batch(&records).await?;
        info!(records_written, "Archived weather history");

        Ok(ArchiveOutcome {
            eircode: eircode.clone(),
            location,
            records_written,
        })
    }
}
