//! SQLite weather record store implementation
//!
//! Implements the `WeatherRecordStore` port using SQLite. Batches are
//! written inside a single transaction and upserted on the
//! (eircode, recorded_at) uniqueness constraint, so a failed run leaves no
//! partial state and a repeated run does not duplicate rows.

use std::sync::Arc;

use application::{error::ApplicationError, ports::WeatherRecordStore};
use async_trait::async_trait;
use domain::entities::WeatherRecord;
use domain::value_objects::HourlyVariable;
use rusqlite::params;
use tokio::task;
use tracing::{debug, instrument};

use super::connection::ConnectionPool;

/// SQLite-based weather record store
#[derive(Debug, Clone)]
pub struct SqliteWeatherRecordStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteWeatherRecordStore {
    /// Create a new SQLite weather record store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WeatherRecordStore for SqliteWeatherRecordStore {
    #[instrument(skip(self, records), fields(batch = records.len()))]
    async fn insert_batch(&self, records: &[WeatherRecord]) -> Result<usize, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let records = records.to_vec();

        task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            let tx = conn
                .transaction()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            let written = {
                let mut statement = tx
                    .prepare(
                        "INSERT INTO weather_records (
                             eircode, latitude, longitude, recorded_at,
                             temperature_2m, relative_humidity_2m, dew_point_2m,
                             cloud_cover, wind_direction_10m, wind_gusts_10m
                         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                         ON CONFLICT(eircode, recorded_at) DO UPDATE SET
                             latitude = excluded.latitude,
                             longitude = excluded.longitude,
                             temperature_2m = excluded.temperature_2m,
                             relative_humidity_2m = excluded.relative_humidity_2m,
                             dew_point_2m = excluded.dew_point_2m,
                             cloud_cover = excluded.cloud_cover,
                             wind_direction_10m = excluded.wind_direction_10m,
                             wind_gusts_10m = excluded.wind_gusts_10m",
                    )
                    .map_err(|e| ApplicationError::Internal(e.to_string()))?;

                let mut written = 0usize;
                for record in &records {
                    statement
                        .execute(params![
                            record.eircode().as_str(),
                            record.location().latitude(),
                            record.location().longitude(),
                            record.recorded_at().to_rfc3339(),
                            record.sensor(HourlyVariable::Temperature2m),
                            record.sensor(HourlyVariable::RelativeHumidity2m),
                            record.sensor(HourlyVariable::DewPoint2m),
                            record.sensor(HourlyVariable::CloudCover),
                            record.sensor(HourlyVariable::WindDirection10m),
                            record.sensor(HourlyVariable::WindGusts10m),
                        ])
                        .map_err(|e| ApplicationError::Internal(e.to_string()))?;
                    written += 1;
                }
                written
            };

            tx.commit()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            debug!(written, "Persisted weather record batch");
            Ok(written)
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }
}
