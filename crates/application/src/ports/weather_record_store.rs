//! Weather record persistence port

use async_trait::async_trait;
use domain::entities::WeatherRecord;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for persisting weather records
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherRecordStore: Send + Sync {
    /// Persist a batch of records atomically
    ///
    /// Either every record in the batch is stored or none is. Returns the
    /// number of records written. Implementations are idempotent for
    /// repeated identical batches.
    async fn insert_batch(&self, records: &[WeatherRecord]) -> Result<usize, ApplicationError>;
}
