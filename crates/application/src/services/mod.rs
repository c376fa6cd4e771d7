//! Application services

mod analytics_service;
mod archive_service;

pub use analytics_service::{AnalyticsQuery, AnalyticsReport, AnalyticsService, VariableReport};
pub use archive_service::{ArchiveOutcome, HISTORY_LOOKBACK_DAYS, WeatherArchiveService};
