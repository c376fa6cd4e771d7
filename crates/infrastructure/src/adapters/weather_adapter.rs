//! Weather adapter - implements `WeatherDataPort` using `integration_weather`
//!
//! Outbound weather calls are the only external calls that get response
//! caching and retries: responses are cached in-process with a TTL (one
//! hour by default) and transient failures are retried with exponential
//! backoff before surfacing.

use application::error::ApplicationError;
use application::ports::{HourlySeries, WeatherDataPort};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use domain::value_objects::{GeoLocation, HourlyVariable};
use domain::DomainError;
use integration_weather::{
    HourlyResponse, OpenMeteoClient, WeatherClient, WeatherConfig, WeatherError,
};
use moka::future::Cache;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::retry::{RetryConfig, with_retry};

/// Adapter for hourly weather retrieval via the Open-Meteo API
pub struct WeatherDataAdapter {
    client: OpenMeteoClient,
    cache: Cache<String, HourlyResponse>,
    retry: RetryConfig,
}

impl std::fmt::Debug for WeatherDataAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherDataAdapter")
            .field("client", &"OpenMeteoClient")
            .field("cached_responses", &self.cache.entry_count())
            .field("retry", &self.retry)
            .finish()
    }
}

impl WeatherDataAdapter {
    /// Create an adapter with the given client, cache, and retry settings
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(
        config: WeatherConfig,
        cache_ttl: Duration,
        retry: RetryConfig,
    ) -> Result<Self, ApplicationError> {
        let client =
            OpenMeteoClient::new(config).map_err(|e| ApplicationError::Internal(e.to_string()))?;
        let cache = Cache::builder()
            .max_capacity(1024)
            .time_to_live(cache_ttl)
            .build();
        Ok(Self {
            client,
            cache,
            retry,
        })
    }

    /// Map integration weather errors to application errors
    fn map_error(err: &WeatherError) -> ApplicationError {
        match err {
            WeatherError::ParseError(e) => ApplicationError::MalformedResponse(e.clone()),
            WeatherError::InvalidCoordinates => {
                DomainError::ValidationError(err.to_string()).into()
            },
            WeatherError::ConnectionFailed(e)
            | WeatherError::RequestFailed(e)
            | WeatherError::ServiceUnavailable(e) => ApplicationError::ExternalService(e.clone()),
            WeatherError::RateLimitExceeded => {
                ApplicationError::ExternalService("rate limit exceeded".to_string())
            },
        }
    }

    fn timestamp(unix_seconds: i64) -> Result<DateTime<Utc>, ApplicationError> {
        Utc.timestamp_opt(unix_seconds, 0).single().ok_or_else(|| {
            ApplicationError::MalformedResponse(format!(
                "timestamp {unix_seconds} is out of range"
            ))
        })
    }

    /// Convert a wire response into the port series type
    ///
    /// Every requested variable must be present in the response; the
    /// arrays are taken in request order.
    fn to_series(
        response: &HourlyResponse,
        variables: &[HourlyVariable],
    ) -> Result<HourlySeries, ApplicationError> {
        let start = Self::timestamp(response.hourly.time)?;
        let end = Self::timestamp(response.hourly.time_end)?;

        let mut series = Vec::with_capacity(variables.len());
        for variable in variables {
            let values = response.hourly.series.get(variable.as_str()).ok_or_else(|| {
                ApplicationError::MalformedResponse(format!(
                    "hourly response is missing values for {variable}"
                ))
            })?;
            series.push((*variable, values.clone()));
        }

        Ok(HourlySeries {
            start,
            end,
            interval_seconds: response.hourly.interval,
            series,
        })
    }

    async fn fetch(
        &self,
        location: GeoLocation,
        variables: &[HourlyVariable],
        forecast_days: u8,
        past_days: Option<u8>,
    ) -> Result<HourlySeries, ApplicationError> {
        let names: Vec<&str> = variables.iter().map(HourlyVariable::as_str).collect();
        let key = format!(
            "{:.4}:{:.4}:{}:{}:{}",
            location.latitude(),
            location.longitude(),
            names.join(","),
            forecast_days,
            past_days.unwrap_or(0),
        );

        let response = self
            .cache
            .try_get_with(key, async {
                with_retry(&self.retry, || async {
                    match past_days {
                        Some(days) => {
                            self.client
                                .hourly_history(
                                    location.latitude(),
                                    location.longitude(),
                                    &names,
                                    days,
                                )
                                .await
                        },
                        None => {
                            self.client
                                .hourly_forecast(
                                    location.latitude(),
                                    location.longitude(),
                                    &names,
                                    forecast_days,
                                )
                                .await
                        },
                    }
                })
                .await
                .into_result()
            })
            .await
            .map_err(|e| Self::map_error(&e))?;

        debug!(
            start = response.hourly.time,
            end = response.hourly.time_end,
            interval = response.hourly.interval,
            "Retrieved hourly series"
        );

        Self::to_series(&response, variables)
    }
}

#[async_trait]
impl WeatherDataPort for WeatherDataAdapter {
    #[instrument(skip(self, variables), fields(lat = location.latitude(), lon = location.longitude(), days = forecast_days))]
    async fn fetch_forecast(
        &self,
        location: GeoLocation,
        variables: &[HourlyVariable],
        forecast_days: u8,
    ) -> Result<HourlySeries, ApplicationError> {
        self.fetch(location, variables, forecast_days, None).await
    }

    #[instrument(skip(self, variables), fields(lat = location.latitude(), lon = location.longitude(), days = past_days))]
    async fn fetch_history(
        &self,
        location: GeoLocation,
        variables: &[HourlyVariable],
        past_days: u8,
    ) -> Result<HourlySeries, ApplicationError> {
        self.fetch(location, variables, 0, Some(past_days)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_body() -> serde_json::Value {
        serde_json::json!({
            "latitude": 53.35,
            "longitude": -6.26,
            "utc_offset_seconds": 0,
            "timezone": "Europe/London",
            "hourly": {
                "time": 1705276800,
                "time_end": 1705287600,
                "interval": 3600,
                "temperature_2m": [10.4, 11.2, null]
            }
        })
    }

    fn adapter_for(server: &MockServer, retry: RetryConfig) -> WeatherDataAdapter {
        WeatherDataAdapter::new(
            WeatherConfig {
                base_url: server.uri(),
                timeout_secs: 5,
            },
            Duration::from_secs(3600),
            retry,
        )
        .unwrap()
    }

    #[test]
    fn parse_errors_map_to_malformed_response() {
        let err = WeatherDataAdapter::map_error(&WeatherError::ParseError("bad json".into()));
        assert!(matches!(err, ApplicationError::MalformedResponse(_)));
    }

    #[test]
    fn transport_errors_map_to_external_service() {
        for err in [
            WeatherError::ConnectionFailed("refused".into()),
            WeatherError::RequestFailed("HTTP 404".into()),
            WeatherError::ServiceUnavailable("HTTP 503".into()),
            WeatherError::RateLimitExceeded,
        ] {
            assert!(matches!(
                WeatherDataAdapter::map_error(&err),
                ApplicationError::ExternalService(_)
            ));
        }
    }

    #[test]
    fn invalid_coordinates_map_to_domain_error() {
        let err = WeatherDataAdapter::map_error(&WeatherError::InvalidCoordinates);
        assert!(matches!(err, ApplicationError::Domain(_)));
    }

    #[tokio::test]
    async fn fetch_forecast_converts_the_series() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
            .mount(&server)
            .await;

        let adapter = adapter_for(&server, RetryConfig::disabled());
        let series = adapter
            .fetch_forecast(
                GeoLocation::dublin(),
                &[HourlyVariable::Temperature2m],
                7,
            )
            .await
            .unwrap();

        assert_eq!(series.interval_seconds, 3600);
        assert_eq!(series.sample_times().len(), 3);
        assert_eq!(
            series.values_for(HourlyVariable::Temperature2m),
            Some([Some(10.4), Some(11.2), None].as_slice())
        );
    }

    #[tokio::test]
    async fn missing_requested_variable_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
            .mount(&server)
            .await;

        let adapter = adapter_for(&server, RetryConfig::disabled());
        let err = adapter
            .fetch_forecast(
                GeoLocation::dublin(),
                &[HourlyVariable::Temperature2m, HourlyVariable::CloudCover],
                7,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn identical_requests_hit_the_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
            .expect(1)
            .mount(&server)
            .await;

        let adapter = adapter_for(&server, RetryConfig::disabled());
        for _ in 0..3 {
            adapter
                .fetch_forecast(GeoLocation::dublin(), &[HourlyVariable::Temperature2m], 7)
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn history_uses_past_days() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("past_days", "30"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
            .expect(1)
            .mount(&server)
            .await;

        let adapter = adapter_for(&server, RetryConfig::disabled());
        let series = adapter
            .fetch_history(GeoLocation::dublin(), &[HourlyVariable::Temperature2m], 30)
            .await
            .unwrap();
        assert_eq!(series.sample_times().len(), 3);
    }

    #[tokio::test]
    async fn transient_failures_are_retried() {
        let server = MockServer::start().await;

        // first attempt fails, the retry succeeds
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
            .expect(1)
            .mount(&server)
            .await;

        let retry = RetryConfig {
            initial_delay_ms: 1,
            max_delay_ms: 2,
            multiplier: 1.0,
            max_retries: 2,
            jitter_enabled: false,
            jitter_factor: 0.0,
        };
        let adapter = adapter_for(&server, retry);
        let result = adapter
            .fetch_forecast(GeoLocation::dublin(), &[HourlyVariable::Temperature2m], 7)
            .await;
        assert!(result.is_ok(), "Expected retry to recover, got: {result:?}");
    }
}
