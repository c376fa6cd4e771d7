//! Integration tests for HTTP handlers
#![allow(clippy::expect_used)]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use application::{
    AnalyticsService, WeatherArchiveService,
    error::ApplicationError,
    ports::{GeocodingPort, HourlySeries, WeatherDataPort, WeatherRecordStore},
};
use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{TimeZone, Utc};
use domain::{
    analytics::{ModerateValues, ProviderRates},
    entities::WeatherRecord,
    value_objects::{Eircode, GeoLocation, HourlyVariable},
};
use presentation_http::{routes::create_router, state::AppState};
use serde_json::json;

/// Mock geocoding port with a fixed outcome
struct MockGeocoding {
    outcome: Result<GeoLocation, String>,
}

impl MockGeocoding {
    fn ok() -> Self {
        Self {
            outcome: Ok(GeoLocation::dublin()),
        }
    }

    fn status(status: &str) -> Self {
        Self {
            outcome: Err(status.to_string()),
        }
    }
}

#[async_trait]
impl GeocodingPort for MockGeocoding {
    async fn resolve_eircode(&self, _eircode: &Eircode) -> Result<GeoLocation, ApplicationError> {
        self.outcome
            .clone()
            .map_err(ApplicationError::NotFound)
    }
}

/// Mock weather port serving a fixed four-hour series and counting calls
struct MockWeather {
    fail_with_transport_error: bool,
    calls: AtomicUsize,
}

impl MockWeather {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            fail_with_transport_error: false,
            calls: AtomicUsize::new(0),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail_with_transport_error: true,
            calls: AtomicUsize::new(0),
        })
    }

    fn series(variables: &[HourlyVariable]) -> HourlySeries {
        let start = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).single().expect("valid");
        let end = Utc.with_ymd_and_hms(2024, 1, 15, 4, 0, 0).single().expect("valid");
        HourlySeries {
            start,
            end,
            interval_seconds: 3600,
            series: variables
                .iter()
                .map(|v| (*v, vec![Some(10.0), Some(16.0), Some(12.0), Some(20.0)]))
                .collect(),
        }
    }
}

#[async_trait]
impl WeatherDataPort for MockWeather {
    async fn fetch_forecast(
        &self,
        _location: GeoLocation,
        variables: &[HourlyVariable],
        _forecast_days: u8,
    ) -> Result<HourlySeries, ApplicationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_with_transport_error {
            return Err(ApplicationError::ExternalService("connection refused".into()));
        }
        Ok(Self::series(variables))
    }

    async fn fetch_history(
        &self,
        _location: GeoLocation,
        variables: &[HourlyVariable],
        _past_days: u8,
    ) -> Result<HourlySeries, ApplicationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_with_transport_error {
            return Err(ApplicationError::ExternalService("connection refused".into()));
        }
        Ok(Self::series(variables))
    }
}

/// Mock record store counting the records it receives
struct MockStore {
    records_received: AtomicUsize,
}

impl MockStore {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            records_received: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl WeatherRecordStore for MockStore {
    async fn insert_batch(&self, records: &[WeatherRecord]) -> Result<usize, ApplicationError> {
        self.records_received.store(records.len(), Ordering::SeqCst);
        Ok(records.len())
    }
}

struct TestHarness {
    server: TestServer,
    weather: Arc<MockWeather>,
    store: Arc<MockStore>,
}

fn harness_with(geocoding: MockGeocoding, weather: Arc<MockWeather>) -> TestHarness {
    let store = MockStore::new();
    let geocoding: Arc<dyn GeocodingPort> = Arc::new(geocoding);

    let analytics = AnalyticsService::new(
        Arc::clone(&weather) as Arc<dyn WeatherDataPort>,
        ModerateValues::default(),
        ProviderRates::default(),
    );
    let archive = WeatherArchiveService::new(
        Arc::clone(&geocoding),
        Arc::clone(&weather) as Arc<dyn WeatherDataPort>,
        Arc::clone(&store) as Arc<dyn WeatherRecordStore>,
    );

    let state = AppState {
        geocoding,
        analytics: Arc::new(analytics),
        archive: Arc::new(archive),
    };

    let server = TestServer::new(create_router(state)).expect("test server");
    TestHarness {
        server,
        weather,
        store,
    }
}

fn harness() -> TestHarness {
    harness_with(MockGeocoding::ok(), MockWeather::new())
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn health_returns_ok() {
    let harness = harness();
    let response = harness.server.get("/health").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
}

// ============================================================================
// Coordinate lookup
// ============================================================================

#[tokio::test]
async fn coordinates_lookup_success() {
    let harness = harness();
    let response = harness
        .server
        .get("/environmental_analytics/coordinates/")
        .add_query_param("eircode", "D01ABC0")
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    let coordinates = &body["coordinates"];
    assert!((coordinates["latitude"].as_f64().expect("lat") - 53.3498).abs() < 1e-4);
    assert!((coordinates["longitude"].as_f64().expect("lon") - -6.2603).abs() < 1e-4);
}

#[tokio::test]
async fn coordinates_lookup_missing_eircode_is_bad_request() {
    let harness = harness();
    let response = harness
        .server
        .get("/environmental_analytics/coordinates/")
        .await;
    response.assert_status_bad_request();

    let body: serde_json::Value = response.json();
    assert!(body["error message"].is_string());
}

#[tokio::test]
async fn coordinates_lookup_passes_upstream_status_through() {
    let harness = harness_with(MockGeocoding::status("ZERO_RESULTS"), MockWeather::new());
    let response = harness
        .server
        .get("/environmental_analytics/coordinates/")
        .add_query_param("eircode", "X99XXXX")
        .await;
    response.assert_status_not_found();

    let body: serde_json::Value = response.json();
    assert_eq!(body["error message"], "ZERO_RESULTS");
}

// ============================================================================
// Forecast analytics
// ============================================================================

#[tokio::test]
async fn analytics_success_returns_statistics() {
    let harness = harness();
    let response = harness
        .server
        .post("/environmental_analytics/analytics/")
        .json(&json!({
            "latitude": 53.3498,
            "longitude": -6.2603,
            "hourly": ["temperature_2m"],
            "forecast_days": 2
        }))
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    let data = &body["data"];

    let dates = data["date"].as_array().expect("date array");
    assert_eq!(dates.len(), 4);
    assert_eq!(dates[0], "2024-01-15T00:00:00+00:00");

    let temperature = &data["variables"]["temperature_2m"];
    assert_eq!(temperature["values"].as_array().expect("values").len(), 4);
    assert_eq!(temperature["moderate_value"], 14.0);
    assert_eq!(temperature["working_hours"], 2);

    // 2 h x 0.48 kWh x 0.42 €/kWh, rounded to cents
    let costs = &temperature["electricity_total_rate_per_brand"];
    assert!((costs["Electric Ireland"].as_f64().expect("cost") - 0.40).abs() < 1e-9);
    assert_eq!(costs.as_object().expect("cost map").len(), 6);
}

#[tokio::test]
async fn analytics_missing_forecast_days_is_not_found_without_fetch() {
    let harness = harness();
    let response = harness
        .server
        .post("/environmental_analytics/analytics/")
        .json(&json!({
            "latitude": 53.3498,
            "longitude": -6.2603,
            "hourly": ["temperature_2m"]
        }))
        .await;
    response.assert_status_not_found();

    let body: serde_json::Value = response.json();
    assert!(
        body["error message"]
            .as_str()
            .expect("message")
            .contains("forecast_days")
    );

    // the weather service was never invoked
    assert_eq!(harness.weather.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn analytics_unknown_variable_is_not_found_without_fetch() {
    let harness = harness();
    let response = harness
        .server
        .post("/environmental_analytics/analytics/")
        .json(&json!({
            "latitude": 53.3498,
            "longitude": -6.2603,
            "hourly": ["snow_depth"],
            "forecast_days": 2
        }))
        .await;
    response.assert_status_not_found();
    assert_eq!(harness.weather.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn analytics_upstream_failure_is_not_found() {
    let harness = harness_with(MockGeocoding::ok(), MockWeather::failing());
    let response = harness
        .server
        .post("/environmental_analytics/analytics/")
        .json(&json!({
            "latitude": 53.3498,
            "longitude": -6.2603,
            "hourly": ["temperature_2m"],
            "forecast_days": 2
        }))
        .await;
    response.assert_status_not_found();
}

// ============================================================================
// History fetch-and-persist
// ============================================================================

#[tokio::test]
async fn archive_success_persists_and_acknowledges() {
    let harness = harness();
    let response = harness
        .server
        .get("/environmental_analytics/eircode_weather/")
        .add_query_param("eircode", "D01ABC0")
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(
        body["message"],
        "Weather data retrieved and saved successfully."
    );

    // one record per reconstructed hourly timestamp
    assert_eq!(harness.store.records_received.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn archive_missing_eircode_is_bad_request() {
    let harness = harness();
    let response = harness
        .server
        .get("/environmental_analytics/eircode_weather/")
        .await;
    response.assert_status_bad_request();

    let body: serde_json::Value = response.json();
    assert!(body["error message"].is_string());
    assert_eq!(harness.weather.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn archive_geocode_failure_is_not_found() {
    let harness = harness_with(MockGeocoding::status("ZERO_RESULTS"), MockWeather::new());
    let response = harness
        .server
        .get("/environmental_analytics/eircode_weather/")
        .add_query_param("eircode", "X99XXXX")
        .await;
    response.assert_status_not_found();

    let body: serde_json::Value = response.json();
    assert_eq!(body["error message"], "ZERO_RESULTS");
    assert_eq!(harness.store.records_received.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn archive_weather_failure_is_internal_error() {
    let harness = harness_with(MockGeocoding::ok(), MockWeather::failing());
    let response = harness
        .server
        .get("/environmental_analytics/eircode_weather/")
        .add_query_param("eircode", "D01ABC0")
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let body: serde_json::Value = response.json();
    assert!(
        body["error message"]
            .as_str()
            .expect("message")
            .contains("Request failed")
    );
    assert_eq!(harness.store.records_received.load(Ordering::SeqCst), 0);
}
