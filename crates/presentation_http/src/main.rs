//! EirMet HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use application::{
    AnalyticsService, WeatherArchiveService,
    ports::{GeocodingPort, WeatherDataPort},
};
use infrastructure::{
    AppConfig, GeocodingAdapter, SqliteWeatherRecordStore, WeatherDataAdapter, create_pool,
};
use presentation_http::{routes, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eirmet_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("EirMet v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    info!(
        host = %config.server.host,
        port = %config.server.port,
        database = %config.database.path,
        "Configuration loaded"
    );

    // Database pool and record store
    let pool = Arc::new(create_pool(&config.database)?);
    let record_store = Arc::new(SqliteWeatherRecordStore::new(Arc::clone(&pool)));

    // Outbound clients behind their ports
    let geocoding_config = config
        .geocoding
        .to_client_config()
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    let geocoding: Arc<dyn GeocodingPort> = Arc::new(
        GeocodingAdapter::new(geocoding_config).map_err(|e| anyhow::anyhow!("{e}"))?,
    );

    let weather: Arc<dyn WeatherDataPort> = Arc::new(
        WeatherDataAdapter::new(
            config.weather.to_client_config(),
            Duration::from_secs(config.weather.cache_ttl_secs),
            config.weather.retry.clone(),
        )
        .map_err(|e| anyhow::anyhow!("{e}"))?,
    );

    // Analytics tables are fixed at startup
    let moderate_values = config
        .analytics
        .moderate_values()
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    let provider_rates = config.analytics.provider_rates();

    // Services
    let analytics = AnalyticsService::new(Arc::clone(&weather), moderate_values, provider_rates);
    let archive =
        WeatherArchiveService::new(Arc::clone(&geocoding), Arc::clone(&weather), record_store);

    let app_state = AppState {
        geocoding,
        analytics: Arc::new(analytics),
        archive: Arc::new(archive),
    };

    // Build router
    let mut app = routes::create_router(app_state).layer(TraceLayer::new_for_http());

    if config.server.cors_enabled {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM) and handle graceful shutdown
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("Waiting up to {:?} for connections to close...", timeout);
    // The actual connection draining is handled by axum's graceful_shutdown
}
