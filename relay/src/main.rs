//! notify-relay server - form front end for push notifications.
//!
//! This binary:
//! - Serves the message form at `/`
//! - Accepts submissions at `/send`
//! - Relays each message to the LINE Notify API with a bearer token

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use url::Url;

use notify_relay::{build_router, AppState, Config, Notifier};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("server_starting");

    // Load .env if present; already-set environment variables still apply
    // when the file is missing.
    match dotenvy::dotenv() {
        Ok(path) => info!(path = %path.display(), "dotenv_loaded"),
        Err(_) => info!("dotenv_not_found"),
    }

    // Load configuration
    let config = Config::from_env();
    info!(
        port = config.port,
        access_token_configured = config.access_token.is_some(),
        notify_api_url = %config.notify_api_url,
        request_timeout_ms = config.request_timeout_ms,
        "config_loaded"
    );

    // Create the outbound notification client
    let endpoint = Url::parse(&config.notify_api_url)
        .context("Invalid NOTIFY_API_URL")?;
    let notifier = Notifier::new(endpoint, Duration::from_millis(config.request_timeout_ms));

    // Create application state and router
    let state = AppState::new(config.clone(), notifier);
    let app = build_router(state).layer(TraceLayer::new_for_http());

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "server_listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("server_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("server_shutting_down");
}
