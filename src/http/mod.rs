//! HTTP layer - axum routes over a [`DonationStore`].
//!
//! The store is handed to the router as shared state; handlers never reach it any
//! other way. Requests are traced with tower-http's `TraceLayer` and browser access is
//! limited to the configured origins.

/// Donation CRUD and report handlers
pub mod donations;
/// Error to response mapping
pub mod error;
/// Liveness check
pub mod health;
/// JSON body to draft conversion
pub mod payload;

use crate::{config::app::ServerConfig, core::DonationStore, errors::Result};
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

/// Builds the application router around `store`.
pub fn router<S: DonationStore>(store: Arc<S>, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/healthz", get(health::health))
        .route(
            "/donations",
            get(donations::list_donations::<S>).post(donations::create_donation::<S>),
        )
        .route(
            "/donations/",
            get(donations::list_donations::<S>).post(donations::create_donation::<S>),
        )
        .route(
            "/donations/:id",
            get(donations::get_donation::<S>)
                .put(donations::update_donation::<S>)
                .delete(donations::delete_donation::<S>),
        )
        .route("/reports/totals", get(donations::donation_totals::<S>))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// CORS policy admitting `allowed_origins`. Unparseable entries are skipped.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid allowed origin: {origin}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

/// Binds `server.bind_address` and serves the API until Ctrl+C or SIGTERM.
///
/// # Errors
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve<S: DonationStore>(store: S, server: &ServerConfig) -> Result<()> {
    let app = router(Arc::new(store), &server.allowed_origins);

    let listener = tokio::net::TcpListener::bind(&server.bind_address).await?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("signal received, starting graceful shutdown");
}
