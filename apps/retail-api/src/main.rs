//! SmartRetail API
//!
//! Multi-tenant retail record service built with Axum: batch upsert
//! reconciliation over products, customers, sales, and sale lines, behind
//! JWT bearer authentication, with health checks and API documentation.

mod config;
mod health;
mod logging;
mod middleware;
mod openapi;

use axum::{routing::get, Extension, Router};
use config::Config;
use health::healthz_handler;
use middleware::request_id_middleware;
use openapi::swagger_routes;
use smartretail_api_auth::{auth_router, jwt_auth_middleware, ApiCredentials};
use smartretail_api_records::{records_router, RecordsState};
use smartretail_db::{run_migrations, DbPool};
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

#[tokio::main]
async fn main() {
    // Load configuration (fail-fast on missing required values)
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.rust_log);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.host,
        port = config.port,
        "Starting SmartRetail API"
    );

    // Login credentials come from the connection string's user-info.
    let credentials = match ApiCredentials::from_database_url(&config.database_url) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Cannot derive API credentials: {e}");
            std::process::exit(1);
        }
    };

    let pool = match DbPool::connect(&config.database_url).await {
        Ok(p) => p,
        Err(e) => {
            tracing::error!("Database connection failed: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_migrations(&pool).await {
        tracing::error!("Migrations failed: {e}");
        std::process::exit(1);
    }

    let token_config = config.token_config();
    let records_state = RecordsState::new(pool.inner().clone());

    // Every record route sits behind the bearer-token gate; login, health,
    // and documentation stay public.
    let protected = records_router(records_state)
        .layer(axum::middleware::from_fn(jwt_auth_middleware))
        .layer(Extension(token_config.clone()));

    let app = Router::new()
        .route("/healthz", get(healthz_handler))
        .merge(auth_router(credentials, token_config))
        .merge(protected)
        .merge(swagger_routes())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(pool.inner().clone()));

    let addr = config.bind_addr();
    info!(%addr, "Server listening");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind to address {addr}: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }

    info!("Server shutdown complete");
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {e}");
                // Fall through - we still want to wait for terminate signal
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                // Wait forever if we can't install the handler
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
