//! Health probe endpoint.
//!
//! `GET /healthz` checks that the API responds and that the record store
//! is reachable. Unauthenticated, usable by platform health checks.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension,
};
use sqlx::PgPool;

/// Probes store reachability with a minimal query.
#[utoipa::path(
    get,
    path = "/healthz",
    responses(
        (status = 200, description = "API and store reachable", body = String),
        (status = 500, description = "Store unreachable", body = String),
    ),
    tag = "Health"
)]
pub async fn healthz_handler(Extension(pool): Extension<PgPool>) -> Response {
    match smartretail_db::ping(&pool).await {
        Ok(()) => (StatusCode::OK, "Healthy").into_response(),
        Err(e) => {
            tracing::error!("Health check failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error: could not reach the record store: {e}"),
            )
                .into_response()
        }
    }
}
