//! Error types for the Record API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use smartretail_db::{is_foreign_key_violation, is_unique_violation};
use utoipa::ToSchema;

/// Error type for the Record API.
#[derive(Debug, thiserror::Error)]
pub enum ApiRecordsError {
    /// The submitted batch was empty or absent.
    #[error("Batch is empty")]
    EmptyBatch,

    /// A record in the batch carries no store (tenant) identifier.
    #[error("Record at position {position} has no store id")]
    MissingTenant {
        /// Zero-based position of the offending record in the batch.
        position: usize,
    },

    /// A compound key already exists (strict-insert mode), or repeats
    /// within the batch.
    #[error("Duplicate key {key}")]
    DuplicateKey {
        /// Display form of the conflicting compound key.
        key: String,
    },

    /// Entity not found by its full compound key (or cross-tenant access).
    #[error("Record not found")]
    NotFound,

    /// Request failed field-level validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// RFC 7807 Problem Details response format.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ProblemDetails {
    fn new(slug: &str, title: &str, status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            problem_type: format!("https://smartretail.dev/problems/{slug}"),
            title: title.to_string(),
            status: status.as_u16(),
            detail: Some(detail.into()),
        }
    }
}

impl IntoResponse for ApiRecordsError {
    fn into_response(self) -> Response {
        let (status, problem) = match &self {
            ApiRecordsError::EmptyBatch => (
                StatusCode::BAD_REQUEST,
                ProblemDetails::new(
                    "empty-batch",
                    "Validation Error",
                    StatusCode::BAD_REQUEST,
                    "Batch must contain at least one record",
                ),
            ),
            ApiRecordsError::MissingTenant { position } => (
                StatusCode::BAD_REQUEST,
                ProblemDetails::new(
                    "missing-tenant",
                    "Validation Error",
                    StatusCode::BAD_REQUEST,
                    format!("Record at position {position} has no store id"),
                ),
            ),
            ApiRecordsError::DuplicateKey { key } => (
                StatusCode::CONFLICT,
                ProblemDetails::new(
                    "duplicate-key",
                    "Conflict",
                    StatusCode::CONFLICT,
                    format!("Key {key} already exists"),
                ),
            ),
            ApiRecordsError::NotFound => (
                StatusCode::NOT_FOUND,
                ProblemDetails::new(
                    "not-found",
                    "Not Found",
                    StatusCode::NOT_FOUND,
                    "Record not found",
                ),
            ),
            ApiRecordsError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ProblemDetails::new(
                    "validation-error",
                    "Validation Error",
                    StatusCode::BAD_REQUEST,
                    msg.clone(),
                ),
            ),
            // Constraint violations that slip past the engine (for example a
            // concurrent writer winning the race between resolve and commit)
            // still map to meaningful statuses; everything else is opaque.
            ApiRecordsError::Database(e) if is_unique_violation(e) => (
                StatusCode::CONFLICT,
                ProblemDetails::new(
                    "duplicate-key",
                    "Conflict",
                    StatusCode::CONFLICT,
                    "A submitted key already exists",
                ),
            ),
            ApiRecordsError::Database(e) if is_foreign_key_violation(e) => (
                StatusCode::BAD_REQUEST,
                ProblemDetails::new(
                    "missing-reference",
                    "Validation Error",
                    StatusCode::BAD_REQUEST,
                    "A submitted record references a row that does not exist in its store",
                ),
            ),
            ApiRecordsError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ProblemDetails::new(
                        "internal-error",
                        "Internal Server Error",
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "An internal error occurred",
                    ),
                )
            }
        };

        (status, Json(problem)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_batch_maps_to_400() {
        let response = ApiRecordsError::EmptyBatch.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_missing_tenant_maps_to_400() {
        let response = ApiRecordsError::MissingTenant { position: 2 }.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_duplicate_key_maps_to_409() {
        let response = ApiRecordsError::DuplicateKey {
            key: "(1, S1)".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response = ApiRecordsError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_opaque_database_error_maps_to_500() {
        let response = ApiRecordsError::Database(sqlx::Error::PoolClosed).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
