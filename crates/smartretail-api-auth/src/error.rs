//! Error types for the Authentication API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// Error type for the Authentication API.
#[derive(Debug, thiserror::Error)]
pub enum ApiAuthError {
    /// Username or password did not match the configured credentials.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Missing, malformed, expired, or otherwise invalid bearer token.
    #[error("Missing or invalid authentication token")]
    Unauthorized,

    /// Request body failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Token construction failed.
    #[error("Token error: {0}")]
    Token(#[from] smartretail_auth::AuthError),

    /// Internal server error.
    #[error("Internal server error: {0}")]
    Internal(String),
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

impl IntoResponse for ApiAuthError {
    fn into_response(self) -> Response {
        let (status, problem) = match &self {
            ApiAuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ProblemDetails::new(
                    "invalid-credentials",
                    "Unauthorized",
                    StatusCode::UNAUTHORIZED,
                    "Invalid username or password",
                ),
            ),
            ApiAuthError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ProblemDetails::new(
                    "unauthorized",
                    "Unauthorized",
                    StatusCode::UNAUTHORIZED,
                    "Missing or invalid authentication token",
                ),
            ),
            ApiAuthError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ProblemDetails::new(
                    "validation-error",
                    "Validation Error",
                    StatusCode::BAD_REQUEST,
                    msg.clone(),
                ),
            ),
            ApiAuthError::Token(e) => {
                tracing::error!("Token construction failed: {e}");
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
            ApiAuthError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
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
    fn test_invalid_credentials_maps_to_401() {
        let response = ApiAuthError::InvalidCredentials.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_validation_maps_to_400() {
        let response = ApiAuthError::Validation("username is required".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
