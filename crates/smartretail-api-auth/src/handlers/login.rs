//! Login endpoint handler.
//!
//! POST /auth/login - Check credentials and issue a bearer token.

use crate::credentials::ApiCredentials;
use crate::error::ApiAuthError;
use crate::models::{LoginRequest, TokenResponse};
use crate::token::TokenConfig;
use axum::{Extension, Json};
use validator::Validate;

/// Handle user login.
///
/// Compares the submitted username and password against the configured
/// credentials and, on a match, issues a signed time-bounded bearer token
/// carrying the username as its subject.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Malformed request body"),
        (status = 401, description = "Invalid credentials"),
    ),
    tag = "Authentication"
)]
pub async fn login_handler(
    Extension(credentials): Extension<ApiCredentials>,
    Extension(token_config): Extension<TokenConfig>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiAuthError> {
    request.validate().map_err(|e| {
        let messages: Vec<String> = e
            .field_errors()
            .values()
            .flat_map(|errors| {
                errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(std::string::ToString::to_string))
            })
            .collect();
        ApiAuthError::Validation(messages.join(", "))
    })?;

    if !credentials.matches(&request.username, &request.password) {
        tracing::warn!(username = %request.username, "Login rejected");
        return Err(ApiAuthError::InvalidCredentials);
    }

    let token = token_config.issue(&request.username)?;

    tracing::info!(username = %request.username, "Login succeeded");
    Ok(Json(TokenResponse { token }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extensions() -> (Extension<ApiCredentials>, Extension<TokenConfig>) {
        (
            Extension(ApiCredentials::new("retail", "s3cret")),
            Extension(TokenConfig {
                secret: b"test-secret-0123456789abcdef".to_vec(),
                issuer: "smartretail".to_string(),
                audience: "smartretail-api".to_string(),
                duration_minutes: 5,
            }),
        )
    }

    #[tokio::test]
    async fn test_login_with_matching_credentials_issues_token() {
        let (creds, config) = extensions();
        let response = login_handler(
            creds,
            config,
            Json(LoginRequest {
                username: "retail".to_string(),
                password: "s3cret".to_string(),
            }),
        )
        .await
        .unwrap();
        assert!(!response.token.is_empty());
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_is_rejected() {
        let (creds, config) = extensions();
        let err = login_handler(
            creds,
            config,
            Json(LoginRequest {
                username: "retail".to_string(),
                password: "wrong".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiAuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_with_empty_username_fails_validation() {
        let (creds, config) = extensions();
        let err = login_handler(
            creds,
            config,
            Json(LoginRequest {
                username: String::new(),
                password: "s3cret".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiAuthError::Validation(_)));
    }
}
