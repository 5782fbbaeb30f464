//! Bearer-token authentication middleware.
//!
//! Extracts and validates the JWT from the Authorization header, then
//! inserts `AccessClaims` into request extensions for handlers to read.

use axum::{
    body::Body,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use smartretail_auth::decode_token_with_config;

use crate::token::TokenConfig;

/// Bearer-token authentication middleware.
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Decodes and validates the JWT against the configured issuer/audience
/// 3. Inserts `AccessClaims` into request extensions
///
/// # Usage
///
/// ```rust,ignore
/// use axum::{middleware, routing::get, Router};
/// use smartretail_api_auth::jwt_auth_middleware;
///
/// let router = Router::new()
///     .route("/products", get(list_products_handler))
///     .layer(middleware::from_fn(jwt_auth_middleware));
/// ```
pub async fn jwt_auth_middleware(
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let config = request
        .extensions()
        .get::<TokenConfig>()
        .cloned()
        .ok_or_else(|| {
            tracing::error!("Token config not configured");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server configuration error",
            )
                .into_response()
        })?;

    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            (StatusCode::UNAUTHORIZED, "Missing Authorization header").into_response()
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        (
            StatusCode::UNAUTHORIZED,
            "Invalid Authorization header format",
        )
            .into_response()
    })?;

    // Reject empty bearer tokens before attempting a JWT decode.
    if token.is_empty() {
        tracing::warn!("Rejected empty bearer token");
        return Err((StatusCode::UNAUTHORIZED, "Empty bearer token").into_response());
    }

    let claims = decode_token_with_config(token, &config.secret, &config.validation())
        .map_err(|e| {
            tracing::warn!("Token validation failed: {e}");
            (StatusCode::UNAUTHORIZED, "Invalid or expired token").into_response()
        })?;

    tracing::debug!(user = %claims.sub, "Request authenticated");
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware, routing::get, Extension, Router};
    use tower::ServiceExt;

    fn token_config() -> TokenConfig {
        TokenConfig {
            secret: b"test-secret-0123456789abcdef".to_vec(),
            issuer: "smartretail".to_string(),
            audience: "smartretail-api".to_string(),
            duration_minutes: 5,
        }
    }

    fn app() -> Router {
        Router::new()
            .route("/protected", get(|| async { "ok" }))
            .layer(middleware::from_fn(jwt_auth_middleware))
            .layer(Extension(token_config()))
    }

    fn request(auth: Option<&str>) -> axum::http::Request<Body> {
        let mut builder = axum::http::Request::builder().uri("/protected");
        if let Some(value) = auth {
            builder = builder.header("Authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_missing_header_is_401() {
        let response = app().oneshot(request(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_non_bearer_header_is_401() {
        let response = app()
            .oneshot(request(Some("Basic dXNlcjpwYXNz")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_garbage_token_is_401() {
        let response = app()
            .oneshot(request(Some("Bearer not.a.token")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_token_passes_through() {
        let token = token_config().issue("admin").unwrap();
        let response = app()
            .oneshot(request(Some(&format!("Bearer {token}"))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_token_signed_with_other_secret_is_401() {
        let other = TokenConfig {
            secret: b"another-secret-0123456789abc".to_vec(),
            ..token_config()
        };
        let token = other.issue("admin").unwrap();
        let response = app()
            .oneshot(request(Some(&format!("Bearer {token}"))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
