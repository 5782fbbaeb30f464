//! Authentication API router configuration.
//!
//! Configures the unauthenticated login route:
//! - POST /auth/login - Check credentials, issue a bearer token

use crate::credentials::ApiCredentials;
use crate::handlers::login_handler;
use crate::token::TokenConfig;
use axum::{routing::post, Extension, Router};

/// Create the authentication router.
///
/// The returned router carries its own credential and token-config
/// extensions; mount it at the application root.
pub fn auth_router(credentials: ApiCredentials, token_config: TokenConfig) -> Router {
    Router::new()
        .route("/auth/login", post(login_handler))
        .layer(Extension(credentials))
        .layer(Extension(token_config))
}
