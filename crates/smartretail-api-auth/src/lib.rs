//! Authentication API for SmartRetail.
//!
//! Provides:
//! - `POST /auth/login` - credential check against the configured
//!   connection-string credentials, issuing an HS256 bearer token
//! - [`jwt_auth_middleware`] - the gate every record route sits behind
//!
//! # Example
//!
//! ```rust,ignore
//! use smartretail_api_auth::{auth_router, ApiCredentials, TokenConfig};
//!
//! let credentials = ApiCredentials::from_database_url(&config.database_url)?;
//! let app = auth_router(credentials, token_config);
//! ```

mod credentials;
mod error;
pub mod handlers;
mod middleware;
mod models;
mod router;
mod token;

pub use credentials::ApiCredentials;
pub use error::{ApiAuthError, ProblemDetails};
pub use handlers::login_handler;
pub use middleware::jwt_auth_middleware;
pub use models::{LoginRequest, TokenResponse};
pub use router::auth_router;
pub use token::TokenConfig;
