//! Bearer-token authentication library for SmartRetail.
//!
//! This crate provides HS256 JWT encoding and decoding with the claims
//! this system uses: the authenticated username as subject, plus issuer,
//! audience, and expiry from configuration.
//!
//! # Example
//!
//! ```
//! use smartretail_auth::{decode_token, encode_token, AccessClaims};
//!
//! let secret = b"configured-signing-secret";
//!
//! let claims = AccessClaims::builder()
//!     .subject("admin")
//!     .issuer("smartretail")
//!     .audience(vec!["smartretail-api"])
//!     .expires_in_minutes(60)
//!     .build();
//!
//! let token = encode_token(&claims, secret).unwrap();
//! let decoded = decode_token(&token, secret).unwrap();
//! assert_eq!(decoded.sub, "admin");
//! ```

mod claims;
mod error;
mod jwt;

pub use claims::{AccessClaims, AccessClaimsBuilder};
pub use error::AuthError;
pub use jwt::{
    decode_token, decode_token_with_config, encode_token, ValidationConfig, MIN_SECRET_LEN,
};
