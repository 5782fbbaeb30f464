//! Request handlers for the Authentication API.
//!
//! Glob re-export keeps the utoipa-generated path item visible to the
//! application's OpenAPI document.

mod login;

pub use login::*;
