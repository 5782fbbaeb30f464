//! Error types for authentication operations.
//!
//! Provides explicit error variants for all authentication failures.

use thiserror::Error;

/// Authentication error types.
///
/// Each variant maps to a specific failure mode in token handling.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Token has expired (exp claim is in the past).
    #[error("Token has expired")]
    TokenExpired,

    /// Token signature is invalid.
    #[error("Invalid token signature")]
    InvalidSignature,

    /// Token format is malformed or invalid.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Token uses an unsupported algorithm (only HS256 is allowed).
    #[error("Unsupported algorithm: only HS256 is allowed")]
    InvalidAlgorithm,

    /// Required claim is missing from token.
    #[error("Missing required claim: {0}")]
    MissingClaim(String),

    /// Signing secret is unusable (for example, too short).
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

impl AuthError {
    /// Check if this error indicates an expired token.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        matches!(self, AuthError::TokenExpired)
    }

    /// Check if this error indicates an invalid signature.
    #[must_use]
    pub fn is_invalid_signature(&self) -> bool {
        matches!(self, AuthError::InvalidSignature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(AuthError::TokenExpired.to_string(), "Token has expired");
        assert!(AuthError::TokenExpired.is_expired());
        assert!(!AuthError::TokenExpired.is_invalid_signature());
    }
}
