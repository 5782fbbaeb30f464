//! Token issuance configuration.

use crate::error::ApiAuthError;
use smartretail_auth::{encode_token, AccessClaims, ValidationConfig};

/// Signing and validation parameters for access tokens.
///
/// Carried in request extensions so that the login handler (issuing) and
/// the auth middleware (validating) agree on issuer, audience, and secret.
#[derive(Clone)]
pub struct TokenConfig {
    /// HS256 signing secret.
    pub secret: Vec<u8>,
    /// Issuer stamped into and required from every token.
    pub issuer: String,
    /// Audience stamped into and required from every token.
    pub audience: String,
    /// Token lifetime in minutes.
    pub duration_minutes: i64,
}

impl TokenConfig {
    /// Issue a signed token for the given username.
    pub fn issue(&self, username: &str) -> Result<String, ApiAuthError> {
        let claims = AccessClaims::builder()
            .subject(username)
            .issuer(&self.issuer)
            .audience(vec![self.audience.clone()])
            .expires_in_minutes(self.duration_minutes)
            .build();

        Ok(encode_token(&claims, &self.secret)?)
    }

    /// Validation parameters matching what [`TokenConfig::issue`] stamps.
    ///
    /// Zero clock-skew leeway.
    #[must_use]
    pub fn validation(&self) -> ValidationConfig {
        ValidationConfig::default()
            .issuer(self.issuer.clone())
            .audience(vec![self.audience.clone()])
    }
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("duration_minutes", &self.duration_minutes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartretail_auth::decode_token_with_config;

    fn config() -> TokenConfig {
        TokenConfig {
            secret: b"test-secret-0123456789abcdef".to_vec(),
            issuer: "smartretail".to_string(),
            audience: "smartretail-api".to_string(),
            duration_minutes: 60,
        }
    }

    #[test]
    fn test_issued_token_passes_own_validation() {
        let config = config();
        let token = config.issue("admin").unwrap();
        let claims =
            decode_token_with_config(&token, &config.secret, &config.validation()).unwrap();
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.iss, "smartretail");
        assert_eq!(claims.aud, vec!["smartretail-api".to_string()]);
    }

    #[test]
    fn test_issued_token_fails_other_issuer_validation() {
        let config = config();
        let token = config.issue("admin").unwrap();
        let other = TokenConfig {
            issuer: "someone-else".to_string(),
            ..config.clone()
        };
        assert!(decode_token_with_config(&token, &other.secret, &other.validation()).is_err());
    }
}
