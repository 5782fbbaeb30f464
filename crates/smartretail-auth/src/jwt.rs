//! JWT encoding and decoding with the HS256 algorithm.
//!
//! Tokens are signed with a configured symmetric secret. Validation is
//! strict: issuer, audience, and expiry are all checked, with zero clock
//! skew by default.

use crate::claims::AccessClaims;
use crate::error::AuthError;
use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation,
};

/// Minimum accepted signing-secret length in bytes.
///
/// HS256 secrets shorter than this are trivially brute-forceable.
pub const MIN_SECRET_LEN: usize = 16;

/// Configuration for JWT validation.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Leeway in seconds for exp/iat validation (clock skew tolerance).
    pub leeway: u64,
    /// Expected issuer (if set, tokens with different issuer are rejected).
    pub issuer: Option<String>,
    /// Expected audience (if set, tokens without matching audience are rejected).
    pub audience: Option<Vec<String>>,
    /// Whether to validate expiration.
    pub validate_exp: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            leeway: 0, // no clock-skew tolerance
            issuer: None,
            audience: None,
            validate_exp: true,
        }
    }
}

impl ValidationConfig {
    /// Set the expected issuer.
    #[must_use]
    pub fn issuer(mut self, iss: impl Into<String>) -> Self {
        self.issuer = Some(iss.into());
        self
    }

    /// Set the expected audience.
    #[must_use]
    pub fn audience(mut self, aud: Vec<impl Into<String>>) -> Self {
        self.audience = Some(aud.into_iter().map(Into::into).collect());
        self
    }

    /// Set the clock-skew leeway in seconds.
    #[must_use]
    pub fn with_leeway(mut self, leeway: u64) -> Self {
        self.leeway = leeway;
        self
    }

    /// Disable expiration validation (use with caution).
    #[must_use]
    pub fn skip_exp_validation(mut self) -> Self {
        self.validate_exp = false;
        self
    }
}

/// Encode claims into a signed token string using HS256.
///
/// # Errors
///
/// Returns `AuthError::InvalidKey` if the secret is shorter than
/// [`MIN_SECRET_LEN`] bytes.
pub fn encode_token(claims: &AccessClaims, secret: &[u8]) -> Result<String, AuthError> {
    check_secret(secret)?;
    let key = EncodingKey::from_secret(secret);
    let header = Header::new(Algorithm::HS256);

    encode(&header, claims, &key)
        .map_err(|e| AuthError::InvalidToken(format!("Encoding failed: {e}")))
}

/// Decode and validate a token with the default validation config.
///
/// # Errors
///
/// - `AuthError::TokenExpired` - token has expired
/// - `AuthError::InvalidSignature` - signature verification failed
/// - `AuthError::InvalidToken` - token format is invalid
/// - `AuthError::InvalidAlgorithm` - token uses an unsupported algorithm
pub fn decode_token(token: &str, secret: &[u8]) -> Result<AccessClaims, AuthError> {
    decode_token_with_config(token, secret, &ValidationConfig::default())
}

/// Decode and validate a token with a custom validation config.
pub fn decode_token_with_config(
    token: &str,
    secret: &[u8],
    config: &ValidationConfig,
) -> Result<AccessClaims, AuthError> {
    check_secret(secret)?;
    let key = DecodingKey::from_secret(secret);

    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = config.leeway;
    validation.validate_exp = config.validate_exp;

    // Only accept HS256
    validation.algorithms = vec![Algorithm::HS256];

    if let Some(ref iss) = config.issuer {
        validation.set_issuer(&[iss]);
    }

    if let Some(ref aud) = config.audience {
        validation.set_audience(aud);
    } else {
        validation.validate_aud = false;
    }

    let token_data: TokenData<AccessClaims> =
        decode(token, &key, &validation).map_err(map_jwt_error)?;

    Ok(token_data.claims)
}

fn check_secret(secret: &[u8]) -> Result<(), AuthError> {
    if secret.len() < MIN_SECRET_LEN {
        return Err(AuthError::InvalidKey(format!(
            "signing secret must be at least {MIN_SECRET_LEN} bytes"
        )));
    }
    Ok(())
}

/// Map jsonwebtoken errors to `AuthError`.
fn map_jwt_error(err: jsonwebtoken::errors::Error) -> AuthError {
    use jsonwebtoken::errors::ErrorKind;

    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        ErrorKind::InvalidAlgorithm => AuthError::InvalidAlgorithm,
        ErrorKind::InvalidToken => AuthError::InvalidToken("Malformed token".to_string()),
        ErrorKind::Base64(_) => AuthError::InvalidToken("Invalid base64 encoding".to_string()),
        ErrorKind::Json(_) => AuthError::InvalidToken("Invalid JSON in claims".to_string()),
        ErrorKind::MissingRequiredClaim(claim) => AuthError::MissingClaim(claim.to_string()),
        ErrorKind::InvalidIssuer => AuthError::InvalidToken("Invalid issuer".to_string()),
        ErrorKind::InvalidAudience => AuthError::InvalidToken("Invalid audience".to_string()),
        _ => AuthError::InvalidToken(format!("Token validation failed: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AccessClaims;
    use chrono::Utc;

    const TEST_SECRET: &[u8] = b"test-secret-0123456789abcdef";

    fn claims() -> AccessClaims {
        AccessClaims::builder()
            .subject("admin")
            .issuer("smartretail")
            .audience(vec!["smartretail-api"])
            .expires_in_minutes(5)
            .build()
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let token = encode_token(&claims(), TEST_SECRET).unwrap();
        let decoded = decode_token(&token, TEST_SECRET).unwrap();
        assert_eq!(decoded.sub, "admin");
        assert_eq!(decoded.iss, "smartretail");
    }

    #[test]
    fn test_validates_issuer_and_audience() {
        let token = encode_token(&claims(), TEST_SECRET).unwrap();

        let config = ValidationConfig::default()
            .issuer("smartretail")
            .audience(vec!["smartretail-api"]);
        assert!(decode_token_with_config(&token, TEST_SECRET, &config).is_ok());

        let wrong_issuer = ValidationConfig::default().issuer("someone-else");
        assert!(decode_token_with_config(&token, TEST_SECRET, &wrong_issuer).is_err());

        let wrong_audience = ValidationConfig::default().audience(vec!["other-api"]);
        assert!(decode_token_with_config(&token, TEST_SECRET, &wrong_audience).is_err());
    }

    #[test]
    fn test_rejects_tampered_signature() {
        let token = encode_token(&claims(), TEST_SECRET).unwrap();
        let err = decode_token(&token, b"another-secret-0123456789").unwrap_err();
        assert!(err.is_invalid_signature());
    }

    #[test]
    fn test_rejects_expired_token() {
        let mut expired = claims();
        expired.exp = Utc::now().timestamp() - 120;
        let token = encode_token(&expired, TEST_SECRET).unwrap();
        let err = decode_token(&token, TEST_SECRET).unwrap_err();
        assert!(err.is_expired());
    }

    #[test]
    fn test_rejects_short_secret() {
        let err = encode_token(&claims(), b"short").unwrap_err();
        assert!(matches!(err, AuthError::InvalidKey(_)));
    }

    #[test]
    fn test_rejects_garbage_token() {
        assert!(decode_token("not.a.token", TEST_SECRET).is_err());
    }
}
