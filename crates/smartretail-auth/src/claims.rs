//! JWT claims structure.
//!
//! Provides the `AccessClaims` struct carrying the RFC 7519 standard claims
//! this system uses. The authenticated username is the sole subject claim;
//! there is no role or tenant claim — tenant scoping is carried by the
//! records themselves, not by the credential.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

/// Claims carried by a SmartRetail access token.
///
/// # Example
///
/// ```
/// use smartretail_auth::AccessClaims;
///
/// let claims = AccessClaims::builder()
///     .subject("admin")
///     .issuer("smartretail")
///     .audience(vec!["smartretail-api"])
///     .expires_in_minutes(60)
///     .build();
///
/// assert_eq!(claims.sub, "admin");
/// assert!(!claims.is_expired());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessClaims {
    /// Subject - the authenticated username.
    pub sub: String,

    /// Issuer - who created the token.
    pub iss: String,

    /// Audience - intended recipients.
    #[serde(default)]
    pub aud: Vec<String>,

    /// Expiration time as Unix timestamp.
    pub exp: i64,

    /// Issued at as Unix timestamp.
    pub iat: i64,
}

impl AccessClaims {
    /// Creates a builder for constructing claims.
    #[must_use]
    pub fn builder() -> AccessClaimsBuilder {
        AccessClaimsBuilder::default()
    }

    /// Returns true if the token expiry is in the past.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.exp < Utc::now().timestamp()
    }
}

/// Builder for [`AccessClaims`].
#[derive(Debug, Default)]
pub struct AccessClaimsBuilder {
    sub: Option<String>,
    iss: Option<String>,
    aud: Vec<String>,
    expires_in: Option<Duration>,
}

impl AccessClaimsBuilder {
    /// Set the subject (username).
    #[must_use]
    pub fn subject(mut self, sub: impl Into<String>) -> Self {
        self.sub = Some(sub.into());
        self
    }

    /// Set the issuer.
    #[must_use]
    pub fn issuer(mut self, iss: impl Into<String>) -> Self {
        self.iss = Some(iss.into());
        self
    }

    /// Set the audience.
    #[must_use]
    pub fn audience(mut self, aud: Vec<impl Into<String>>) -> Self {
        self.aud = aud.into_iter().map(Into::into).collect();
        self
    }

    /// Set the token lifetime in minutes.
    #[must_use]
    pub fn expires_in_minutes(mut self, minutes: i64) -> Self {
        self.expires_in = Some(Duration::minutes(minutes));
        self
    }

    /// Set the token lifetime in seconds.
    #[must_use]
    pub fn expires_in_secs(mut self, secs: i64) -> Self {
        self.expires_in = Some(Duration::seconds(secs));
        self
    }

    /// Build the claims, stamping `iat` with the current time.
    ///
    /// Missing fields default to empty strings / empty audience and a
    /// one-hour lifetime.
    #[must_use]
    pub fn build(self) -> AccessClaims {
        let now = Utc::now();
        let lifetime = self.expires_in.unwrap_or_else(|| Duration::hours(1));
        AccessClaims {
            sub: self.sub.unwrap_or_default(),
            iss: self.iss.unwrap_or_default(),
            aud: self.aud,
            exp: (now + lifetime).timestamp(),
            iat: now.timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_all_fields() {
        let claims = AccessClaims::builder()
            .subject("admin")
            .issuer("smartretail")
            .audience(vec!["smartretail-api"])
            .expires_in_minutes(30)
            .build();

        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.iss, "smartretail");
        assert_eq!(claims.aud, vec!["smartretail-api".to_string()]);
        assert!(claims.exp > claims.iat);
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_fresh_token_is_not_expired() {
        let claims = AccessClaims::builder()
            .subject("admin")
            .expires_in_secs(60)
            .build();
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_past_expiry_is_expired() {
        let mut claims = AccessClaims::builder().subject("admin").build();
        claims.exp = Utc::now().timestamp() - 10;
        assert!(claims.is_expired());
    }

    #[test]
    fn test_claims_serde_round_trip() {
        let claims = AccessClaims::builder()
            .subject("admin")
            .issuer("smartretail")
            .audience(vec!["smartretail-api"])
            .build();
        let json = serde_json::to_string(&claims).unwrap();
        let back: AccessClaims = serde_json::from_str(&json).unwrap();
        assert_eq!(claims, back);
    }
}
