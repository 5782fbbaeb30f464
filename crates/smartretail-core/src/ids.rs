//! Strongly Typed Store Identifier
//!
//! Every SmartRetail entity is partitioned by the store (tenant) it belongs
//! to. `StoreId` wraps the raw string so that an empty tenant key can never
//! be constructed, and so that store identifiers cannot be confused with
//! other string fields at compile time.
//!
//! # Example
//!
//! ```
//! use smartretail_core::StoreId;
//!
//! let store: StoreId = "tienda-01".parse().unwrap();
//! assert_eq!(store.as_str(), "tienda-01");
//!
//! // An empty tenant key is rejected at construction
//! assert!("".parse::<StoreId>().is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Error type for store identifier parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid store id: {reason}")]
pub struct ParseStoreIdError {
    /// Why the value was rejected.
    pub reason: &'static str,
}

/// A store (tenant) identifier.
///
/// Non-empty by construction. It is part of every entity's compound key
/// and is never inferred or defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreId(String);

impl StoreId {
    /// Creates a store id from a raw string, rejecting empty values.
    pub fn new(raw: impl Into<String>) -> Result<Self, ParseStoreIdError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(ParseStoreIdError {
                reason: "store id must not be empty",
            });
        }
        Ok(Self(raw))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the id and returns the underlying string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for StoreId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StoreId {
    type Err = ParseStoreIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for StoreId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_non_empty_id() {
        let id = StoreId::new("S1").unwrap();
        assert_eq!(id.as_str(), "S1");
        assert_eq!(id.to_string(), "S1");
    }

    #[test]
    fn test_rejects_empty_id() {
        assert!(StoreId::new("").is_err());
        assert!(StoreId::new("   ").is_err());
    }

    #[test]
    fn test_parse_from_str() {
        let id: StoreId = "tienda-7".parse().unwrap();
        assert_eq!(id.as_str(), "tienda-7");
    }

    #[test]
    fn test_serde_transparent() {
        let id = StoreId::new("S1").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"S1\"");
    }

    #[test]
    fn test_equality_and_hash_by_value() {
        use std::collections::HashSet;
        let a = StoreId::new("S1").unwrap();
        let b = StoreId::new("S1").unwrap();
        assert_eq!(a, b);
        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }
}
