//! Multi-Tenant Traits
//!
//! # Example
//!
//! ```
//! use smartretail_core::{StoreId, StoreScoped};
//!
//! struct Product {
//!     product_id: i32,
//!     store_id: String,
//! }
//!
//! impl StoreScoped for Product {
//!     fn store_id(&self) -> &str {
//!         &self.store_id
//!     }
//! }
//!
//! // Generic code can validate the tenant key without knowing the entity kind
//! fn has_tenant<T: StoreScoped>(entity: &T) -> bool {
//!     StoreId::new(entity.store_id()).is_ok()
//! }
//! ```

use crate::ids::StoreId;

/// Trait for entities that belong to a specific store (tenant).
///
/// Implementing this trait marks an entity as store-scoped, enabling
/// generic code (validation, key extraction) to read the tenant key
/// without knowing the concrete entity kind. The raw string is exposed
/// rather than a [`StoreId`] because wire-level records carry unvalidated
/// tenant keys; [`StoreId::new`] is the validation point.
pub trait StoreScoped {
    /// Returns the raw store id this entity belongs to.
    fn store_id(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestEntity {
        store_id: String,
    }

    impl StoreScoped for TestEntity {
        fn store_id(&self) -> &str {
            &self.store_id
        }
    }

    #[test]
    fn test_store_scoped_returns_store() {
        let entity = TestEntity {
            store_id: "S1".to_string(),
        };
        assert_eq!(entity.store_id(), "S1");
        assert!(StoreId::new(entity.store_id()).is_ok());
    }
}
