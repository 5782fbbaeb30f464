//! Compound-key resolution.
//!
//! Given a validated batch, fetches every existing row the batch could
//! collide with in ONE bulk query per entity kind, then builds an exact
//! compound-key index. The bulk query is a candidate superset — it matches
//! rows whose key *components* each appear somewhere in the batch, not
//! necessarily together — so candidates are re-checked for full key
//! equality before they enter the index.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::hash::Hash;

use smartretail_db::models::{
    Customer, CustomerKey, Product, ProductKey, Sale, SaleKey, SaleLine, SaleLineKey,
};
use sqlx::PgPool;

use crate::models::{CustomerRecord, ProductRecord, SaleLineRecord, SaleRecord};

/// Exact compound-key lookup structure over existing rows.
#[derive(Debug)]
pub struct KeyIndex<K, R> {
    rows: HashMap<K, R>,
}

impl<K: Eq + Hash, R> KeyIndex<K, R> {
    /// An index with no rows.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            rows: HashMap::new(),
        }
    }

    /// Build an index from bulk-fetched candidates, keeping only those
    /// whose full compound key was actually requested.
    pub fn from_candidates(
        candidates: Vec<R>,
        requested: &HashSet<K>,
        key_of: impl Fn(&R) -> K,
    ) -> Self {
        let mut rows = HashMap::new();
        for candidate in candidates {
            let key = key_of(&candidate);
            if requested.contains(&key) {
                rows.insert(key, candidate);
            }
        }
        Self { rows }
    }

    /// True if an existing row shares this compound key.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.rows.contains_key(key)
    }

    /// The existing row with this compound key, if any.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&R> {
        self.rows.get(key)
    }

    /// Number of existing rows the batch collides with.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the batch collides with no existing row.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Resolve existing products colliding with the batch.
pub async fn resolve_products(
    pool: &PgPool,
    records: &[ProductRecord],
) -> Result<KeyIndex<ProductKey, Product>, sqlx::Error> {
    let requested: HashSet<ProductKey> = records.iter().map(ProductRecord::key).collect();
    let product_ids: Vec<i32> = records
        .iter()
        .map(|r| r.product_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let store_ids: Vec<String> = records
        .iter()
        .map(|r| r.store_id.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let candidates = Product::fetch_candidates(pool, &product_ids, &store_ids).await?;
    Ok(KeyIndex::from_candidates(
        candidates,
        &requested,
        Product::key,
    ))
}

/// Resolve existing customers colliding with the batch.
pub async fn resolve_customers(
    pool: &PgPool,
    records: &[CustomerRecord],
) -> Result<KeyIndex<CustomerKey, Customer>, sqlx::Error> {
    let requested: HashSet<CustomerKey> = records.iter().map(CustomerRecord::key).collect();
    let customer_ids: Vec<i32> = records
        .iter()
        .map(|r| r.customer_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let store_ids: Vec<String> = records
        .iter()
        .map(|r| r.store_id.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let candidates = Customer::fetch_candidates(pool, &customer_ids, &store_ids).await?;
    Ok(KeyIndex::from_candidates(
        candidates,
        &requested,
        Customer::key,
    ))
}

/// Resolve existing sales colliding with the batch.
pub async fn resolve_sales(
    pool: &PgPool,
    records: &[SaleRecord],
) -> Result<KeyIndex<SaleKey, Sale>, sqlx::Error> {
    let requested: HashSet<SaleKey> = records.iter().map(SaleRecord::key).collect();
    let sale_ids: Vec<i32> = records
        .iter()
        .map(|r| r.sale_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let store_ids: Vec<String> = records
        .iter()
        .map(|r| r.store_id.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let candidates = Sale::fetch_candidates(pool, &sale_ids, &store_ids).await?;
    Ok(KeyIndex::from_candidates(candidates, &requested, Sale::key))
}

/// Resolve existing sale lines colliding with the batch.
pub async fn resolve_sale_lines(
    pool: &PgPool,
    records: &[SaleLineRecord],
) -> Result<KeyIndex<SaleLineKey, SaleLine>, sqlx::Error> {
    let requested: HashSet<SaleLineKey> = records.iter().map(SaleLineRecord::key).collect();
    let sale_ids: Vec<i32> = records
        .iter()
        .map(|r| r.sale_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let product_ids: Vec<i32> = records
        .iter()
        .map(|r| r.product_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let store_ids: Vec<String> = records
        .iter()
        .map(|r| r.store_id.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let candidates =
        SaleLine::fetch_candidates(pool, &sale_ids, &product_ids, &store_ids).await?;
    Ok(KeyIndex::from_candidates(
        candidates,
        &requested,
        SaleLine::key,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn product(product_id: i32, store_id: &str) -> Product {
        Product {
            product_id,
            store_id: store_id.to_string(),
            name: format!("P{product_id}"),
            unit_price: Decimal::ONE,
            stock_quantity: 1,
        }
    }

    fn key(product_id: i32, store_id: &str) -> ProductKey {
        ProductKey {
            product_id,
            store_id: store_id.to_string(),
        }
    }

    #[test]
    fn test_candidate_matching_on_key_subset_is_dropped() {
        // Batch references (1, S1) and (2, S2). The bulk query would also
        // return (1, S2) and (2, S1): ids and stores both intersect, but
        // the full keys were never requested.
        let requested: HashSet<ProductKey> = [key(1, "S1"), key(2, "S2")].into_iter().collect();
        let candidates = vec![
            product(1, "S1"),
            product(1, "S2"),
            product(2, "S1"),
            product(2, "S2"),
        ];

        let index = KeyIndex::from_candidates(candidates, &requested, Product::key);

        assert_eq!(index.len(), 2);
        assert!(index.contains(&key(1, "S1")));
        assert!(index.contains(&key(2, "S2")));
        assert!(!index.contains(&key(1, "S2")));
        assert!(!index.contains(&key(2, "S1")));
    }

    #[test]
    fn test_empty_candidates_make_empty_index() {
        let requested: HashSet<ProductKey> = [key(1, "S1")].into_iter().collect();
        let index = KeyIndex::from_candidates(Vec::new(), &requested, Product::key);
        assert!(index.is_empty());
    }

    #[test]
    fn test_get_returns_the_existing_row() {
        let requested: HashSet<ProductKey> = [key(1, "S1")].into_iter().collect();
        let index = KeyIndex::from_candidates(vec![product(1, "S1")], &requested, Product::key);
        assert_eq!(index.get(&key(1, "S1")).unwrap().name, "P1");
        assert!(index.get(&key(9, "S1")).is_none());
    }
}
