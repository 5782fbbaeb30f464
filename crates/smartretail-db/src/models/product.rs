//! Product model.
//!
//! A product offered by one store, identified by the compound key
//! `(product_id, store_id)`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection, PgPool};

/// Compound natural key of a product.
///
/// Value equality across all fields; used as the map key in batch
/// reconciliation lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductKey {
    /// Caller-supplied product identifier, unique within a store.
    pub product_id: i32,
    /// Store (tenant) the product belongs to.
    pub store_id: String,
}

impl std::fmt::Display for ProductKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.product_id, self.store_id)
    }
}

/// A product row.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Product {
    /// Caller-supplied product identifier, unique within a store.
    pub product_id: i32,

    /// Store (tenant) the product belongs to.
    pub store_id: String,

    /// Display name.
    pub name: String,

    /// Unit price, non-negative.
    pub unit_price: Decimal,

    /// Units in stock, non-negative.
    pub stock_quantity: i32,
}

impl Product {
    /// Returns this row's compound key.
    #[must_use]
    pub fn key(&self) -> ProductKey {
        ProductKey {
            product_id: self.product_id,
            store_id: self.store_id.clone(),
        }
    }

    /// List all products across stores.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM products
            ORDER BY store_id, product_id
            ",
        )
        .fetch_all(pool)
        .await
    }

    /// Find one product by its full compound key.
    pub async fn find_by_key(pool: &PgPool, key: &ProductKey) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM products
            WHERE product_id = $1 AND store_id = $2
            ",
        )
        .bind(key.product_id)
        .bind(&key.store_id)
        .fetch_optional(pool)
        .await
    }

    /// Bulk-fetch candidate rows whose key components intersect the given sets.
    ///
    /// This is a superset query: a returned row matches *some* product id and
    /// *some* store id from the batch, not necessarily the same record.
    /// Callers must re-check full compound-key equality.
    pub async fn fetch_candidates(
        pool: &PgPool,
        product_ids: &[i32],
        store_ids: &[String],
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM products
            WHERE product_id = ANY($1) AND store_id = ANY($2)
            ",
        )
        .bind(product_ids)
        .bind(store_ids)
        .fetch_all(pool)
        .await
    }

    /// Insert this row.
    pub async fn insert(&self, conn: &mut PgConnection) -> Result<(), sqlx::Error> {
        sqlx::query(
            r"
            INSERT INTO products (product_id, store_id, name, unit_price, stock_quantity)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(self.product_id)
        .bind(&self.store_id)
        .bind(&self.name)
        .bind(self.unit_price)
        .bind(self.stock_quantity)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Overwrite the mutable attributes of the row with this key.
    ///
    /// Identity fields are never rewritten.
    pub async fn update(&self, conn: &mut PgConnection) -> Result<(), sqlx::Error> {
        sqlx::query(
            r"
            UPDATE products
            SET name = $3, unit_price = $4, stock_quantity = $5
            WHERE product_id = $1 AND store_id = $2
            ",
        )
        .bind(self.product_id)
        .bind(&self.store_id)
        .bind(&self.name)
        .bind(self.unit_price)
        .bind(self.stock_quantity)
        .execute(conn)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn widget() -> Product {
        Product {
            product_id: 1,
            store_id: "S1".to_string(),
            name: "Widget".to_string(),
            unit_price: Decimal::new(999, 2),
            stock_quantity: 10,
        }
    }

    #[test]
    fn test_key_equality_is_by_value() {
        let a = widget().key();
        let b = ProductKey {
            product_id: 1,
            store_id: "S1".to_string(),
        };
        assert_eq!(a, b);
    }

    #[test]
    fn test_same_id_different_store_is_a_different_key() {
        let a = widget().key();
        let b = ProductKey {
            product_id: 1,
            store_id: "S2".to_string(),
        };
        assert_ne!(a, b);

        let mut index = HashMap::new();
        index.insert(a, widget());
        assert!(!index.contains_key(&b));
    }

    #[test]
    fn test_key_display() {
        assert_eq!(widget().key().to_string(), "(1, S1)");
    }
}
