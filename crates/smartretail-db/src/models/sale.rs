//! Sale model.
//!
//! A sale made in one store, identified by the compound key
//! `(sale_id, store_id)`. References one customer in the same store and
//! owns zero or more sale lines, which are replaced wholesale when the
//! sale is updated.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection, PgPool};

/// Compound natural key of a sale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SaleKey {
    /// Caller-supplied sale identifier, unique within a store.
    pub sale_id: i32,
    /// Store (tenant) the sale belongs to.
    pub store_id: String,
}

impl std::fmt::Display for SaleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.sale_id, self.store_id)
    }
}

/// A sale row.
///
/// `occurred_at` is always stored and compared as UTC; input normalization
/// happens at the API boundary before a row is constructed.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Sale {
    /// Caller-supplied sale identifier, unique within a store.
    pub sale_id: i32,

    /// Store (tenant) the sale belongs to.
    pub store_id: String,

    /// When the sale happened, in UTC.
    pub occurred_at: DateTime<Utc>,

    /// Total amount of the sale.
    pub total_amount: Decimal,

    /// Customer who made the purchase, in the same store.
    pub customer_id: i32,
}

impl Sale {
    /// Returns this row's compound key.
    #[must_use]
    pub fn key(&self) -> SaleKey {
        SaleKey {
            sale_id: self.sale_id,
            store_id: self.store_id.clone(),
        }
    }

    /// List all sales across stores.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM sales
            ORDER BY store_id, sale_id
            ",
        )
        .fetch_all(pool)
        .await
    }

    /// Find one sale by its full compound key.
    pub async fn find_by_key(pool: &PgPool, key: &SaleKey) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM sales
            WHERE sale_id = $1 AND store_id = $2
            ",
        )
        .bind(key.sale_id)
        .bind(&key.store_id)
        .fetch_optional(pool)
        .await
    }

    /// Bulk-fetch candidate rows whose key components intersect the given sets.
    ///
    /// Superset query; callers must re-check full compound-key equality.
    pub async fn fetch_candidates(
        pool: &PgPool,
        sale_ids: &[i32],
        store_ids: &[String],
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM sales
            WHERE sale_id = ANY($1) AND store_id = ANY($2)
            ",
        )
        .bind(sale_ids)
        .bind(store_ids)
        .fetch_all(pool)
        .await
    }

    /// Insert this row.
    pub async fn insert(&self, conn: &mut PgConnection) -> Result<(), sqlx::Error> {
        sqlx::query(
            r"
            INSERT INTO sales (sale_id, store_id, occurred_at, total_amount, customer_id)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(self.sale_id)
        .bind(&self.store_id)
        .bind(self.occurred_at)
        .bind(self.total_amount)
        .bind(self.customer_id)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Overwrite the mutable attributes of the row with this key.
    ///
    /// The owned line set is handled separately by the reconciliation
    /// engine (deleted and re-inserted in the same transaction).
    pub async fn update(&self, conn: &mut PgConnection) -> Result<(), sqlx::Error> {
        sqlx::query(
            r"
            UPDATE sales
            SET occurred_at = $3, total_amount = $4, customer_id = $5
            WHERE sale_id = $1 AND store_id = $2
            ",
        )
        .bind(self.sale_id)
        .bind(&self.store_id)
        .bind(self.occurred_at)
        .bind(self.total_amount)
        .bind(self.customer_id)
        .execute(conn)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_occurred_at_serializes_as_utc() {
        let sale = Sale {
            sale_id: 1,
            store_id: "S1".to_string(),
            occurred_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap(),
            total_amount: Decimal::new(1998, 2),
            customer_id: 7,
        };
        let json = serde_json::to_value(&sale).unwrap();
        let raw = json["occurred_at"].as_str().unwrap();
        assert!(raw.ends_with('Z') || raw.ends_with("+00:00"), "got {raw}");
    }

    #[test]
    fn test_key_identity() {
        let key = SaleKey {
            sale_id: 1,
            store_id: "S1".to_string(),
        };
        assert_eq!(key.to_string(), "(1, S1)");
        assert_ne!(
            key,
            SaleKey {
                sale_id: 1,
                store_id: "S2".to_string()
            }
        );
    }
}
