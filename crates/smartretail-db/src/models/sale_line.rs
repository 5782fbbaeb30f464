//! Sale line model.
//!
//! One line of a sale: a product, a quantity, and the corresponding
//! subtotal. Identified by the compound key `(sale_id, product_id,
//! store_id)`; owned by the sale with the matching `(sale_id, store_id)`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection, PgPool};

use crate::models::sale::SaleKey;

/// Compound natural key of a sale line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SaleLineKey {
    /// Sale this line belongs to.
    pub sale_id: i32,
    /// Product sold on this line.
    pub product_id: i32,
    /// Store (tenant) the line belongs to.
    pub store_id: String,
}

impl std::fmt::Display for SaleLineKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.sale_id, self.product_id, self.store_id)
    }
}

/// A sale line row.
///
/// Relationships are carried as key fields only; there is no embedded
/// sale or product object that could be mistaken for a new row to insert.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SaleLine {
    /// Sale this line belongs to.
    pub sale_id: i32,

    /// Product sold on this line.
    pub product_id: i32,

    /// Store (tenant) the line belongs to.
    pub store_id: String,

    /// Units sold, strictly positive.
    pub quantity: i32,

    /// Subtotal for this line.
    pub subtotal: Decimal,
}

impl SaleLine {
    /// Returns this row's compound key.
    #[must_use]
    pub fn key(&self) -> SaleLineKey {
        SaleLineKey {
            sale_id: self.sale_id,
            product_id: self.product_id,
            store_id: self.store_id.clone(),
        }
    }

    /// Returns the key of the sale that owns this line.
    #[must_use]
    pub fn sale_key(&self) -> SaleKey {
        SaleKey {
            sale_id: self.sale_id,
            store_id: self.store_id.clone(),
        }
    }

    /// List all sale lines across stores.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM sale_lines
            ORDER BY store_id, sale_id, product_id
            ",
        )
        .fetch_all(pool)
        .await
    }

    /// Find one line by its full compound key.
    pub async fn find_by_key(
        pool: &PgPool,
        key: &SaleLineKey,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM sale_lines
            WHERE sale_id = $1 AND product_id = $2 AND store_id = $3
            ",
        )
        .bind(key.sale_id)
        .bind(key.product_id)
        .bind(&key.store_id)
        .fetch_optional(pool)
        .await
    }

    /// Bulk-fetch candidate rows whose key components intersect the given sets.
    ///
    /// Superset query across three key fields; callers must re-check full
    /// compound-key equality.
    pub async fn fetch_candidates(
        pool: &PgPool,
        sale_ids: &[i32],
        product_ids: &[i32],
        store_ids: &[String],
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM sale_lines
            WHERE sale_id = ANY($1) AND product_id = ANY($2) AND store_id = ANY($3)
            ",
        )
        .bind(sale_ids)
        .bind(product_ids)
        .bind(store_ids)
        .fetch_all(pool)
        .await
    }

    /// Fetch the lines owned by any of the given sales.
    ///
    /// Superset query on (sale_id, store_id); callers group by exact
    /// owning-sale key.
    pub async fn list_for_sales(
        pool: &PgPool,
        sale_ids: &[i32],
        store_ids: &[String],
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM sale_lines
            WHERE sale_id = ANY($1) AND store_id = ANY($2)
            ORDER BY sale_id, product_id
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
            INSERT INTO sale_lines (sale_id, product_id, store_id, quantity, subtotal)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(self.sale_id)
        .bind(self.product_id)
        .bind(&self.store_id)
        .bind(self.quantity)
        .bind(self.subtotal)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Overwrite the mutable attributes of the row with this key.
    pub async fn update(&self, conn: &mut PgConnection) -> Result<(), sqlx::Error> {
        sqlx::query(
            r"
            UPDATE sale_lines
            SET quantity = $4, subtotal = $5
            WHERE sale_id = $1 AND product_id = $2 AND store_id = $3
            ",
        )
        .bind(self.sale_id)
        .bind(self.product_id)
        .bind(&self.store_id)
        .bind(self.quantity)
        .bind(self.subtotal)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Delete every line owned by the given sale.
    ///
    /// Used by the reconciliation engine when a sale update replaces its
    /// line set wholesale. Returns the number of deleted rows.
    pub async fn delete_for_sale(conn: &mut PgConnection, sale: &SaleKey) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r"
            DELETE FROM sale_lines
            WHERE sale_id = $1 AND store_id = $2
            ",
        )
        .bind(sale.sale_id)
        .bind(&sale.store_id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> SaleLine {
        SaleLine {
            sale_id: 1,
            product_id: 2,
            store_id: "S1".to_string(),
            quantity: 3,
            subtotal: Decimal::new(2997, 2),
        }
    }

    #[test]
    fn test_line_key_includes_all_three_fields() {
        let key = line().key();
        assert_eq!(
            key,
            SaleLineKey {
                sale_id: 1,
                product_id: 2,
                store_id: "S1".to_string()
            }
        );
        assert_ne!(
            key,
            SaleLineKey {
                sale_id: 1,
                product_id: 3,
                store_id: "S1".to_string()
            }
        );
    }

    #[test]
    fn test_sale_key_projects_owning_sale() {
        assert_eq!(
            line().sale_key(),
            SaleKey {
                sale_id: 1,
                store_id: "S1".to_string()
            }
        );
    }
}
