//! Customer model.
//!
//! A customer of one store, identified by the compound key
//! `(customer_id, store_id)`. Referenced by sales; deleting a referenced
//! customer is rejected by the schema.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection, PgPool};

/// Compound natural key of a customer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomerKey {
    /// Caller-supplied customer identifier, unique within a store.
    pub customer_id: i32,
    /// Store (tenant) the customer belongs to.
    pub store_id: String,
}

impl std::fmt::Display for CustomerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.customer_id, self.store_id)
    }
}

/// A customer row.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Customer {
    /// Caller-supplied customer identifier, unique within a store.
    pub customer_id: i32,

    /// Store (tenant) the customer belongs to.
    pub store_id: String,

    /// Full name.
    pub name: String,

    /// Contact email, if known.
    pub email: Option<String>,

    /// Contact phone, if known.
    pub phone: Option<String>,
}

impl Customer {
    /// Returns this row's compound key.
    #[must_use]
    pub fn key(&self) -> CustomerKey {
        CustomerKey {
            customer_id: self.customer_id,
            store_id: self.store_id.clone(),
        }
    }

    /// List all customers across stores.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM customers
            ORDER BY store_id, customer_id
            ",
        )
        .fetch_all(pool)
        .await
    }

    /// Find one customer by its full compound key.
    pub async fn find_by_key(
        pool: &PgPool,
        key: &CustomerKey,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM customers
            WHERE customer_id = $1 AND store_id = $2
            ",
        )
        .bind(key.customer_id)
        .bind(&key.store_id)
        .fetch_optional(pool)
        .await
    }

    /// Bulk-fetch candidate rows whose key components intersect the given sets.
    ///
    /// Superset query; callers must re-check full compound-key equality.
    pub async fn fetch_candidates(
        pool: &PgPool,
        customer_ids: &[i32],
        store_ids: &[String],
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM customers
            WHERE customer_id = ANY($1) AND store_id = ANY($2)
            ",
        )
        .bind(customer_ids)
        .bind(store_ids)
        .fetch_all(pool)
        .await
    }

    /// Insert this row.
    pub async fn insert(&self, conn: &mut PgConnection) -> Result<(), sqlx::Error> {
        sqlx::query(
            r"
            INSERT INTO customers (customer_id, store_id, name, email, phone)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(self.customer_id)
        .bind(&self.store_id)
        .bind(&self.name)
        .bind(&self.email)
        .bind(&self.phone)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Overwrite the mutable attributes of the row with this key.
    pub async fn update(&self, conn: &mut PgConnection) -> Result<(), sqlx::Error> {
        sqlx::query(
            r"
            UPDATE customers
            SET name = $3, email = $4, phone = $5
            WHERE customer_id = $1 AND store_id = $2
            ",
        )
        .bind(self.customer_id)
        .bind(&self.store_id)
        .bind(&self.name)
        .bind(&self.email)
        .bind(&self.phone)
        .execute(conn)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_contact_fields_serialize_as_null() {
        let customer = Customer {
            customer_id: 7,
            store_id: "S1".to_string(),
            name: "Ana".to_string(),
            email: None,
            phone: None,
        };
        let json = serde_json::to_value(&customer).unwrap();
        assert!(json["email"].is_null());
        assert!(json["phone"].is_null());
    }

    #[test]
    fn test_key_round_trip() {
        let customer = Customer {
            customer_id: 7,
            store_id: "S1".to_string(),
            name: "Ana".to_string(),
            email: Some("ana@example.com".to_string()),
            phone: None,
        };
        assert_eq!(
            customer.key(),
            CustomerKey {
                customer_id: 7,
                store_id: "S1".to_string()
            }
        );
    }
}
