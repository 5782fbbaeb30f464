//! Incoming batch record models.
//!
//! Wire-level records for batch submission. Relationships are carried as
//! key fields only — a record never embeds a parent or sibling object, so
//! a stale navigation reference can never be mistaken for a new row to
//! insert. Lines embedded in a sale inherit the sale's identity; they
//! carry no `sale_id` or `store_id` of their own.

use crate::models::time::deserialize_utc;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use smartretail_core::StoreScoped;
use smartretail_db::models::{
    Customer, CustomerKey, Product, ProductKey, Sale, SaleKey, SaleLine, SaleLineKey,
};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Custom validator: decimal amounts must not be negative.
fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        let mut err = ValidationError::new("non_negative");
        err.message = Some("must be non-negative".into());
        return Err(err);
    }
    Ok(())
}

/// One product record in a batch submission.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ProductRecord {
    /// Caller-supplied product identifier.
    pub product_id: i32,
    /// Store (tenant) the product belongs to.
    pub store_id: String,
    /// Display name.
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    /// Unit price, non-negative.
    #[validate(custom(function = "non_negative"))]
    pub unit_price: Decimal,
    /// Units in stock, non-negative.
    #[validate(range(min = 0, message = "stock_quantity must be non-negative"))]
    pub stock_quantity: i32,
}

impl ProductRecord {
    /// Compound key of this record.
    #[must_use]
    pub fn key(&self) -> ProductKey {
        ProductKey {
            product_id: self.product_id,
            store_id: self.store_id.clone(),
        }
    }

    /// Convert into a row ready for staging.
    #[must_use]
    pub fn into_row(self) -> Product {
        Product {
            product_id: self.product_id,
            store_id: self.store_id,
            name: self.name,
            unit_price: self.unit_price,
            stock_quantity: self.stock_quantity,
        }
    }
}

impl StoreScoped for ProductRecord {
    fn store_id(&self) -> &str {
        &self.store_id
    }
}

/// One customer record in a batch submission.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CustomerRecord {
    /// Caller-supplied customer identifier.
    pub customer_id: i32,
    /// Store (tenant) the customer belongs to.
    pub store_id: String,
    /// Full name.
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    /// Contact email, if known.
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
    /// Contact phone, if known.
    pub phone: Option<String>,
}

impl CustomerRecord {
    /// Compound key of this record.
    #[must_use]
    pub fn key(&self) -> CustomerKey {
        CustomerKey {
            customer_id: self.customer_id,
            store_id: self.store_id.clone(),
        }
    }

    /// Convert into a row ready for staging.
    #[must_use]
    pub fn into_row(self) -> Customer {
        Customer {
            customer_id: self.customer_id,
            store_id: self.store_id,
            name: self.name,
            email: self.email,
            phone: self.phone,
        }
    }
}

impl StoreScoped for CustomerRecord {
    fn store_id(&self) -> &str {
        &self.store_id
    }
}

/// One line embedded in a sale record.
///
/// Inherits `sale_id` and `store_id` from the owning sale.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SaleLineItem {
    /// Product sold on this line.
    pub product_id: i32,
    /// Units sold, strictly positive.
    #[validate(range(min = 1, message = "quantity must be positive"))]
    pub quantity: i32,
    /// Subtotal for this line.
    #[validate(custom(function = "non_negative"))]
    pub subtotal: Decimal,
}

/// One sale record in a batch submission, with its owned lines.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SaleRecord {
    /// Caller-supplied sale identifier.
    pub sale_id: i32,
    /// Store (tenant) the sale belongs to.
    pub store_id: String,
    /// When the sale happened. Normalized to UTC on arrival.
    #[serde(deserialize_with = "deserialize_utc")]
    #[schema(value_type = String, format = DateTime)]
    pub occurred_at: DateTime<Utc>,
    /// Total amount of the sale.
    #[validate(custom(function = "non_negative"))]
    pub total_amount: Decimal,
    /// Customer who made the purchase, in the same store.
    pub customer_id: i32,
    /// Lines of this sale. Replaces the stored line set wholesale when
    /// the sale already exists.
    #[serde(default)]
    #[validate(nested)]
    pub lines: Vec<SaleLineItem>,
}

impl SaleRecord {
    /// Compound key of this record.
    #[must_use]
    pub fn key(&self) -> SaleKey {
        SaleKey {
            sale_id: self.sale_id,
            store_id: self.store_id.clone(),
        }
    }

    /// Convert into a sale row plus its line rows, stamping each line
    /// with the sale's identity.
    #[must_use]
    pub fn into_rows(self) -> (Sale, Vec<SaleLine>) {
        let lines = self
            .lines
            .iter()
            .map(|line| SaleLine {
                sale_id: self.sale_id,
                product_id: line.product_id,
                store_id: self.store_id.clone(),
                quantity: line.quantity,
                subtotal: line.subtotal,
            })
            .collect();
        let sale = Sale {
            sale_id: self.sale_id,
            store_id: self.store_id,
            occurred_at: self.occurred_at,
            total_amount: self.total_amount,
            customer_id: self.customer_id,
        };
        (sale, lines)
    }
}

impl StoreScoped for SaleRecord {
    fn store_id(&self) -> &str {
        &self.store_id
    }
}

/// One standalone sale line record in a batch submission.
///
/// Used by the `/sale-lines` endpoints; references its sale and product
/// by key.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SaleLineRecord {
    /// Sale this line belongs to.
    pub sale_id: i32,
    /// Product sold on this line.
    pub product_id: i32,
    /// Store (tenant) the line belongs to.
    pub store_id: String,
    /// Units sold, strictly positive.
    #[validate(range(min = 1, message = "quantity must be positive"))]
    pub quantity: i32,
    /// Subtotal for this line.
    #[validate(custom(function = "non_negative"))]
    pub subtotal: Decimal,
}

impl SaleLineRecord {
    /// Compound key of this record.
    #[must_use]
    pub fn key(&self) -> SaleLineKey {
        SaleLineKey {
            sale_id: self.sale_id,
            product_id: self.product_id,
            store_id: self.store_id.clone(),
        }
    }

    /// Convert into a row ready for staging.
    #[must_use]
    pub fn into_row(self) -> SaleLine {
        SaleLine {
            sale_id: self.sale_id,
            product_id: self.product_id,
            store_id: self.store_id,
            quantity: self.quantity,
            subtotal: self.subtotal,
        }
    }
}

impl StoreScoped for SaleLineRecord {
    fn store_id(&self) -> &str {
        &self.store_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_negative_price_fails_validation() {
        let record = ProductRecord {
            product_id: 1,
            store_id: "S1".to_string(),
            name: "Widget".to_string(),
            unit_price: Decimal::new(-1, 0),
            stock_quantity: 0,
        };
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_zero_quantity_line_fails_validation() {
        let record = SaleLineRecord {
            sale_id: 1,
            product_id: 2,
            store_id: "S1".to_string(),
            quantity: 0,
            subtotal: Decimal::ZERO,
        };
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_embedded_line_validation_is_nested() {
        let record = SaleRecord {
            sale_id: 1,
            store_id: "S1".to_string(),
            occurred_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
            total_amount: Decimal::new(999, 2),
            customer_id: 7,
            lines: vec![SaleLineItem {
                product_id: 2,
                quantity: 0,
                subtotal: Decimal::ZERO,
            }],
        };
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_sale_record_stamps_line_identity() {
        let record = SaleRecord {
            sale_id: 10,
            store_id: "S1".to_string(),
            occurred_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
            total_amount: Decimal::new(999, 2),
            customer_id: 7,
            lines: vec![SaleLineItem {
                product_id: 2,
                quantity: 3,
                subtotal: Decimal::new(999, 2),
            }],
        };
        let (sale, lines) = record.into_rows();
        assert_eq!(sale.sale_id, 10);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].sale_id, 10);
        assert_eq!(lines[0].store_id, "S1");
    }

    #[test]
    fn test_sale_record_deserializes_offset_timestamp_to_utc() {
        let json = r#"{
            "sale_id": 1,
            "store_id": "S1",
            "occurred_at": "2024-06-01T14:30:00+02:00",
            "total_amount": "19.98",
            "customer_id": 7,
            "lines": []
        }"#;
        let record: SaleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(
            record.occurred_at,
            Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap()
        );
    }
}
