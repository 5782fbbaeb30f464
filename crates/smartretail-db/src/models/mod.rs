//! Entity models.
//!
//! One module per entity kind. Each model carries its compound natural key
//! struct and the SQL query surface the reconciliation engine and read path
//! are built from.

pub mod customer;
pub mod product;
pub mod sale;
pub mod sale_line;

pub use customer::{Customer, CustomerKey};
pub use product::{Product, ProductKey};
pub use sale::{Sale, SaleKey};
pub use sale_line::{SaleLine, SaleLineKey};
