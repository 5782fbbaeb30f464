//! SmartRetail database layer.
//!
//! Provides the connection pool, embedded SQL migrations, and the
//! tenant-scoped entity models (products, customers, sales, sale lines)
//! with their compound-key query surface.
//!
//! # Example
//!
//! ```rust,ignore
//! use smartretail_db::{run_migrations, DbPool};
//!
//! let pool = DbPool::connect("postgres://localhost/smartretail").await?;
//! run_migrations(&pool).await?;
//! ```

pub mod error;
pub mod migrations;
pub mod models;
pub mod pool;

pub use error::{is_foreign_key_violation, is_unique_violation, DbError};
pub use migrations::run_migrations;
pub use pool::{ping, DbPool};
