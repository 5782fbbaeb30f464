//! SmartRetail Core Library
//!
//! Shared types for SmartRetail services.
//!
//! # Modules
//!
//! - [`ids`] - The `StoreId` tenant identifier
//! - [`traits`] - Multi-tenant traits (`StoreScoped`)
//!
//! # Example
//!
//! ```
//! use smartretail_core::{StoreId, StoreScoped};
//!
//! let store: StoreId = "S1".parse().unwrap();
//! assert_eq!(store.as_str(), "S1");
//! ```

pub mod ids;
pub mod traits;

pub use ids::{ParseStoreIdError, StoreId};
pub use traits::StoreScoped;
