//! Request handlers for the Record API.
//!
//! Glob re-exports keep the utoipa-generated path items visible to the
//! application's OpenAPI document.

mod customers;
mod products;
mod sale_lines;
mod sales;

pub use customers::*;
pub use products::*;
pub use sale_lines::*;
pub use sales::*;
