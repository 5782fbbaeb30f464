//! Request and response models for the Record API.

pub mod requests;
pub mod responses;
pub mod time;

pub use requests::{CustomerRecord, ProductRecord, SaleLineItem, SaleLineRecord, SaleRecord};
pub use responses::{BatchSummary, SaleSummary, SaleWithLines, StrictBatchSummary};
