//! Record API for SmartRetail.
//!
//! The batch upsert reconciliation core and the entity read path:
//!
//! - [`validation`] - structural batch gate (empty batch, missing tenant)
//! - [`services::resolver`] - bulk compound-key lookup with exact re-check
//! - [`services::reconcile`] - per-record INSERT/UPDATE/CONFLICT
//!   classification under an explicit write policy
//! - [`services::records`] - transactional apply and reads
//! - [`handlers`] / [`router`] - the HTTP surface
//!
//! Batches flow validate → resolve → plan → apply; the apply phase runs in
//! one transaction, so a batch either fully commits or leaves no trace.

pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod validation;

pub use error::{ApiRecordsError, ProblemDetails};
pub use router::{records_router, RecordsState};
pub use services::{RecordService, WritePolicy};
