//! Customer endpoint handlers.
//!
//! - GET /customers - List all customers
//! - GET /customers/:customer_id/:store_id - Get one customer by compound key
//! - POST /customers - Batch upsert
//! - POST /customers/strict - Strict batch insert

use axum::{extract::Path, Extension, Json};
use smartretail_auth::AccessClaims;
use smartretail_core::StoreId;
use smartretail_db::models::{Customer, CustomerKey};
use std::sync::Arc;

use crate::error::ApiRecordsError;
use crate::models::{BatchSummary, CustomerRecord, StrictBatchSummary};
use crate::services::{RecordService, WritePolicy};
use crate::validation::validate_fields;

/// Lists all customers.
#[utoipa::path(
    get,
    path = "/customers",
    responses(
        (status = 200, description = "List of customers", body = [Customer]),
        (status = 401, description = "Not authenticated"),
    ),
    security(("bearerAuth" = [])),
    tag = "Customers"
)]
pub async fn list_customers_handler(
    Extension(service): Extension<Arc<RecordService>>,
) -> Result<Json<Vec<Customer>>, ApiRecordsError> {
    Ok(Json(service.list_customers().await?))
}

/// Gets one customer by its full compound key.
#[utoipa::path(
    get,
    path = "/customers/{customer_id}/{store_id}",
    params(
        ("customer_id" = i32, Path, description = "Customer identifier"),
        ("store_id" = String, Path, description = "Store (tenant) identifier"),
    ),
    responses(
        (status = 200, description = "The customer", body = Customer),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "No customer with this key"),
    ),
    security(("bearerAuth" = [])),
    tag = "Customers"
)]
pub async fn get_customer_handler(
    Extension(service): Extension<Arc<RecordService>>,
    Path((customer_id, store_id)): Path<(i32, String)>,
) -> Result<Json<Customer>, ApiRecordsError> {
    let store_id = StoreId::new(store_id)
        .map_err(|e| ApiRecordsError::Validation(e.to_string()))?;
    let key = CustomerKey {
        customer_id,
        store_id: store_id.into_inner(),
    };
    Ok(Json(service.get_customer(&key).await?))
}

/// Batch-upserts customers.
#[utoipa::path(
    post,
    path = "/customers",
    request_body = [CustomerRecord],
    responses(
        (status = 200, description = "Batch reconciled", body = BatchSummary),
        (status = 400, description = "Empty batch, missing store id, or invalid field"),
        (status = 401, description = "Not authenticated"),
    ),
    security(("bearerAuth" = [])),
    tag = "Customers"
)]
pub async fn submit_customers_handler(
    Extension(claims): Extension<AccessClaims>,
    Extension(service): Extension<Arc<RecordService>>,
    Json(records): Json<Vec<CustomerRecord>>,
) -> Result<Json<BatchSummary>, ApiRecordsError> {
    tracing::info!(user = %claims.sub, batch_size = records.len(), "Submitting customer batch");
    validate_fields(&records)?;
    let summary = service
        .submit_customers(records, WritePolicy::Upsert)
        .await?;
    Ok(Json(summary))
}

/// Strictly inserts customers, rejecting the whole batch on any existing
/// or repeated compound key.
#[utoipa::path(
    post,
    path = "/customers/strict",
    request_body = [CustomerRecord],
    responses(
        (status = 200, description = "Batch inserted", body = StrictBatchSummary),
        (status = 400, description = "Empty batch, missing store id, or invalid field"),
        (status = 401, description = "Not authenticated"),
        (status = 409, description = "A submitted key already exists"),
    ),
    security(("bearerAuth" = [])),
    tag = "Customers"
)]
pub async fn insert_customers_handler(
    Extension(claims): Extension<AccessClaims>,
    Extension(service): Extension<Arc<RecordService>>,
    Json(records): Json<Vec<CustomerRecord>>,
) -> Result<Json<StrictBatchSummary>, ApiRecordsError> {
    tracing::info!(user = %claims.sub, batch_size = records.len(), "Inserting customer batch");
    validate_fields(&records)?;
    let summary = service
        .submit_customers(records, WritePolicy::StrictInsert)
        .await?;
    Ok(Json(StrictBatchSummary {
        inserted_count: summary.inserted_count,
    }))
}
