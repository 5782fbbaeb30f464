//! Sale line endpoint handlers.
//!
//! - GET /sale-lines - List all sale lines
//! - GET /sale-lines/:sale_id/:product_id/:store_id - Get one line
//! - POST /sale-lines - Batch upsert
//! - POST /sale-lines/strict - Strict batch insert

use axum::{extract::Path, Extension, Json};
use smartretail_auth::AccessClaims;
use smartretail_core::StoreId;
use smartretail_db::models::{SaleLine, SaleLineKey};
use std::sync::Arc;

use crate::error::ApiRecordsError;
use crate::models::{BatchSummary, SaleLineRecord, StrictBatchSummary};
use crate::services::{RecordService, WritePolicy};
use crate::validation::validate_fields;

/// Lists all sale lines.
#[utoipa::path(
    get,
    path = "/sale-lines",
    responses(
        (status = 200, description = "List of sale lines", body = [SaleLine]),
        (status = 401, description = "Not authenticated"),
    ),
    security(("bearerAuth" = [])),
    tag = "SaleLines"
)]
pub async fn list_sale_lines_handler(
    Extension(service): Extension<Arc<RecordService>>,
) -> Result<Json<Vec<SaleLine>>, ApiRecordsError> {
    Ok(Json(service.list_sale_lines().await?))
}

/// Gets one sale line by its full compound key.
#[utoipa::path(
    get,
    path = "/sale-lines/{sale_id}/{product_id}/{store_id}",
    params(
        ("sale_id" = i32, Path, description = "Sale identifier"),
        ("product_id" = i32, Path, description = "Product identifier"),
        ("store_id" = String, Path, description = "Store (tenant) identifier"),
    ),
    responses(
        (status = 200, description = "The sale line", body = SaleLine),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "No sale line with this key"),
    ),
    security(("bearerAuth" = [])),
    tag = "SaleLines"
)]
pub async fn get_sale_line_handler(
    Extension(service): Extension<Arc<RecordService>>,
    Path((sale_id, product_id, store_id)): Path<(i32, i32, String)>,
) -> Result<Json<SaleLine>, ApiRecordsError> {
    let store_id = StoreId::new(store_id)
        .map_err(|e| ApiRecordsError::Validation(e.to_string()))?;
    let key = SaleLineKey {
        sale_id,
        product_id,
        store_id: store_id.into_inner(),
    };
    Ok(Json(service.get_sale_line(&key).await?))
}

/// Batch-upserts standalone sale lines.
///
/// Every line must reference an existing sale and product in its store;
/// a dangling reference rejects the whole batch.
#[utoipa::path(
    post,
    path = "/sale-lines",
    request_body = [SaleLineRecord],
    responses(
        (status = 200, description = "Batch reconciled", body = BatchSummary),
        (status = 400, description = "Empty batch, missing store id, invalid field, or dangling reference"),
        (status = 401, description = "Not authenticated"),
    ),
    security(("bearerAuth" = [])),
    tag = "SaleLines"
)]
pub async fn submit_sale_lines_handler(
    Extension(claims): Extension<AccessClaims>,
    Extension(service): Extension<Arc<RecordService>>,
    Json(records): Json<Vec<SaleLineRecord>>,
) -> Result<Json<BatchSummary>, ApiRecordsError> {
    tracing::info!(user = %claims.sub, batch_size = records.len(), "Submitting sale line batch");
    validate_fields(&records)?;
    let summary = service
        .submit_sale_lines(records, WritePolicy::Upsert)
        .await?;
    Ok(Json(summary))
}

/// Strictly inserts sale lines, rejecting the whole batch on any existing
/// or repeated compound key.
#[utoipa::path(
    post,
    path = "/sale-lines/strict",
    request_body = [SaleLineRecord],
    responses(
        (status = 200, description = "Batch inserted", body = StrictBatchSummary),
        (status = 400, description = "Empty batch, missing store id, invalid field, or dangling reference"),
        (status = 401, description = "Not authenticated"),
        (status = 409, description = "A submitted key already exists"),
    ),
    security(("bearerAuth" = [])),
    tag = "SaleLines"
)]
pub async fn insert_sale_lines_handler(
    Extension(claims): Extension<AccessClaims>,
    Extension(service): Extension<Arc<RecordService>>,
    Json(records): Json<Vec<SaleLineRecord>>,
) -> Result<Json<StrictBatchSummary>, ApiRecordsError> {
    tracing::info!(user = %claims.sub, batch_size = records.len(), "Inserting sale line batch");
    validate_fields(&records)?;
    let summary = service
        .submit_sale_lines(records, WritePolicy::StrictInsert)
        .await?;
    Ok(Json(StrictBatchSummary {
        inserted_count: summary.inserted_count,
    }))
}
