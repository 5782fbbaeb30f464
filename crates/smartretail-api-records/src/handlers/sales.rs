//! Sale endpoint handlers.
//!
//! - GET /sales - List all sales with their lines (`?view=summary` for the
//!   projection without line collections)
//! - GET /sales/:sale_id/:store_id - Get one sale with lines
//! - POST /sales - Batch upsert (updates replace the line set wholesale)
//! - POST /sales/strict - Strict batch insert

use axum::{
    extract::{Path, Query},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;
use smartretail_auth::AccessClaims;
use smartretail_core::StoreId;
use smartretail_db::models::SaleKey;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::error::ApiRecordsError;
use crate::models::{BatchSummary, SaleRecord, SaleWithLines, StrictBatchSummary};
use crate::services::{RecordService, WritePolicy};
use crate::validation::validate_fields;

/// Query parameters of the sale list endpoint.
#[derive(Debug, Deserialize, IntoParams)]
pub struct SalesListQuery {
    /// Set to `summary` to project sales without their line collections.
    pub view: Option<String>,
}

/// Lists all sales.
///
/// By default each sale carries its owned lines; `?view=summary` returns
/// the reduced projection with a line count instead.
#[utoipa::path(
    get,
    path = "/sales",
    params(SalesListQuery),
    responses(
        (status = 200, description = "List of sales", body = [SaleWithLines]),
        (status = 401, description = "Not authenticated"),
    ),
    security(("bearerAuth" = [])),
    tag = "Sales"
)]
pub async fn list_sales_handler(
    Extension(service): Extension<Arc<RecordService>>,
    Query(query): Query<SalesListQuery>,
) -> Result<Response, ApiRecordsError> {
    match query.view.as_deref() {
        Some("summary") => Ok(Json(service.list_sale_summaries().await?).into_response()),
        _ => Ok(Json(service.list_sales().await?).into_response()),
    }
}

/// Gets one sale, with its lines, by its full compound key.
#[utoipa::path(
    get,
    path = "/sales/{sale_id}/{store_id}",
    params(
        ("sale_id" = i32, Path, description = "Sale identifier"),
        ("store_id" = String, Path, description = "Store (tenant) identifier"),
    ),
    responses(
        (status = 200, description = "The sale with its lines", body = SaleWithLines),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "No sale with this key"),
    ),
    security(("bearerAuth" = [])),
    tag = "Sales"
)]
pub async fn get_sale_handler(
    Extension(service): Extension<Arc<RecordService>>,
    Path((sale_id, store_id)): Path<(i32, String)>,
) -> Result<Json<SaleWithLines>, ApiRecordsError> {
    let store_id = StoreId::new(store_id)
        .map_err(|e| ApiRecordsError::Validation(e.to_string()))?;
    let key = SaleKey {
        sale_id,
        store_id: store_id.into_inner(),
    };
    Ok(Json(service.get_sale(&key).await?))
}

/// Batch-upserts sales.
///
/// A sale whose key already exists has its mutable fields overwritten and
/// its stored line set replaced wholesale by the submitted lines.
#[utoipa::path(
    post,
    path = "/sales",
    request_body = [SaleRecord],
    responses(
        (status = 200, description = "Batch reconciled", body = BatchSummary),
        (status = 400, description = "Empty batch, missing store id, or invalid field"),
        (status = 401, description = "Not authenticated"),
    ),
    security(("bearerAuth" = [])),
    tag = "Sales"
)]
pub async fn submit_sales_handler(
    Extension(claims): Extension<AccessClaims>,
    Extension(service): Extension<Arc<RecordService>>,
    Json(records): Json<Vec<SaleRecord>>,
) -> Result<Json<BatchSummary>, ApiRecordsError> {
    tracing::info!(user = %claims.sub, batch_size = records.len(), "Submitting sale batch");
    validate_fields(&records)?;
    let summary = service.submit_sales(records, WritePolicy::Upsert).await?;
    Ok(Json(summary))
}

/// Strictly inserts sales, rejecting the whole batch on any existing or
/// repeated compound key.
#[utoipa::path(
    post,
    path = "/sales/strict",
    request_body = [SaleRecord],
    responses(
        (status = 200, description = "Batch inserted", body = StrictBatchSummary),
        (status = 400, description = "Empty batch, missing store id, or invalid field"),
        (status = 401, description = "Not authenticated"),
        (status = 409, description = "A submitted key already exists"),
    ),
    security(("bearerAuth" = [])),
    tag = "Sales"
)]
pub async fn insert_sales_handler(
    Extension(claims): Extension<AccessClaims>,
    Extension(service): Extension<Arc<RecordService>>,
    Json(records): Json<Vec<SaleRecord>>,
) -> Result<Json<StrictBatchSummary>, ApiRecordsError> {
    tracing::info!(user = %claims.sub, batch_size = records.len(), "Inserting sale batch");
    validate_fields(&records)?;
    let summary = service
        .submit_sales(records, WritePolicy::StrictInsert)
        .await?;
    Ok(Json(StrictBatchSummary {
        inserted_count: summary.inserted_count,
    }))
}
