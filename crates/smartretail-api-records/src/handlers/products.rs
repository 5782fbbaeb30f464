//! Product endpoint handlers.
//!
//! - GET /products - List all products
//! - GET /products/:product_id/:store_id - Get one product by compound key
//! - POST /products - Batch upsert
//! - POST /products/strict - Strict batch insert (conflict on existing keys)

use axum::{extract::Path, Extension, Json};
use smartretail_auth::AccessClaims;
use smartretail_core::StoreId;
use smartretail_db::models::{Product, ProductKey};
use std::sync::Arc;

use crate::error::ApiRecordsError;
use crate::models::{BatchSummary, ProductRecord, StrictBatchSummary};
use crate::services::{RecordService, WritePolicy};
use crate::validation::validate_fields;

/// Lists all products.
#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "List of products", body = [Product]),
        (status = 401, description = "Not authenticated"),
    ),
    security(("bearerAuth" = [])),
    tag = "Products"
)]
pub async fn list_products_handler(
    Extension(service): Extension<Arc<RecordService>>,
) -> Result<Json<Vec<Product>>, ApiRecordsError> {
    Ok(Json(service.list_products().await?))
}

/// Gets one product by its full compound key.
#[utoipa::path(
    get,
    path = "/products/{product_id}/{store_id}",
    params(
        ("product_id" = i32, Path, description = "Product identifier"),
        ("store_id" = String, Path, description = "Store (tenant) identifier"),
    ),
    responses(
        (status = 200, description = "The product", body = Product),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "No product with this key"),
    ),
    security(("bearerAuth" = [])),
    tag = "Products"
)]
pub async fn get_product_handler(
    Extension(service): Extension<Arc<RecordService>>,
    Path((product_id, store_id)): Path<(i32, String)>,
) -> Result<Json<Product>, ApiRecordsError> {
    let store_id = StoreId::new(store_id)
        .map_err(|e| ApiRecordsError::Validation(e.to_string()))?;
    let key = ProductKey {
        product_id,
        store_id: store_id.into_inner(),
    };
    Ok(Json(service.get_product(&key).await?))
}

/// Batch-upserts products.
///
/// Each record inserts a new row or overwrites the mutable fields of the
/// row sharing its compound key. The whole batch commits atomically.
#[utoipa::path(
    post,
    path = "/products",
    request_body = [ProductRecord],
    responses(
        (status = 200, description = "Batch reconciled", body = BatchSummary),
        (status = 400, description = "Empty batch, missing store id, or invalid field"),
        (status = 401, description = "Not authenticated"),
    ),
    security(("bearerAuth" = [])),
    tag = "Products"
)]
pub async fn submit_products_handler(
    Extension(claims): Extension<AccessClaims>,
    Extension(service): Extension<Arc<RecordService>>,
    Json(records): Json<Vec<ProductRecord>>,
) -> Result<Json<BatchSummary>, ApiRecordsError> {
    tracing::info!(user = %claims.sub, batch_size = records.len(), "Submitting product batch");
    validate_fields(&records)?;
    let summary = service
        .submit_products(records, WritePolicy::Upsert)
        .await?;
    Ok(Json(summary))
}

/// Strictly inserts products, rejecting the whole batch if any compound
/// key already exists or repeats within the batch.
#[utoipa::path(
    post,
    path = "/products/strict",
    request_body = [ProductRecord],
    responses(
        (status = 200, description = "Batch inserted", body = StrictBatchSummary),
        (status = 400, description = "Empty batch, missing store id, or invalid field"),
        (status = 401, description = "Not authenticated"),
        (status = 409, description = "A submitted key already exists"),
    ),
    security(("bearerAuth" = [])),
    tag = "Products"
)]
pub async fn insert_products_handler(
    Extension(claims): Extension<AccessClaims>,
    Extension(service): Extension<Arc<RecordService>>,
    Json(records): Json<Vec<ProductRecord>>,
) -> Result<Json<StrictBatchSummary>, ApiRecordsError> {
    tracing::info!(user = %claims.sub, batch_size = records.len(), "Inserting product batch");
    validate_fields(&records)?;
    let summary = service
        .submit_products(records, WritePolicy::StrictInsert)
        .await?;
    Ok(Json(StrictBatchSummary {
        inserted_count: summary.inserted_count,
    }))
}
