//! Record API router configuration.
//!
//! Configures routes for the four entity kinds:
//! - GET /{kind} - list all
//! - GET /{kind}/<full compound key> - get by key
//! - POST /{kind} - batch upsert
//! - POST /{kind}/strict - strict batch insert
//!
//! Authentication is layered on by the application, which owns the token
//! configuration.

use crate::handlers::{
    get_customer_handler, get_product_handler, get_sale_handler, get_sale_line_handler,
    insert_customers_handler, insert_products_handler, insert_sale_lines_handler,
    insert_sales_handler, list_customers_handler, list_products_handler, list_sale_lines_handler,
    list_sales_handler, submit_customers_handler, submit_products_handler,
    submit_sale_lines_handler, submit_sales_handler,
};
use crate::services::RecordService;
use axum::{
    routing::{get, post},
    Extension, Router,
};
use sqlx::PgPool;
use std::sync::Arc;

/// Application state for record routes.
#[derive(Clone)]
pub struct RecordsState {
    /// Database connection pool.
    pub pool: PgPool,
    /// Record service for reconciliation and reads.
    pub service: Arc<RecordService>,
}

impl RecordsState {
    /// Create a new records state.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        let service = Arc::new(RecordService::new(pool.clone()));
        Self { pool, service }
    }
}

/// Create the record router with all entity endpoints.
pub fn records_router(state: RecordsState) -> Router {
    Router::new()
        .route("/products", get(list_products_handler).post(submit_products_handler))
        .route("/products/strict", post(insert_products_handler))
        .route("/products/:product_id/:store_id", get(get_product_handler))
        .route(
            "/customers",
            get(list_customers_handler).post(submit_customers_handler),
        )
        .route("/customers/strict", post(insert_customers_handler))
        .route(
            "/customers/:customer_id/:store_id",
            get(get_customer_handler),
        )
        .route("/sales", get(list_sales_handler).post(submit_sales_handler))
        .route("/sales/strict", post(insert_sales_handler))
        .route("/sales/:sale_id/:store_id", get(get_sale_handler))
        .route(
            "/sale-lines",
            get(list_sale_lines_handler).post(submit_sale_lines_handler),
        )
        .route("/sale-lines/strict", post(insert_sale_lines_handler))
        .route(
            "/sale-lines/:sale_id/:product_id/:store_id",
            get(get_sale_line_handler),
        )
        .layer(Extension(state.service))
        .layer(Extension(state.pool))
}
