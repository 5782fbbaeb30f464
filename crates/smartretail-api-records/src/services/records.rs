//! Record service: batch reconciliation and the entity read path.
//!
//! One service per request pool, passed explicitly into handlers — there
//! is no ambient store context. Each batch submission runs
//! validate → resolve → plan → apply, with the apply phase inside a single
//! transaction so the whole batch commits or none of it does.

use sqlx::PgPool;
use std::collections::{BTreeSet, HashMap};

use smartretail_db::models::{
    Customer, CustomerKey, Product, ProductKey, Sale, SaleKey, SaleLine, SaleLineKey,
};

use crate::error::ApiRecordsError;
use crate::models::{
    BatchSummary, CustomerRecord, ProductRecord, SaleLineRecord, SaleRecord, SaleSummary,
    SaleWithLines,
};
use crate::services::reconcile::{plan_batch, BatchPlan, RecordAction, WritePolicy};
use crate::services::resolver;
use crate::validation::validate_batch;

/// Service for record reconciliation and reads.
pub struct RecordService {
    pool: PgPool,
}

impl RecordService {
    /// Create a new record service on the given pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ── Write path ─────────────────────────────────────────────────────

    /// Reconcile a product batch under the given policy.
    pub async fn submit_products(
        &self,
        records: Vec<ProductRecord>,
        policy: WritePolicy,
    ) -> Result<BatchSummary, ApiRecordsError> {
        validate_batch(&records)?;
        let existing = resolver::resolve_products(&self.pool, &records).await?;
        let rows: Vec<Product> = records.into_iter().map(ProductRecord::into_row).collect();
        let plan = plan_batch(rows, &existing, Product::key, policy)?;

        let mut tx = self.pool.begin().await?;
        for (action, row) in &plan.actions {
            match action {
                RecordAction::Insert => row.insert(&mut *tx).await?,
                RecordAction::Update => row.update(&mut *tx).await?,
            }
        }
        tx.commit().await?;

        let summary = plan.summary();
        tracing::info!(
            processed = summary.processed_count,
            inserted = summary.inserted_count,
            updated = summary.updated_count,
            "Product batch committed"
        );
        Ok(summary)
    }

    /// Reconcile a customer batch under the given policy.
    pub async fn submit_customers(
        &self,
        records: Vec<CustomerRecord>,
        policy: WritePolicy,
    ) -> Result<BatchSummary, ApiRecordsError> {
        validate_batch(&records)?;
        let existing = resolver::resolve_customers(&self.pool, &records).await?;
        let rows: Vec<Customer> = records.into_iter().map(CustomerRecord::into_row).collect();
        let plan = plan_batch(rows, &existing, Customer::key, policy)?;

        let mut tx = self.pool.begin().await?;
        for (action, row) in &plan.actions {
            match action {
                RecordAction::Insert => row.insert(&mut *tx).await?,
                RecordAction::Update => row.update(&mut *tx).await?,
            }
        }
        tx.commit().await?;

        let summary = plan.summary();
        tracing::info!(
            processed = summary.processed_count,
            inserted = summary.inserted_count,
            updated = summary.updated_count,
            "Customer batch committed"
        );
        Ok(summary)
    }

    /// Reconcile a sale batch (with owned lines) under the given policy.
    ///
    /// A sale classified as UPDATE has its stored line set deleted and
    /// replaced wholesale by the incoming lines, in the same transaction
    /// as the sale row itself — a reader never observes a sale with only
    /// some of its new lines.
    pub async fn submit_sales(
        &self,
        records: Vec<SaleRecord>,
        policy: WritePolicy,
    ) -> Result<BatchSummary, ApiRecordsError> {
        validate_batch(&records)?;
        let existing = resolver::resolve_sales(&self.pool, &records).await?;
        let rows: Vec<(Sale, Vec<SaleLine>)> =
            records.into_iter().map(SaleRecord::into_rows).collect();
        let plan: BatchPlan<(Sale, Vec<SaleLine>)> =
            plan_batch(rows, &existing, |(sale, _)| sale.key(), policy)?;

        let mut tx = self.pool.begin().await?;
        for (action, (sale, lines)) in &plan.actions {
            match action {
                RecordAction::Insert => sale.insert(&mut *tx).await?,
                RecordAction::Update => {
                    sale.update(&mut *tx).await?;
                    let dropped = SaleLine::delete_for_sale(&mut *tx, &sale.key()).await?;
                    tracing::debug!(
                        sale_id = sale.sale_id,
                        store_id = %sale.store_id,
                        dropped,
                        "Replacing sale line set"
                    );
                }
            }
            for line in lines {
                line.insert(&mut *tx).await?;
            }
        }
        tx.commit().await?;

        let summary = plan.summary();
        tracing::info!(
            processed = summary.processed_count,
            inserted = summary.inserted_count,
            updated = summary.updated_count,
            "Sale batch committed"
        );
        Ok(summary)
    }

    /// Reconcile a standalone sale-line batch under the given policy.
    pub async fn submit_sale_lines(
        &self,
        records: Vec<SaleLineRecord>,
        policy: WritePolicy,
    ) -> Result<BatchSummary, ApiRecordsError> {
        validate_batch(&records)?;
        let existing = resolver::resolve_sale_lines(&self.pool, &records).await?;
        let rows: Vec<SaleLine> = records.into_iter().map(SaleLineRecord::into_row).collect();
        let plan = plan_batch(rows, &existing, SaleLine::key, policy)?;

        let mut tx = self.pool.begin().await?;
        for (action, row) in &plan.actions {
            match action {
                RecordAction::Insert => row.insert(&mut *tx).await?,
                RecordAction::Update => row.update(&mut *tx).await?,
            }
        }
        tx.commit().await?;

        let summary = plan.summary();
        tracing::info!(
            processed = summary.processed_count,
            inserted = summary.inserted_count,
            updated = summary.updated_count,
            "Sale line batch committed"
        );
        Ok(summary)
    }

    // ── Read path ──────────────────────────────────────────────────────

    /// List all products.
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiRecordsError> {
        Ok(Product::list_all(&self.pool).await?)
    }

    /// Get one product by its full compound key.
    pub async fn get_product(&self, key: &ProductKey) -> Result<Product, ApiRecordsError> {
        Product::find_by_key(&self.pool, key)
            .await?
            .ok_or(ApiRecordsError::NotFound)
    }

    /// List all customers.
    pub async fn list_customers(&self) -> Result<Vec<Customer>, ApiRecordsError> {
        Ok(Customer::list_all(&self.pool).await?)
    }

    /// Get one customer by its full compound key.
    pub async fn get_customer(&self, key: &CustomerKey) -> Result<Customer, ApiRecordsError> {
        Customer::find_by_key(&self.pool, key)
            .await?
            .ok_or(ApiRecordsError::NotFound)
    }

    /// List all sales with their owned lines.
    pub async fn list_sales(&self) -> Result<Vec<SaleWithLines>, ApiRecordsError> {
        let sales = Sale::list_all(&self.pool).await?;
        let mut by_sale = self.lines_by_sale(&sales).await?;
        Ok(sales
            .into_iter()
            .map(|sale| {
                let lines = by_sale.remove(&sale.key()).unwrap_or_default();
                SaleWithLines { sale, lines }
            })
            .collect())
    }

    /// List all sales projected without their line collections.
    pub async fn list_sale_summaries(&self) -> Result<Vec<SaleSummary>, ApiRecordsError> {
        let sales = Sale::list_all(&self.pool).await?;
        let mut by_sale = self.lines_by_sale(&sales).await?;
        Ok(sales
            .into_iter()
            .map(|sale| {
                let line_count = by_sale.remove(&sale.key()).map_or(0, |lines| lines.len());
                SaleSummary { sale, line_count }
            })
            .collect())
    }

    /// Get one sale, with lines, by its full compound key.
    pub async fn get_sale(&self, key: &SaleKey) -> Result<SaleWithLines, ApiRecordsError> {
        let sale = Sale::find_by_key(&self.pool, key)
            .await?
            .ok_or(ApiRecordsError::NotFound)?;
        let lines = SaleLine::list_for_sales(
            &self.pool,
            &[key.sale_id],
            std::slice::from_ref(&key.store_id),
        )
        .await?;
        Ok(SaleWithLines { sale, lines })
    }

    /// List all sale lines.
    pub async fn list_sale_lines(&self) -> Result<Vec<SaleLine>, ApiRecordsError> {
        Ok(SaleLine::list_all(&self.pool).await?)
    }

    /// Get one sale line by its full compound key.
    pub async fn get_sale_line(&self, key: &SaleLineKey) -> Result<SaleLine, ApiRecordsError> {
        SaleLine::find_by_key(&self.pool, key)
            .await?
            .ok_or(ApiRecordsError::NotFound)
    }

    /// Bulk-fetch the lines of the given sales, grouped by exact owning
    /// sale key.
    ///
    /// The bulk query is a superset over (sale id, store id) pairs; lines
    /// whose full owning key is not among `sales` are dropped when the
    /// caller looks up by exact key.
    async fn lines_by_sale(
        &self,
        sales: &[Sale],
    ) -> Result<HashMap<SaleKey, Vec<SaleLine>>, ApiRecordsError> {
        if sales.is_empty() {
            return Ok(HashMap::new());
        }

        let sale_ids: Vec<i32> = sales
            .iter()
            .map(|s| s.sale_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let store_ids: Vec<String> = sales
            .iter()
            .map(|s| s.store_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let lines = SaleLine::list_for_sales(&self.pool, &sale_ids, &store_ids).await?;
        let mut by_sale: HashMap<SaleKey, Vec<SaleLine>> = HashMap::new();
        for line in lines {
            by_sale.entry(line.sale_key()).or_default().push(line);
        }
        Ok(by_sale)
    }
}
