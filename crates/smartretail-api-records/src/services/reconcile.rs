//! Batch reconciliation planning.
//!
//! Pure classification of a batch against the resolver's key index: every
//! record becomes an INSERT or an UPDATE, or the whole batch is rejected
//! with a duplicate-key conflict under strict mode. No I/O happens here;
//! the staged plan is applied in a single transaction by the record
//! service.
//!
//! Concurrency note: two concurrent batches touching the same compound key
//! race on last-commit-wins. There is no optimistic concurrency token;
//! isolation within one batch comes solely from the store transaction.

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use crate::error::ApiRecordsError;
use crate::models::BatchSummary;
use crate::services::resolver::KeyIndex;

/// Per-entity-kind write policy.
///
/// One engine, one policy parameter — instead of near-identical code paths
/// per entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePolicy {
    /// Insert-if-absent, overwrite-mutable-fields-if-present.
    Upsert,
    /// Insert only; any key that already exists, or repeats within the
    /// batch, rejects the whole batch with a duplicate-key conflict.
    StrictInsert,
}

/// Classification of one staged record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordAction {
    /// No existing row shares the compound key; a new row is created.
    Insert,
    /// An existing row shares the compound key; its mutable attributes
    /// are overwritten. Identity fields are never rewritten.
    Update,
}

/// A staged batch: one action per distinct compound key, in first-seen
/// submitted order.
#[derive(Debug)]
pub struct BatchPlan<R> {
    /// Staged actions with the rows to write.
    pub actions: Vec<(RecordAction, R)>,
    /// Number of submitted records (counts same-key repeats).
    pub processed: usize,
}

impl<R> BatchPlan<R> {
    /// Number of staged inserts.
    #[must_use]
    pub fn inserted(&self) -> usize {
        self.actions
            .iter()
            .filter(|(action, _)| *action == RecordAction::Insert)
            .count()
    }

    /// Summary of this plan in response shape.
    #[must_use]
    pub fn summary(&self) -> BatchSummary {
        let inserted = self.inserted();
        BatchSummary {
            processed_count: self.processed,
            inserted_count: inserted,
            updated_count: self.processed - inserted,
        }
    }
}

/// Classify a batch of rows against the existing-row index.
///
/// Records are processed in submitted order. When two records share a
/// compound key under [`WritePolicy::Upsert`], the later one's field
/// values win: it overwrites the staged row in place and the staged
/// action keeps its original classification. Under
/// [`WritePolicy::StrictInsert`] any collision — with an existing row or
/// within the batch — fails the whole batch.
///
/// # Errors
///
/// Returns [`ApiRecordsError::DuplicateKey`] naming the first conflicting
/// key under strict mode.
pub fn plan_batch<K, R, E>(
    rows: Vec<R>,
    existing: &KeyIndex<K, E>,
    key_of: impl Fn(&R) -> K,
    policy: WritePolicy,
) -> Result<BatchPlan<R>, ApiRecordsError>
where
    K: Eq + Hash + Display,
{
    let processed = rows.len();
    let mut actions: Vec<(RecordAction, R)> = Vec::with_capacity(processed);
    let mut staged: HashMap<K, usize> = HashMap::with_capacity(processed);

    for row in rows {
        let key = key_of(&row);

        if let Some(&position) = staged.get(&key) {
            match policy {
                // Last write wins: mutate the already-staged row in place.
                WritePolicy::Upsert => actions[position].1 = row,
                WritePolicy::StrictInsert => {
                    return Err(ApiRecordsError::DuplicateKey {
                        key: key.to_string(),
                    })
                }
            }
            continue;
        }

        let action = if existing.contains(&key) {
            match policy {
                WritePolicy::Upsert => RecordAction::Update,
                WritePolicy::StrictInsert => {
                    return Err(ApiRecordsError::DuplicateKey {
                        key: key.to_string(),
                    })
                }
            }
        } else {
            RecordAction::Insert
        };

        staged.insert(key, actions.len());
        actions.push((action, row));
    }

    Ok(BatchPlan { actions, processed })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use smartretail_db::models::{Product, ProductKey};
    use std::collections::HashSet;

    fn product(product_id: i32, store_id: &str, name: &str) -> Product {
        Product {
            product_id,
            store_id: store_id.to_string(),
            name: name.to_string(),
            unit_price: Decimal::ONE,
            stock_quantity: 1,
        }
    }

    fn index_of(rows: Vec<Product>) -> KeyIndex<ProductKey, Product> {
        let requested: HashSet<ProductKey> = rows.iter().map(Product::key).collect();
        KeyIndex::from_candidates(rows, &requested, Product::key)
    }

    #[test]
    fn test_unknown_keys_are_staged_as_inserts() {
        let plan = plan_batch(
            vec![product(1, "S1", "A"), product(2, "S1", "B")],
            &KeyIndex::<ProductKey, Product>::empty(),
            Product::key,
            WritePolicy::Upsert,
        )
        .unwrap();

        assert_eq!(plan.processed, 2);
        assert_eq!(plan.inserted(), 2);
        assert!(plan
            .actions
            .iter()
            .all(|(action, _)| *action == RecordAction::Insert));
    }

    #[test]
    fn test_existing_key_is_staged_as_update() {
        let existing = index_of(vec![product(1, "S1", "old")]);
        let plan = plan_batch(
            vec![product(1, "S1", "new"), product(2, "S1", "B")],
            &existing,
            Product::key,
            WritePolicy::Upsert,
        )
        .unwrap();

        let summary = plan.summary();
        assert_eq!(summary.processed_count, 2);
        assert_eq!(summary.inserted_count, 1);
        assert_eq!(summary.updated_count, 1);

        let (action, row) = &plan.actions[0];
        assert_eq!(*action, RecordAction::Update);
        // Identity fields are untouched; only mutable attributes change.
        assert_eq!(row.product_id, 1);
        assert_eq!(row.store_id, "S1");
        assert_eq!(row.name, "new");
    }

    #[test]
    fn test_same_id_in_other_store_is_an_insert() {
        let existing = index_of(vec![product(1, "S1", "A")]);
        let plan = plan_batch(
            vec![product(1, "S2", "A")],
            &existing,
            Product::key,
            WritePolicy::Upsert,
        )
        .unwrap();
        assert_eq!(plan.inserted(), 1);
    }

    #[test]
    fn test_later_record_wins_within_a_batch() {
        let plan = plan_batch(
            vec![product(1, "S1", "first"), product(1, "S1", "second")],
            &KeyIndex::<ProductKey, Product>::empty(),
            Product::key,
            WritePolicy::Upsert,
        )
        .unwrap();

        // One staged action, still an insert, carrying the later values.
        assert_eq!(plan.actions.len(), 1);
        assert_eq!(plan.actions[0].0, RecordAction::Insert);
        assert_eq!(plan.actions[0].1.name, "second");

        let summary = plan.summary();
        assert_eq!(summary.processed_count, 2);
        assert_eq!(summary.inserted_count, 1);
        assert_eq!(summary.updated_count, 1);
    }

    #[test]
    fn test_strict_mode_rejects_existing_key() {
        let existing = index_of(vec![product(1, "S1", "A")]);
        let err = plan_batch(
            vec![product(2, "S1", "B"), product(1, "S1", "A")],
            &existing,
            Product::key,
            WritePolicy::StrictInsert,
        )
        .unwrap_err();

        match err {
            ApiRecordsError::DuplicateKey { key } => assert_eq!(key, "(1, S1)"),
            other => panic!("expected DuplicateKey, got {other:?}"),
        }
    }

    #[test]
    fn test_strict_mode_rejects_in_batch_repeat() {
        let err = plan_batch(
            vec![product(1, "S1", "A"), product(1, "S1", "B")],
            &KeyIndex::<ProductKey, Product>::empty(),
            Product::key,
            WritePolicy::StrictInsert,
        )
        .unwrap_err();
        assert!(matches!(err, ApiRecordsError::DuplicateKey { .. }));
    }

    #[test]
    fn test_strict_mode_accepts_all_fresh_keys() {
        let plan = plan_batch(
            vec![product(1, "S1", "A"), product(2, "S1", "B")],
            &KeyIndex::<ProductKey, Product>::empty(),
            Product::key,
            WritePolicy::StrictInsert,
        )
        .unwrap();
        assert_eq!(plan.inserted(), 2);
    }

    #[test]
    fn test_resubmitting_a_batch_upserts_everything() {
        // Second submission of the same batch: every record classifies as
        // an update, no net new rows.
        let stored = vec![product(1, "S1", "A"), product(2, "S1", "B")];
        let existing = index_of(stored.clone());
        let plan = plan_batch(stored, &existing, Product::key, WritePolicy::Upsert).unwrap();

        let summary = plan.summary();
        assert_eq!(summary.processed_count, 2);
        assert_eq!(summary.inserted_count, 0);
        assert_eq!(summary.updated_count, 2);
    }
}
