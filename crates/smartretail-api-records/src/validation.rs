//! Batch validation gate.
//!
//! Structural pre-checks that run before any database access. Validation
//! is all-or-nothing: a batch with any offending record is rejected in its
//! entirety, and no record from it is ever persisted.

use crate::error::ApiRecordsError;
use smartretail_core::{StoreId, StoreScoped};
use validator::Validate;

/// Validate a batch of store-scoped records.
///
/// # Errors
///
/// - [`ApiRecordsError::EmptyBatch`] if the batch contains no records
/// - [`ApiRecordsError::MissingTenant`] if any record carries an empty
///   store id; the error names the first offending position
pub fn validate_batch<T: StoreScoped>(batch: &[T]) -> Result<(), ApiRecordsError> {
    if batch.is_empty() {
        return Err(ApiRecordsError::EmptyBatch);
    }

    for (position, record) in batch.iter().enumerate() {
        if StoreId::new(record.store_id()).is_err() {
            return Err(ApiRecordsError::MissingTenant { position });
        }
    }

    Ok(())
}

/// Apply field-level constraints (non-negative amounts, positive
/// quantities, well-formed email) to every record in a batch.
///
/// These are data-hygiene checks, separate from the structural gate above;
/// the error names the first offending record position.
///
/// # Errors
///
/// Returns [`ApiRecordsError::Validation`] describing the first failure.
pub fn validate_fields<T: Validate>(batch: &[T]) -> Result<(), ApiRecordsError> {
    for (position, record) in batch.iter().enumerate() {
        if let Err(e) = record.validate() {
            let messages: Vec<String> = e
                .field_errors()
                .iter()
                .flat_map(|(field, errors)| {
                    errors.iter().map(move |err| {
                        let detail = err
                            .message
                            .as_ref()
                            .map_or_else(|| err.code.to_string(), std::string::ToString::to_string);
                        format!("{field}: {detail}")
                    })
                })
                .collect();
            return Err(ApiRecordsError::Validation(format!(
                "record at position {position}: {}",
                messages.join(", ")
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestRecord {
        store_id: String,
    }

    impl StoreScoped for TestRecord {
        fn store_id(&self) -> &str {
            &self.store_id
        }
    }

    fn record(store_id: &str) -> TestRecord {
        TestRecord {
            store_id: store_id.to_string(),
        }
    }

    #[test]
    fn test_empty_batch_is_rejected() {
        let batch: Vec<TestRecord> = vec![];
        assert!(matches!(
            validate_batch(&batch),
            Err(ApiRecordsError::EmptyBatch)
        ));
    }

    #[test]
    fn test_batch_with_tenants_passes() {
        let batch = vec![record("S1"), record("S2")];
        assert!(validate_batch(&batch).is_ok());
    }

    #[test]
    fn test_missing_tenant_names_first_offending_position() {
        let batch = vec![record("S1"), record(""), record("S3"), record("  ")];
        match validate_batch(&batch) {
            Err(ApiRecordsError::MissingTenant { position }) => assert_eq!(position, 1),
            other => panic!("expected MissingTenant, got {other:?}"),
        }
    }

    #[test]
    fn test_whitespace_store_id_counts_as_missing() {
        let batch = vec![record("   ")];
        assert!(matches!(
            validate_batch(&batch),
            Err(ApiRecordsError::MissingTenant { position: 0 })
        ));
    }

    #[test]
    fn test_field_validation_names_offending_position() {
        use crate::models::ProductRecord;
        use rust_decimal::Decimal;

        let batch = vec![
            ProductRecord {
                product_id: 1,
                store_id: "S1".to_string(),
                name: "Widget".to_string(),
                unit_price: Decimal::ONE,
                stock_quantity: 1,
            },
            ProductRecord {
                product_id: 2,
                store_id: "S1".to_string(),
                name: "Gadget".to_string(),
                unit_price: Decimal::new(-1, 0),
                stock_quantity: 1,
            },
        ];
        match validate_fields(&batch) {
            Err(ApiRecordsError::Validation(msg)) => {
                assert!(msg.contains("position 1"), "got: {msg}");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}
