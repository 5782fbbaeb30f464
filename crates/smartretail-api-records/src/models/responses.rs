//! Response models for the Record API.
//!
//! Batch summaries and read-path projections. Field names follow the wire
//! contract of the batch endpoints (camelCase).

use serde::Serialize;
use smartretail_db::models::{Sale, SaleLine};
use utoipa::ToSchema;

/// Outcome of a batch upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    /// Number of records processed (the batch size).
    pub processed_count: usize,
    /// Number of records that created a new row.
    pub inserted_count: usize,
    /// Number of records that overwrote an existing row (including
    /// later same-key records within the batch).
    pub updated_count: usize,
}

/// Outcome of a strict-insert batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StrictBatchSummary {
    /// Number of rows inserted (always the batch size on success).
    pub inserted_count: usize,
}

/// A sale together with its owned lines.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SaleWithLines {
    /// The sale row.
    #[serde(flatten)]
    pub sale: Sale,
    /// Lines owned by the sale.
    pub lines: Vec<SaleLine>,
}

/// A sale projected without its line collection.
///
/// Used by the summary view of the sale list to avoid serializing owned
/// collections.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SaleSummary {
    /// The sale row.
    #[serde(flatten)]
    pub sale: Sale,
    /// Number of lines owned by the sale.
    pub line_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_summary_serializes_camel_case() {
        let summary = BatchSummary {
            processed_count: 2,
            inserted_count: 1,
            updated_count: 1,
        };
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["processedCount"], 2);
        assert_eq!(json["insertedCount"], 1);
        assert_eq!(json["updatedCount"], 1);
    }

    #[test]
    fn test_strict_summary_serializes_camel_case() {
        let summary = StrictBatchSummary { inserted_count: 3 };
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["insertedCount"], 3);
    }
}
