//! Response Assembler: drops empty cohorts and emits rows newest first.

use cohort_core::models::RetentionRow;

use crate::matrix::MatrixRow;

/// Rows are emitted in recency order (index 0 first) regardless of input
/// order. Reversing for display is up to the caller.
pub fn assemble(mut rows: Vec<MatrixRow>) -> Vec<RetentionRow> {
    rows.sort_by_key(|r| r.cohort_index);
    rows.into_iter()
        .filter(|r| r.original_count > 0)
        .map(|r| RetentionRow {
            cohort_label: r.cohort_label,
            retention: r.values,
        })
        .collect()
}
