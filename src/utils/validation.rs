//! Batch validation: duplicate references and end balance consistency

use std::collections::HashMap;

use crate::types::*;

/// Validate a batch of records.
///
/// A record fails when its reference occurs more than once in the batch, when
/// `start_balance + mutation != end_balance`, or both. Every member of a
/// duplicate group fails, including members that are balance-consistent.
/// Failures are returned in input order.
pub fn validate_statements(records: &[StatementRecord]) -> Vec<ValidationFailure> {
    let occurrences = count_references(records);

    records
        .iter()
        .filter_map(|record| {
            let is_duplicate = occurrences.get(&record.reference).copied().unwrap_or(0) > 1;
            let is_balance_valid = record.is_balance_consistent();

            if is_duplicate || !is_balance_valid {
                Some(ValidationFailure::for_record(
                    record,
                    is_duplicate,
                    is_balance_valid,
                ))
            } else {
                None
            }
        })
        .collect()
}

/// Count how often each reference occurs in the batch
pub fn count_references(records: &[StatementRecord]) -> HashMap<i64, usize> {
    let mut occurrences = HashMap::with_capacity(records.len());
    for record in records {
        *occurrences.entry(record.reference).or_insert(0) += 1;
    }
    occurrences
}
