//! Report assembly

use crate::types::*;

/// Wrap validation failures into a report.
///
/// The failures are kept exactly as given, including an empty list.
pub fn assemble_report(report_id: i64, failed_records: Vec<ValidationFailure>) -> Report {
    Report {
        report_id,
        failed_records,
    }
}
