//! Traits for the collaborators of the statement pipeline

use async_trait::async_trait;

use crate::types::*;

/// Destination for batches that passed validation
///
/// This trait lets the pipeline hand accepted statements to any storage backend
/// (a database, a message queue, an in-memory store) without knowing how it
/// persists them. Implementations own their synchronisation: the pipeline may
/// call `accept` from several concurrent runs.
#[async_trait]
pub trait AcceptedRecordsSink: Send + Sync {
    /// Store a validated batch.
    ///
    /// Must be a no-op for an empty slice. Any error is returned to the caller
    /// of the pipeline and the run produces no report.
    async fn accept(&self, statements: &[PersistedStatement]) -> StatementResult<()>;
}

/// Source of report identifiers
pub trait ReportIdSource: Send + Sync {
    /// Produce the identifier for the next report
    fn next_report_id(&self) -> i64;
}

/// Report ids drawn from the thread-local random generator
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomReportIds;

impl ReportIdSource for RandomReportIds {
    fn next_report_id(&self) -> i64 {
        rand::random::<i64>()
    }
}

/// Always yields the same id; useful for deterministic output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedReportId(pub i64);

impl ReportIdSource for FixedReportId {
    fn next_report_id(&self) -> i64 {
        self.0
    }
}
