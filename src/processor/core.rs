//! Main statement processor that coordinates parsing, validation and forwarding

use tracing::{error, info, warn};

use crate::parser::FileFormat;
use crate::processor::report::assemble_report;
use crate::traits::*;
use crate::types::*;
use crate::utils::validation::validate_statements;

/// Statement pipeline: parse, validate, forward accepted batches, report
///
/// The processor keeps no per-run state, so one instance can serve concurrent
/// uploads. Accepted batches go to the sink `S`.
pub struct StatementProcessor<S: AcceptedRecordsSink> {
    sink: S,
    id_source: Box<dyn ReportIdSource>,
}

impl<S: AcceptedRecordsSink> StatementProcessor<S> {
    /// Create a new processor with randomly generated report ids
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            id_source: Box::new(RandomReportIds),
        }
    }

    /// Create a new processor with a custom report id source
    pub fn with_id_source(sink: S, id_source: Box<dyn ReportIdSource>) -> Self {
        Self { sink, id_source }
    }

    /// The sink receiving accepted batches
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Process one uploaded file.
    ///
    /// The format is chosen from `filename`; a missing name or an extension other
    /// than `.csv` / `.xml` fails before any parsing. The parsed batch is forwarded
    /// to the sink only when validation found no failures, and always before the
    /// report is returned. A sink error aborts the run without a report.
    pub async fn process(
        &self,
        content: &[u8],
        filename: Option<&str>,
    ) -> StatementResult<Report> {
        let format = FileFormat::from_filename(filename)?;
        let filename = filename.unwrap_or_default();

        info!(filename, format = format.name(), "Start processing file");

        let records = format.parse(content)?;
        let failures = validate_statements(&records);

        if failures.is_empty() {
            self.forward_accepted(&records).await?;
        } else {
            warn!(
                filename,
                records = records.len(),
                failures = failures.len(),
                "Validation failed, batch not forwarded"
            );
        }

        info!(filename, "Done processing file");
        Ok(assemble_report(self.id_source.next_report_id(), failures))
    }

    /// Parse and validate without forwarding anything to the sink
    pub fn validate_file(
        &self,
        content: &[u8],
        filename: Option<&str>,
    ) -> StatementResult<Vec<ValidationFailure>> {
        let records = FileFormat::from_filename(filename)?.parse(content)?;
        Ok(validate_statements(&records))
    }

    async fn forward_accepted(&self, records: &[StatementRecord]) -> StatementResult<()> {
        if records.is_empty() {
            info!("No statements to publish");
            return Ok(());
        }

        let statements: Vec<PersistedStatement> =
            records.iter().map(PersistedStatement::from).collect();

        info!(count = statements.len(), "Forwarding accepted statements");
        self.sink.accept(&statements).await.inspect_err(|e| {
            error!(error = %e, "Accepted-records sink rejected the batch");
        })
    }
}
