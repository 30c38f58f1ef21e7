//! CSV statements: a header row followed by one row per record
//!
//! `Reference,Account Number,Description,Start Balance,Mutation,End Balance`

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use tracing::{debug, error, warn};

use super::parse_amount;
use crate::types::*;

/// Column names of the expected header row
pub const CSV_HEADER: [&str; 6] = [
    "Reference",
    "Account Number",
    "Description",
    "Start Balance",
    "Mutation",
    "End Balance",
];

/// Raw row, deserialized by column position.
///
/// Text columns are kept verbatim; numeric columns are trimmed when converted.
#[derive(Debug, Deserialize)]
struct CsvRow {
    reference: String,
    account_number: String,
    description: String,
    start_balance: String,
    mutation: String,
    end_balance: String,
}

impl CsvRow {
    fn into_record(self) -> Result<StatementRecord, String> {
        let reference = self.reference.trim().parse::<i64>().map_err(|e| {
            format!("invalid value for {}: '{}' ({e})", CSV_HEADER[0], self.reference)
        })?;

        Ok(StatementRecord::new(
            reference,
            self.account_number,
            self.description,
            parse_amount(CSV_HEADER[3], &self.start_balance)?,
            parse_amount(CSV_HEADER[4], &self.mutation)?,
            parse_amount(CSV_HEADER[5], &self.end_balance)?,
        ))
    }
}

/// Parse CSV content into records, in row order.
///
/// The whole file is rejected on the first malformed row; no partial list is
/// ever returned. An empty file yields an empty list.
pub fn parse_csv(content: &[u8]) -> StatementResult<Vec<StatementRecord>> {
    match read_rows(content) {
        Ok(records) => {
            debug!(records = records.len(), "Successfully parsed CSV content");
            Ok(records)
        }
        Err(cause) => {
            error!(%cause, "Failed to parse CSV content");
            Err(StatementError::FileParsing(format!(
                "CSV parsing failed: {cause}"
            )))
        }
    }
}

fn read_rows(content: &[u8]) -> Result<Vec<StatementRecord>, String> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::Headers)
        .from_reader(content);

    let headers = reader.headers().map_err(|e| e.to_string())?;
    if !headers.is_empty() && headers != &StringRecord::from(CSV_HEADER.to_vec()) {
        // Columns are mapped by position, so a differently spelled header still parses
        warn!(header = ?headers, "CSV header differs from the expected column names");
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| e.to_string())?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        let raw: CsvRow = row
            .deserialize(None)
            .map_err(|e| format!("line {line}: {e}"))?;
        let record = raw.into_record().map_err(|e| format!("line {line}: {e}"))?;
        records.push(record);
    }

    Ok(records)
}
