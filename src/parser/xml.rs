//! XML statements:
//! `<records><record reference=".."><accountNumber/><description/><startBalance/><mutation/><endBalance/></record></records>`

use quick_xml::de::from_reader;
use serde::Deserialize;
use tracing::{debug, error};

use super::parse_amount;
use crate::types::*;

#[derive(Debug, Deserialize)]
struct XmlRecords {
    #[serde(rename = "record", default)]
    records: Vec<XmlRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct XmlRecord {
    #[serde(rename = "@reference")]
    reference: i64,
    account_number: String,
    description: String,
    start_balance: String,
    mutation: String,
    end_balance: String,
}

impl XmlRecord {
    fn into_record(self) -> Result<StatementRecord, String> {
        let reference = self.reference;
        let amount = |field: &str, raw: &str| {
            parse_amount(field, raw).map_err(|e| format!("record {reference}: {e}"))
        };

        Ok(StatementRecord::new(
            reference,
            self.account_number,
            self.description,
            amount("startBalance", &self.start_balance)?,
            amount("mutation", &self.mutation)?,
            amount("endBalance", &self.end_balance)?,
        ))
    }
}

/// Parse an XML document into records, in document order.
///
/// Malformed or truncated documents, zero-byte documents and records missing
/// any field reject the whole document. An empty `<records/>` wrapper yields
/// an empty list.
pub fn parse_xml(content: &[u8]) -> StatementResult<Vec<StatementRecord>> {
    match read_document(content) {
        Ok(records) => {
            debug!(records = records.len(), "Successfully parsed XML content");
            Ok(records)
        }
        Err(cause) => {
            error!(%cause, "XML processing failed");
            Err(StatementError::FileParsing(format!(
                "XML processing failed: {cause}"
            )))
        }
    }
}

fn read_document(content: &[u8]) -> Result<Vec<StatementRecord>, String> {
    let document: XmlRecords = from_reader(content).map_err(|e| e.to_string())?;

    document
        .records
        .into_iter()
        .map(XmlRecord::into_record)
        .collect()
}
