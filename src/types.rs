//! Core types and data structures for statement processing

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// Message attached to every record whose reference occurs more than once in a batch
pub const DUPLICATE_REFERENCE_DETECTED: &str = "Duplicate transaction reference detected.";

/// Message attached to every record where start balance + mutation != end balance
pub const INVALID_END_BALANCE: &str = "Invalid end balance.";

/// Canonical statement record, shared by every input format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementRecord {
    /// Transaction reference, used as the duplicate-detection key
    pub reference: i64,
    /// Account number, kept as an opaque identifier
    pub account_number: String,
    /// Free-text description of the transaction
    pub description: String,
    /// Balance before the mutation
    pub start_balance: BigDecimal,
    /// Signed amount applied to the start balance
    pub mutation: BigDecimal,
    /// Balance after the mutation
    pub end_balance: BigDecimal,
}

impl StatementRecord {
    /// Create a new statement record
    pub fn new(
        reference: i64,
        account_number: String,
        description: String,
        start_balance: BigDecimal,
        mutation: BigDecimal,
        end_balance: BigDecimal,
    ) -> Self {
        Self {
            reference,
            account_number,
            description,
            start_balance,
            mutation,
            end_balance,
        }
    }

    /// Check that `start_balance + mutation == end_balance`.
    ///
    /// The comparison is exact and ignores scale, so `106.8` and `106.80` are equal.
    pub fn is_balance_consistent(&self) -> bool {
        &self.start_balance + &self.mutation == self.end_balance
    }
}

/// A single record rejected by validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFailure {
    /// Reference of the offending record
    pub reference: Option<i64>,
    /// Description of the offending record
    pub description: String,
    /// One or both of the fixed validation messages
    pub error_message: String,
}

impl ValidationFailure {
    /// Build a failure for `record` from the two validation outcomes.
    ///
    /// Both messages are concatenated without a separator when both checks fail.
    pub fn for_record(
        record: &StatementRecord,
        is_duplicate: bool,
        is_balance_valid: bool,
    ) -> Self {
        let mut error_message = String::new();
        if is_duplicate {
            error_message.push_str(DUPLICATE_REFERENCE_DETECTED);
        }
        if !is_balance_valid {
            error_message.push_str(INVALID_END_BALANCE);
        }

        Self {
            reference: Some(record.reference),
            description: record.description.clone(),
            error_message,
        }
    }
}

/// Result of one pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Opaque correlation id, randomly generated per run
    pub report_id: i64,
    /// Rejected records, empty when the whole batch passed
    pub failed_records: Vec<ValidationFailure>,
}

impl Report {
    /// Whether the batch passed validation
    pub fn is_valid(&self) -> bool {
        self.failed_records.is_empty()
    }
}

/// Shape in which accepted records are handed to a sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedStatement {
    /// Identifier assigned by the store; `None` until stored
    pub id: Option<u64>,
    pub reference: i64,
    pub account_number: String,
    pub description: String,
    pub start_balance: BigDecimal,
    pub mutation: BigDecimal,
    pub end_balance: BigDecimal,
}

impl From<&StatementRecord> for PersistedStatement {
    fn from(record: &StatementRecord) -> Self {
        Self {
            id: None,
            reference: record.reference,
            account_number: record.account_number.clone(),
            description: record.description.clone(),
            start_balance: record.start_balance.clone(),
            mutation: record.mutation.clone(),
            end_balance: record.end_balance.clone(),
        }
    }
}

/// Errors that terminate a pipeline run
#[derive(Debug, thiserror::Error)]
pub enum StatementError {
    #[error("Invalid file: {0}")]
    InvalidFile(String),
    #[error("Error parsing the file: {0}")]
    FileParsing(String),
    #[error("Sink failure: {0}")]
    Sink(String),
}

impl StatementError {
    /// Whether the error was caused by the uploaded file rather than by the system
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            StatementError::InvalidFile(_) | StatementError::FileParsing(_)
        )
    }

    /// The inner message, without the variant prefix
    pub fn details(&self) -> &str {
        match self {
            StatementError::InvalidFile(message)
            | StatementError::FileParsing(message)
            | StatementError::Sink(message) => message,
        }
    }
}

/// Caller-facing description of a failed run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: String,
}

impl From<&StatementError> for ErrorResponse {
    fn from(error: &StatementError) -> Self {
        let title = match error {
            StatementError::InvalidFile(_) => "Invalid file",
            StatementError::FileParsing(_) => "Error parsing the file",
            StatementError::Sink(_) => "File processing failed",
        };

        Self {
            error: title.to_string(),
            details: error.details().to_string(),
        }
    }
}

/// Result type for statement processing operations
pub type StatementResult<T> = Result<T, StatementError>;
