//! # Statement Processor
//!
//! Ingestion and validation of bank statement files.
//!
//! ## Features
//!
//! - **Format parsing**: CSV and XML statements normalized into one canonical record
//! - **Validation**: duplicate transaction references and end balance consistency
//!   (`start_balance + mutation == end_balance`, exact decimal comparison)
//! - **Reporting**: every rejected record listed in a report with a random id
//! - **Sink abstraction**: valid batches handed to any storage backend through a trait
//!
//! ## Quick Start
//!
//! ```rust
//! use statement_processor::utils::MemorySink;
//! use statement_processor::StatementProcessor;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let sink = MemorySink::new();
//! let processor = StatementProcessor::new(sink.clone());
//!
//! let csv = "Reference,Account Number,Description,Start Balance,Mutation,End Balance\n\
//!            194261,NL91RABO0315273637,Clothes from Jan Bakker,21.6,-41.83,-20.23\n";
//!
//! let report = processor.process(csv.as_bytes(), Some("statement.csv")).await.unwrap();
//! assert!(report.failed_records.is_empty());
//! assert_eq!(sink.len(), 1);
//! # }
//! ```

pub mod parser;
pub mod processor;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use parser::{parse_csv, parse_xml, FileFormat};
pub use processor::{assemble_report, StatementProcessor};
pub use traits::*;
pub use types::*;
pub use utils::validation::validate_statements;
