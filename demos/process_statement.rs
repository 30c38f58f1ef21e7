//! Process a statement file and print the report as JSON
//!
//! ```text
//! RUST_LOG=info cargo run --example process_statement -- records.csv
//! ```
//!
//! Without an argument a built-in CSV sample with duplicate references is used.

use statement_processor::utils::MemorySink;
use statement_processor::{ErrorResponse, StatementProcessor};

const SAMPLE: &str = "\
Reference,Account Number,Description,Start Balance,Mutation,End Balance
194261,NL91RABO0315273637,Clothes from Jan Bakker,21.6,-41.83,-20.23
112806,NL27SNSB0917829871,Clothes for Willem Dekker,91.23,+15.57,106.8
183049,NL69ABNA0433647324,Clothes for Jan King,86.66,+44.5,131.16
112806,NL69ABNA0433647324,Clothes for Richard de Vries,90.83,-10.91,79.92
167875,NL93ABNA0585619023,Tickets from Erik de Vries,5429,-939,6368
";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let (filename, content) = match std::env::args().nth(1) {
        Some(path) => {
            let content = std::fs::read(&path)?;
            (path, content)
        }
        None => ("sample.csv".to_string(), SAMPLE.as_bytes().to_vec()),
    };

    let sink = MemorySink::new();
    let processor = StatementProcessor::new(sink.clone());

    match processor.process(&content, Some(&filename)).await {
        Ok(report) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            println!("Stored statements: {}", sink.len());
        }
        Err(error) => {
            println!("{}", serde_json::to_string_pretty(&ErrorResponse::from(&error))?);
            std::process::exit(if error.is_client_error() { 2 } else { 1 });
        }
    }

    Ok(())
}
