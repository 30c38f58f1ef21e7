//! Integration tests for statement-processor

use statement_processor::{
    utils::MemorySink, ErrorResponse, FixedReportId, StatementError, StatementProcessor,
    DUPLICATE_REFERENCE_DETECTED, INVALID_END_BALANCE,
};

const CSV_WITH_DUPLICATES: &str = "\
Reference,AccountNumber,Description,Start Balance,Mutation,End Balance
194261,NL91RABO0315273637,Clothes from Jan Bakker,21.6,-41.83,-20.23
112806,NL27SNSB0917829871,Clothes for Willem Dekker,91.23,+15.57,106.8
183049,NL69ABNA0433647324,Clothes for Jan King,86.66,+44.5,131.16
183356,NL74ABNA0248990274,Subscription for Peter de Vries,92.98,-46.65,46.33
112806,NL69ABNA0433647324,Clothes for Richard de Vries,90.83,-10.91,79.92
112806,NL93ABNA0585619023,Tickets from Richard Bakker,102.12,+45.87,147.99
139524,NL43AEGO0773393871,Flowers from Jan Bakker,99.44,+41.23,140.67
179430,NL93ABNA0585619023,Clothes for Vincent Bakker,23.96,-27.43,-3.47
141223,NL93ABNA0585619023,Clothes from Erik Bakker,94.25,+41.6,135.85
195446,NL74ABNA0248990274,Flowers for Willem Dekker,26.32,+48.98,75.3
";

const CSV_VALID: &str = "\
Reference,Account Number,Description,Start Balance,Mutation,End Balance
194261,NL91RABO0315273637,Clothes from Jan Bakker,21.6,-41.83,-20.23
183049,NL69ABNA0433647324,Clothes for Jan King,86.66,+44.5,131.16
183356,NL74ABNA0248990274,Subscription for Peter de Vries,92.98,-46.65,46.33
112806,NL69ABNA0433647324,Clothes for Richard de Vries,90.83,-10.91,79.92
139524,NL43AEGO0773393871,Flowers from Jan Bakker,99.44,+41.23,140.67
179430,NL93ABNA0585619023,Clothes for Vincent Bakker,23.96,-27.43,-3.47
";

const XML_WITH_INVALID_BALANCE: &str = r#"<records>
  <record reference="130498">
    <accountNumber>NL69ABNA0433647324</accountNumber>
    <description>Tickets for Peter Theuß</description>
    <startBalance>26.9</startBalance>
    <mutation>-18.78</mutation>
    <endBalance>8.12</endBalance>
  </record>
  <record reference="167875">
    <accountNumber>NL93ABNA0585619023</accountNumber>
    <description>Tickets from Erik de Vries</description>
    <startBalance>5429</startBalance>
    <mutation>-939</mutation>
    <endBalance>6368</endBalance>
  </record>
  <record reference="147674">
    <accountNumber>NL93ABNA0585619023</accountNumber>
    <description>Subscription from Peter Dekker</description>
    <startBalance>74.69</startBalance>
    <mutation>-44.91</mutation>
    <endBalance>29.78</endBalance>
  </record>
</records>"#;

const XML_VALID: &str = r#"<records>
  <record reference="130498">
    <accountNumber>NL69ABNA0433647324</accountNumber>
    <description>Tickets for Peter Theuß</description>
    <startBalance>26.9</startBalance>
    <mutation>-18.78</mutation>
    <endBalance>8.12</endBalance>
  </record>
  <record reference="147674">
    <accountNumber>NL93ABNA0585619023</accountNumber>
    <description>Subscription from Peter Dekker</description>
    <startBalance>74.69</startBalance>
    <mutation>-44.91</mutation>
    <endBalance>29.78</endBalance>
  </record>
</records>"#;

fn processor() -> (MemorySink, StatementProcessor<MemorySink>) {
    let sink = MemorySink::new();
    let processor = StatementProcessor::with_id_source(sink.clone(), Box::new(FixedReportId(77)));
    (sink, processor)
}

#[tokio::test]
async fn test_csv_with_duplicate_references() {
    let (sink, processor) = processor();

    let report = processor
        .process(CSV_WITH_DUPLICATES.as_bytes(), Some("test.csv"))
        .await
        .unwrap();

    assert_eq!(report.failed_records.len(), 3);
    assert!(report
        .failed_records
        .iter()
        .all(|f| f.reference == Some(112806)
            && f.error_message == DUPLICATE_REFERENCE_DETECTED));
    assert_eq!(
        report
            .failed_records
            .iter()
            .map(|f| f.description.as_str())
            .collect::<Vec<_>>(),
        vec![
            "Clothes for Willem Dekker",
            "Clothes for Richard de Vries",
            "Tickets from Richard Bakker",
        ]
    );

    // a batch with failures is never partially stored
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_csv_without_validation_errors() {
    let (sink, processor) = processor();

    let report = processor
        .process(CSV_VALID.as_bytes(), Some("statement.CSV"))
        .await
        .unwrap();

    assert_eq!(report.report_id, 77);
    assert!(report.failed_records.is_empty());

    assert_eq!(sink.len(), 6);
    assert_eq!(sink.find_by_account_number("NL93ABNA0585619023").len(), 1);
    let stored = sink.find_by_reference(179430);
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].description, "Clothes for Vincent Bakker");
}

#[tokio::test]
async fn test_xml_with_invalid_balance() {
    let (sink, processor) = processor();

    let report = processor
        .process(XML_WITH_INVALID_BALANCE.as_bytes(), Some("test.xml"))
        .await
        .unwrap();

    assert_eq!(report.failed_records.len(), 1);
    let failure = &report.failed_records[0];
    assert_eq!(failure.reference, Some(167875));
    assert_eq!(failure.description, "Tickets from Erik de Vries");
    assert_eq!(failure.error_message, INVALID_END_BALANCE);
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_xml_without_validation_errors() {
    let (sink, processor) = processor();

    let report = processor
        .process(XML_VALID.as_bytes(), Some("test.xml"))
        .await
        .unwrap();

    assert!(report.failed_records.is_empty());
    assert_eq!(sink.len(), 2);
}

#[tokio::test]
async fn test_duplicates_and_invalid_balance_together() {
    let (sink, processor) = processor();
    let content = "\
Reference,Account Number,Description,Start Balance,Mutation,End Balance
123,NL1234567890,Record A,1000.00,+200.00,1200.00
123,NL1234567890,Record B,50,+50,100
126,NL1234567890,Record C,10,+5,20
";

    let report = processor
        .process(content.as_bytes(), Some("mixed.csv"))
        .await
        .unwrap();

    assert_eq!(report.failed_records.len(), 3);
    let duplicates = report
        .failed_records
        .iter()
        .filter(|f| f.error_message == DUPLICATE_REFERENCE_DETECTED)
        .count();
    let balances = report
        .failed_records
        .iter()
        .filter(|f| f.error_message == INVALID_END_BALANCE)
        .count();
    assert_eq!(duplicates, 2);
    assert_eq!(balances, 1);
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_empty_inputs_produce_empty_reports() {
    let (sink, processor) = processor();

    let csv_report = processor.process(b"", Some("empty.csv")).await.unwrap();
    assert!(csv_report.failed_records.is_empty());

    let xml_report = processor
        .process(b"<records></records>", Some("empty.xml"))
        .await
        .unwrap();
    assert!(xml_report.failed_records.is_empty());

    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_invalid_xml_file() {
    let (_, processor) = processor();
    let content = r#"<records>
  <record reference="130498">
    <accountNumber>NL69ABNA0433647324</accountNumber>
    <description>Tickets for Peter Theu</description>
    <startBalance>26.9</startBalance>
"#;

    let error = processor
        .process(content.as_bytes(), Some("test.xml"))
        .await
        .unwrap_err();

    assert!(matches!(error, StatementError::FileParsing(_)));
    assert!(error.is_client_error());
    assert!(error.details().starts_with("XML processing failed:"));
    assert_eq!(ErrorResponse::from(&error).error, "Error parsing the file");
}

#[tokio::test]
async fn test_invalid_csv_file() {
    let (_, processor) = processor();
    let content = "\
Reference,AccountNumber,Description,Start Balance,Mutation,End Balance
wwww,NL91RABO0315273637,Clothes from Jan Bakker,21.6,www.83,ttt
";

    let error = processor
        .process(content.as_bytes(), Some("test.csv"))
        .await
        .unwrap_err();

    assert!(error.details().starts_with("CSV parsing failed:"));
    assert_eq!(ErrorResponse::from(&error).error, "Error parsing the file");
}

#[tokio::test]
async fn test_unsupported_file() {
    let (_, processor) = processor();

    let error = processor
        .process(b"invalid data", Some("invalid.txt"))
        .await
        .unwrap_err();

    let response = ErrorResponse::from(&error);
    assert_eq!(response.error, "Invalid file");
    assert_eq!(response.details, "Unsupported file type");
}

#[tokio::test]
async fn test_report_json_shape() {
    let (_, processor) = processor();

    let report = processor
        .process(XML_WITH_INVALID_BALANCE.as_bytes(), Some("test.xml"))
        .await
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["reportId"], 77);
    assert_eq!(json["failedRecords"][0]["reference"], 167875);
    assert_eq!(json["failedRecords"][0]["description"], "Tickets from Erik de Vries");
    assert_eq!(json["failedRecords"][0]["errorMessage"], INVALID_END_BALANCE);

    let empty = processor
        .process(XML_VALID.as_bytes(), Some("test.xml"))
        .await
        .unwrap();
    let json = serde_json::to_value(&empty).unwrap();
    assert_eq!(json["failedRecords"], serde_json::json!([]));
}

#[tokio::test]
async fn test_concurrent_uploads_share_one_processor() {
    let sink = MemorySink::new();
    let processor = std::sync::Arc::new(StatementProcessor::new(sink.clone()));

    let mut handles = Vec::new();
    for _ in 0..4 {
        let processor = processor.clone();
        handles.push(tokio::spawn(async move {
            processor
                .process(XML_VALID.as_bytes(), Some("upload.xml"))
                .await
                .unwrap()
        }));
    }

    for handle in handles {
        assert!(handle.await.unwrap().failed_records.is_empty());
    }

    assert_eq!(sink.len(), 8);
    let mut ids: Vec<_> = sink.all().iter().filter_map(|s| s.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, (1..=8).collect::<Vec<u64>>());
}
