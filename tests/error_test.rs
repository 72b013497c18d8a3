//! Tests for error types

use heuristic_analytics::Error;

#[test]
fn test_missing_input_error() {
    let error = Error::MissingInput("no results file found".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Missing input"));
    assert!(error_str.contains("no results file found"));
    assert!(error_str.contains("Pass the path"));
}

#[test]
fn test_malformed_record_error() {
    let error = Error::MalformedRecord("data row 3: missing value for column n".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Malformed record"));
    assert!(error_str.contains("data row 3"));
}

#[test]
fn test_duplicate_record_error() {
    let error = Error::DuplicateRecord("MLR n=10 m=2".to_string());
    assert!(format!("{error}").starts_with("Duplicate record"));
}

#[test]
fn test_no_data_error() {
    let error = Error::NoData;
    assert!(format!("{error}").contains("no experiment records"));
}

#[test]
fn test_storage_error() {
    let error = Error::StorageError("file not found".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Storage error"));
    assert!(error_str.contains("file not found"));
}

#[test]
fn test_config_error() {
    let error = Error::Config("thresholds inverted".to_string());
    assert!(format!("{error}").contains("Configuration error"));
}

#[test]
fn test_io_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error: Error = io_error.into();
    let error_str = format!("{error}");
    assert!(error_str.contains("IO error"));
    assert!(error_str.contains("file not found"));
}

#[test]
fn test_json_error_conversion() {
    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: Error = json_error.into();
    assert!(format!("{error}").contains("JSON error"));
}

#[test]
fn test_error_debug() {
    let error = Error::NoData;
    let debug_str = format!("{error:?}");
    assert!(debug_str.contains("NoData"));
}
