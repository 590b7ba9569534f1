use wesichain_core::WesichainError;

#[test]
fn error_display_for_invalid_config() {
    let err = WesichainError::InvalidConfig("index_name is required".to_string());
    assert_eq!(format!("{err}"), "Invalid configuration: index_name is required");
}

#[test]
fn error_display_for_retrieval() {
    let err = WesichainError::Retrieval("HTTP 503".to_string());
    assert_eq!(format!("{err}"), "Retrieval failed: HTTP 503");
}

