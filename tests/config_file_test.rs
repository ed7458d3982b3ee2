use anyhow::Result;
use hotel_reviews_etl::utils::validation::Validate;
use hotel_reviews_etl::{AppConfig, EtlError, FailurePolicy};
use tempfile::TempDir;

#[test]
fn test_load_config_file_with_env_substitution() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("etl-config.toml");
    std::env::set_var("HOTEL_ETL_FILE_TEST_KEY", "key-from-env");

    std::fs::write(
        &path,
        r#"
[api]
base_url = "https://booking-com.p.rapidapi.com"
api_key = "${HOTEL_ETL_FILE_TEST_KEY}"
api_host = "booking-com.p.rapidapi.com"
timeout_seconds = 30

[search]
place_name = "Madinah"
checkin_date = "2024-03-01"
checkout_date = "2024-03-03"

[load]
output_path = "exports/madinah.csv"

[error_handling]
on_api_failure = "degrade"
"#,
    )?;

    let config = AppConfig::from_file(&path)?;
    config.validate()?;

    assert_eq!(config.api.api_key, "key-from-env");
    assert_eq!(config.api.timeout_seconds, Some(30));
    assert_eq!(config.search.place_name, "Madinah");
    assert_eq!(config.search.max_hotels, 20);
    assert_eq!(config.load.file_name(), "madinah.csv");
    assert_eq!(config.error_handling.on_api_failure, FailurePolicy::Degrade);
    Ok(())
}

#[test]
fn test_missing_config_file_is_io_error() {
    let err = AppConfig::from_file("/definitely/not/here/etl-config.toml").unwrap_err();
    assert!(matches!(err, EtlError::IoError(_)));
}

#[test]
fn test_unknown_failure_policy_is_rejected() {
    let err = AppConfig::from_toml_str(
        r#"
[api]
base_url = "https://example.com"

[error_handling]
on_api_failure = "retry_forever"
"#,
    )
    .unwrap_err();

    assert!(matches!(err, EtlError::ConfigValidationError { .. }));
}
