//! Integration tests for `logsieve config` command.
//!
//! Tests config loading and validation with real TOML files, through
//! `LogsieveConfig::load` -- the same entry point the validate/show
//! handlers use.

use std::fs;
use std::path::PathBuf;

use logsieve_core::config::LogsieveConfig;
use tempfile::TempDir;

fn write_config(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("logsieve.toml");
    fs::write(&path, body).expect("should write config");
    path
}

#[tokio::test]
async fn test_config_validate_valid_toml() {
    // Given: A valid config file
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = write_config(
        &temp_dir,
        r#"
[general]
log_level = "info"
log_format = "json"

[extract]
source_log = "/var/log/modsec_audit.log"
work_dir = "/tmp/logsieve"
output_path = "/tmp/logsieve/modsec_audit.json"
"#,
    );

    // When: Loading the config
    let result = LogsieveConfig::load(&config_path).await;

    // Then: Should succeed
    let config = result.expect("valid config should load successfully");
    assert_eq!(config.general.log_format, "json");
    assert_eq!(config.extract.work_dir, "/tmp/logsieve");
}

#[tokio::test]
async fn test_config_partial_section_merges_with_defaults() {
    // Given: A config file that only sets source_log
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = write_config(
        &temp_dir,
        r#"
[extract]
source_log = "/srv/waf/audit.log"
"#,
    );

    // When: Loading the config
    let config = LogsieveConfig::load(&config_path)
        .await
        .expect("partial config should load");

    // Then: Unset fields come from defaults
    assert_eq!(config.extract.source_log, "/srv/waf/audit.log");
    assert_eq!(config.extract.work_dir, "./logsieve-work");
    assert_eq!(config.general.log_level, "info");
}

#[tokio::test]
async fn test_config_validate_empty_file() {
    // Given: An empty config file
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = write_config(&temp_dir, "");

    // When: Loading the config
    let result = LogsieveConfig::load(&config_path).await;

    // Then: Should succeed with defaults
    let config = result.expect("empty config should use defaults");
    assert_eq!(config.extract.source_log, "/var/log/modsec_audit.log");
    assert_eq!(config.extract.output_path, "./logsieve-work/modsec_audit.json");
    assert_eq!(config.general.log_format, "pretty");
}

#[tokio::test]
async fn test_config_validate_malformed_toml() {
    // Given: A malformed TOML file
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = write_config(
        &temp_dir,
        r#"
[general
log_level = "info"
"#,
    );

    // When: Loading the config
    let result = LogsieveConfig::load(&config_path).await;

    // Then: Should fail
    assert!(result.is_err(), "malformed TOML should fail to load");
}

#[tokio::test]
async fn test_config_validate_missing_file() {
    // Given: A nonexistent file path
    let config_path = PathBuf::from("/nonexistent/logsieve.toml");

    // When: Loading the config
    let result = LogsieveConfig::load(&config_path).await;

    // Then: Should fail
    assert!(result.is_err(), "missing file should fail to load");
}

#[tokio::test]
async fn test_config_rejects_unknown_log_level_by_name() {
    // Given: A config with a log level outside trace..error
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = write_config(
        &temp_dir,
        r#"
[general]
log_level = "verbose"
"#,
    );

    // When: Loading the config
    let result = LogsieveConfig::load(&config_path).await;

    // Then: Validation fails and names the offending field
    let err = result.expect_err("unknown log level should fail validation");
    assert!(
        err.to_string().contains("general.log_level"),
        "error should name the offending field: {}",
        err
    );
}

#[tokio::test]
async fn test_config_rejects_empty_source_log_by_name() {
    // Given: A config with an empty source path
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = write_config(
        &temp_dir,
        r#"
[extract]
source_log = ""
"#,
    );

    // When: Loading the config
    let result = LogsieveConfig::load(&config_path).await;

    // Then: Validation fails and names the offending field
    let err = result.expect_err("empty source path should fail validation");
    assert!(
        err.to_string().contains("extract.source_log"),
        "error should name the offending field: {}",
        err
    );
}

#[tokio::test]
async fn test_config_full_file_round_trips() {
    // Given: A config file setting every field
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = write_config(
        &temp_dir,
        r#"
[general]
log_level = "debug"
log_format = "pretty"

[extract]
source_log = "/srv/waf/modsec_audit.log"
work_dir = "/srv/waf/work"
output_path = "/srv/waf/work/modsec_audit.json"
"#,
    );

    // When: Loading the config
    let config = LogsieveConfig::load(&config_path)
        .await
        .expect("full config should load");

    // Then: Every field carries the file's value
    assert_eq!(config.general.log_level, "debug");
    assert_eq!(config.general.log_format, "pretty");
    assert_eq!(config.extract.source_log, "/srv/waf/modsec_audit.log");
    assert_eq!(config.extract.work_dir, "/srv/waf/work");
    assert_eq!(config.extract.output_path, "/srv/waf/work/modsec_audit.json");
}

#[tokio::test]
async fn test_config_unicode_paths() {
    // Given: A config with non-ascii and versioned path segments
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = write_config(
        &temp_dir,
        r#"
[extract]
source_log = "/로그/감사_로그.log"
output_path = "/var/lib/logsieve/out@v1.0/audit-2024-02.json"
"#,
    );

    // When: Loading the config
    let config = LogsieveConfig::load(&config_path)
        .await
        .expect("unicode paths should load");

    // Then: Path values survive untouched
    assert!(config.extract.source_log.contains("감사_로그"));
    assert!(config.extract.output_path.contains("@v1.0"));
}

#[tokio::test]
async fn test_config_very_long_paths() {
    // Given: A config with a 200-character path
    let temp_dir = TempDir::new().expect("should create temp dir");
    let long_path = "/".to_string() + &"a".repeat(200);
    let config_path = write_config(
        &temp_dir,
        &format!(
            r#"
[extract]
source_log = "{}"
"#,
            long_path
        ),
    );

    // When: Loading the config
    let config = LogsieveConfig::load(&config_path)
        .await
        .expect("long paths should load");

    // Then: The full path survives
    assert_eq!(config.extract.source_log, long_path);
}
