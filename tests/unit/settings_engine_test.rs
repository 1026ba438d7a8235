//! Integration-level unit tests for the SettingsEngine public API.
//!
//! These tests exercise the SettingsEngine through its public trait interface,
//! validating default loading, persistence, partial files and reset behavior.

use mapsearch::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use mapsearch::types::errors::SettingsError;
use mapsearch::types::position::{DEFAULT_FALLBACK_LATITUDE, DEFAULT_FALLBACK_LONGITUDE};
use mapsearch::types::settings::CoreSettings;
use tempfile::TempDir;

/// Helper: create a SettingsEngine backed by a temp directory that lives for the
/// duration of the test (the caller holds the `TempDir` handle).
fn engine_in_temp(dir: &TempDir) -> SettingsEngine {
    let path = dir
        .path()
        .join("settings.json")
        .to_string_lossy()
        .to_string();
    SettingsEngine::new(Some(path))
}

#[test]
fn test_load_defaults_when_no_config_file_exists() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    let settings = engine.load().unwrap();

    assert_eq!(settings, CoreSettings::default());
    assert_eq!(settings.map.fallback_latitude, DEFAULT_FALLBACK_LATITUDE);
    assert_eq!(settings.map.fallback_longitude, DEFAULT_FALLBACK_LONGITUDE);
    assert_eq!(settings.search.page_size, 15);
    assert!(settings.search.api_key.is_none());
}

#[test]
fn test_save_then_load_in_new_engine() {
    let dir = TempDir::new().unwrap();
    engine_in_temp(&dir).save().unwrap();

    let mut engine = engine_in_temp(&dir);
    assert_eq!(engine.load().unwrap(), CoreSettings::default());
}

#[test]
fn test_partial_file_fills_in_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("settings.json"),
        r#"{ "map": { "fallback_latitude": 35.89053 }, "search": { "api_key": "abc" } }"#,
    )
    .unwrap();

    let mut engine = engine_in_temp(&dir);
    let settings = engine.load().unwrap();

    assert_eq!(settings.map.fallback_latitude, 35.89053);
    assert_eq!(settings.map.fallback_longitude, DEFAULT_FALLBACK_LONGITUDE);
    assert_eq!(settings.search.api_key.as_deref(), Some("abc"));
    assert_eq!(settings.search.timeout_secs, 10);
    assert_eq!(settings.log_filter, "info");
}

#[test]
fn test_malformed_file_is_serialization_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("settings.json"), "{ not json").unwrap();

    let mut engine = engine_in_temp(&dir);
    match engine.load() {
        Err(SettingsError::SerializationError(_)) => {}
        other => panic!("expected serialization error, got {:?}", other),
    }
}

#[test]
fn test_reset_writes_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("settings.json"),
        r#"{ "log_filter": "debug" }"#,
    )
    .unwrap();

    let mut engine = engine_in_temp(&dir);
    assert_eq!(engine.load().unwrap().log_filter, "debug");

    engine.reset().unwrap();

    let mut fresh = engine_in_temp(&dir);
    assert_eq!(fresh.load().unwrap(), CoreSettings::default());
}

#[test]
fn test_explicit_database_path_is_used() {
    let settings = CoreSettings {
        database_path: Some("/var/lib/mapsearch/test.db".to_string()),
        ..CoreSettings::default()
    };
    assert_eq!(
        settings.database_path(),
        std::path::PathBuf::from("/var/lib/mapsearch/test.db")
    );
    assert!(CoreSettings::default().database_path().ends_with("mapsearch.db"));
}
