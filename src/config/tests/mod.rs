//! Unit tests for config module
//!
//! Tests configuration defaults, TOML parsing and file loading.

#![allow(clippy::panic)]

use std::{fs, path::PathBuf};

use tempfile::TempDir;

use crate::{
    WsecError,
    config::{ConfigPaths, EngineConfig, LogLevel},
    secrets::StoragePolicy,
};

#[test]
fn config_default() {
    let config = EngineConfig::default();

    assert_eq!(config.general.log_level, LogLevel::Info);
    assert_eq!(config.secrets.new_connection_policy, StoragePolicy::AgentOwned);
    assert!(config.secrets.system_ca_certs);
    assert_eq!(config.ca_ignore.path, None);
}

#[test]
fn config_empty_toml() {
    let config: EngineConfig = toml::from_str("").unwrap();

    assert_eq!(config, EngineConfig::default());
}

#[test]
fn config_partial_section_keeps_other_defaults() {
    let toml_str = r#"
        [secrets]
        new_connection_policy = "not-saved"
    "#;

    let config: EngineConfig = toml::from_str(toml_str).unwrap();

    assert_eq!(config.secrets.new_connection_policy, StoragePolicy::NotSaved);
    assert!(config.secrets.system_ca_certs);
}

#[test]
fn config_serialize_roundtrip() {
    let mut original = EngineConfig::default();
    original.general.log_level = LogLevel::Debug;
    original.ca_ignore.path = Some(PathBuf::from("/tmp/ca-ignore.toml"));

    let toml_str = toml::to_string(&original).unwrap();
    assert!(toml_str.contains("[secrets]"));
    assert!(toml_str.contains("new_connection_policy = \"agent-owned\""));

    let deserialized: EngineConfig = toml::from_str(&toml_str).unwrap();
    assert_eq!(original, deserialized);
}

#[test]
fn config_unknown_fields() {
    let toml_with_unknown = r#"
        [general]
        log_level = "warn"
        unknown_field = "should be ignored"

        [unknown_section]
        some_field = "ignored"
    "#;

    let config: EngineConfig = toml::from_str(toml_with_unknown).unwrap();
    assert_eq!(config.general.log_level, LogLevel::Warn);
}

#[test]
fn load_missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();

    let config = EngineConfig::load(&dir.path().join("absent.toml")).unwrap();

    assert_eq!(config, EngineConfig::default());
}

#[test]
fn load_reads_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "[secrets]\nsystem_ca_certs = false\n\n[ca_ignore]\npath = \"/var/lib/wsec/ca.toml\"\n",
    )
    .unwrap();

    let config = EngineConfig::load(&path).unwrap();

    assert!(!config.secrets.system_ca_certs);
    assert_eq!(
        config.ca_ignore_path().unwrap(),
        PathBuf::from("/var/lib/wsec/ca.toml")
    );
}

#[test]
fn load_rejects_invalid_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[general\nlog_level = ").unwrap();

    let result = EngineConfig::load(&path);

    assert!(matches!(result, Err(WsecError::TomlParseError { .. })));
}

#[test]
fn load_rejects_unknown_policy() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[secrets]\nnew_connection_policy = \"sometimes\"\n").unwrap();

    let result = EngineConfig::load(&path);

    assert!(matches!(result, Err(WsecError::ConfigValidation { .. })));
}

#[test]
fn json_schema_lists_sections() {
    let schema = EngineConfig::json_schema().unwrap();

    assert!(schema.contains("new_connection_policy"));
    assert!(schema.contains("log_level"));
}

#[test]
fn log_level_directive() {
    assert_eq!(LogLevel::Debug.directive(), "wsec=debug");
}

#[test]
fn config_paths_valid() {
    if std::env::var("HOME").is_ok() {
        let main_path = ConfigPaths::main_config().unwrap();
        let ca_path = ConfigPaths::ca_ignore_file().unwrap();

        assert!(main_path.to_string_lossy().ends_with("wsec/config.toml"));
        assert!(ca_path.to_string_lossy().ends_with("ca-ignore.toml"));
        assert_eq!(main_path.parent(), ca_path.parent());
    }
}
