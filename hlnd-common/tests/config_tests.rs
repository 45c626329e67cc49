//! Unit tests for configuration loading and dataset path resolution
//!
//! Covers:
//! - Missing TOML files fall back to defaults instead of failing
//! - Malformed TOML is reported as a configuration error
//! - Dataset path priority: CLI > environment > TOML > default
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate HLND_DATASET are marked with #[serial].

use hlnd_common::config::{
    default_dataset_path, load_toml_config, resolve_dataset_path, TomlConfig, DATASET_ENV_VAR,
};
use hlnd_common::Error;
use serial_test::serial;
use std::env;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[test]
fn test_missing_config_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = load_toml_config(&temp_dir.path().join("absent.toml")).unwrap();

    assert_eq!(config.port, 5790);
    assert!(config.dataset_path.is_none());
    assert_eq!(config.dashboard.sample_size, 10);
}

#[test]
fn test_config_file_values_loaded() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
dataset_path = "/data/articles.csv"
bind_host = "0.0.0.0"

[logging]
level = "debug"

[dashboard]
sample_size = 25

[dashboard.map_region]
lat_min = 40.0
lat_max = 45.0
lon_min = -75.0
lon_max = -70.0
"#,
    )
    .unwrap();

    let config = load_toml_config(&path).unwrap();
    assert_eq!(config.dataset_path, Some(PathBuf::from("/data/articles.csv")));
    assert_eq!(config.bind_host, "0.0.0.0");
    assert_eq!(config.port, 5790);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.dashboard.sample_size, 25);
    assert_eq!(config.dashboard.top_entities, 10);
    assert_eq!(config.dashboard.map_region.lat_min, 40.0);
    assert_eq!(config.dashboard.map_region.lon_max, -70.0);
}

#[test]
fn test_malformed_config_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "port = \"not a number\"").unwrap();

    match load_toml_config(&path) {
        Err(Error::Config(msg)) => assert!(msg.contains("Parse")),
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
#[serial]
fn test_cli_argument_has_highest_priority() {
    env::set_var(DATASET_ENV_VAR, "/tmp/hlnd-from-env.csv");
    let config = TomlConfig {
        dataset_path: Some(PathBuf::from("/tmp/hlnd-from-toml.csv")),
        ..Default::default()
    };

    let resolved = resolve_dataset_path(Some(Path::new("/tmp/hlnd-from-cli.csv")), &config);
    assert_eq!(resolved, PathBuf::from("/tmp/hlnd-from-cli.csv"));

    env::remove_var(DATASET_ENV_VAR);
}

#[test]
#[serial]
fn test_env_var_beats_toml() {
    env::set_var(DATASET_ENV_VAR, "/tmp/hlnd-from-env.csv");
    let config = TomlConfig {
        dataset_path: Some(PathBuf::from("/tmp/hlnd-from-toml.csv")),
        ..Default::default()
    };

    let resolved = resolve_dataset_path(None, &config);
    assert_eq!(resolved, PathBuf::from("/tmp/hlnd-from-env.csv"));

    env::remove_var(DATASET_ENV_VAR);
}

#[test]
#[serial]
fn test_toml_beats_default() {
    env::remove_var(DATASET_ENV_VAR);
    let config = TomlConfig {
        dataset_path: Some(PathBuf::from("/tmp/hlnd-from-toml.csv")),
        ..Default::default()
    };

    let resolved = resolve_dataset_path(None, &config);
    assert_eq!(resolved, PathBuf::from("/tmp/hlnd-from-toml.csv"));
}

#[test]
#[serial]
fn test_blank_env_var_is_ignored() {
    env::set_var(DATASET_ENV_VAR, "  ");

    let resolved = resolve_dataset_path(None, &TomlConfig::default());
    assert_eq!(resolved, default_dataset_path());

    env::remove_var(DATASET_ENV_VAR);
}
