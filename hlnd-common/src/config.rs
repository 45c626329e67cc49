//! Configuration loading and dataset path resolution
//!
//! Bootstrap settings come from an optional TOML file. Anything the file
//! leaves out falls back to built-in defaults, and a missing file is not an
//! error.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::geo::MapRegion;
use crate::{Error, Result};

/// Environment variable overriding the dataset path
pub const DATASET_ENV_VAR: &str = "HLND_DATASET";

/// Default dataset file name produced by the pipeline
pub const DEFAULT_DATASET_FILE: &str = "Articles_processed.csv";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Path to the processed articles CSV
    #[serde(default)]
    pub dataset_path: Option<PathBuf>,

    #[serde(default = "default_bind_host")]
    pub bind_host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub dashboard: DashboardSettings,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            dataset_path: None,
            bind_host: default_bind_host(),
            port: default_port(),
            logging: LoggingConfig::default(),
            dashboard: DashboardSettings::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error); `RUST_LOG` wins over it
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Sizes of the derived dashboard views
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashboardSettings {
    /// Entries in the article reader pick-list
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,

    #[serde(default = "default_top_topics")]
    pub top_topics: usize,

    /// Rows per entity-frequency table
    #[serde(default = "default_top_entities")]
    pub top_entities: usize,

    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,

    #[serde(default)]
    pub map_region: MapRegion,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            sample_size: default_sample_size(),
            top_topics: default_top_topics(),
            top_entities: default_top_entities(),
            histogram_bins: default_histogram_bins(),
            map_region: MapRegion::default(),
        }
    }
}

fn default_bind_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5790
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_sample_size() -> usize {
    10
}

fn default_top_topics() -> usize {
    15
}

fn default_top_entities() -> usize {
    10
}

fn default_histogram_bins() -> usize {
    30
}

/// Default config file location: `<config_dir>/hlnd/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("hlnd").join("config.toml"))
}

/// Load the TOML configuration
///
/// A missing file logs a warning and yields defaults. A file that exists but
/// cannot be read or parsed is a configuration error.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        warn!(
            "Config file {} not found, using built-in defaults",
            path.display()
        );
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Resolve the dataset path
///
/// Priority order:
/// 1. Command-line argument (highest priority)
/// 2. `HLND_DATASET` environment variable
/// 3. TOML `dataset_path`
/// 4. `<data_local_dir>/hlnd/Articles_processed.csv` (fallback)
pub fn resolve_dataset_path(cli_arg: Option<&Path>, toml_config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        info!("Dataset: {} (from command line)", path.display());
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(DATASET_ENV_VAR) {
        if !path.trim().is_empty() {
            info!("Dataset: {} (from {})", path, DATASET_ENV_VAR);
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &toml_config.dataset_path {
        info!("Dataset: {} (from config file)", path.display());
        return path.clone();
    }

    let fallback = default_dataset_path();
    info!("Dataset: {} (default)", fallback.display());
    fallback
}

/// OS-dependent default dataset location
pub fn default_dataset_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("hlnd"))
        .unwrap_or_else(|| PathBuf::from("./hlnd_data"))
        .join(DEFAULT_DATASET_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TomlConfig::default();
        assert_eq!(config.port, 5790);
        assert_eq!(config.bind_host, "127.0.0.1");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.dashboard.sample_size, 10);
        assert_eq!(config.dashboard.histogram_bins, 30);
        assert_eq!(config.dashboard.map_region, MapRegion::default());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: TomlConfig = toml::from_str(
            r#"
            port = 6000

            [dashboard]
            top_topics = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 6000);
        assert!(config.dataset_path.is_none());
        assert_eq!(config.dashboard.top_topics, 5);
        assert_eq!(config.dashboard.top_entities, 10);
    }

    #[test]
    fn test_default_dataset_path_names_file() {
        let path = default_dataset_path();
        assert!(path.ends_with(DEFAULT_DATASET_FILE));
    }
}
