//! Dashboard configuration loaded from an optional JSON file plus environment overrides.

use crate::stats::{DEFAULT_BOTTOM_STATES, DEFAULT_HISTOGRAM_BINS, DEFAULT_TOP_STATES};
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{debug, info};

/// Points at an explicit config file.
pub const CONFIG_ENV: &str = "ORDER_DASHBOARD_CONFIG";
/// Overrides `data_path`.
pub const DATA_ENV: &str = "ORDER_DASHBOARD_DATA";

pub const DEFAULT_CONFIG_FILE: &str = "dashboard.json";
pub const DEFAULT_DATA_FILE: &str = "all_data.csv";
pub const DEFAULT_EXPORT_WIDTH: u32 = 2400;
pub const DEFAULT_EXPORT_HEIGHT: u32 = 1600;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed config {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub logo_path: Option<PathBuf>,
    pub top_states: usize,
    pub bottom_states: usize,
    pub histogram_bins: usize,
    pub export_width: u32,
    pub export_height: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            logo_path: None,
            top_states: DEFAULT_TOP_STATES,
            bottom_states: DEFAULT_BOTTOM_STATES,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            export_width: DEFAULT_EXPORT_WIDTH,
            export_height: DEFAULT_EXPORT_HEIGHT,
        }
    }
}

impl DashboardConfig {
    /// Resolve configuration from the environment and working directory.
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = env::var_os(CONFIG_ENV).map(PathBuf::from);
        let data_override = env::var_os(DATA_ENV).map(PathBuf::from);
        Self::load_from(explicit.as_deref(), data_override)
    }

    /// An explicit path must exist; otherwise `dashboard.json` is used when
    /// present and defaults apply when it is not.
    pub fn load_from(
        explicit: Option<&Path>,
        data_override: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) if !path.is_file() => {
                return Err(ConfigError::NotFound(path.to_path_buf()))
            }
            Some(path) => Self::read(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::read(default_path)?
                } else {
                    debug!("no config file found, using defaults");
                    Self::default()
                }
            }
        };

        if let Some(data_path) = data_override {
            config.data_path = data_path;
        }

        config.validate()?;
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&contents).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "loaded dashboard config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_states == 0 || self.bottom_states == 0 {
            return Err(ConfigError::Invalid(
                "top_states and bottom_states must be at least 1".to_string(),
            ));
        }
        if self.histogram_bins == 0 {
            return Err(ConfigError::Invalid(
                "histogram_bins must be at least 1".to_string(),
            ));
        }
        if self.export_width == 0 || self.export_height == 0 {
            return Err(ConfigError::Invalid(
                "export dimensions must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn partial_file_keeps_defaults_for_missing_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dashboard.json");
        fs::write(&path, r#"{ "data_path": "data/orders.csv", "top_states": 5 }"#).unwrap();

        let config = DashboardConfig::load_from(Some(path.as_path()), None).unwrap();
        assert_eq!(config.data_path, PathBuf::from("data/orders.csv"));
        assert_eq!(config.top_states, 5);
        assert_eq!(config.bottom_states, DEFAULT_BOTTOM_STATES);
        assert_eq!(config.histogram_bins, DEFAULT_HISTOGRAM_BINS);
    }

    #[test]
    fn data_override_wins_over_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dashboard.json");
        fs::write(&path, r#"{ "data_path": "from_file.csv" }"#).unwrap();

        let config = DashboardConfig::load_from(
            Some(path.as_path()),
            Some(PathBuf::from("from_env.csv")),
        )
        .unwrap();
        assert_eq!(config.data_path, PathBuf::from("from_env.csv"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let err = DashboardConfig::load_from(Some(missing.as_path()), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dashboard.json");
        fs::write(&path, "{ not json").unwrap();

        let err = DashboardConfig::load_from(Some(path.as_path()), None).unwrap_err();
        assert!(matches!(err, ConfigError::Json { .. }));
    }

    #[test]
    fn zero_caps_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dashboard.json");
        fs::write(&path, r#"{ "bottom_states": 0 }"#).unwrap();

        let err = DashboardConfig::load_from(Some(path.as_path()), None).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn defaults_match_dashboard_layout() {
        let config = DashboardConfig::default();
        assert_eq!(config.data_path, PathBuf::from("all_data.csv"));
        assert_eq!(config.top_states, 14);
        assert_eq!(config.bottom_states, 13);
        assert_eq!(config.histogram_bins, 30);
        assert!(config.validate().is_ok());
    }
}
