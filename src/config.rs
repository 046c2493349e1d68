//! Application Configuration
//! Optional JSON settings file; every field falls back to a built-in default.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Settings file looked up in the working directory.
pub const CONFIG_FILE: &str = "cricket_insights.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Match dataset read once at startup.
    pub dataset_path: PathBuf,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    /// Pixel size of exported PNG charts.
    pub export_size: [u32; 2],
    /// Default log filter; `RUST_LOG` takes precedence.
    pub log_level: String,
    /// Sidebar option selected at startup.
    pub default_view: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("matches.csv"),
            window_size: [1400.0, 800.0],
            min_window_size: [1200.0, 700.0],
            export_size: [1200, 800],
            log_level: "info".to_string(),
            default_view: "Team Performances".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from `path`, or defaults if the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg = AppConfig::from_json(r#"{"dataset_path": "data/ipl.csv"}"#).unwrap();
        assert_eq!(cfg.dataset_path, PathBuf::from("data/ipl.csv"));
        assert_eq!(cfg.export_size, [1200, 800]);
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(AppConfig::from_json(r#"{"dataset": "x.csv"}"#).is_err());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = AppConfig::load_or_default(Path::new("definitely/not/here.json")).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }
}
