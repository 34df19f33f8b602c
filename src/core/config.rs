//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Onboard configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output format used when `--format auto` (yaml or json)
    pub default_format: Option<String>,

    /// State pre-selected in the address step
    pub default_state: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. User config (~/.config/onboard/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Environment variables
        config.apply_env(|key| std::env::var(key).ok());

        tracing::debug!(?config, "configuration loaded");
        config
    }

    /// Read a config file, ignoring missing or malformed files
    pub fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config file");
                None
            }
        }
    }

    /// Get the path to the user config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "onboard")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(format) = var("ONBOARD_FORMAT") {
            self.default_format = Some(format);
        }
        if let Some(state) = var("ONBOARD_STATE") {
            self.default_state = Some(state);
        }
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
        if other.default_state.is_some() {
            self.default_state = other.default_state;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_read_file_and_merge() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "default_state: Delhi\n").unwrap();

        let mut config = Config {
            default_format: Some("json".to_string()),
            default_state: None,
        };
        config.merge(Config::read_file(&path).unwrap());

        assert_eq!(config.default_format.as_deref(), Some("json"));
        assert_eq!(config.default_state.as_deref(), Some("Delhi"));
    }

    #[test]
    fn test_malformed_file_is_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "default_state: [unclosed").unwrap();
        assert!(Config::read_file(&path).is_none());
        assert!(Config::read_file(&dir.path().join("missing.yaml")).is_none());
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = Config {
            default_format: Some("yaml".to_string()),
            default_state: Some("Delhi".to_string()),
        };
        config.apply_env(|key| match key {
            "ONBOARD_STATE" => Some("Karnataka".to_string()),
            _ => None,
        });
        assert_eq!(config.default_format.as_deref(), Some("yaml"));
        assert_eq!(config.default_state.as_deref(), Some("Karnataka"));
    }
}
