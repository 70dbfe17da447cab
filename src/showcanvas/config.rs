//! # Configuration
//!
//! Settings live in `config.json` inside the config directory. Resolution order:
//!
//! 1. **Environment**: `SHOWCANVAS_API_URL` (or the older `DRAGVERTISING_API_URL`)
//! 2. **Config file**: `<config dir>/config.json`
//! 3. **Defaults**
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `api-url` | `https://api.dragvertising.com` | Base URL of the catalog API |
//! | `design-path` | `design.json` | Design file the CLI writes into |
//! | `default-layout` | `poster` | Layout used when `insert` gets no `--layout` |
//!
//! Directories come from `directories::ProjectDirs`, or from `SHOWCANVAS_HOME` when set
//! (config and data then share that directory).

use crate::error::{Result, ShowCanvasError};
use crate::layout::LayoutKind;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_API_URL: &str = "https://api.dragvertising.com";
const DEFAULT_DESIGN_PATH: &str = "design.json";

pub const HOME_ENV: &str = "SHOWCANVAS_HOME";
pub const API_URL_ENV: &str = "SHOWCANVAS_API_URL";
const LEGACY_API_URL_ENV: &str = "DRAGVERTISING_API_URL";

pub const KEYS: &[&str] = &["api-url", "design-path", "default-layout"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShowCanvasConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_design_path")]
    pub design_path: PathBuf,

    #[serde(default)]
    pub default_layout: LayoutKind,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_design_path() -> PathBuf {
    PathBuf::from(DEFAULT_DESIGN_PATH)
}

impl Default for ShowCanvasConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            design_path: default_design_path(),
            default_layout: LayoutKind::default(),
        }
    }
}

impl ShowCanvasConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(ShowCanvasError::Io)?;
        let config = serde_json::from_str(&content).map_err(ShowCanvasError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(ShowCanvasError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(ShowCanvasError::Serialization)?;
        fs::write(config_path, content).map_err(ShowCanvasError::Io)?;
        Ok(())
    }

    /// Apply environment overrides. `lookup` is `std::env::var(..).ok()` outside tests.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_ENV)
            .or_else(|| lookup(LEGACY_API_URL_ENV))
            .filter(|url| !url.trim().is_empty())
        {
            self.api_url = url.trim().to_string();
        }
        self
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "api-url" => Ok(self.api_url.clone()),
            "design-path" => Ok(self.design_path.display().to_string()),
            "default-layout" => Ok(self.default_layout.to_string()),
            other => Err(unknown_key(other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api-url" => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(ShowCanvasError::Config(format!(
                        "api-url must be an http(s) URL, got {}",
                        value
                    )));
                }
                self.api_url = value.trim_end_matches('/').to_string();
            }
            "design-path" => self.design_path = PathBuf::from(value),
            "default-layout" => {
                self.default_layout = value.parse().map_err(ShowCanvasError::Config)?;
            }
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> ShowCanvasError {
    ShowCanvasError::Config(format!(
        "unknown key: {} (known keys: {})",
        key,
        KEYS.join(", ")
    ))
}

/// Where config and session data live.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl AppPaths {
    /// `SHOWCANVAS_HOME` if set, otherwise the platform directories.
    pub fn discover() -> Result<Self> {
        if let Some(home) = std::env::var_os(HOME_ENV).filter(|h| !h.is_empty()) {
            return Ok(Self::under(home));
        }

        let dirs = ProjectDirs::from("com", "dragvertising", "showcanvas").ok_or_else(|| {
            ShowCanvasError::Config("could not determine a home directory".to_string())
        })?;
        Ok(Self {
            config_dir: dirs.config_dir().to_path_buf(),
            data_dir: dirs.data_dir().to_path_buf(),
        })
    }

    pub fn under(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            config_dir: root.clone(),
            data_dir: root,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ShowCanvasConfig::default();
        assert_eq!(config.api_url, "https://api.dragvertising.com");
        assert_eq!(config.default_layout, LayoutKind::Poster);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = TempDir::new().unwrap();
        let config = ShowCanvasConfig::load(dir.path().join("nope")).unwrap();
        assert_eq!(config, ShowCanvasConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();

        let mut config = ShowCanvasConfig::default();
        config.set("default-layout", "grid").unwrap();
        config.set("api-url", "http://localhost:8080/").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = ShowCanvasConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.default_layout, LayoutKind::Grid);
        assert_eq!(loaded.api_url, "http://localhost:8080");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"default_layout": "grid"}"#).unwrap();

        let loaded = ShowCanvasConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.api_url, DEFAULT_API_URL);
        assert_eq!(loaded.default_layout, LayoutKind::Grid);
    }

    #[test]
    fn test_env_overrides_file() {
        let config = ShowCanvasConfig::default().with_env_overrides(|key| match key {
            "SHOWCANVAS_API_URL" => Some("http://staging.local".to_string()),
            _ => None,
        });
        assert_eq!(config.api_url, "http://staging.local");
    }

    #[test]
    fn test_legacy_env_is_honored() {
        let config = ShowCanvasConfig::default().with_env_overrides(|key| match key {
            "DRAGVERTISING_API_URL" => Some("http://legacy.local".to_string()),
            _ => None,
        });
        assert_eq!(config.api_url, "http://legacy.local");
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = ShowCanvasConfig::default();
        assert!(config.set("api-url", "ftp://nope").is_err());
        assert!(config.set("default-layout", "collage").is_err());
        assert!(config.set("colour", "pink").is_err());
        assert!(config.get("colour").is_err());
        assert_eq!(config.get("design-path").unwrap(), "design.json");
    }
}
