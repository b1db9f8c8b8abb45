//! Configuration management for the gallery client
//!
//! Configuration is optional: a missing file yields [`Config::default_config`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Storage key holding the JSON array of favorite ids
pub const DEFAULT_FAVORITES_KEY: &str = "gallery-favorites";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: ViewConfig,
}

/// Which fetch shape the remote item service speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVariant {
    /// List endpoint only; single items are found by filtering a large page
    Picsum,
    /// List of entries with per-entry detail endpoints plus `/item/{id}`
    Catalog,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub variant: ApiVariant,
    pub base_url: String,
    pub media_base_url: String,
    pub page_size: u32,
    /// Request timeout, humantime format ("30s", "1m")
    pub timeout: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON file per storage key
    pub path: String,
    pub favorites_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Distance from the bottom, in rows, that triggers the next page
    pub scroll_threshold: u16,
    /// How long error banners stay visible, humantime format
    pub error_banner: String,
    pub start_path: String,
    /// Origin used to decide whether a link stays in the app
    pub origin: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            variant: ApiVariant::Picsum,
            base_url: "https://picsum.photos/v2".to_string(),
            media_base_url: "https://picsum.photos".to_string(),
            page_size: 10,
            timeout: "30s".to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: "~/.local/share/gallery".to_string(),
            favorites_key: DEFAULT_FAVORITES_KEY.to_string(),
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: 3,
            error_banner: "3s".to_string(),
            start_path: "/".to_string(),
            origin: "http://localhost".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// Falls back to defaults when no config file exists.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        if !config_path.exists() {
            tracing::debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default_config());
        }
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// Create a default configuration
    pub fn default_config() -> Self {
        Self {
            api: ApiConfig::default(),
            storage: StorageConfig::default(),
            ui: ViewConfig::default(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.api.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.page_size".to_string(),
                message: "must be at least 1".to_string(),
            }
            .into());
        }
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField("api.base_url".to_string()).into());
        }
        if !self.ui.start_path.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "ui.start_path".to_string(),
                message: "must start with '/'".to_string(),
            }
            .into());
        }
        reqwest::Url::parse(&self.ui.origin).map_err(|e| ConfigError::InvalidValue {
            field: "ui.origin".to_string(),
            message: e.to_string(),
        })?;
        self.request_timeout()?;
        self.banner_duration()?;
        Ok(())
    }

    /// Parsed `api.timeout`
    pub fn request_timeout(&self) -> Result<Duration> {
        parse_duration("api.timeout", &self.api.timeout)
    }

    /// Parsed `ui.error_banner`
    pub fn banner_duration(&self) -> Result<Duration> {
        parse_duration("ui.error_banner", &self.ui.error_banner)
    }

    /// Storage directory with `~` expanded
    pub fn storage_dir(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.storage.path).to_string())
    }
}

fn parse_duration(field: &str, value: &str) -> Result<Duration> {
    humantime::parse_duration(value).map_err(|e| {
        ConfigError::InvalidValue {
            field: field.to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

/// Resolve the configuration file path following the XDG base directory layout
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("GALLERY_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("gallery").join("config.toml"))
}

/// Resolve the data directory path following the XDG base directory layout
pub fn resolve_data_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| ConfigError::MissingField("data directory".to_string()))?;

    Ok(data_dir.join("gallery"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GalleryError;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_values() {
        let config = Config::default_config();
        assert_eq!(config.api.variant, ApiVariant::Picsum);
        assert_eq!(config.api.page_size, 10);
        assert_eq!(config.storage.favorites_key, "gallery-favorites");
        assert_eq!(config.banner_duration().unwrap(), Duration::from_secs(3));
        assert_eq!(config.request_timeout().unwrap(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[api]
variant = "catalog"
base_url = "https://catalog.example/api"
media_base_url = "https://media.example"
page_size = 20
timeout = "5s"
"#
        )
        .unwrap();

        let config = Config::load_from_path(file.path()).unwrap();
        assert_eq!(config.api.variant, ApiVariant::Catalog);
        assert_eq!(config.api.page_size, 20);
        assert_eq!(config.request_timeout().unwrap(), Duration::from_secs(5));
        assert_eq!(config.ui.start_path, "/");
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[api]
variant = "picsum"
base_url = "https://picsum.photos/v2"
media_base_url = "https://picsum.photos"
page_size = 0
timeout = "30s"
"#
        )
        .unwrap();

        match Config::load_from_path(file.path()) {
            Err(GalleryError::Config(ConfigError::InvalidValue { field, .. })) => {
                assert_eq!(field, "api.page_size");
            }
            other => panic!("Expected invalid page size, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_duration_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[ui]
scroll_threshold = 3
error_banner = "soon"
start_path = "/"
origin = "http://localhost"
"#
        )
        .unwrap();

        assert!(Config::load_from_path(file.path()).is_err());
    }

    #[test]
    #[serial]
    fn test_config_path_from_env() {
        std::env::set_var("GALLERY_CONFIG", "/tmp/gallery-test/config.toml");
        let path = resolve_config_path().unwrap();
        std::env::remove_var("GALLERY_CONFIG");

        assert_eq!(path, PathBuf::from("/tmp/gallery-test/config.toml"));
    }

    #[test]
    #[serial]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("GALLERY_CONFIG", dir.path().join("absent.toml"));
        let config = Config::load().unwrap();
        std::env::remove_var("GALLERY_CONFIG");

        assert_eq!(config.api.base_url, "https://picsum.photos/v2");
    }
}
