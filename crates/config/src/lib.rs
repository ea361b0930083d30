#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for pkgprobe
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (~/.config/pkgprobe/config.toml)
//! - Environment variables (`PKGPROBE_*`)
//! - CLI flags (applied by the binary)

use pkgprobe_errors::{ConfigError, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub sweep: SweepConfig,

    #[serde(default)]
    pub registries: RegistryConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Retry executor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

/// Batch sweep configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Fixed wait between successive outbound requests
    #[serde(default = "default_pacing_delay_ms")]
    pub pacing_delay_ms: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            pacing_delay_ms: default_pacing_delay_ms(),
        }
    }
}

/// Remote registry base URLs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default = "default_homebrew_base")]
    pub homebrew_base: String,
    #[serde(default = "default_chocolatey_base")]
    pub chocolatey_base: String,
    #[serde(default = "default_winget_base")]
    pub winget_base: String,
    #[serde(default = "default_flathub_base")]
    pub flathub_base: String,
    #[serde(default = "default_snapcraft_base")]
    pub snapcraft_base: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            homebrew_base: default_homebrew_base(),
            chocolatey_base: default_chocolatey_base(),
            winget_base: default_winget_base(),
            flathub_base: default_flathub_base(),
            snapcraft_base: default_snapcraft_base(),
        }
    }
}

/// Result store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

/// Catalog data location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("catalog.json")
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("pkgprobe/{}", env!("CARGO_PKG_VERSION"))
}

fn default_max_retries() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    30_000
}

fn default_pacing_delay_ms() -> u64 {
    100
}

fn default_homebrew_base() -> String {
    "https://formulae.brew.sh/api".to_string()
}

fn default_chocolatey_base() -> String {
    "https://community.chocolatey.org/api/v2/Packages()".to_string()
}

fn default_winget_base() -> String {
    "https://api.github.com/repos/microsoft/winget-pkgs/contents".to_string()
}

fn default_flathub_base() -> String {
    "https://flathub.org/api/v2/appstream".to_string()
}

fn default_snapcraft_base() -> String {
    "https://api.snapcraft.io/v2/snaps/info".to_string()
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pkgprobe")
        .join("results.sqlite")
}

impl Config {
    /// Load configuration from a specific file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| ConfigError::ReadFailed {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        let config = toml::from_str(&content).map_err(|e| ConfigError::ParseFailed {
            message: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load from the default location, falling back to defaults when the
    /// file does not exist
    ///
    /// # Errors
    ///
    /// Returns an error only if a config file exists but cannot be parsed.
    pub async fn load_or_default(path: &Option<PathBuf>) -> Result<Self, Error> {
        let path = match path {
            Some(p) => p.clone(),
            None => match dirs::config_dir() {
                Some(dir) => dir.join("pkgprobe").join("config.toml"),
                None => return Ok(Self::default()),
            },
        };

        if path.exists() {
            debug!(path = %path.display(), "loading config file");
            Self::load_from_file(&path).await
        } else {
            debug!("no config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Merge environment variables over the current values
    ///
    /// # Errors
    ///
    /// Returns an error if a set variable has an invalid value.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        if let Ok(path) = std::env::var("PKGPROBE_DB_PATH") {
            self.storage.db_path = PathBuf::from(path);
        }

        if let Ok(retries) = std::env::var("PKGPROBE_MAX_RETRIES") {
            self.retry.max_retries =
                retries.parse().map_err(|_| ConfigError::InvalidValue {
                    field: "PKGPROBE_MAX_RETRIES".to_string(),
                    message: format!("not an integer: {retries}"),
                })?;
        }

        if let Ok(pacing) = std::env::var("PKGPROBE_PACING_DELAY_MS") {
            self.sweep.pacing_delay_ms =
                pacing.parse().map_err(|_| ConfigError::InvalidValue {
                    field: "PKGPROBE_PACING_DELAY_MS".to_string(),
                    message: format!("not an integer: {pacing}"),
                })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_falls_back_to_defaults() {
        let config = Config::load_or_default(&Some(PathBuf::from("/nonexistent/config.toml")))
            .await
            .unwrap();
        assert_eq!(config.retry.max_retries, 3);
    }

    #[tokio::test]
    async fn parses_partial_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        tokio::fs::write(
            &path,
            "[sweep]\npacing_delay_ms = 250\n\n[registries]\nhomebrew_base = \"http://localhost:9999\"\n",
        )
        .await
        .unwrap();

        let config = Config::load_from_file(&path).await.unwrap();
        assert_eq!(config.sweep.pacing_delay_ms, 250);
        assert_eq!(config.registries.homebrew_base, "http://localhost:9999");
        // Unspecified sections keep defaults
        assert_eq!(config.retry.max_retries, 3);
    }

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.retry.base_delay_ms, 1000);
        assert_eq!(config.sweep.pacing_delay_ms, 100);
        assert!(config.registries.snapcraft_base.starts_with("https://"));
    }
}
