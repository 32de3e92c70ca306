//! Configuration types.
//!
//! Runtime settings resolve once at startup into an immutable [`AppConfig`];
//! the optional TOML file is read into [`FileConfig`] first.

use std::path::PathBuf;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Production API endpoint.
pub const DEFAULT_API_ENDPOINT: &str = "https://account.celltracktech.com/api/v1/";

/// Folder that receives export files when nothing else is configured.
pub const DEFAULT_DATA_FOLDER: &str = "ctt-data";

/// Export start date used when no previous export file exists.
#[must_use]
pub fn default_begin_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// API section of the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiFileConfig {
    /// Override of the API endpoint URL.
    #[serde(default)]
    pub endpoint: Option<String>,
}

/// Storage section of the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageFileConfig {
    /// Folder that receives export files.
    #[serde(default)]
    pub data_folder: Option<PathBuf>,
}

/// On-disk configuration file contents. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    /// API settings.
    #[serde(default)]
    pub api: ApiFileConfig,

    /// Storage settings.
    #[serde(default)]
    pub storage: StorageFileConfig,
}

/// Resolved application configuration, immutable for the whole run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Account API token.
    pub api_token: String,
    /// API endpoint URL.
    pub api_endpoint: String,
    /// Folder that receives export files.
    pub data_folder: PathBuf,
    /// Export start date when no previous export file exists.
    pub default_begin: DateTime<Utc>,
}

impl AppConfig {
    /// Get the default configuration directory path.
    #[must_use]
    pub fn default_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".ctt-downloader")
    }

    /// Get the config file path.
    #[must_use]
    pub fn config_file_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }
}
