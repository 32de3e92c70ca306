//! Configuration loading.
//!
//! Settings resolve from, highest precedence first: CLI flag, environment,
//! optional TOML config file, built-in defaults. The API token is
//! environment-only and required.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{
    default_begin_date, AppConfig, AppError, FileConfig, Result, DEFAULT_API_ENDPOINT,
    DEFAULT_DATA_FOLDER,
};

/// Environment variable holding the account API token.
pub const TOKEN_ENV: &str = "CTT_API_TOKEN";

/// Environment variable overriding the data folder.
pub const DATA_FOLDER_ENV: &str = "CTT_DATA_FOLDER";

/// Load the resolved application configuration.
///
/// # Errors
/// Returns error if the token variable is unset or the config file exists
/// but cannot be read or parsed.
pub fn load_config(cli_data_folder: Option<&Path>) -> Result<AppConfig> {
    let file = load_file_config(&AppConfig::config_file_path())?;

    let api_token = env::var(TOKEN_ENV).map_err(|_| AppError::Config {
        message: format!("{TOKEN_ENV} not set as an environment variable"),
    })?;

    Ok(resolve(
        api_token,
        cli_data_folder,
        env::var(DATA_FOLDER_ENV).ok(),
        &file,
    ))
}

/// Combines the token with the data-folder and endpoint overrides.
fn resolve(
    api_token: String,
    cli_data_folder: Option<&Path>,
    env_data_folder: Option<String>,
    file: &FileConfig,
) -> AppConfig {
    let data_folder = cli_data_folder
        .map(Path::to_path_buf)
        .or_else(|| env_data_folder.map(PathBuf::from))
        .or_else(|| file.storage.data_folder.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FOLDER));

    let api_endpoint = file
        .api
        .endpoint
        .clone()
        .unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_owned());

    AppConfig {
        api_token,
        api_endpoint,
        data_folder,
        default_begin: default_begin_date(),
    }
}

/// Load the optional config file; an absent file yields defaults.
///
/// # Errors
/// Returns error if the file exists but cannot be read or parsed.
pub fn load_file_config(path: &Path) -> Result<FileConfig> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| AppError::io(format!("Failed to read config file: {}", path.display()), e))?;

    toml::from_str(&content).map_err(|e| AppError::Config {
        message: format!("Failed to parse config file: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_missing_config_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = load_file_config(&dir.path().join("config.toml")).unwrap();
        assert!(config.api.endpoint.is_none());
        assert!(config.storage.data_folder.is_none());
    }

    #[test]
    fn test_invalid_config_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api = 3").unwrap();

        assert!(matches!(
            load_file_config(&path),
            Err(AppError::Config { .. })
        ));
    }

    #[test]
    fn test_config_file_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[storage]\ndata_folder = \"/srv/ctt\"\n",
        )
        .unwrap();

        let config = load_file_config(&path).unwrap();
        assert_eq!(config.storage.data_folder, Some(PathBuf::from("/srv/ctt")));
    }

    #[test]
    fn test_resolve_defaults() {
        let config = resolve("tok".into(), None, None, &FileConfig::default());

        assert_eq!(config.api_token, "tok");
        assert_eq!(config.api_endpoint, DEFAULT_API_ENDPOINT);
        assert_eq!(config.data_folder, PathBuf::from(DEFAULT_DATA_FOLDER));
        assert_eq!(config.default_begin, default_begin_date());
    }

    #[test]
    fn test_resolve_precedence_flag_env_file() {
        let file: FileConfig = toml::from_str(
            "[storage]\ndata_folder = \"from-file\"\n[api]\nendpoint = \"https://example.test/\"",
        )
        .unwrap();

        // File alone.
        let config = resolve("tok".into(), None, None, &file);
        assert_eq!(config.data_folder, PathBuf::from("from-file"));
        assert_eq!(config.api_endpoint, "https://example.test/");

        // Environment beats file.
        let config = resolve("tok".into(), None, Some("from-env".into()), &file);
        assert_eq!(config.data_folder, PathBuf::from("from-env"));

        // Flag beats both.
        let config = resolve(
            "tok".into(),
            Some(Path::new("from-flag")),
            Some("from-env".into()),
            &file,
        );
        assert_eq!(config.data_folder, PathBuf::from("from-flag"));
    }
}
