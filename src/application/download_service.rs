//! Download orchestration.
//!
//! One run is linear: ensure the data folder exists, resolve the cursor
//! from the latest local export, list the account's units, request an
//! export, write the payload. The first error aborts the run.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::domain::{AppConfig, Result};
use crate::infrastructure::{ensure_data_folder, resolve_cursor, write_export, CttApiClient};

/// What a single download run did.
#[derive(Debug, Clone)]
pub struct DownloadOutcome {
    /// Start date the export was requested from.
    pub cursor: DateTime<Utc>,
    /// Number of units registered to the account.
    pub unit_count: usize,
    /// File written, when the export returned data.
    pub written: Option<WrittenExport>,
}

/// A freshly written export file.
#[derive(Debug, Clone)]
pub struct WrittenExport {
    /// Location of the new file.
    pub path: PathBuf,
    /// Payload size in bytes.
    pub bytes: usize,
}

/// Service running one download pass against the account API.
pub struct DownloadService {
    config: AppConfig,
    client: CttApiClient,
}

impl DownloadService {
    /// Create a service from resolved configuration.
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        let client = CttApiClient::new(config.api_token.clone(), config.api_endpoint.clone());
        Self { config, client }
    }

    /// Create a service over a pre-built client.
    #[must_use]
    pub const fn with_client(config: AppConfig, client: CttApiClient) -> Self {
        Self { config, client }
    }

    /// Run one download pass.
    ///
    /// # Errors
    /// Returns error on any configuration, transport or filesystem failure.
    pub fn run(&self) -> Result<DownloadOutcome> {
        ensure_data_folder(&self.config.data_folder)?;

        let cursor = resolve_cursor(&self.config.data_folder, self.config.default_begin)?;
        tracing::info!(
            data_folder = %self.config.data_folder.display(),
            cursor = %cursor,
            "starting export run"
        );

        let units = self.client.list_units()?;

        let Some(csv) = self.client.export(&units, cursor)? else {
            tracing::info!("no new data to export");
            return Ok(DownloadOutcome {
                cursor,
                unit_count: units.len(),
                written: None,
            });
        };

        let path = write_export(&self.config.data_folder, &csv, Utc::now())?;

        Ok(DownloadOutcome {
            cursor,
            unit_count: units.len(),
            written: Some(WrittenExport {
                path,
                bytes: csv.len(),
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use tempfile::tempdir;

    use super::*;
    use crate::domain::default_begin_date;
    use crate::infrastructure::Transport;

    /// Fake API answering both actions with canned bodies.
    struct FakeApi {
        units_json: String,
        csv: String,
    }

    impl Transport for FakeApi {
        fn post(&self, payload: &str) -> Result<String> {
            if payload.contains("get-units") {
                Ok(self.units_json.clone())
            } else {
                Ok(self.csv.clone())
            }
        }
    }

    fn service(data_folder: &Path, units_json: &str, csv: &str) -> DownloadService {
        let config = AppConfig {
            api_token: "tok".into(),
            api_endpoint: "https://example.test/".into(),
            data_folder: data_folder.to_path_buf(),
            default_begin: default_begin_date(),
        };
        let client = CttApiClient::with_transport(
            "tok",
            Box::new(FakeApi {
                units_json: units_json.to_owned(),
                csv: csv.to_owned(),
            }),
        );
        DownloadService::with_client(config, client)
    }

    fn export_files(dir: &Path) -> Vec<PathBuf> {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with("export-") && n.ends_with(".csv"))
            })
            .collect()
    }

    #[test]
    fn test_run_writes_one_file_with_raw_payload() {
        let dir = tempdir().unwrap();
        let data_folder = dir.path().join("ctt-data");
        let units_json = r#"{"units": [
            {"unitId": "A", "lastData": "2030-01-01T00:00:00+00:00",
             "lastConnection": "2030-01-01T00:00:00+00:00"}
        ]}"#;
        let csv = "unitId,ts,value\nA,2030-01-01T00:00:00Z,1\n";

        let outcome = service(&data_folder, units_json, csv).run().unwrap();

        assert_eq!(outcome.cursor, default_begin_date());
        assert_eq!(outcome.unit_count, 1);

        let written = outcome.written.unwrap();
        assert_eq!(written.bytes, csv.len());

        let files = export_files(&data_folder);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0], written.path);
        assert_eq!(fs::read_to_string(&files[0]).unwrap(), csv);
    }

    #[test]
    fn test_run_without_new_data_writes_nothing() {
        let dir = tempdir().unwrap();
        let data_folder = dir.path().join("ctt-data");
        // All data predates the default begin date.
        let units_json = r#"{"units": [
            {"unitId": "A", "lastData": "2018-06-01T00:00:00+00:00",
             "lastConnection": "2018-06-01T00:00:00+00:00"}
        ]}"#;

        let outcome = service(&data_folder, units_json, "ignored").run().unwrap();

        assert!(outcome.written.is_none());
        assert!(export_files(&data_folder).is_empty());
    }

    #[test]
    fn test_run_creates_data_folder_and_picks_up_previous_cursor() {
        let dir = tempdir().unwrap();
        let data_folder = dir.path().join("ctt-data");
        let units_json = r#"{"units": [
            {"unitId": "A", "lastData": "2023-06-01T00:00:00+00:00",
             "lastConnection": "2023-06-01T00:00:00+00:00"}
        ]}"#;

        // First run creates the folder.
        let outcome = service(&data_folder, units_json, "first\n").run().unwrap();
        assert!(data_folder.is_dir());
        assert!(outcome.written.is_some());

        // Second run resumes from the file the first run wrote, which is
        // later than the unit's lastData, so there is nothing new.
        let outcome = service(&data_folder, units_json, "second\n").run().unwrap();
        assert!(outcome.written.is_none());
        assert_eq!(export_files(&data_folder).len(), 1);
    }
}
