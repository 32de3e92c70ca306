//! Export file writing.
//!
//! Payloads are written verbatim to UTC-timestamped files in the data
//! folder; the filename doubles as the cursor for the next run.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::domain::{AppError, Result};

/// Builds the filename for an export received at `received_at`.
#[must_use]
pub fn export_filename(received_at: DateTime<Utc>) -> String {
    format!("export-{}.csv", received_at.format("%Y-%m-%d_%H%M%S"))
}

/// Ensures the data folder exists, creating it if needed.
///
/// # Errors
/// Returns error if the folder cannot be created.
pub fn ensure_data_folder(data_dir: &Path) -> Result<()> {
    fs::create_dir_all(data_dir).map_err(|e| {
        AppError::io(
            format!("Failed to create data folder {}", data_dir.display()),
            e,
        )
    })
}

/// Writes the raw export payload to a new timestamped file.
///
/// # Errors
/// Returns error if the file cannot be written.
pub fn write_export(data_dir: &Path, csv: &str, received_at: DateTime<Utc>) -> Result<PathBuf> {
    let path = data_dir.join(export_filename(received_at));

    fs::write(&path, csv)
        .map_err(|e| AppError::io(format!("Failed to write {}", path.display()), e))?;

    tracing::info!(path = %path.display(), bytes = csv.len(), "wrote export file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use tempfile::tempdir;

    use super::*;
    use crate::infrastructure::cursor::parse_export_filename;

    #[test]
    fn test_export_filename_format() {
        let ts = Utc.with_ymd_and_hms(2023, 5, 1, 12, 30, 45).unwrap();
        assert_eq!(export_filename(ts), "export-2023-05-01_123045.csv");
    }

    #[test]
    fn test_filename_round_trips_through_cursor_parser() {
        let ts = Utc.with_ymd_and_hms(2024, 11, 30, 23, 59, 59).unwrap();
        assert_eq!(parse_export_filename(&export_filename(ts)).unwrap(), ts);
    }

    #[test]
    fn test_write_export_stores_payload_verbatim() {
        let dir = tempdir().unwrap();
        let ts = Utc.with_ymd_and_hms(2023, 5, 1, 12, 30, 45).unwrap();
        let payload = "unitId,ts,value\nCTT-9001,2023-05-01T00:00:00Z,42\n";

        let path = write_export(dir.path(), payload, ts).unwrap();

        assert_eq!(path.file_name().unwrap(), "export-2023-05-01_123045.csv");
        assert_eq!(fs::read_to_string(path).unwrap(), payload);
    }

    #[test]
    fn test_ensure_data_folder_creates_nested_path() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        ensure_data_folder(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
