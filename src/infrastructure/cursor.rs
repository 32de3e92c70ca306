//! Export cursor resolution.
//!
//! The data folder's own file listing is the cursor store: the most
//! recently created `export-*.csv` file carries the start date of the
//! next export in its name.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::domain::{AppError, Result};

/// Timestamp pattern embedded in export filenames.
const FILENAME_FORMAT: &str = "export-%Y-%m-%d_%H%M%S.csv";

const FILENAME_PREFIX: &str = "export-";
const FILENAME_SUFFIX: &str = ".csv";

/// Resolves the start date of the next export.
///
/// Falls back to `default_begin` when the data folder is missing or holds
/// no export files.
///
/// # Errors
/// Returns error if the folder cannot be read or the latest export file
/// has an unparseable name.
pub fn resolve_cursor(data_dir: &Path, default_begin: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let Some(path) = find_latest_export(data_dir)? else {
        tracing::debug!(default = %default_begin, "no previous export, using default begin date");
        return Ok(default_begin);
    };

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| AppError::InvalidData {
            message: format!("non-UTF-8 export filename: {}", path.display()),
        })?;

    let cursor = parse_export_filename(name)?;
    tracing::debug!(file = %path.display(), cursor = %cursor, "resolved cursor from latest export");

    Ok(cursor)
}

/// Finds the most recently created export file in `data_dir`.
///
/// # Errors
/// Returns error if the folder exists but cannot be read.
pub fn find_latest_export(data_dir: &Path) -> Result<Option<PathBuf>> {
    if !data_dir.exists() {
        return Ok(None);
    }

    let entries = fs::read_dir(data_dir).map_err(|e| {
        AppError::io(format!("Failed to read data folder {}", data_dir.display()), e)
    })?;

    let mut latest: Option<(PathBuf, SystemTime)> = None;

    for entry in entries.filter_map(std::result::Result::ok) {
        let path = entry.path();
        if !path.is_file() || !is_export_filename(&path) {
            continue;
        }

        let created = creation_time(&path);
        if latest.as_ref().map_or(true, |(_, best)| created > *best) {
            latest = Some((path, created));
        }
    }

    Ok(latest.map(|(path, _)| path))
}

/// Parses the UTC timestamp embedded in an export filename.
///
/// # Errors
/// Returns error if the name does not match the export pattern.
pub fn parse_export_filename(name: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(name, FILENAME_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| AppError::InvalidData {
            message: format!("unexpected export filename '{name}': {e}"),
        })
}

/// Whether a path looks like an export file (`export-*.csv`).
fn is_export_filename(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(FILENAME_PREFIX) && n.ends_with(FILENAME_SUFFIX))
}

/// File creation time, falling back to mtime on filesystems without
/// a birth time.
fn creation_time(path: &Path) -> SystemTime {
    fs::metadata(path).map_or(SystemTime::UNIX_EPOCH, |meta| {
        meta.created()
            .or_else(|_| meta.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH)
    })
}
