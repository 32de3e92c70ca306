//! Application layer - use cases and orchestration.
//!
//! This layer ties the cursor, API client and writer together into one
//! download run and formats results for the CLI.

pub mod download_service;
pub mod formatter;

pub use download_service::{DownloadOutcome, DownloadService, WrittenExport};
pub use formatter::{format_outcome, format_units_table};
