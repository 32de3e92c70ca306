//! Infrastructure layer - external adapters (network, filesystem).
//!
//! This layer handles all I/O operations and external dependencies.

pub mod api_client;
pub mod config;
pub mod cursor;
pub mod export_writer;

pub use api_client::{CttApiClient, HttpTransport, Transport};
pub use config::{load_config, load_file_config, DATA_FOLDER_ENV, TOKEN_ENV};
pub use cursor::{find_latest_export, parse_export_filename, resolve_cursor};
pub use export_writer::{ensure_data_folder, export_filename, write_export};
