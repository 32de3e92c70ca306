//! Domain layer - core business logic and types.
//!
//! This layer contains pure domain models, configuration and error types
//! without any external dependencies (network, IO, etc.).

pub mod config;
pub mod error;
pub mod models;

pub use config::{
    default_begin_date, AppConfig, FileConfig, DEFAULT_API_ENDPOINT, DEFAULT_DATA_FOLDER,
};
pub use error::{AppError, Result};
pub use models::{ApiAction, ApiRequest, ExportItem, ExportParameters, Unit, UnitsResponse};
