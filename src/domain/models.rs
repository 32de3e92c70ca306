//! Domain models for the CTT account API.
//!
//! These models represent the JSON bodies exchanged with the vendor's
//! single POST endpoint.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A remote sensor/collection device tracked by the vendor account.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    /// Vendor-assigned unit identifier.
    pub unit_id: String,
    /// When the unit last produced data.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub last_data: DateTime<Utc>,
    /// When the unit last connected to the vendor.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub last_connection: DateTime<Utc>,
}

impl Unit {
    /// Whether this unit has data newer than `begin`.
    #[must_use]
    pub fn has_data_after(&self, begin: DateTime<Utc>) -> bool {
        self.last_data > begin
    }
}

/// Response body of the `get-units` action.
#[derive(Debug, Clone, Deserialize)]
pub struct UnitsResponse {
    pub units: Vec<Unit>,
}

/// Actions understood by the API endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApiAction {
    /// List units registered to the account.
    GetUnits,
    /// Request a CSV export for a set of units.
    DataExport,
}

impl std::fmt::Display for ApiAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GetUnits => write!(f, "get-units"),
            Self::DataExport => write!(f, "data-export"),
        }
    }
}

/// One unit's slice of an export request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportItem {
    pub unit_id: String,
    /// ISO-8601 start date for this unit's data.
    pub start_dt: String,
}

/// Parameters of the `data-export` action.
#[derive(Debug, Clone, Serialize)]
pub struct ExportParameters {
    pub units: Vec<ExportItem>,
}

/// Request body posted to the API endpoint.
#[derive(Debug, Serialize)]
pub struct ApiRequest<'a> {
    pub token: &'a str,
    pub action: ApiAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ExportParameters>,
}

impl<'a> ApiRequest<'a> {
    /// Build a `get-units` request.
    #[must_use]
    pub const fn get_units(token: &'a str) -> Self {
        Self {
            token,
            action: ApiAction::GetUnits,
            parameters: None,
        }
    }

    /// Build a `data-export` request for the given unit windows.
    #[must_use]
    pub const fn data_export(token: &'a str, units: Vec<ExportItem>) -> Self {
        Self {
            token,
            action: ApiAction::DataExport,
            parameters: Some(ExportParameters { units }),
        }
    }
}

/// Parses a timestamp as the vendor sends it.
///
/// RFC 3339 is tried first; the vendor has also been seen sending
/// `YYYY-MM-DD HH:MM:SS`, which is read as UTC.
pub fn parse_api_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|_| format!("unrecognized timestamp: {s}"))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_api_timestamp(&s).map_err(serde::de::Error::custom)
}
