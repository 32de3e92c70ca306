//! HTTP client for the CTT account API.
//!
//! Every remote operation goes through one POST endpoint; the JSON body
//! selects the action. The wire call itself sits behind the [`Transport`]
//! trait so tests can substitute a fake.

use std::time::Instant;

use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

use crate::domain::{ApiRequest, AppError, ExportItem, Result, Unit, UnitsResponse};

/// The one remote capability: post a JSON payload, get the response text.
pub trait Transport {
    /// Posts `payload` to the API endpoint and returns the response body.
    ///
    /// # Errors
    /// Returns error on connection failure or non-success HTTP status.
    fn post(&self, payload: &str) -> Result<String>;
}

/// Blocking reqwest transport against a fixed endpoint.
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    /// Create a transport posting to `endpoint`.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

impl Transport for HttpTransport {
    fn post(&self, payload: &str) -> Result<String> {
        tracing::debug!(bytes = payload.len(), "posting payload");
        let begin = Instant::now();

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(payload.to_owned())
            .send()
            .map_err(AppError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AppError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().map_err(AppError::transport)?;
        tracing::debug!(
            bytes = text.len(),
            elapsed_secs = begin.elapsed().as_secs_f64(),
            "received response"
        );

        Ok(text)
    }
}

/// Client for the two account API operations.
pub struct CttApiClient {
    token: String,
    transport: Box<dyn Transport>,
}

impl CttApiClient {
    /// Create a client posting to `endpoint`.
    #[must_use]
    pub fn new(token: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            transport: Box::new(HttpTransport::new(endpoint)),
        }
    }

    /// Create a client over a custom transport.
    #[must_use]
    pub fn with_transport(token: impl Into<String>, transport: Box<dyn Transport>) -> Self {
        Self {
            token: token.into(),
            transport,
        }
    }

    /// Fetches the units registered to the account.
    ///
    /// # Errors
    /// Returns error if the request fails or the response cannot be decoded.
    pub fn list_units(&self) -> Result<Vec<Unit>> {
        let payload = serde_json::to_string(&ApiRequest::get_units(&self.token))
            .map_err(AppError::json_parse)?;

        let body = self.transport.post(&payload)?;
        let response: UnitsResponse = serde_json::from_str(&body).map_err(AppError::json_parse)?;

        tracing::debug!(count = response.units.len(), "fetched account units");

        Ok(response.units)
    }

    /// Requests a CSV export of all data newer than `begin`.
    ///
    /// Units without data after `begin` are left out of the request; when no
    /// unit qualifies, no request is sent and `None` is returned. The raw
    /// response text is returned otherwise.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub fn export(&self, units: &[Unit], begin: DateTime<Utc>) -> Result<Option<String>> {
        let items = export_items(units, begin);

        if items.is_empty() {
            tracing::debug!("no units with data after {begin}, nothing to export");
            return Ok(None);
        }

        tracing::debug!(units = items.len(), begin = %begin, "building export request");

        let payload = serde_json::to_string(&ApiRequest::data_export(&self.token, items))
            .map_err(AppError::json_parse)?;

        self.transport.post(&payload).map(Some)
    }
}

/// Builds the per-unit export windows for units with data after `begin`.
fn export_items(units: &[Unit], begin: DateTime<Utc>) -> Vec<ExportItem> {
    units
        .iter()
        .filter(|unit| unit.has_data_after(begin))
        .map(|unit| ExportItem {
            unit_id: unit.unit_id.clone(),
            start_dt: begin.to_rfc3339(),
        })
        .collect()
}
