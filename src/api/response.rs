//! Inbound response decoding.

use super::request::{ApiRequest, RequestKind, RequestToken};
use crate::domain::error::{Result, ZcountriesError};
use crate::domain::Country;
use std::collections::BTreeMap;

/// A decoded API result, tagged with the request that produced it.
#[derive(Debug)]
pub struct ApiResponse {
    pub kind: RequestKind,
    pub token: RequestToken,
    pub outcome: Result<Vec<Country>>,
}

impl ApiResponse {
    /// Decodes a host web request result.
    ///
    /// Returns `None` when the context does not belong to a zcountries request.
    #[must_use]
    pub fn from_web_result(status: u16, body: &[u8], context: &BTreeMap<String, String>) -> Option<Self> {
        let (kind, token) = ApiRequest::parse_context(context)?;
        Some(Self {
            kind,
            token,
            outcome: decode_countries(status, body),
        })
    }
}

/// Turns a status and body into country records.
///
/// Non-2xx statuses become [`ZcountriesError::HttpStatus`]. The body must be a
/// JSON array; individual records that fail to decode (for instance, ones with
/// no common name) are skipped.
///
/// # Errors
///
/// Returns an error for non-success statuses or a body that is not a JSON array.
pub fn decode_countries(status: u16, body: &[u8]) -> Result<Vec<Country>> {
    if !(200..300).contains(&status) {
        return Err(ZcountriesError::HttpStatus(status));
    }

    let raw: Vec<serde_json::Value> = serde_json::from_slice(body)?;
    let total = raw.len();
    let countries: Vec<Country> = raw
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect();

    if countries.len() < total {
        tracing::debug!(
            skipped = total - countries.len(),
            total = total,
            "skipped malformed country records"
        );
    }

    Ok(countries)
}
