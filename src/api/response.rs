//! Response envelope decoding.
//!
//! The aviation API wraps every result in the same envelope:
//!
//! ```json
//! { "pagination": { "offset": 0, "limit": 9, "count": 9, "total": 6471 },
//!   "data": [ ... ] }
//! ```
//!
//! and reports failures as `{ "error": { "code": "...", "message": "..." } }`,
//! sometimes with a 200 status.

use crate::domain::airport::AirportSummary;
use crate::domain::error::{Result, SkyConnectError};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Pagination block of a list response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub count: u32,
    /// Total matching rows on the server; `0` when unknown.
    #[serde(default)]
    pub total: u32,
}

/// One decoded page of airports.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AirportPage {
    pub airports: Vec<AirportSummary>,
    pub pagination: Pagination,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
struct Envelope<T> {
    #[serde(default)]
    data: Option<Vec<T>>,
    #[serde(default)]
    pagination: Option<Pagination>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

/// Rows and optional pagination of a successful response.
pub(crate) struct Decoded<T> {
    pub rows: Vec<T>,
    pub pagination: Option<Pagination>,
}

/// Validates status and envelope, returning the rows.
///
/// A missing `data` field yields no rows.
///
/// # Errors
///
/// Returns [`SkyConnectError::Api`] for a non-2xx status or an `error` object in
/// the body, and [`SkyConnectError::Json`] for a body that is not an envelope.
pub(crate) fn decode_envelope<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<Decoded<T>> {
    let parsed = serde_json::from_slice::<Envelope<T>>(body);

    if !(200..300).contains(&status) {
        let message = parsed
            .ok()
            .and_then(|e| e.error)
            .map(describe)
            .unwrap_or_else(|| String::from_utf8_lossy(body).chars().take(200).collect());
        return Err(SkyConnectError::Api { status, message });
    }

    let envelope = parsed?;
    if let Some(error) = envelope.error {
        return Err(SkyConnectError::Api {
            status,
            message: describe(error),
        });
    }

    Ok(Decoded {
        rows: envelope.data.unwrap_or_default(),
        pagination: envelope.pagination,
    })
}

fn describe(error: ApiErrorBody) -> String {
    match (error.code, error.message) {
        (Some(code), Some(message)) => format!("{code}: {message}"),
        (Some(text), None) | (None, Some(text)) => text,
        (None, None) => "unspecified API error".to_string(),
    }
}
