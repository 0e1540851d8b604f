//! Airport domain records.
//!
//! This module defines [`AirportSummary`], one row of a list query, and
//! [`AirportDetail`], the richer record shown on the detail view. Both are
//! decoded straight from the aviation API's JSON rows.
//!
//! The remote schema is loose: identifier fields may be `null`, numeric ids arrive
//! as strings, and coordinates arrive either as decimal strings (`"40.6413"`) or as
//! plain numbers. Decoding normalizes all of that so the rest of the crate never
//! deals with `serde_json::Value`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

/// A latitude or longitude as received from the API.
///
/// Keeps the original text for display (so `"-17.05"` renders exactly as the API
/// sent it) alongside the parsed value used for map projection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coordinate {
    raw: String,
    value: Option<f64>,
}

impl Coordinate {
    /// Builds a coordinate from a decimal value.
    #[must_use]
    pub fn from_value(value: f64) -> Self {
        Self {
            raw: value.to_string(),
            value: Some(value),
        }
    }

    /// Parses a coordinate from text, keeping the text even if it does not parse.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let raw = text.trim().to_string();
        let value = raw.parse::<f64>().ok().filter(|v| v.is_finite());
        Self { raw, value }
    }

    /// Returns the parsed decimal degrees, if the API value was numeric.
    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        self.value
    }

    /// Returns `true` when the API sent nothing for this coordinate.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.raw.is_empty()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.raw.is_empty() {
            f.write_str("N/A")
        } else {
            f.write_str(&self.raw)
        }
    }
}

impl<'de> Deserialize<'de> for Coordinate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::Number(n)) => Self {
                raw: n.to_string(),
                value: n.as_f64(),
            },
            Some(Value::String(s)) => Self::from_text(&s),
            _ => Self::default(),
        })
    }
}

/// Decodes a field that may be a string, a number, `null` or absent into a `String`.
fn loose_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

/// Same as [`loose_string`] but keeps absence visible as `None`.
fn loose_optional_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    loose_string(deserializer).map(|s| if s.trim().is_empty() { None } else { Some(s) })
}

/// One airport row returned by a list query.
///
/// Immutable once received. The query engine replaces its whole result list on
/// every new search, never individual rows.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AirportSummary {
    /// Internal record id.
    #[serde(default, deserialize_with = "loose_string")]
    pub id: String,

    /// API-side airport id.
    #[serde(default, deserialize_with = "loose_string")]
    pub airport_id: String,

    /// Three-letter IATA code; used as the detail lookup key.
    #[serde(default, deserialize_with = "loose_string")]
    pub iata_code: String,

    /// Four-letter ICAO code.
    #[serde(default, deserialize_with = "loose_string")]
    pub icao_code: String,

    /// Display name.
    #[serde(default, deserialize_with = "loose_string")]
    pub airport_name: String,

    /// IATA code of the served city.
    #[serde(default, alias = "city_iata", deserialize_with = "loose_string")]
    pub city_iata_code: String,

    /// Country display name.
    #[serde(default, deserialize_with = "loose_string")]
    pub country_name: String,

    /// Two-letter country code.
    #[serde(default, deserialize_with = "loose_string")]
    pub country_iso2: String,

    #[serde(default)]
    pub latitude: Coordinate,

    #[serde(default)]
    pub longitude: Coordinate,
}

impl AirportSummary {
    /// Returns the identifier used to open the detail view, if the row has one.
    #[must_use]
    pub fn lookup_code(&self) -> Option<&str> {
        let code = self.iata_code.trim();
        if code.is_empty() {
            None
        } else {
            Some(code)
        }
    }

    /// Returns the `city, country` line shown under the airport name.
    ///
    /// Missing parts are rendered as `N/A`.
    #[must_use]
    pub fn location_line(&self) -> String {
        let city = non_empty_or_na(&self.city_iata_code);
        let country = non_empty_or_na(&self.country_name);
        format!("{city}, {country}")
    }
}

/// Full record for a single airport.
///
/// Owned by the query engine as the selected airport. Replaced as a whole on
/// each detail fetch and never merged field-by-field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AirportDetail {
    #[serde(flatten)]
    pub summary: AirportSummary,

    /// IANA timezone name, e.g. `America/New_York`.
    #[serde(default, deserialize_with = "loose_string")]
    pub timezone: String,

    /// UTC offset in hours as sent by the API, e.g. `-5`.
    #[serde(default, deserialize_with = "loose_string")]
    pub gmt: String,

    #[serde(default, deserialize_with = "loose_optional_string")]
    pub phone_number: Option<String>,

    #[serde(default, deserialize_with = "loose_string")]
    pub geoname_id: String,
}

impl AirportDetail {
    /// Formats the UTC offset for display (`UTC-5`, `UTC+10`, `UTC+0`).
    #[must_use]
    pub fn utc_offset_label(&self) -> String {
        let gmt = self.gmt.trim();
        if gmt.is_empty() {
            return "N/A".to_string();
        }
        if gmt.starts_with('-') || gmt.starts_with('+') {
            format!("UTC{gmt}")
        } else {
            format!("UTC+{gmt}")
        }
    }
}

/// Returns the text itself, or `N/A` when it is blank.
#[must_use]
pub fn non_empty_or_na(text: &str) -> &str {
    if text.trim().is_empty() {
        "N/A"
    } else {
        text
    }
}
