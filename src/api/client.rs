//! AviationStack request builder and response decoder.
//!
//! The client performs no I/O. It turns query parameters into an [`ApiRequest`]
//! for the host to execute, and turns the host's `(status, body)` back into domain
//! values. This keeps every decoding rule testable without a network.
//!
//! # Search capability
//!
//! The free AviationStack plan ignores the `search` parameter on `/airports`, so
//! where text filtering happens is an explicit setting:
//!
//! ```text
//! Server: GET /airports?access_key=..&limit=9&offset=18&search=york
//!         → rows used as returned
//!
//! Client: GET /airports?access_key=..&limit=100&offset=0
//!         → rows filtered by "york", then sliced [18, 27)
//! ```

use crate::api::filter;
use crate::api::request::{ApiRequest, ListAirportsParams, RequestContext};
use crate::api::response::{decode_envelope, AirportPage, Pagination};
use crate::domain::airport::{AirportDetail, AirportSummary};
use crate::domain::error::{Result, SkyConnectError};
use std::str::FromStr;
use url::Url;

/// Default API root. The free plan only serves plain HTTP.
pub const DEFAULT_BASE_URL: &str = "http://api.aviationstack.com/v1";

/// Default number of rows fetched per request in client-side filtering mode.
pub const DEFAULT_CLIENT_WINDOW: u32 = 100;

/// Where text filtering is performed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchCapability {
    /// The remote service filters by `search`.
    #[default]
    Server,
    /// The remote service ignores `search`; rows are filtered locally.
    Client,
}

impl FromStr for SearchCapability {
    type Err = SkyConnectError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "server" => Ok(Self::Server),
            "client" => Ok(Self::Client),
            other => Err(SkyConnectError::Config(format!(
                "search_mode must be 'server' or 'client', got '{other}'"
            ))),
        }
    }
}

/// Pure client for the `/airports` endpoint.
#[derive(Debug, Clone)]
pub struct AviationStackClient {
    airports_url: Url,
    api_key: String,
    capability: SearchCapability,
    client_window: u32,
}

/// Parses and validates an API root URL.
///
/// # Errors
///
/// Returns [`SkyConnectError::Config`] if `base_url` is not an absolute
/// hierarchical URL.
pub fn parse_base_url(base_url: &str) -> Result<Url> {
    let url = Url::parse(base_url.trim())
        .map_err(|e| SkyConnectError::Config(format!("invalid base_url '{base_url}': {e}")))?;
    if url.cannot_be_a_base() {
        return Err(SkyConnectError::Config(format!(
            "base_url '{base_url}' cannot be a base"
        )));
    }
    Ok(url)
}

impl AviationStackClient {
    /// Creates a client rooted at `base_url`, usually from [`parse_base_url`].
    #[must_use]
    pub fn new(base_url: &Url, api_key: &str, capability: SearchCapability, client_window: u32) -> Self {
        let mut airports_url = base_url.clone();
        if let Ok(mut segments) = airports_url.path_segments_mut() {
            segments.pop_if_empty().push("airports");
        }

        Self {
            airports_url,
            api_key: api_key.to_string(),
            capability,
            client_window: client_window.max(1),
        }
    }

    #[must_use]
    pub const fn capability(&self) -> SearchCapability {
        self.capability
    }

    /// Builds a list request tagged with `generation`.
    #[must_use]
    pub fn list_request(&self, params: &ListAirportsParams, generation: u64) -> ApiRequest {
        let mut url = self.airports_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("access_key", &self.api_key);
            match self.capability {
                SearchCapability::Server => {
                    query
                        .append_pair("limit", &params.limit.to_string())
                        .append_pair("offset", &params.offset.to_string());
                    if let Some(search) = &params.search {
                        query.append_pair("search", search);
                    }
                }
                SearchCapability::Client => {
                    query
                        .append_pair("limit", &self.client_window.to_string())
                        .append_pair("offset", "0");
                }
            }
        }

        ApiRequest {
            url: url.into(),
            context: RequestContext::list(generation, params),
        }
    }

    /// Builds a detail request for the airport with IATA code `identifier`.
    #[must_use]
    pub fn detail_request(&self, identifier: &str, generation: u64) -> ApiRequest {
        let mut url = self.airports_url.clone();
        url.query_pairs_mut()
            .append_pair("access_key", &self.api_key)
            .append_pair("iata_code", identifier);

        ApiRequest {
            url: url.into(),
            context: RequestContext::detail(generation),
        }
    }

    /// Decodes a list response issued with `context`.
    ///
    /// # Errors
    ///
    /// Returns an error for non-2xx statuses, API error bodies and malformed JSON.
    pub fn decode_list(&self, status: u16, body: &[u8], context: &RequestContext) -> Result<AirportPage> {
        let decoded = decode_envelope::<AirportSummary>(status, body)?;

        match self.capability {
            SearchCapability::Server => {
                let count = u32::try_from(decoded.rows.len()).unwrap_or(u32::MAX);
                let pagination = decoded.pagination.unwrap_or(Pagination {
                    offset: context.offset,
                    limit: context.limit,
                    count,
                    total: 0,
                });
                Ok(AirportPage {
                    airports: decoded.rows,
                    pagination,
                })
            }
            SearchCapability::Client => Ok(filter::paginate(
                decoded.rows,
                context.search.as_deref(),
                context.offset,
                context.limit,
            )),
        }
    }

    /// Decodes a detail response. An empty result set is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error for non-2xx statuses, API error bodies and malformed JSON.
    pub fn decode_detail(&self, status: u16, body: &[u8]) -> Result<Option<AirportDetail>> {
        let decoded = decode_envelope::<AirportDetail>(status, body)?;
        Ok(decoded.rows.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn client(capability: SearchCapability) -> AviationStackClient {
        let base = parse_base_url(DEFAULT_BASE_URL).unwrap();
        AviationStackClient::new(&base, "secret", capability, 100)
    }

    #[test]
    fn test_server_list_url_forwards_paging_and_search() {
        let request = client(SearchCapability::Server)
            .list_request(&ListAirportsParams::new("new york", 9, 18), 3);

        assert_eq!(
            request.url,
            "http://api.aviationstack.com/v1/airports?access_key=secret&limit=9&offset=18&search=new+york"
        );
        assert_eq!(request.generation(), 3);
    }

    #[test]
    fn test_server_list_url_omits_empty_search() {
        let request = client(SearchCapability::Server).list_request(&ListAirportsParams::new("", 9, 0), 1);
        assert!(!request.url.contains("search="));
    }

    #[test]
    fn test_client_list_url_requests_window() {
        let request = client(SearchCapability::Client)
            .list_request(&ListAirportsParams::new("york", 9, 9), 1);

        assert_eq!(
            request.url,
            "http://api.aviationstack.com/v1/airports?access_key=secret&limit=100&offset=0"
        );
        assert_eq!(request.context.search.as_deref(), Some("york"));
        assert_eq!(request.context.offset, 9);
    }

    #[test]
    fn test_base_url_with_trailing_slash() {
        let base = parse_base_url("https://example.test/v1/").unwrap();
        let client = AviationStackClient::new(&base, "k", SearchCapability::Server, 100);
        let request = client.detail_request("JFK", 1);
        assert_eq!(
            request.url,
            "https://example.test/v1/airports?access_key=k&iata_code=JFK"
        );
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        assert!(matches!(parse_base_url("not a url"), Err(SkyConnectError::Config(_))));
        assert!(matches!(parse_base_url("mailto:ops@example.test"), Err(SkyConnectError::Config(_))));
    }

    #[test]
    fn test_server_decode_synthesizes_missing_pagination() {
        let client = client(SearchCapability::Server);
        let context = RequestContext::list(1, &ListAirportsParams::new("", 9, 9));
        let body = br#"{"data": [{"airport_name": "Anaa"}, {"airport_name": "Arorae"}]}"#;

        let page = client.decode_list(200, body, &context).unwrap();

        assert_eq!(page.airports.len(), 2);
        assert_eq!(
            page.pagination,
            Pagination {
                offset: 9,
                limit: 9,
                count: 2,
                total: 0
            }
        );
    }

    #[test]
    fn test_client_decode_filters_locally() {
        let client = client(SearchCapability::Client);
        let context = RequestContext::list(1, &ListAirportsParams::new("york", 9, 0));
        let body = br#"{"pagination": {"offset": 0, "limit": 100, "count": 3, "total": 6471},
                        "data": [
                          {"airport_name": "John F Kennedy", "city_iata_code": "NYC", "country_name": "United States"},
                          {"airport_name": "York Landing", "iata_code": "ZAC"},
                          {"airport_name": "Heathrow", "iata_code": "LHR"}
                        ]}"#;

        let page = client.decode_list(200, body, &context).unwrap();

        assert_eq!(page.airports.len(), 1);
        assert_eq!(page.airports[0].iata_code, "ZAC");
        assert_eq!(page.pagination.total, 1);
    }

    #[test]
    fn test_decode_detail_first_row_or_none() {
        let client = client(SearchCapability::Server);

        let found = client
            .decode_detail(200, br#"{"data": [{"iata_code": "JFK", "timezone": "America/New_York"}]}"#)
            .unwrap();
        assert_eq!(found.unwrap().timezone, "America/New_York");

        let missing = client.decode_detail(200, br#"{"data": []}"#).unwrap();
        assert_eq!(missing, None);
    }

    #[test]
    fn test_search_capability_from_str() {
        assert_eq!("Client".parse::<SearchCapability>().unwrap(), SearchCapability::Client);
        assert_eq!(" server ".parse::<SearchCapability>().unwrap(), SearchCapability::Server);
        assert!("both".parse::<SearchCapability>().is_err());
    }
}
