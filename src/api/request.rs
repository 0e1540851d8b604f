//! Outgoing request descriptions.
//!
//! The plugin host performs HTTP on our behalf: we hand it a URL plus a context
//! map and get the same map back with the response. [`RequestContext`] is the
//! typed view of that map; it carries everything needed to route and decode the
//! response once it arrives.

use crate::domain::error::{Result, SkyConnectError};
use std::collections::BTreeMap;
use std::fmt;

const KIND_KEY: &str = "kind";
const GENERATION_KEY: &str = "generation";
const OFFSET_KEY: &str = "offset";
const LIMIT_KEY: &str = "limit";
const SEARCH_KEY: &str = "search";

/// Parameters of a list query, in the units the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListAirportsParams {
    /// Free-text filter; `None` lists everything.
    pub search: Option<String>,
    pub limit: u32,
    pub offset: u32,
}

impl ListAirportsParams {
    /// Builds parameters, dropping a blank search term.
    #[must_use]
    pub fn new(search: &str, limit: u32, offset: u32) -> Self {
        let search = if search.is_empty() {
            None
        } else {
            Some(search.to_string())
        };
        Self {
            search,
            limit,
            offset,
        }
    }
}

/// Which workflow a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    List,
    Detail,
}

impl RequestKind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Detail => "detail",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata round-tripped through the host alongside a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub kind: RequestKind,

    /// Generation tag issued by the query engine for this request.
    pub generation: u64,

    /// Logical offset requested by the user (list requests only).
    pub offset: u32,

    /// Logical page size requested by the user (list requests only).
    pub limit: u32,

    /// Search term of the originating query (list requests only).
    pub search: Option<String>,
}

impl RequestContext {
    /// Context for a list request.
    #[must_use]
    pub fn list(generation: u64, params: &ListAirportsParams) -> Self {
        Self {
            kind: RequestKind::List,
            generation,
            offset: params.offset,
            limit: params.limit,
            search: params.search.clone(),
        }
    }

    /// Context for a detail request.
    #[must_use]
    pub const fn detail(generation: u64) -> Self {
        Self {
            kind: RequestKind::Detail,
            generation,
            offset: 0,
            limit: 0,
            search: None,
        }
    }

    /// Encodes the context as the string map the host carries.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert(KIND_KEY.to_string(), self.kind.to_string());
        map.insert(GENERATION_KEY.to_string(), self.generation.to_string());
        if self.kind == RequestKind::List {
            map.insert(OFFSET_KEY.to_string(), self.offset.to_string());
            map.insert(LIMIT_KEY.to_string(), self.limit.to_string());
            if let Some(search) = &self.search {
                map.insert(SEARCH_KEY.to_string(), search.clone());
            }
        }
        map
    }

    /// Decodes a context map returned by the host.
    ///
    /// # Errors
    ///
    /// Returns [`SkyConnectError::Decode`] if the kind or generation is missing or
    /// malformed. Responses with an unreadable context cannot be routed.
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self> {
        let kind = match map.get(KIND_KEY).map(String::as_str) {
            Some("list") => RequestKind::List,
            Some("detail") => RequestKind::Detail,
            other => {
                return Err(SkyConnectError::Decode(format!(
                    "unknown request kind: {other:?}"
                )))
            }
        };

        let generation = parse_number(map, GENERATION_KEY)?
            .ok_or_else(|| SkyConnectError::Decode("missing request generation".to_string()))?;

        let narrow = |key: &str| -> Result<u32> {
            parse_number(map, key)?
                .map_or(Ok(0), |n| u32::try_from(n).map_err(|e| SkyConnectError::Decode(e.to_string())))
        };

        Ok(Self {
            kind,
            generation,
            offset: narrow(OFFSET_KEY)?,
            limit: narrow(LIMIT_KEY)?,
            search: map.get(SEARCH_KEY).cloned(),
        })
    }
}

fn parse_number(map: &BTreeMap<String, String>, key: &str) -> Result<Option<u64>> {
    map.get(key)
        .map(|raw| {
            raw.parse::<u64>()
                .map_err(|e| SkyConnectError::Decode(format!("bad {key} '{raw}': {e}")))
        })
        .transpose()
}

/// A fully-built request ready to hand to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub url: String,
    pub context: RequestContext,
}

impl ApiRequest {
    #[must_use]
    pub const fn kind(&self) -> RequestKind {
        self.context.kind
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.context.generation
    }
}
