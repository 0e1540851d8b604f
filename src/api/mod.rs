//! AviationStack API adapter.
//!
//! Translates list and detail queries into host web requests and decodes the
//! responses into domain records. Nothing in this module performs I/O; the plugin
//! shim sends the requests and feeds the raw responses back through the event
//! handler.
//!
//! # Modules
//!
//! - `client`: request building and response decoding
//! - `filter`: local text filtering and slicing for client-side search
//! - `request`: request descriptions and the context carried through the host
//! - `response`: response envelope and pagination types

pub mod client;
pub mod filter;
pub mod request;
pub mod response;

pub use client::{parse_base_url, AviationStackClient, SearchCapability, DEFAULT_BASE_URL, DEFAULT_CLIENT_WINDOW};
pub use request::{ApiRequest, ListAirportsParams, RequestContext, RequestKind};
pub use response::{AirportPage, Pagination};
