//! Domain layer for the SkyConnect plugin.
//!
//! This module contains the core domain types, independent of Zellij-specific
//! APIs or infrastructure concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`airport`]: Airport records as returned by the aviation data API

pub mod airport;
pub mod error;

pub use airport::{AirportDetail, AirportSummary, Coordinate};
pub use error::{Result, SkyConnectError};
