//! Error types for the SkyConnect plugin.
//!
//! This module defines the centralized error type [`SkyConnectError`] and a type alias
//! [`Result`] for convenient error handling throughout the plugin. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! None of these errors is fatal to the plugin. Remote failures degrade to an empty
//! result set or a "not found" detail, and storage failures fall back to defaults.

use thiserror::Error;

/// The main error type for SkyConnect plugin operations.
///
/// Most variants wrap underlying errors from external crates using `#[from]`
/// for automatic conversion.
///
/// # Examples
///
/// ```
/// use skyconnect::SkyConnectError;
///
/// fn validate_page(page: u32) -> Result<(), SkyConnectError> {
///     if page == 0 {
///         return Err(SkyConnectError::InvalidPage(page));
///     }
///     Ok(())
/// }
///
/// assert!(validate_page(0).is_err());
/// ```
#[derive(Debug, Error)]
pub enum SkyConnectError {
    /// Key-value storage operation failed.
    ///
    /// Occurs when reading from or writing to the persisted store fails for a
    /// reason other than plain I/O (e.g. a simulated or backend-specific failure).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization or deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The airport API answered with a failure.
    ///
    /// Covers non-2xx responses and 2xx responses whose body carries an API
    /// `error` object (AviationStack reports quota and key problems that way).
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code reported by the host.
        status: u16,
        /// Error description extracted from the body, if any.
        message: String,
    },

    /// A response could not be decoded into the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// A search was requested for a page below 1.
    #[error("Invalid page {0}: pages are 1-based")]
    InvalidPage(u32),

    /// Theme palette parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for SkyConnect operations.
pub type Result<T> = std::result::Result<T, SkyConnectError>;
