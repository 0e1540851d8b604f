//! Storage layer for persisted client-side state.
//!
//! This module provides the key-value persistence the stores rely on in place of
//! a browser's `localStorage`. Values are opaque strings; the search history and
//! theme stores own their own value formats.
//!
//! # Modules
//!
//! - `backend`: Storage trait abstraction and the well-known keys
//! - `json`: JSON file-based storage implementation

pub mod backend;
pub mod json;
#[cfg(test)]
pub mod memory;

pub use backend::{KeyValueStore, SEARCH_HISTORY_KEY, THEME_KEY};
pub use json::JsonFileStore;
