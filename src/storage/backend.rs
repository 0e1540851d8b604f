//! Storage backend abstraction.
//!
//! This module defines the [`KeyValueStore`] trait, the plugin's stand-in for a
//! browser's `localStorage`: string keys mapping to string-serialized values. The
//! stores built on top of it (search history, theme preference) decide the value
//! format; the backend only persists opaque strings.
//!
//! # Design Philosophy
//!
//! The trait is designed to be minimal and focused on the actual operations needed
//! by the application, not a generic database. Removal is a distinct operation from
//! writing an empty value so that "never written" and "cleared" read back the same.

use crate::domain::error::Result;
use std::fmt::Debug;

/// Key under which the search history is persisted, as a JSON array of strings.
pub const SEARCH_HISTORY_KEY: &str = "searchHistory";

/// Key under which the theme preference is persisted, as `light` or `dark`.
pub const THEME_KEY: &str = "theme";

/// Abstraction over durable key-value storage.
///
/// Every mutating call must be durable when it returns `Ok`: callers write
/// through before updating their in-memory copy and rely on that ordering.
///
/// # Implementations
///
/// - [`JsonFileStore`](crate::storage::JsonFileStore): one JSON object file with atomic writes
///
/// # Examples
///
/// ```no_run
/// use skyconnect::storage::{JsonFileStore, KeyValueStore};
/// use std::path::PathBuf;
///
/// let mut store = JsonFileStore::new(PathBuf::from("/tmp/skyconnect/storage.json"))?;
/// store.set("theme", "light")?;
/// assert_eq!(store.get("theme")?, Some("light".to_string()));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait KeyValueStore: Debug {
    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` when the key is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write cannot be made durable.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Deletes `key` entirely. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the deletion cannot be made durable.
    fn remove(&mut self, key: &str) -> Result<()>;
}
