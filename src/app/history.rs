//! Recent-search history.
//!
//! Keeps the last [`HISTORY_LIMIT`] successful queries, most recent first, with no
//! two entries equal under case-insensitive comparison. Every mutation is written
//! to the backing store before the in-memory list changes, so a failed write leaves
//! both sides as they were.

use crate::domain::error::Result;
use crate::storage::{KeyValueStore, SEARCH_HISTORY_KEY};

/// Maximum number of remembered queries.
pub const HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchHistory {
    entries: Vec<String>,
}

impl SearchHistory {
    /// Loads the persisted history.
    ///
    /// Absent, unreadable or malformed values yield an empty history. A stored
    /// list longer than [`HISTORY_LIMIT`] is truncated.
    #[must_use]
    pub fn load(store: Option<&dyn KeyValueStore>) -> Self {
        let Some(store) = store else {
            return Self::default();
        };

        let raw = match store.get(SEARCH_HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read search history");
                return Self::default();
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(mut entries) => {
                entries.truncate(HISTORY_LIMIT);
                tracing::debug!(count = entries.len(), "search history loaded");
                Self { entries }
            }
            Err(e) => {
                tracing::warn!(error = %e, "stored search history is malformed, ignoring");
                Self::default()
            }
        }
    }

    /// Records `query` as the most recent search.
    ///
    /// The query is trimmed; blank input is ignored. Earlier entries equal to it
    /// ignoring case are removed, so the latest casing wins.
    ///
    /// # Errors
    ///
    /// Returns the storage error if persisting fails. Memory is left unchanged.
    pub fn add(&mut self, store: Option<&mut dyn KeyValueStore>, query: &str) -> Result<()> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(());
        }

        let lowered = query.to_lowercase();
        let mut next: Vec<String> = Vec::with_capacity(HISTORY_LIMIT);
        next.push(query.to_string());
        next.extend(
            self.entries
                .iter()
                .filter(|entry| entry.to_lowercase() != lowered)
                .cloned(),
        );
        next.truncate(HISTORY_LIMIT);

        if let Some(store) = store {
            store.set(SEARCH_HISTORY_KEY, &serde_json::to_string(&next)?)?;
        }

        tracing::debug!(query = %query, count = next.len(), "search history updated");
        self.entries = next;
        Ok(())
    }

    /// Forgets every entry and deletes the persisted key.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the deletion fails. Memory is left unchanged.
    pub fn clear(&mut self, store: Option<&mut dyn KeyValueStore>) -> Result<()> {
        if let Some(store) = store {
            store.remove(SEARCH_HISTORY_KEY)?;
        }
        tracing::debug!("search history cleared");
        self.entries.clear();
        Ok(())
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
