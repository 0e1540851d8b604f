//! In-memory storage backend for tests.
//!
//! Behaves like a fresh `localStorage`. Writes can be made to fail on demand to
//! exercise the write-through paths of the stores built on top of it.

use crate::domain::error::{Result, SkyConnectError};
use crate::storage::backend::KeyValueStore;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `entries`.
    pub fn with_entries(entries: &[(&str, &str)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            fail_writes: false,
        }
    }

    /// Makes every subsequent `set`/`remove` fail.
    pub fn fail_writes(&mut self) {
        self.fail_writes = true;
    }

    /// Raw view of a stored value, bypassing the trait.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            return Err(SkyConnectError::Storage(format!("write to {key} rejected")));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.fail_writes {
            return Err(SkyConnectError::Storage(format!("removal of {key} rejected")));
        }
        self.entries.remove(key);
        Ok(())
    }
}
