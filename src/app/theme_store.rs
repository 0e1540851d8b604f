//! Persisted light/dark preference.

use crate::domain::error::{Result, SkyConnectError};
use crate::storage::{KeyValueStore, THEME_KEY};
use std::fmt;
use std::str::FromStr;

/// The user's colour scheme choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ThemePreference {
    Light,
    #[default]
    Dark,
}

impl ThemePreference {
    /// The stored literal.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The other preference.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreference {
    type Err = SkyConnectError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(SkyConnectError::Theme(format!("unknown theme '{other}'"))),
        }
    }
}

/// Holds the current [`ThemePreference`] and writes changes through to storage.
///
/// Until [`initialize`](Self::initialize) reads a stored value the store reports
/// the default, [`ThemePreference::Dark`].
#[derive(Debug, Default)]
pub struct ThemeStore {
    theme: ThemePreference,
    initialized: bool,
}

impl ThemeStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the stored preference once.
    ///
    /// Later calls are no-ops, as is a call without a store. An unknown or
    /// unreadable stored value leaves the default in place.
    pub fn initialize(&mut self, store: Option<&dyn KeyValueStore>) {
        if self.initialized {
            tracing::trace!("theme store already initialized");
            return;
        }
        let Some(store) = store else {
            tracing::debug!("no storage available, theme stays at default");
            return;
        };
        self.initialized = true;

        match store.get(THEME_KEY) {
            Ok(Some(raw)) => match raw.parse::<ThemePreference>() {
                Ok(theme) => self.theme = theme,
                Err(e) => tracing::warn!(error = %e, "ignoring stored theme"),
            },
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "failed to read theme preference"),
        }

        tracing::debug!(theme = %self.theme, "theme store initialized");
    }

    #[must_use]
    pub const fn theme(&self) -> ThemePreference {
        self.theme
    }

    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Switches between light and dark.
    ///
    /// # Errors
    ///
    /// Returns the storage error if persisting fails; the theme is unchanged.
    pub fn toggle(&mut self, store: Option<&mut dyn KeyValueStore>) -> Result<ThemePreference> {
        let next = self.theme.toggled();
        self.set_theme(store, next)?;
        Ok(next)
    }

    /// Sets the theme explicitly.
    ///
    /// # Errors
    ///
    /// Returns the storage error if persisting fails; the theme is unchanged.
    pub fn set_theme(&mut self, store: Option<&mut dyn KeyValueStore>, theme: ThemePreference) -> Result<()> {
        if let Some(store) = store {
            store.set(THEME_KEY, theme.as_str())?;
        }
        tracing::debug!(from = %self.theme, to = %theme, "theme changed");
        self.theme = theme;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStore;

    #[test]
    fn test_default_is_dark() {
        assert_eq!(ThemeStore::new().theme(), ThemePreference::Dark);
    }

    #[test]
    fn test_toggle_persists_light_then_dark() {
        let mut store = MemoryStore::new();
        let mut themes = ThemeStore::new();
        themes.initialize(Some(&store));

        assert_eq!(themes.toggle(Some(&mut store)).unwrap(), ThemePreference::Light);
        assert_eq!(store.raw(THEME_KEY), Some("light"));

        assert_eq!(themes.toggle(Some(&mut store)).unwrap(), ThemePreference::Dark);
        assert_eq!(store.raw(THEME_KEY), Some("dark"));
    }

    #[test]
    fn test_initialize_reads_stored_value_once() {
        let store = MemoryStore::with_entries(&[(THEME_KEY, "light")]);
        let mut themes = ThemeStore::new();

        themes.initialize(Some(&store));
        assert_eq!(themes.theme(), ThemePreference::Light);

        let other = MemoryStore::with_entries(&[(THEME_KEY, "dark")]);
        themes.initialize(Some(&other));
        assert_eq!(themes.theme(), ThemePreference::Light);
    }

    #[test]
    fn test_initialize_without_store_is_noop() {
        let mut themes = ThemeStore::new();
        themes.initialize(None);

        assert!(!themes.is_initialized());
        assert_eq!(themes.theme(), ThemePreference::Dark);
    }

    #[test]
    fn test_unknown_stored_value_falls_back_to_dark() {
        let store = MemoryStore::with_entries(&[(THEME_KEY, "solarized")]);
        let mut themes = ThemeStore::new();
        themes.initialize(Some(&store));
        assert_eq!(themes.theme(), ThemePreference::Dark);
    }

    #[test]
    fn test_failed_write_keeps_theme() {
        let mut store = MemoryStore::new();
        store.fail_writes();
        let mut themes = ThemeStore::new();

        assert!(themes.toggle(Some(&mut store)).is_err());
        assert_eq!(themes.theme(), ThemePreference::Dark);
    }

    #[test]
    fn test_toggle_without_store_updates_memory() {
        let mut themes = ThemeStore::new();
        themes.set_theme(None, ThemePreference::Light).unwrap();
        assert_eq!(themes.theme(), ThemePreference::Light);
    }
}
