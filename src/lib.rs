//! SkyConnect: a Zellij plugin for looking up airports.
//!
//! SkyConnect provides:
//! - Airport search against the AviationStack API, as you type or on Enter
//! - Nine-card result pages with previous/next paging
//! - A detail view with timezone, contact facts and a world map marker
//! - Light and dark themes, persisted across sessions
//! - A recent-search dropdown, persisted across sessions

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, actions                          │
//! │  - Query engine, history, theme store, debounce     │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ API Layer     │
//! │ (ui/)         │   │ (storage/)    │   │ (api/)        │
//! │ - Rendering   │   │ - Key-value   │   │ - URLs        │
//! │ - Palettes    │   │ - JSON file   │   │ - Decoding    │
//! │ - Components  │   │               │   │ - Filtering   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Airport records, errors (domain/)                │
//! │  - Sandbox paths (infrastructure/)                  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing to an OTLP JSON file       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The library never calls the host. HTTP requests and timers are returned as
//! [`Action`]s and their results come back as [`Event`]s, so every flow can be
//! exercised in plain unit tests.
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/skyconnect.wasm" {
//!         api_key "your-aviationstack-key"
//!         search_mode "server"
//!         debounce_ms "500"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Plugin Load** (`main.rs`): parse [`Config`], start tracing, call
//!    [`initialize`], request web access, subscribe to events
//! 2. **Permissions granted**: the landing search (empty query, page 1) is issued
//! 3. **Responses**: `WebRequestResult` events are routed back by their context
//!    map and applied if they are still the latest for their workflow
//! 4. **Rendering**: the view model is recomputed and drawn on every render
//!
//! # Example
//!
//! ```no_run
//! use skyconnect::{handle_event, initialize, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! for event in [Event::FocusSearch, Event::Char('j'), Event::Submit] {
//!     let (_should_render, actions) = handle_event(&mut state, &event)?;
//!     // Execute actions...
//! }
//! # Ok::<(), skyconnect::SkyConnectError>(())
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod storage;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, InputMode, Route, SearchFocus, ThemePreference};
pub use domain::{Result, SkyConnectError};

use api::{parse_base_url, AviationStackClient, SearchCapability, DEFAULT_BASE_URL, DEFAULT_CLIENT_WINDOW};
use app::debounce::DEFAULT_DEBOUNCE;
use app::{Debouncer, QueryEngine, SearchHistory, ThemeStore};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;
use storage::{JsonFileStore, KeyValueStore};
use ui::Palettes;
use url::Url;

/// Storage file name inside the data directory.
pub const STORAGE_FILE_NAME: &str = "storage.json";

/// Plugin configuration parsed from Zellij's configuration system.
///
/// # Example
///
/// ```kdl
/// plugin location="file:/path/to/skyconnect.wasm" {
///     api_key "0123456789abcdef"
///     base_url "http://api.aviationstack.com/v1"
///     search_mode "client"
///     client_window "100"
///     debounce_ms "400"
///     data_dir "~/.local/share/zellij/skyconnect"
///     dark_theme_file "~/.config/skyconnect/midnight.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// AviationStack `access_key`. Requests are still issued when empty; the
    /// API then answers with an error body and the results stay empty.
    pub api_key: String,

    /// API root; `/airports` is appended.
    pub base_url: Url,

    /// Whether the API filters by `search` or rows are filtered locally.
    pub search_mode: SearchCapability,

    /// Rows fetched per request when filtering locally.
    pub client_window: u32,

    /// Idle delay before an automatic search, clamped to 300–2000 ms.
    pub debounce: Duration,

    /// Holds `storage.json` and the trace file.
    pub data_dir: PathBuf,

    /// Custom palette for the light theme. See [`ui::theme`] for the format.
    pub light_theme_file: Option<String>,

    /// Custom palette for the dark theme.
    pub dark_theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            search_mode: SearchCapability::default(),
            client_window: DEFAULT_CLIENT_WINDOW,
            debounce: DEFAULT_DEBOUNCE,
            data_dir: infrastructure::default_data_dir(),
            light_theme_file: None,
            dark_theme_file: None,
            trace_level: None,
        }
    }
}

fn default_base_url() -> Url {
    // Constant input; parsing cannot fail.
    Url::parse(DEFAULT_BASE_URL).expect("DEFAULT_BASE_URL is a valid URL")
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Values that fail to parse fall back to their defaults with a warning.
    ///
    /// # Parsing Rules
    ///
    /// - `base_url`: must be an absolute URL that can carry path segments
    /// - `search_mode`: `server` or `client`, case-insensitive
    /// - `client_window`, `debounce_ms`: positive integers
    /// - `data_dir`, `*_theme_file`: `~` expands to the sandbox `/host` mount
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use skyconnect::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_key".to_string(), "secret".to_string());
    /// map.insert("debounce_ms".to_string(), "800".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_key, "secret");
    /// assert_eq!(config.debounce.as_millis(), 800);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| config.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        let base_url = get("base_url").map_or(defaults.base_url, |raw| {
            parse_base_url(raw).unwrap_or_else(|e| {
                tracing::warn!(base_url = %raw, error = %e, "invalid base_url, using default");
                default_base_url()
            })
        });

        let search_mode = get("search_mode").map_or(defaults.search_mode, |raw| {
            raw.parse().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "invalid search_mode, using server");
                SearchCapability::Server
            })
        });

        let client_window = get("client_window")
            .and_then(|raw| raw.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.client_window);

        let debounce = get("debounce_ms")
            .and_then(|raw| raw.parse::<u64>().ok())
            .map_or(defaults.debounce, Duration::from_millis);

        Self {
            api_key: get("api_key").unwrap_or_default().to_string(),
            base_url,
            search_mode,
            client_window,
            debounce,
            data_dir: infrastructure::resolve_data_dir(get("data_dir")),
            light_theme_file: get("light_theme_file").map(infrastructure::expand_tilde),
            dark_theme_file: get("dark_theme_file").map(infrastructure::expand_tilde),
            trace_level: get("trace_level").map(String::from),
        }
    }
}

/// Builds the application state from configuration.
///
/// Opens `<data_dir>/storage.json`, restores the search history and theme from
/// it, and loads both palettes. A storage file that cannot be opened leaves the
/// plugin running without persistence.
///
/// # Example
///
/// ```no_run
/// use skyconnect::{initialize, Config, ThemePreference};
///
/// let state = initialize(&Config::default());
/// assert_eq!(state.theme_store.theme(), ThemePreference::Dark);
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing skyconnect plugin");

    let storage: Option<Box<dyn KeyValueStore>> =
        match JsonFileStore::new(config.data_dir.join(STORAGE_FILE_NAME)) {
            Ok(store) => Some(Box::new(store)),
            Err(e) => {
                tracing::warn!(error = %e, "storage unavailable, preferences will not persist");
                None
            }
        };
    let store = storage.as_deref();

    let history = SearchHistory::load(store);
    let mut theme_store = ThemeStore::new();
    theme_store.initialize(store);

    let client = AviationStackClient::new(
        &config.base_url,
        &config.api_key,
        config.search_mode,
        config.client_window,
    );
    let palettes = Palettes::load(
        config.light_theme_file.as_deref(),
        config.dark_theme_file.as_deref(),
    );

    tracing::debug!(
        history = history.entries().len(),
        theme = %theme_store.theme(),
        search_mode = ?config.search_mode,
        "state restored"
    );

    AppState::new(
        storage,
        QueryEngine::new(client, history),
        theme_store,
        palettes,
        Debouncer::new(config.debounce),
    )
}
