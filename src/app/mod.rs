//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the plugin runtime (main.rs) and the api, storage
//! and ui layers. It owns every piece of mutable application state and the
//! logic that changes it.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──── Web responses / timers ──────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`debounce`]: Search-as-you-type idle timer bookkeeping
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`history`]: Recent searches, most recent first
//! - [`modes`]: Input focus and route types
//! - [`query`]: Airport queries, results, paging and loading flags
//! - [`state`]: Central application state container and view model computation
//! - [`theme_store`]: Light/dark preference with persistence
//!
//! # Example
//!
//! ```no_run
//! use skyconnect::app::{handle_event, Event};
//! use skyconnect::{initialize, Config};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::ToggleTheme)?;
//! assert!(actions.is_empty());
//! # Ok::<(), skyconnect::SkyConnectError>(())
//! ```

pub mod actions;
pub mod debounce;
pub mod handler;
pub mod history;
pub mod modes;
pub mod query;
pub mod state;
pub mod theme_store;

pub use actions::Action;
pub use debounce::Debouncer;
pub use handler::{handle_event, Event};
pub use history::{SearchHistory, HISTORY_LIMIT};
pub use modes::{Direction, InputMode, Route, SearchFocus};
pub use query::{page_offset, QueryEngine, PAGE_SIZE};
pub use state::AppState;
pub use theme_store::{ThemePreference, ThemeStore};
