//! Zellij plugin wrapper and entry point.
//!
//! This module is the thin integration layer between the SkyConnect library and
//! the Zellij plugin system. It translates host events into library events and
//! library actions into host calls; all decisions live in the library.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: Request `WebAccess` (API calls) and `FullHdAccess` (storage)
//! 3. **Subscribe**: Key, `Timer`, `WebRequestResult`, `PermissionRequestResult`
//! 4. **Landing search**: Issued by the library once permissions are granted
//! 5. **Update**: Map events, delegate to `handle_event`, execute actions
//! 6. **Render**: Call library render function
//!
//! # Event Mapping
//!
//! - `Key` → intent events, depending on route and input mode
//! - `Timer` → `Event::TimerElapsed`
//! - `WebRequestResult` → `Event::ApiResponse { status, body, context }`
//! - `PermissionRequestResult` → `PermissionsGranted` / `PermissionsDenied`
//!
//! # Keybindings
//!
//! Results, normal mode:
//! - `/`: Focus search
//! - Arrows / `h` `j` `k` `l`: Move across the grid
//! - `Enter`: Open the selected airport
//! - `]` / `PageDown`: Next page, `[` / `PageUp`: Previous page
//! - `t`: Toggle theme
//! - `q`: Close plugin
//!
//! Search focused:
//! - Characters / `Backspace`: Edit the query (auto-search after a pause)
//! - `Enter`: Search now, or re-run the highlighted history entry
//! - `Tab` / `Down`: Step through recent searches
//! - `Ctrl+x`: Clear recent searches
//! - `Esc`: Leave the search input
//!
//! Detail view:
//! - `Esc` / `Backspace`: Back to results
//! - `t`: Toggle theme, `q`: Close plugin

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use skyconnect::app::Direction;
use skyconnect::{handle_event, Action, Config, Event, InputMode, Route};

register_plugin!(State);

/// Plugin state wrapper around the library's `AppState`.
///
/// Starts detached from storage; `load` builds the real state once the
/// configuration is known.
#[derive(Default)]
struct State {
    app: skyconnect::AppState,
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// Parses configuration, initializes tracing and application state,
    /// requests permissions and subscribes to events. The landing search waits
    /// for the permission result.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        skyconnect::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            search_mode = ?config.search_mode,
            base_url = %config.base_url,
            has_api_key = !config.api_key.is_empty(),
            "parsed configuration"
        );
        self.app = skyconnect::initialize(&config);

        request_permission(&[PermissionType::WebAccess, PermissionType::FullHdAccess]);
        subscribe(&[
            EventType::Key,
            EventType::Timer,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles incoming Zellij events.
    ///
    /// Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Timer(_) => Event::TimerElapsed,
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                tracing::debug!(status, body_len = body.len(), "web request result");
                Event::ApiResponse {
                    status,
                    body,
                    context,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => match status {
                PermissionStatus::Granted => Event::PermissionsGranted,
                PermissionStatus::Denied => Event::PermissionsDenied,
            },
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for action in &actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        skyconnect::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('x') if self.app.input_mode.is_search() => Some(Event::ClearHistory),
                _ => None,
            };
        }

        if self.app.route == Route::Detail {
            return match key.bare_key {
                BareKey::Esc => Some(Event::Escape),
                BareKey::Backspace => Some(Event::Backspace),
                BareKey::Char('t') => Some(Event::ToggleTheme),
                BareKey::Char('q') => Some(Event::Quit),
                _ => None,
            };
        }

        Some(match self.app.input_mode {
            InputMode::Search(_) => match key.bare_key {
                BareKey::Esc => Event::Escape,
                BareKey::Enter => Event::Submit,
                BareKey::Backspace => Event::Backspace,
                BareKey::Tab | BareKey::Down => Event::CycleHistory,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            },
            InputMode::Normal => match key.bare_key {
                BareKey::Char('/') => Event::FocusSearch,
                BareKey::Up | BareKey::Char('k') => Event::MoveSelection(Direction::Up),
                BareKey::Down | BareKey::Char('j') => Event::MoveSelection(Direction::Down),
                BareKey::Left | BareKey::Char('h') => Event::MoveSelection(Direction::Left),
                BareKey::Right | BareKey::Char('l') => Event::MoveSelection(Direction::Right),
                BareKey::Enter => Event::Submit,
                BareKey::PageDown | BareKey::Char(']') => Event::NextPage,
                BareKey::PageUp | BareKey::Char('[') => Event::PreviousPage,
                BareKey::Char('t') => Event::ToggleTheme,
                BareKey::Char('q') => Event::Quit,
                _ => return None,
            },
        })
    }

    /// Executes an action returned from event handling.
    ///
    /// Request URLs carry the API key, so they are never logged.
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::WebRequest(request) => {
                tracing::debug!(kind = ?request.kind(), generation = request.generation(), "sending web request");
                web_request(
                    request.url.clone(),
                    HttpVerb::Get,
                    BTreeMap::new(),
                    vec![],
                    request.context.to_map(),
                );
            }
            Action::ScheduleTimer(delay) => {
                tracing::trace!(?delay, "scheduling timer");
                set_timeout(delay.as_secs_f64());
            }
        }
    }
}
