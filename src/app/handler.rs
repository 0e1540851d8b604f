//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user intents,
//! timer ticks and API responses, translating them into state changes and action
//! sequences.
//!
//! # Architecture
//!
//! 1. Events arrive from the plugin runtime (key presses, timers, web responses)
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState`, `QueryEngine` and `ThemeStore` methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Search input**: `FocusSearch`, `Char`, `Backspace`, `Submit`, `Escape`
//! - **History panel**: `CycleHistory`, `ClearHistory`
//! - **Results**: `MoveSelection`, `NextPage`, `PreviousPage`
//! - **Global**: `ToggleTheme`, `Quit`
//! - **System**: `PermissionsGranted`, `PermissionsDenied`, `TimerElapsed`, `ApiResponse`

use super::modes::{Direction, InputMode, Route, SearchFocus};
use crate::api::{RequestContext, RequestKind};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use std::collections::BTreeMap;

/// Events triggered by user input, timers or host responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Web access was granted; issues the landing search once.
    PermissionsGranted,
    /// Web access was refused.
    PermissionsDenied,

    /// Focuses the search input.
    FocusSearch,
    /// Appends a character to the search query.
    Char(char),
    /// Removes the last query character, or leaves the detail view.
    Backspace,
    /// Enter: submits the query, re-runs a history entry or opens the selected card.
    Submit,
    /// Leaves the search input or the detail view.
    Escape,

    /// Moves the history highlight to the next entry.
    CycleHistory,
    /// Forgets all recent searches.
    ClearHistory,

    /// Moves the grid cursor.
    MoveSelection(Direction),
    NextPage,
    PreviousPage,

    /// Switches between light and dark.
    ToggleTheme,
    /// Hides the plugin.
    Quit,

    /// A debounce timer fired.
    TimerElapsed,

    /// A web request completed.
    ApiResponse {
        status: u16,
        body: Vec<u8>,
        /// Context map the request was sent with.
        context: BTreeMap<String, String>,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(should_render, actions)`. Actions are executed in order by the plugin shim.
///
/// # Errors
///
/// Returns storage errors from theme and history writes (state is left as it
/// was), and decode errors for responses whose context cannot be routed.
///
/// # Example
///
/// ```no_run
/// use skyconnect::{handle_event, initialize, Config, Event};
///
/// let mut state = initialize(&Config::default());
/// let (should_render, actions) = handle_event(&mut state, &Event::PermissionsGranted)?;
/// assert!(should_render);
/// assert_eq!(actions.len(), 1); // landing search request
/// # Ok::<(), skyconnect::SkyConnectError>(())
/// ```
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = %event_name(event)).entered();

    match event {
        Event::PermissionsGranted => {
            if state.started {
                return Ok((false, vec![]));
            }
            tracing::debug!("permissions granted, issuing landing search");
            state.started = true;
            let actions = start_search(state, "", 1)?;
            Ok((true, actions))
        }
        Event::PermissionsDenied => {
            tracing::warn!("web access denied, airport data unavailable");
            Ok((false, vec![]))
        }
        Event::FocusSearch => {
            if state.route != Route::Results {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if !state.input_mode.is_search() {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            state.search_query.push(*c);
            tracing::trace!(query = %state.search_query, "search query updated");

            let delay = state.debouncer.touch(&state.search_query);
            Ok((true, vec![Action::ScheduleTimer(delay)]))
        }
        Event::Backspace => {
            if state.route == Route::Detail {
                return Ok(go_back(state));
            }
            if !state.input_mode.is_search() {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            if state.search_query.pop().is_none() {
                return Ok((true, vec![]));
            }

            let delay = state.debouncer.touch(&state.search_query);
            Ok((true, vec![Action::ScheduleTimer(delay)]))
        }
        Event::Submit => submit(state),
        Event::Escape => {
            if state.route == Route::Detail {
                return Ok(go_back(state));
            }
            if state.input_mode.is_search() {
                state.input_mode = InputMode::Normal;
                return Ok((true, vec![]));
            }
            Ok((false, vec![]))
        }
        Event::CycleHistory => {
            let InputMode::Search(focus) = state.input_mode else {
                return Ok((false, vec![]));
            };
            let len = state.engine.history().entries().len();
            if len == 0 {
                return Ok((false, vec![]));
            }

            let next = match focus {
                SearchFocus::Typing => SearchFocus::History(0),
                SearchFocus::History(index) if index + 1 < len => SearchFocus::History(index + 1),
                SearchFocus::History(_) => SearchFocus::Typing,
            };
            state.input_mode = InputMode::Search(next);
            Ok((true, vec![]))
        }
        Event::ClearHistory => {
            if !state.input_mode.is_search() {
                return Ok((false, vec![]));
            }
            let (engine, store) = state.engine_with_storage();
            engine.clear_history(store)?;
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::MoveSelection(direction) => {
            if !can_use_grid(state) {
                return Ok((false, vec![]));
            }
            let before = state.selected_index;
            state.move_selection(*direction);
            Ok((state.selected_index != before, vec![]))
        }
        Event::NextPage => {
            if !can_use_grid(state) || !state.engine.has_next_page() {
                return Ok((false, vec![]));
            }
            let query = state.engine.current_search().to_string();
            let page = state.engine.current_page() + 1;
            Ok((true, start_search(state, &query, page)?))
        }
        Event::PreviousPage => {
            if !can_use_grid(state) || !state.engine.has_previous_page() {
                return Ok((false, vec![]));
            }
            let query = state.engine.current_search().to_string();
            let page = state.engine.current_page() - 1;
            Ok((true, start_search(state, &query, page)?))
        }
        Event::ToggleTheme => {
            let (themes, store) = state.theme_with_storage();
            let theme = themes.toggle(store)?;
            tracing::debug!(theme = %theme, "theme toggled");
            Ok((true, vec![]))
        }
        Event::Quit => Ok((false, vec![Action::CloseFocus])),
        Event::TimerElapsed => {
            let Some(query) = state.debouncer.on_timer() else {
                return Ok((false, vec![]));
            };
            tracing::debug!(query = %query, "debounced query settled");
            Ok((true, start_search(state, &query, 1)?))
        }
        Event::ApiResponse {
            status,
            body,
            context,
        } => {
            let context = RequestContext::from_map(context)?;
            let applied = match context.kind {
                RequestKind::List => {
                    let outcome = state.engine.client().decode_list(*status, body, &context);
                    let (engine, store) = state.engine_with_storage();
                    let applied = engine.complete_search(store, context.generation, outcome);
                    if applied {
                        state.selected_index = 0;
                    }
                    applied
                }
                RequestKind::Detail => {
                    let outcome = state.engine.client().decode_detail(*status, body);
                    state.engine.complete_detail(context.generation, outcome)
                }
            };
            Ok((applied, vec![]))
        }
    }
}

/// Issues a list search and resets the grid cursor.
fn start_search(state: &mut AppState, query: &str, page: u32) -> Result<Vec<Action>> {
    let request = state.engine.search(query, page)?;
    state.selected_index = 0;
    Ok(vec![Action::WebRequest(request)])
}

fn submit(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    match (state.route, state.input_mode) {
        (Route::Results, InputMode::Search(focus)) => {
            if let SearchFocus::History(index) = focus {
                if let Some(entry) = state.engine.history().entries().get(index) {
                    state.search_query = entry.clone();
                }
            }
            state.debouncer.cancel();
            state.input_mode = InputMode::Normal;

            let query = state.search_query.clone();
            tracing::debug!(query = %query, "search submitted");
            Ok((true, start_search(state, &query, 1)?))
        }
        (Route::Results, InputMode::Normal) => {
            if state.engine.list_loading() {
                tracing::debug!("results still loading, ignoring open");
                return Ok((false, vec![]));
            }
            let Some(code) = state.selected_card().and_then(|card| card.lookup_code()) else {
                tracing::debug!("selected card has no lookup code");
                return Ok((false, vec![]));
            };
            let code = code.to_string();

            let request = state.engine.fetch_detail(&code);
            state.route = Route::Detail;
            Ok((true, vec![Action::WebRequest(request)]))
        }
        (Route::Detail, _) => Ok((false, vec![])),
    }
}

fn go_back(state: &mut AppState) -> (bool, Vec<Action>) {
    tracing::debug!("returning to results");
    state.route = Route::Results;
    (true, vec![])
}

/// The grid only takes input while it shows the results of the latest search.
fn can_use_grid(state: &AppState) -> bool {
    state.route == Route::Results && state.input_mode == InputMode::Normal && !state.engine.list_loading()
}

/// Short event label for spans; response bodies are left out.
fn event_name(event: &Event) -> String {
    match event {
        Event::ApiResponse { status, context, .. } => format!(
            "ApiResponse({status}, {})",
            context.get("kind").map_or("?", String::as_str)
        ),
        other => format!("{other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{parse_base_url, AviationStackClient, SearchCapability, DEFAULT_BASE_URL};
    use crate::app::debounce::Debouncer;
    use crate::app::history::SearchHistory;
    use crate::app::query::QueryEngine;
    use crate::app::theme_store::{ThemePreference, ThemeStore};
    use crate::storage::memory::MemoryStore;
    use crate::storage::{KeyValueStore, SEARCH_HISTORY_KEY, THEME_KEY};
    use crate::ui::theme::Palettes;
    use crate::ui::viewmodel::Body;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    const TWO_AIRPORTS: &str = r#"{
        "pagination": {"offset": 0, "limit": 9, "count": 2, "total": 2},
        "data": [
            {"airport_name": "John F Kennedy International", "iata_code": "JFK",
             "city_iata_code": "NYC", "country_name": "United States"},
            {"airport_name": "Jacksonville Municipal", "iata_code": "JKV",
             "city_iata_code": "JKV", "country_name": "United States"}
        ]
    }"#;

    fn state_with(store: MemoryStore) -> AppState {
        let base = parse_base_url(DEFAULT_BASE_URL).unwrap();
        let client = AviationStackClient::new(&base, "key", SearchCapability::Server, 100);
        let history = SearchHistory::load(Some(&store));
        let mut theme_store = ThemeStore::new();
        theme_store.initialize(Some(&store));
        AppState::new(
            Some(Box::new(store)),
            QueryEngine::new(client, history),
            theme_store,
            Palettes::default(),
            Debouncer::default(),
        )
    }

    fn only_request(actions: &[Action]) -> &crate::api::ApiRequest {
        match actions {
            [Action::WebRequest(request)] => request,
            other => panic!("expected one web request, got {other:?}"),
        }
    }

    fn respond(state: &mut AppState, request: &crate::api::ApiRequest, status: u16, body: &str) -> bool {
        let event = Event::ApiResponse {
            status,
            body: body.as_bytes().to_vec(),
            context: request.context.to_map(),
        };
        handle_event(state, &event).unwrap().0
    }

    fn type_query(state: &mut AppState, query: &str) {
        handle_event(state, &Event::FocusSearch).unwrap();
        for c in query.chars() {
            handle_event(state, &Event::Char(c)).unwrap();
        }
    }

    #[test]
    fn test_landing_search_issued_once() {
        let mut state = state_with(MemoryStore::new());

        let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        let request = only_request(&actions);
        assert!(request.url.contains("limit=9&offset=0"));
        assert!(!request.url.contains("search="));

        let (render, actions) = handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn test_submit_two_results_shows_grid_and_records_history() {
        let mut state = state_with(MemoryStore::new());
        type_query(&mut state, "JFK");

        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        let request = only_request(&actions).clone();
        assert!(request.url.contains("search=JFK"));
        assert_eq!(state.compute_viewmodel().body, Body::Loading);

        assert!(respond(&mut state, &request, 200, TWO_AIRPORTS));

        let Body::Grid(cards) = state.compute_viewmodel().body else {
            panic!("expected grid");
        };
        let names: Vec<&str> = cards.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["John F Kennedy International", "Jacksonville Municipal"]);
        assert_eq!(state.engine.history().entries(), ["JFK"]);
        assert_eq!(
            state.storage().unwrap().get(SEARCH_HISTORY_KEY).unwrap(),
            Some(r#"["JFK"]"#.to_string())
        );
    }

    #[test]
    fn test_zero_results_show_no_results_message() {
        let mut state = state_with(MemoryStore::new());
        type_query(&mut state, "XXXXXX");

        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        let request = only_request(&actions).clone();
        respond(&mut state, &request, 200, r#"{"pagination": {"total": 0}, "data": []}"#);

        match state.compute_viewmodel().body {
            Body::Empty(empty) => {
                assert_eq!(empty.message, "No results");
                assert!(empty.subtitle.contains("XXXXXX"));
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn test_api_error_degrades_to_empty_results() {
        let mut state = state_with(MemoryStore::new());
        let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        let request = only_request(&actions).clone();

        respond(
            &mut state,
            &request,
            200,
            r#"{"error": {"code": "invalid_access_key", "message": "You have not supplied a valid API Access Key."}}"#,
        );

        assert!(state.engine.results().is_empty());
        assert!(!state.engine.loading());
    }

    #[test]
    fn test_typing_debounces_to_last_value() {
        let mut state = state_with(MemoryStore::new());
        handle_event(&mut state, &Event::FocusSearch).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::Char('l')).unwrap();
        assert_eq!(actions, vec![Action::ScheduleTimer(Duration::from_millis(500))]);
        handle_event(&mut state, &Event::Char('a')).unwrap();
        handle_event(&mut state, &Event::Char('x')).unwrap();

        assert!(handle_event(&mut state, &Event::TimerElapsed).unwrap().1.is_empty());
        assert!(handle_event(&mut state, &Event::TimerElapsed).unwrap().1.is_empty());

        let (_, actions) = handle_event(&mut state, &Event::TimerElapsed).unwrap();
        assert!(only_request(&actions).url.contains("search=lax"));
    }

    #[test]
    fn test_submit_cancels_pending_debounce() {
        let mut state = state_with(MemoryStore::new());
        type_query(&mut state, "lax");

        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        assert_eq!(actions.len(), 1);

        for _ in 0..3 {
            assert!(handle_event(&mut state, &Event::TimerElapsed).unwrap().1.is_empty());
        }
    }

    #[test]
    fn test_stale_list_response_is_ignored() {
        let mut state = state_with(MemoryStore::new());
        type_query(&mut state, "j");
        let (_, first) = handle_event(&mut state, &Event::Submit).unwrap();
        let first = only_request(&first).clone();

        type_query(&mut state, "fk");
        let (_, second) = handle_event(&mut state, &Event::Submit).unwrap();
        let second = only_request(&second).clone();

        assert!(respond(&mut state, &second, 200, TWO_AIRPORTS));
        assert!(!respond(&mut state, &first, 200, r#"{"data": []}"#));

        assert_eq!(state.engine.results().len(), 2);
        assert_eq!(state.engine.history().entries(), ["jfk"]);
    }

    #[test]
    fn test_history_tab_and_enter_reruns_entry() {
        let store = MemoryStore::with_entries(&[(SEARCH_HISTORY_KEY, r#"["LAX","JFK","LHR"]"#)]);
        let mut state = state_with(store);
        handle_event(&mut state, &Event::FocusSearch).unwrap();

        handle_event(&mut state, &Event::CycleHistory).unwrap();
        handle_event(&mut state, &Event::CycleHistory).unwrap();
        assert_eq!(state.input_mode, InputMode::Search(SearchFocus::History(1)));

        let panel = state.compute_viewmodel().history_panel.unwrap();
        assert!(panel.entries[1].is_selected);

        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        assert!(only_request(&actions).url.contains("search=JFK"));
        assert_eq!(state.search_query, "JFK");
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_history_tab_wraps_back_to_typing() {
        let store = MemoryStore::with_entries(&[(SEARCH_HISTORY_KEY, r#"["LAX"]"#)]);
        let mut state = state_with(store);
        handle_event(&mut state, &Event::FocusSearch).unwrap();

        handle_event(&mut state, &Event::CycleHistory).unwrap();
        handle_event(&mut state, &Event::CycleHistory).unwrap();
        assert_eq!(state.input_mode, InputMode::Search(SearchFocus::Typing));
    }

    #[test]
    fn test_clear_history_removes_key() {
        let store = MemoryStore::with_entries(&[(SEARCH_HISTORY_KEY, r#"["LAX"]"#)]);
        let mut state = state_with(store);
        handle_event(&mut state, &Event::FocusSearch).unwrap();

        handle_event(&mut state, &Event::ClearHistory).unwrap();

        assert!(state.engine.history().is_empty());
        assert_eq!(state.storage().unwrap().get(SEARCH_HISTORY_KEY).unwrap(), None);
        assert_eq!(state.compute_viewmodel().history_panel, None);
    }

    #[test]
    fn test_theme_toggle_persists_light_then_dark() {
        let mut state = state_with(MemoryStore::new());
        assert_eq!(state.theme_store.theme(), ThemePreference::Dark);

        handle_event(&mut state, &Event::ToggleTheme).unwrap();
        assert_eq!(state.storage().unwrap().get(THEME_KEY).unwrap(), Some("light".to_string()));
        assert_eq!(state.palette().name, "light");

        handle_event(&mut state, &Event::ToggleTheme).unwrap();
        assert_eq!(state.storage().unwrap().get(THEME_KEY).unwrap(), Some("dark".to_string()));
    }

    #[test]
    fn test_theme_toggle_error_is_returned() {
        let mut store = MemoryStore::new();
        store.fail_writes();
        let mut state = state_with(store);

        assert!(handle_event(&mut state, &Event::ToggleTheme).is_err());
        assert_eq!(state.theme_store.theme(), ThemePreference::Dark);
    }

    #[test]
    fn test_open_detail_and_go_back() {
        let mut state = state_with(MemoryStore::new());
        let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        let request = only_request(&actions).clone();
        respond(&mut state, &request, 200, TWO_AIRPORTS);

        handle_event(&mut state, &Event::MoveSelection(Direction::Right)).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        let detail_request = only_request(&actions).clone();

        assert!(detail_request.url.ends_with("iata_code=JKV"));
        assert_eq!(state.route, Route::Detail);
        assert!(state.engine.detail_loading());

        respond(
            &mut state,
            &detail_request,
            200,
            r#"{"data": [{"airport_name": "Jacksonville Municipal", "iata_code": "JKV", "timezone": "America/Chicago"}]}"#,
        );
        assert!(matches!(state.compute_viewmodel().body, Body::Detail(_)));

        handle_event(&mut state, &Event::Escape).unwrap();
        assert_eq!(state.route, Route::Results);
    }

    #[test]
    fn test_grid_ignores_input_while_new_results_load() {
        let mut state = state_with(MemoryStore::new());
        let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        let request = only_request(&actions).clone();
        respond(&mut state, &request, 200, TWO_AIRPORTS);

        type_query(&mut state, "lax");
        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        let search = only_request(&actions).clone();
        assert_eq!(state.compute_viewmodel().body, Body::Loading);

        let (render, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        assert!(!render);
        assert!(actions.is_empty(), "previous page's card must not open");
        assert_eq!(state.route, Route::Results);
        assert!(!state.engine.detail_loading());

        let (render, _) = handle_event(&mut state, &Event::MoveSelection(Direction::Right)).unwrap();
        assert!(!render);
        assert_eq!(state.selected_index, 0);

        respond(
            &mut state,
            &search,
            200,
            r#"{"data": [{"airport_name": "Los Angeles International", "iata_code": "LAX"}]}"#,
        );
        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        assert!(only_request(&actions).url.ends_with("iata_code=LAX"));
        assert_eq!(state.route, Route::Detail);
    }

    #[test]
    fn test_paging_follows_bounds() {
        let mut state = state_with(MemoryStore::new());
        let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        let request = only_request(&actions).clone();
        respond(&mut state, &request, 200, r#"{"pagination": {"total": 20}, "data": [{}, {}, {}, {}, {}, {}, {}, {}, {}]}"#);

        let (_, actions) = handle_event(&mut state, &Event::PreviousPage).unwrap();
        assert!(actions.is_empty());

        let (_, actions) = handle_event(&mut state, &Event::NextPage).unwrap();
        assert!(only_request(&actions).url.contains("offset=9"));
        assert_eq!(state.engine.current_page(), 2);

        let (_, actions) = handle_event(&mut state, &Event::NextPage).unwrap();
        assert!(actions.is_empty(), "paging is blocked while a page is loading");
    }

    #[test]
    fn test_response_with_foreign_context_is_error() {
        let mut state = state_with(MemoryStore::new());
        let event = Event::ApiResponse {
            status: 200,
            body: vec![],
            context: BTreeMap::new(),
        };
        assert!(handle_event(&mut state, &event).is_err());
    }

    #[test]
    fn test_quit_closes_focus() {
        let mut state = state_with(MemoryStore::new());
        let (_, actions) = handle_event(&mut state, &Event::Quit).unwrap();
        assert_eq!(actions, vec![Action::CloseFocus]);
    }
}
