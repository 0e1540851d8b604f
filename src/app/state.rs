//! Application state management and view model computation.
//!
//! [`AppState`] is the single context object of the plugin. It is built once by
//! [`initialize`](crate::initialize) and owns the storage backend, the query
//! engine, the theme store, the debouncer and all transient UI state. Nothing in
//! the crate is global; every handler receives the state explicitly.
//!
//! # State Components
//!
//! - **Storage**: optional key-value backend; `None` when no data directory is usable
//! - **Engine**: results, selected airport, paging, loading flags, history
//! - **Theme store**: light/dark preference plus the palettes to draw with
//! - **Input**: mode, route, typed query and grid selection

use super::debounce::Debouncer;
use super::history::SearchHistory;
use super::modes::{Direction, InputMode, Route, SearchFocus};
use super::query::QueryEngine;
use super::theme_store::{ThemePreference, ThemeStore};
use crate::api::AviationStackClient;
use crate::domain::airport::{non_empty_or_na, AirportDetail, AirportSummary};
use crate::storage::KeyValueStore;
use crate::ui::theme::{Palette, Palettes};
use crate::ui::viewmodel::{
    Body, CardItem, DetailView, EmptyState, FooterInfo, HeaderInfo, HistoryItem, HistoryPanel,
    PaginationInfo, SearchBarInfo, UIViewModel,
};

/// Number of cards per grid row.
pub const GRID_COLUMNS: usize = 3;

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    storage: Option<Box<dyn KeyValueStore>>,

    /// Airport queries and their results.
    pub engine: QueryEngine,

    /// Light/dark preference.
    pub theme_store: ThemeStore,

    palettes: Palettes,

    /// Idle timer bookkeeping for search-as-you-type.
    pub debouncer: Debouncer,

    /// Which keybindings are active.
    pub input_mode: InputMode,

    /// Which screen is drawn.
    pub route: Route,

    /// Text currently in the search input.
    ///
    /// Differs from `engine.current_search()` while the user is typing; the
    /// engine keeps the query of the last issued request.
    pub search_query: String,

    /// Zero-based index of the selected card within the current page.
    pub selected_index: usize,

    /// Whether the landing search has been issued.
    pub started: bool,
}

/// Placeholder state for before the configuration is known.
///
/// Has no storage backend and reads nothing from disk; history and theme stay
/// unloaded until [`initialize`](crate::initialize) builds the real state.
impl Default for AppState {
    fn default() -> Self {
        let config = crate::Config::default();
        let client = AviationStackClient::new(
            &config.base_url,
            &config.api_key,
            config.search_mode,
            config.client_window,
        );
        Self::new(
            None,
            QueryEngine::new(client, SearchHistory::default()),
            ThemeStore::new(),
            Palettes::default(),
            Debouncer::new(config.debounce),
        )
    }
}

impl AppState {
    /// Assembles the state from already-initialized parts.
    #[must_use]
    pub fn new(
        storage: Option<Box<dyn KeyValueStore>>,
        engine: QueryEngine,
        theme_store: ThemeStore,
        palettes: Palettes,
        debouncer: Debouncer,
    ) -> Self {
        Self {
            storage,
            engine,
            theme_store,
            palettes,
            debouncer,
            input_mode: InputMode::Normal,
            route: Route::Results,
            search_query: String::new(),
            selected_index: 0,
            started: false,
        }
    }

    /// Read access to the storage backend, if there is one.
    #[must_use]
    pub fn storage(&self) -> Option<&dyn KeyValueStore> {
        match &self.storage {
            Some(store) => Some(&**store),
            None => None,
        }
    }

    /// Splits the state into the storage backend and the query engine so both can
    /// be borrowed mutably at once.
    pub fn engine_with_storage(&mut self) -> (&mut QueryEngine, Option<&mut dyn KeyValueStore>) {
        let store: Option<&mut dyn KeyValueStore> = match &mut self.storage {
            Some(store) => Some(&mut **store),
            None => None,
        };
        (&mut self.engine, store)
    }

    /// Splits the state into the storage backend and the theme store.
    pub fn theme_with_storage(&mut self) -> (&mut ThemeStore, Option<&mut dyn KeyValueStore>) {
        let store: Option<&mut dyn KeyValueStore> = match &mut self.storage {
            Some(store) => Some(&mut **store),
            None => None,
        };
        (&mut self.theme_store, store)
    }

    /// Palette for the current theme preference.
    #[must_use]
    pub fn palette(&self) -> &Palette {
        self.palettes.for_preference(self.theme_store.theme())
    }

    /// Card currently under the grid cursor.
    #[must_use]
    pub fn selected_card(&self) -> Option<&AirportSummary> {
        self.engine.results().get(self.selected_index)
    }

    /// Moves the grid cursor one cell, staying inside the populated cells.
    pub fn move_selection(&mut self, direction: Direction) {
        let count = self.engine.results().len();
        if count == 0 {
            self.selected_index = 0;
            return;
        }

        let index = self.selected_index.min(count - 1);
        let column = index % GRID_COLUMNS;

        self.selected_index = match direction {
            Direction::Up if index >= GRID_COLUMNS => index - GRID_COLUMNS,
            Direction::Down if index + GRID_COLUMNS < count => index + GRID_COLUMNS,
            Direction::Left if column > 0 => index - 1,
            Direction::Right if column + 1 < GRID_COLUMNS && index + 1 < count => index + 1,
            _ => index,
        };

        tracing::trace!(?direction, selected = self.selected_index, "grid selection moved");
    }

    /// Computes a renderable UI view model from current state.
    ///
    /// # Body Selection
    ///
    /// Loading is checked first, then emptiness:
    ///
    /// 1. **Results route**: `Loading` while the list is loading, `Empty("No
    ///    results")` after a search that returned nothing, otherwise `Grid`
    /// 2. **Detail route**: `Loading` while the detail is loading, `Empty("Airport
    ///    not found")` when there is no selected airport, otherwise `Detail`
    #[must_use]
    pub fn compute_viewmodel(&self) -> UIViewModel {
        let on_results = self.route == Route::Results;

        UIViewModel {
            header: self.compute_header(),
            footer: self.compute_footer(),
            search_bar: on_results.then(|| self.compute_search_bar()),
            history_panel: if on_results { self.compute_history_panel() } else { None },
            body: match self.route {
                Route::Results => self.compute_results_body(),
                Route::Detail => self.compute_detail_body(),
            },
            pagination: on_results.then(|| PaginationInfo {
                page: self.engine.current_page(),
                has_previous: self.engine.has_previous_page(),
                has_next: self.engine.has_next_page(),
            }),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let theme_label = match self.theme_store.theme() {
            ThemePreference::Dark => "☾ dark",
            ThemePreference::Light => "☀ light",
        };
        HeaderInfo {
            title: "SkyConnect Explorer".to_string(),
            theme_label: theme_label.to_string(),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.route, self.input_mode) {
            (Route::Detail, _) => "Esc/Backspace: back  t: theme  q: quit",
            (Route::Results, InputMode::Search(SearchFocus::Typing)) => {
                if self.engine.history().is_empty() {
                    "Type to search  Enter: search  Esc: done"
                } else {
                    "Type to search  Enter: search  Tab: history  Ctrl+x: clear history  Esc: done"
                }
            }
            (Route::Results, InputMode::Search(SearchFocus::History(_))) => {
                "Tab: next  Enter: search again  Ctrl+x: clear history  Esc: done"
            }
            (Route::Results, InputMode::Normal) => {
                "/: search  arrows/hjkl: move  Enter: details  [ ]: page  t: theme  q: quit"
            }
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_search_bar(&self) -> SearchBarInfo {
        SearchBarInfo {
            query: self.search_query.clone(),
            focused: self.input_mode.is_search(),
        }
    }

    fn compute_history_panel(&self) -> Option<HistoryPanel> {
        let InputMode::Search(focus) = self.input_mode else {
            return None;
        };
        let history = self.engine.history();
        if history.is_empty() {
            return None;
        }

        let highlighted = match focus {
            SearchFocus::History(index) => Some(index),
            SearchFocus::Typing => None,
        };

        Some(HistoryPanel {
            entries: history
                .entries()
                .iter()
                .enumerate()
                .map(|(index, query)| HistoryItem {
                    query: query.clone(),
                    is_selected: highlighted == Some(index),
                })
                .collect(),
        })
    }

    fn compute_results_body(&self) -> Body {
        if self.engine.list_loading() {
            return Body::Loading;
        }

        let results = self.engine.results();
        if results.is_empty() {
            return Body::Empty(if self.engine.has_searched() {
                let searched = self.engine.current_search().trim();
                EmptyState {
                    message: "No results".to_string(),
                    subtitle: if searched.is_empty() {
                        "No airports are available right now".to_string()
                    } else {
                        format!("No airports match \"{searched}\"")
                    },
                }
            } else {
                EmptyState {
                    message: "Welcome to SkyConnect".to_string(),
                    subtitle: "Press / and type an airport name, city or code".to_string(),
                }
            });
        }

        let cursor_visible = self.input_mode == InputMode::Normal;
        Body::Grid(
            results
                .iter()
                .enumerate()
                .map(|(index, airport)| CardItem {
                    name: non_empty_or_na(&airport.airport_name).to_string(),
                    location: airport.location_line(),
                    code: non_empty_or_na(&airport.iata_code).to_string(),
                    is_selected: cursor_visible && index == self.selected_index,
                })
                .collect(),
        )
    }

    fn compute_detail_body(&self) -> Body {
        if self.engine.detail_loading() {
            return Body::Loading;
        }

        self.engine.selected_airport().map_or_else(
            || {
                Body::Empty(EmptyState {
                    message: "Airport not found".to_string(),
                    subtitle: "Press Esc to return to the results".to_string(),
                })
            },
            |detail| Body::Detail(Self::compute_detail_view(detail)),
        )
    }

    fn compute_detail_view(detail: &AirportDetail) -> DetailView {
        fn field(label: &str, value: &str) -> (String, String) {
            (label.to_string(), non_empty_or_na(value).to_string())
        }

        let summary = &detail.summary;

        let fields = vec![
            field("IATA", &summary.iata_code),
            field("ICAO", &summary.icao_code),
            field("City", &summary.city_iata_code),
            field("Country", &summary.country_name),
            field("Country code", &summary.country_iso2),
            field("Timezone", &detail.timezone),
            ("GMT offset".to_string(), detail.utc_offset_label()),
            field("Phone", detail.phone_number.as_deref().unwrap_or_default()),
            field("Geoname ID", &detail.geoname_id),
            ("Latitude".to_string(), summary.latitude.to_string()),
            ("Longitude".to_string(), summary.longitude.to_string()),
        ];

        let position = summary.latitude.value().zip(summary.longitude.value());

        DetailView {
            name: non_empty_or_na(&summary.airport_name).to_string(),
            fields,
            position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{parse_base_url, AirportPage, AviationStackClient, SearchCapability, DEFAULT_BASE_URL};
    use crate::app::history::SearchHistory;
    use crate::domain::airport::Coordinate;
    use crate::storage::memory::MemoryStore;
    use pretty_assertions::assert_eq;

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

    fn airport(name: &str, iata: &str) -> AirportSummary {
        AirportSummary {
            airport_name: name.to_string(),
            iata_code: iata.to_string(),
            ..AirportSummary::default()
        }
    }

    fn load_results(state: &mut AppState, airports: Vec<AirportSummary>) {
        let request = state.engine.search("", 1).unwrap();
        let page = AirportPage {
            airports,
            ..AirportPage::default()
        };
        state.engine.complete_search(None, request.generation(), Ok(page));
    }

    #[test]
    fn test_history_panel_lists_seeded_entries_in_order() {
        let store = MemoryStore::with_entries(&[("searchHistory", r#"["LAX","JFK","LHR"]"#)]);
        let mut state = state_with(store);

        assert_eq!(state.compute_viewmodel().history_panel, None);

        state.input_mode = InputMode::Search(SearchFocus::Typing);
        let panel = state.compute_viewmodel().history_panel.unwrap();
        let queries: Vec<&str> = panel.entries.iter().map(|e| e.query.as_str()).collect();

        assert_eq!(queries, ["LAX", "JFK", "LHR"]);
        assert!(panel.entries.iter().all(|e| !e.is_selected));
    }

    #[test]
    fn test_history_panel_hidden_when_history_empty() {
        let mut state = state_with(MemoryStore::new());
        state.input_mode = InputMode::Search(SearchFocus::Typing);
        assert_eq!(state.compute_viewmodel().history_panel, None);
    }

    #[test]
    fn test_loading_body_takes_precedence() {
        let mut state = state_with(MemoryStore::new());
        state.engine.search("JFK", 1).unwrap();
        assert_eq!(state.compute_viewmodel().body, Body::Loading);
    }

    #[test]
    fn test_grid_cards_and_selection() {
        let mut state = state_with(MemoryStore::new());
        load_results(&mut state, vec![airport("John F Kennedy", "JFK"), airport("", "")]);

        let Body::Grid(cards) = state.compute_viewmodel().body else {
            panic!("expected grid");
        };

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].code, "JFK");
        assert!(cards[0].is_selected);
        assert_eq!(cards[1].name, "N/A");
        assert_eq!(cards[1].location, "N/A, N/A");
    }

    #[test]
    fn test_empty_result_shows_no_results() {
        let mut state = state_with(MemoryStore::new());
        load_results(&mut state, vec![]);

        match state.compute_viewmodel().body {
            Body::Empty(empty) => assert_eq!(empty.message, "No results"),
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn test_grid_navigation_stays_in_bounds() {
        let mut state = state_with(MemoryStore::new());
        load_results(&mut state, (0..5).map(|i| airport(&format!("A{i}"), "AAA")).collect());

        state.move_selection(Direction::Right);
        state.move_selection(Direction::Right);
        state.move_selection(Direction::Right);
        assert_eq!(state.selected_index, 2);

        state.move_selection(Direction::Down);
        assert_eq!(state.selected_index, 2);

        state.move_selection(Direction::Left);
        state.move_selection(Direction::Down);
        assert_eq!(state.selected_index, 4);

        state.move_selection(Direction::Up);
        state.move_selection(Direction::Up);
        assert_eq!(state.selected_index, 1);
    }

    #[test]
    fn test_detail_view_fields_and_position() {
        let mut state = state_with(MemoryStore::new());
        state.route = Route::Detail;

        let request = state.engine.fetch_detail("JFK");
        assert_eq!(state.compute_viewmodel().body, Body::Loading);

        let detail = AirportDetail {
            summary: AirportSummary {
                airport_name: "John F Kennedy".to_string(),
                iata_code: "JFK".to_string(),
                latitude: Coordinate::from_text("40.6413"),
                longitude: Coordinate::from_text("-73.7781"),
                ..AirportSummary::default()
            },
            gmt: "-5".to_string(),
            ..AirportDetail::default()
        };
        state.engine.complete_detail(request.generation(), Ok(Some(detail)));

        let vm = state.compute_viewmodel();
        assert_eq!(vm.search_bar, None);
        assert_eq!(vm.pagination, None);

        let Body::Detail(view) = vm.body else {
            panic!("expected detail");
        };
        assert_eq!(view.name, "John F Kennedy");
        assert!(view.fields.contains(&("GMT offset".to_string(), "UTC-5".to_string())));
        assert!(view.fields.contains(&("Phone".to_string(), "N/A".to_string())));
        assert_eq!(view.position, Some((40.6413, -73.7781)));
    }

    #[test]
    fn test_missing_detail_shows_not_found() {
        let mut state = state_with(MemoryStore::new());
        state.route = Route::Detail;

        let request = state.engine.fetch_detail("XXX");
        state.engine.complete_detail(request.generation(), Ok(None));

        match state.compute_viewmodel().body {
            Body::Empty(empty) => assert_eq!(empty.message, "Airport not found"),
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn test_header_shows_theme_label() {
        let store = MemoryStore::with_entries(&[("theme", "light")]);
        let state = state_with(store);
        assert_eq!(state.compute_viewmodel().header.theme_label, "☀ light");
    }

    #[test]
    fn test_default_state_is_detached_from_storage() {
        let state = AppState::default();
        assert!(state.storage().is_none());
        assert!(state.engine.history().entries().is_empty());
        assert!(!state.theme_store.is_initialized());
        assert!(!state.started);
    }
}
