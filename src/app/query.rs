//! Airport query engine.
//!
//! Owns everything the result and detail views read: the current page of
//! airports, the selected airport, paging position, loading flags and the search
//! history. Requests are issued synchronously as [`ApiRequest`] values and
//! completed later when the host delivers the response.
//!
//! # Generations
//!
//! Each workflow (list, detail) stamps its requests with a monotonically
//! increasing generation tag. A completion is applied only if it carries the
//! latest tag of its workflow, so a slow response can never overwrite the result
//! of a newer query:
//!
//! ```text
//! search("jf")  → gen 1 ──────────────────────────┐
//! search("jfk") → gen 2 ───────┐                  │
//!                              ▼                  ▼
//!                     complete(2): applied   complete(1): discarded
//! ```

use crate::api::{AirportPage, ApiRequest, AviationStackClient, ListAirportsParams};
use crate::app::history::SearchHistory;
use crate::domain::airport::{AirportDetail, AirportSummary};
use crate::domain::error::{Result, SkyConnectError};
use crate::storage::KeyValueStore;

/// Number of airports on one page (a 3×3 grid).
pub const PAGE_SIZE: u32 = 9;

/// Row offset of a 1-based page number.
#[must_use]
pub const fn page_offset(page: u32) -> u32 {
    page.saturating_sub(1).saturating_mul(PAGE_SIZE)
}

#[derive(Debug)]
pub struct QueryEngine {
    client: AviationStackClient,
    history: SearchHistory,

    results: Vec<AirportSummary>,
    selected_airport: Option<AirportDetail>,
    current_page: u32,
    current_search: String,
    total_hint: Option<u32>,

    list_loading: bool,
    detail_loading: bool,
    list_generation: u64,
    detail_generation: u64,

    /// Whether any list request has completed since startup.
    searched: bool,
}

impl QueryEngine {
    /// Creates an engine with an already-loaded history.
    #[must_use]
    pub fn new(client: AviationStackClient, history: SearchHistory) -> Self {
        Self {
            client,
            history,
            results: Vec::new(),
            selected_airport: None,
            current_page: 1,
            current_search: String::new(),
            total_hint: None,
            list_loading: false,
            detail_loading: false,
            list_generation: 0,
            detail_generation: 0,
            searched: false,
        }
    }

    /// Starts a list query for `query` at 1-based `page`.
    ///
    /// Marks the list as loading and records the page and query immediately. The
    /// returned request must be sent by the host and its response passed to
    /// [`complete_search`](Self::complete_search).
    ///
    /// # Errors
    ///
    /// Returns [`SkyConnectError::InvalidPage`] for page `0`; no state changes.
    pub fn search(&mut self, query: &str, page: u32) -> Result<ApiRequest> {
        if page == 0 {
            return Err(SkyConnectError::InvalidPage(page));
        }

        self.list_generation += 1;
        self.list_loading = true;
        self.current_page = page;
        self.current_search = query.to_string();

        let params = ListAirportsParams::new(query, PAGE_SIZE, page_offset(page));
        let request = self.client.list_request(&params, self.list_generation);

        tracing::debug!(
            query = %query,
            page,
            offset = params.offset,
            generation = self.list_generation,
            "search issued"
        );
        Ok(request)
    }

    /// Applies the outcome of the list request tagged `generation`.
    ///
    /// Returns `false` if the tag is stale and the outcome was discarded.
    pub fn complete_search(
        &mut self,
        store: Option<&mut dyn KeyValueStore>,
        generation: u64,
        outcome: Result<AirportPage>,
    ) -> bool {
        if generation != self.list_generation {
            tracing::debug!(
                generation,
                latest = self.list_generation,
                "discarding stale search response"
            );
            return false;
        }

        match outcome {
            Ok(page) => {
                tracing::debug!(
                    count = page.airports.len(),
                    total = page.pagination.total,
                    "search resolved"
                );
                self.results = page.airports;
                self.total_hint = (page.pagination.total > 0).then_some(page.pagination.total);

                let query = self.current_search.trim();
                if !query.is_empty() {
                    if let Err(e) = self.history.add(store, query) {
                        tracing::warn!(error = %e, "failed to record search history");
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, query = %self.current_search, "search failed");
                self.results.clear();
                self.total_hint = None;
            }
        }

        self.searched = true;
        self.list_loading = false;
        true
    }

    /// Starts a detail lookup for the airport with IATA code `identifier`.
    pub fn fetch_detail(&mut self, identifier: &str) -> ApiRequest {
        self.detail_generation += 1;
        self.detail_loading = true;

        tracing::debug!(
            identifier = %identifier,
            generation = self.detail_generation,
            "detail issued"
        );
        self.client.detail_request(identifier, self.detail_generation)
    }

    /// Applies the outcome of the detail request tagged `generation`.
    ///
    /// Returns `false` if the tag is stale and the outcome was discarded.
    pub fn complete_detail(&mut self, generation: u64, outcome: Result<Option<AirportDetail>>) -> bool {
        if generation != self.detail_generation {
            tracing::debug!(
                generation,
                latest = self.detail_generation,
                "discarding stale detail response"
            );
            return false;
        }

        self.selected_airport = match outcome {
            Ok(Some(detail)) => Some(detail),
            Ok(None) => {
                tracing::debug!("airport not found");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "detail lookup failed");
                None
            }
        };
        self.detail_loading = false;
        true
    }

    /// Empties the search history.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the persisted key cannot be removed.
    pub fn clear_history(&mut self, store: Option<&mut dyn KeyValueStore>) -> Result<()> {
        self.history.clear(store)
    }

    #[must_use]
    pub const fn client(&self) -> &AviationStackClient {
        &self.client
    }

    #[must_use]
    pub fn results(&self) -> &[AirportSummary] {
        &self.results
    }

    /// `true` while any request is in flight.
    #[must_use]
    pub const fn loading(&self) -> bool {
        self.list_loading || self.detail_loading
    }

    #[must_use]
    pub const fn list_loading(&self) -> bool {
        self.list_loading
    }

    #[must_use]
    pub const fn detail_loading(&self) -> bool {
        self.detail_loading
    }

    #[must_use]
    pub const fn selected_airport(&self) -> Option<&AirportDetail> {
        self.selected_airport.as_ref()
    }

    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    #[must_use]
    pub fn current_search(&self) -> &str {
        &self.current_search
    }

    #[must_use]
    pub const fn history(&self) -> &SearchHistory {
        &self.history
    }

    /// Total matching rows reported by the last successful search, if known.
    #[must_use]
    pub const fn total_hint(&self) -> Option<u32> {
        self.total_hint
    }

    /// Whether a list request has completed since startup.
    #[must_use]
    pub const fn has_searched(&self) -> bool {
        self.searched
    }

    /// Whether a page after the current one may exist.
    ///
    /// Uses the reported total when there is one; otherwise a full page is taken
    /// to mean more rows may follow.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        match self.total_hint {
            Some(total) => u64::from(self.current_page) * u64::from(PAGE_SIZE) < u64::from(total),
            None => self.results.len() >= PAGE_SIZE as usize,
        }
    }

    #[must_use]
    pub const fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{parse_base_url, Pagination, RequestKind, SearchCapability, DEFAULT_BASE_URL};
    use crate::storage::memory::MemoryStore;
    use crate::storage::SEARCH_HISTORY_KEY;
    use pretty_assertions::assert_eq;

    fn engine() -> QueryEngine {
        let base = parse_base_url(DEFAULT_BASE_URL).unwrap();
        let client = AviationStackClient::new(&base, "key", SearchCapability::Server, 100);
        QueryEngine::new(client, SearchHistory::default())
    }

    fn airport(name: &str) -> AirportSummary {
        AirportSummary {
            airport_name: name.to_string(),
            ..AirportSummary::default()
        }
    }

    fn page_of(names: &[&str], total: u32) -> AirportPage {
        AirportPage {
            airports: names.iter().map(|n| airport(n)).collect(),
            pagination: Pagination {
                total,
                ..Pagination::default()
            },
        }
    }

    #[test]
    fn test_page_offset() {
        for page in 1..=50 {
            assert_eq!(page_offset(page), (page - 1) * 9);
        }
    }

    #[test]
    fn test_search_requests_page_offset_and_limit() {
        let mut engine = engine();

        for page in [1_u32, 2, 7] {
            let request = engine.search("JFK", page).unwrap();
            assert!(request
                .url
                .contains(&format!("limit=9&offset={}", (page - 1) * 9)));
            assert_eq!(request.kind(), RequestKind::List);
        }
    }

    #[test]
    fn test_search_rejects_page_zero() {
        let mut engine = engine();
        assert!(matches!(engine.search("JFK", 0), Err(SkyConnectError::InvalidPage(0))));
        assert!(!engine.loading());
        assert_eq!(engine.current_page(), 1);
    }

    #[test]
    fn test_loading_spans_issue_to_resolution() {
        let mut engine = engine();
        assert!(!engine.loading());

        let request = engine.search("JFK", 2).unwrap();
        assert!(engine.loading());
        assert!(engine.list_loading());
        assert_eq!(engine.current_page(), 2);
        assert_eq!(engine.current_search(), "JFK");

        engine.complete_search(None, request.generation(), Ok(page_of(&["A"], 1)));
        assert!(!engine.loading());

        let request = engine.fetch_detail("JFK");
        assert!(engine.loading());
        assert!(engine.detail_loading());
        assert!(!engine.list_loading());

        engine.complete_detail(request.generation(), Err(SkyConnectError::Decode("x".into())));
        assert!(!engine.loading());
    }

    #[test]
    fn test_successful_search_records_trimmed_query() {
        let mut store = MemoryStore::new();
        let mut engine = engine();

        let request = engine.search("  JFK ", 1).unwrap();
        engine.complete_search(Some(&mut store), request.generation(), Ok(page_of(&["A", "B"], 2)));

        assert_eq!(engine.history().entries()[0], "JFK");
        assert_eq!(store.raw(SEARCH_HISTORY_KEY), Some(r#"["JFK"]"#));
        assert_eq!(engine.results().len(), 2);
    }

    #[test]
    fn test_blank_search_leaves_history_alone() {
        let mut store = MemoryStore::new();
        let mut engine = engine();

        for query in ["", "   "] {
            let request = engine.search(query, 1).unwrap();
            engine.complete_search(Some(&mut store), request.generation(), Ok(page_of(&["A"], 1)));
        }

        assert!(engine.history().is_empty());
        assert_eq!(store.raw(SEARCH_HISTORY_KEY), None);
    }

    #[test]
    fn test_failure_yields_empty_results() {
        let mut engine = engine();

        let request = engine.search("JFK", 1).unwrap();
        engine.complete_search(None, request.generation(), Ok(page_of(&["A"], 20)));

        let request = engine.search("JFK", 2).unwrap();
        engine.complete_search(
            None,
            request.generation(),
            Err(SkyConnectError::Api {
                status: 500,
                message: "boom".into(),
            }),
        );

        assert!(engine.results().is_empty());
        assert_eq!(engine.total_hint(), None);
        assert!(!engine.loading());
        assert_eq!(engine.history().entries(), ["JFK"]);
    }

    #[test]
    fn test_stale_search_response_is_discarded() {
        let mut engine = engine();

        let first = engine.search("jf", 1).unwrap();
        let second = engine.search("jfk", 1).unwrap();

        assert!(engine.complete_search(None, second.generation(), Ok(page_of(&["Kennedy"], 1))));
        assert!(!engine.complete_search(None, first.generation(), Ok(page_of(&["Other", "Rows"], 2))));

        assert_eq!(engine.results()[0].airport_name, "Kennedy");
        assert_eq!(engine.results().len(), 1);
    }

    #[test]
    fn test_stale_completion_keeps_loading_until_latest() {
        let mut engine = engine();

        let first = engine.search("a", 1).unwrap();
        let _second = engine.search("ab", 1).unwrap();

        engine.complete_search(None, first.generation(), Ok(page_of(&["A"], 1)));
        assert!(engine.list_loading());
    }

    #[test]
    fn test_detail_not_found_and_stale() {
        let mut engine = engine();

        let first = engine.fetch_detail("JFK");
        let second = engine.fetch_detail("XXX");

        assert!(engine.complete_detail(second.generation(), Ok(None)));
        assert!(!engine.complete_detail(
            first.generation(),
            Ok(Some(AirportDetail::default()))
        ));
        assert_eq!(engine.selected_airport(), None);
    }

    #[test]
    fn test_paging_bounds() {
        let mut engine = engine();

        let request = engine.search("", 1).unwrap();
        engine.complete_search(None, request.generation(), Ok(page_of(&["A"; 9], 12)));
        assert!(!engine.has_previous_page());
        assert!(engine.has_next_page());

        let request = engine.search("", 2).unwrap();
        engine.complete_search(None, request.generation(), Ok(page_of(&["A"; 3], 12)));
        assert!(engine.has_previous_page());
        assert!(!engine.has_next_page());
    }

    #[test]
    fn test_next_page_without_total_uses_page_fill() {
        let mut engine = engine();

        let request = engine.search("", 1).unwrap();
        engine.complete_search(None, request.generation(), Ok(page_of(&["A"; 9], 0)));
        assert!(engine.has_next_page());

        let request = engine.search("", 2).unwrap();
        engine.complete_search(None, request.generation(), Ok(page_of(&["A"; 4], 0)));
        assert!(!engine.has_next_page());
    }
}
