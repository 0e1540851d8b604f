//! View model types representing renderable UI state.
//!
//! View models are computed from `AppState` by `compute_viewmodel` and consumed
//! by the renderer. They hold display-ready strings and flags only; every
//! decision about what to show (loading, empty, not found, which card is
//! selected) has already been made.
//!
//! # Layout
//!
//! ```text
//! ┌ header ─────────────────────────────────────┐
//! │ search bar         (results route only)     │
//! │ history panel      (search focused + any)   │
//! │ body: Loading | Empty | Grid | Detail       │
//! │ pagination         (results route only)     │
//! └ footer ─────────────────────────────────────┘
//! ```

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub footer: FooterInfo,

    /// Search input; absent on the detail route.
    pub search_bar: Option<SearchBarInfo>,

    /// Recent searches; present only while the search input is focused and the
    /// history is non-empty.
    pub history_panel: Option<HistoryPanel>,

    pub body: Body,

    /// Page controls; absent on the detail route.
    pub pagination: Option<PaginationInfo>,
}

/// Main content area.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// A request for this screen is in flight.
    Loading,
    /// Nothing to show, with an explanation.
    Empty(EmptyState),
    /// Up to nine airport cards, row-major.
    Grid(Vec<CardItem>),
    /// One airport.
    Detail(DetailView),
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// Current theme with its glyph, e.g. `☾ dark`.
    pub theme_label: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text for the current mode.
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No results").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Current query text.
    pub query: String,
    /// Whether the input has keyboard focus (draws the cursor).
    pub focused: bool,
}

impl SearchBarInfo {
    /// Hint shown while the query is empty.
    pub const PLACEHOLDER: &'static str = "Search airports...";
}

/// Recent-search dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryPanel {
    pub entries: Vec<HistoryItem>,
}

/// One line of the history panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    pub query: String,
    pub is_selected: bool,
}

/// One card of the results grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardItem {
    pub name: String,
    /// `city, country`, with `N/A` for missing parts.
    pub location: String,
    /// IATA code, or `N/A`.
    pub code: String,
    pub is_selected: bool,
}

/// Detail screen content.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub name: String,
    /// Labelled facts in display order.
    pub fields: Vec<(String, String)>,
    /// Decimal degrees for the map marker, when both coordinates are known.
    pub position: Option<(f64, f64)>,
}

/// Pagination control state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationInfo {
    pub page: u32,
    pub has_previous: bool,
    pub has_next: bool,
}
