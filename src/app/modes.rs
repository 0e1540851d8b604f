//! Input focus and route state types.
//!
//! These enums decide which keybindings are active and which screen is drawn.
//!
//! # State Machine
//!
//! ```text
//!             '/'                      Tab
//!   Normal ─────────▶ Search(Typing) ─────────▶ Search(History(0)) ─▶ ...
//!     ▲                   │  Enter / Esc            │ Enter: re-run entry
//!     └───────────────────┴─────────────────────────┘
//! ```
//!
//! The route is independent of the input mode: `Results` shows the grid and
//! pagination, `Detail` shows a single airport.

/// Focus within the search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// Characters go into the query.
    Typing,

    /// A history entry is highlighted; `Enter` runs it again.
    History(usize),
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Grid navigation, paging and global commands.
    Normal,

    /// The search input is focused. While in this mode the history panel is
    /// visible whenever there is history to show.
    Search(SearchFocus),
}

impl InputMode {
    #[must_use]
    pub const fn is_search(self) -> bool {
        matches!(self, Self::Search(_))
    }
}

/// Screen currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Search bar, result grid and pagination.
    Results,

    /// A single airport's details.
    Detail,
}

/// Grid movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}
