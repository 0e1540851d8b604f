//! User interface rendering layer with component-based architecture.
//!
//! This module turns view models into ANSI-styled output through composable
//! rendering components, drawing with the palette of the current theme.
//!
//! # Architecture
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Cursor positioning and text fitting
//! - [`theme`]: Colour palettes and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::{Palette, Palettes};
pub use viewmodel::{
    Body, CardItem, DetailView, EmptyState, FooterInfo, HeaderInfo, HistoryItem, HistoryPanel,
    PaginationInfo, SearchBarInfo, UIViewModel,
};
