//! Top-level rendering coordinator.
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to the layout for the current route
//!
//! Output goes to stdout as ANSI-styled text; Zellij captures it as the pane
//! contents.

use crate::app::{AppState, Route};
use crate::ui::components;
use crate::ui::theme::Palette;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI to stdout.
///
/// # Parameters
///
/// * `state` - Current application state
/// * `rows` - Pane height in rows
/// * `cols` - Pane width in columns
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel();
    render_viewmodel(&viewmodel, state.route, state.palette(), rows, cols);
}

/// Renders a view model with the layout for `route`.
fn render_viewmodel(vm: &UIViewModel, route: Route, palette: &Palette, rows: usize, cols: usize) {
    match route {
        Route::Results => components::render_results_screen(vm, palette, cols, rows),
        Route::Detail => components::render_detail_screen(vm, palette, cols, rows),
    }
}
