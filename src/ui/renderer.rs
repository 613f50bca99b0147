//! Top-level rendering coordinator.
//!
//! Rendering is two steps: `AppState::compute_viewmodel` turns state into a
//! [`UIViewModel`], then the components draw it into a [`Canvas`] that is
//! written out in one piece.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::helpers::Canvas;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI to stdout.
///
/// Does not clear the screen; Zellij hands the plugin a fresh pane on every
/// render call.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    print!("{}", render_to_string(state, rows, cols));
}

/// Renders the frame for `state` without printing it.
///
/// ```
/// use zcountries::app::AppState;
/// use zcountries::storage::{FavoritesStore, MemoryStore};
/// use zcountries::ui::{renderer::render_to_string, Theme};
///
/// let state = AppState::new(FavoritesStore::new(Box::new(MemoryStore::new())), Theme::default());
/// assert!(render_to_string(&state, 24, 80).contains("Countries"));
/// ```
#[must_use]
pub fn render_to_string(state: &AppState, rows: usize, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel(rows, cols);
    render_viewmodel(&viewmodel, &state.theme, rows, cols)
}

fn render_viewmodel(vm: &UIViewModel, theme: &crate::ui::Theme, rows: usize, cols: usize) -> String {
    let mut canvas = Canvas::new();
    components::render_layout(&mut canvas, vm, theme, rows, cols);
    canvas.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{InputMode, Notice, Screen};
    use crate::domain::country::Country;
    use crate::storage::{FavoritesStore, MemoryStore};
    use crate::ui::Theme;
    use chrono::Utc;

    fn state() -> AppState {
        AppState::new(FavoritesStore::new(Box::new(MemoryStore::new())), Theme::default())
    }

    fn loaded(names: &[&str]) -> AppState {
        let mut state = state();
        let now = Utc::now();
        let request = state.catalog.reload(now);
        let countries = names.iter().map(|n| Country::named(*n)).collect();
        state.catalog.complete(request.token, Ok(countries));
        state
    }

    #[test]
    fn list_frame_has_columns_and_rows() {
        let frame = render_to_string(&loaded(&["Peru", "Chile"]), 24, 100);
        assert!(frame.contains("NAME"));
        assert!(frame.contains("POPULATION"));
        assert!(frame.contains("Peru"));
        assert!(frame.contains("Chile"));
        assert!(frame.contains("─"));
    }

    #[test]
    fn empty_catalog_shows_empty_state() {
        let frame = render_to_string(&loaded(&[]), 24, 100);
        assert!(frame.contains("No countries match"));
        assert!(!frame.contains("POPULATION"));
    }

    #[test]
    fn search_mode_draws_search_box() {
        let mut state = loaded(&["Peru"]);
        state.input_mode = InputMode::Search;
        state.search_query = "pe".to_string();
        state.refresh_suggestions();
        let frame = render_to_string(&state, 24, 100);
        assert!(frame.contains("Search: pe"));
    }

    #[test]
    fn notice_is_rendered() {
        let mut state = loaded(&["Peru"]);
        state.notice = Some(Notice::warning("Favorites are full"));
        let frame = render_to_string(&state, 24, 100);
        assert!(frame.contains("Favorites are full"));
    }

    #[test]
    fn detail_screen_shows_loading_message() {
        let mut state = state();
        state.screen = Screen::Detail;
        let _ = state.detail.open("Peru", Utc::now());
        let frame = render_to_string(&state, 24, 100);
        assert!(frame.contains("Loading Peru"));
    }

    #[test]
    fn tiny_panes_do_not_panic() {
        let state = loaded(&["Peru", "Chile", "Bolivia"]);
        for rows in 0..6 {
            for cols in 0..6 {
                let _ = render_to_string(&state, rows, cols);
            }
        }
    }
}
