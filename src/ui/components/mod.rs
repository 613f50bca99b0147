//! Composable UI component renderers.
//!
//! Each component draws one part of the screen into a [`Canvas`] starting at
//! a given row and returns the next free row.
//!
//! # Components
//!
//! - [`header`]: Title bar
//! - [`footer`]: Keybinding hints and the notice line
//! - [`search`]: Search box and suggestions
//! - [`table`]: Status line and the country list (FLAG, NAME, REGION, POPULATION)
//! - [`picker`]: Region and language pickers
//! - [`detail`]: A single country's attributes
//! - [`favorites`]: Bookmarked countries
//! - [`empty`]: Empty state message
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Body: list, picker or details]
//! [Favorites panel]
//! [Notice]
//! [Border]
//! [Footer]
//! ```
//!
//! The favorites panel and notice are anchored to the bottom border so the
//! body can use whatever is left.

mod detail;
mod empty;
mod favorites;
mod footer;
mod header;
mod picker;
mod search;
mod table;

use crate::ui::helpers::Canvas;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Body, ListView, UIViewModel};

/// Renders a horizontal border line at `row`.
fn render_border(canvas: &mut Canvas, row: usize, color: &str, cols: usize) -> usize {
    canvas.move_to(row, 1);
    canvas.fg(color);
    canvas.text(&"─".repeat(cols));
    canvas.reset();
    row + 1
}

/// Renders the full frame for `vm` into `canvas`.
pub fn render_layout(canvas: &mut Canvas, vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut current_row = 2;
    current_row = header::render_header(canvas, current_row, &vm.header, theme, cols);
    current_row = render_border(canvas, current_row, &theme.colors.border, cols);

    match &vm.body {
        Body::List(list) => {
            render_list(canvas, current_row, list, theme, cols);
        }
        Body::Picker(view) => {
            picker::render_picker(canvas, current_row, view, theme, cols);
        }
        Body::Detail(view) => {
            detail::render_detail(canvas, current_row + 1, view, theme, cols);
        }
    }

    let footer_row = rows.saturating_sub(1);
    let border_row = footer_row.saturating_sub(1);
    let mut bottom_row = border_row;

    if let Some(notice) = &vm.notice {
        bottom_row = bottom_row.saturating_sub(1);
        footer::render_notice(canvas, bottom_row, notice, theme, cols);
    }
    if let Some(panel) = &vm.favorites {
        let panel_row = bottom_row.saturating_sub(favorites::favorites_height(panel));
        favorites::render_favorites(canvas, panel_row, panel, theme, cols);
    }

    render_border(canvas, border_row, &theme.colors.border, cols);
    footer::render_footer(canvas, footer_row, &vm.footer, theme, cols);
}

fn render_list(canvas: &mut Canvas, row: usize, list: &ListView, theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    if let Some(search) = &list.search_bar {
        current_row = search::render_search_bar(canvas, current_row, search, theme, cols);
    }
    current_row = table::render_status(canvas, current_row, &list.status, theme, cols);

    if let Some(empty) = &list.empty_state {
        return empty::render_empty_state(canvas, current_row + 1, empty, theme, cols);
    }

    current_row = table::render_table_headers(canvas, current_row, theme);
    table::render_table_rows(canvas, current_row, &list.display_items, theme, cols)
}
