//! Catalog table renderer.
//!
//! Columns: favorite marker, flag, NAME, REGION and a right-aligned POPULATION.

use crate::app::state::{NAME_COLUMN_WIDTH, REGION_COLUMN_WIDTH};
use crate::ui::helpers::{char_len, render_highlighted_text, truncate, Canvas};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DisplayItem, StatusKind, StatusLine};

const POPULATION_COLUMN_WIDTH: usize = 15;
/// Marker, flag and the spaces between them.
const PREFIX_WIDTH: usize = 5;

/// Renders the status line (active filter, counts, loading or error text).
pub fn render_status(canvas: &mut Canvas, row: usize, status: &StatusLine, theme: &Theme, cols: usize) -> usize {
    canvas.move_to(row, 1);
    match status.kind {
        StatusKind::Normal => canvas.fg(&theme.colors.text_dim),
        StatusKind::Loading => {
            canvas.dim();
            canvas.fg(&theme.colors.text_dim);
        }
        StatusKind::Error => {
            canvas.bold();
            canvas.fg(&theme.colors.error_fg);
        }
    }
    let text = truncate(&format!(" {}", status.text), cols);
    canvas.text(&text);
    canvas.spaces(cols.saturating_sub(char_len(&text)));
    canvas.reset();
    row + 1
}

pub fn render_table_headers(canvas: &mut Canvas, row: usize, theme: &Theme) -> usize {
    canvas.move_to(row, 1);
    canvas.bold();
    canvas.fg(&theme.colors.header_fg);
    canvas.text(&format!(
        "{:PREFIX_WIDTH$}{:<NAME_COLUMN_WIDTH$} {:<REGION_COLUMN_WIDTH$} {:>POPULATION_COLUMN_WIDTH$}",
        "", "NAME", "REGION", "POPULATION"
    ));
    canvas.reset();
    row + 1
}

pub fn render_table_rows(canvas: &mut Canvas, row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(canvas, current_row, item, theme, cols);
    }
    current_row
}

fn render_table_row(canvas: &mut Canvas, row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    canvas.move_to(row, 1);

    let base_fg = if item.is_selected {
        canvas.bg(&theme.colors.selection_bg);
        &theme.colors.selection_fg
    } else {
        &theme.colors.text_normal
    };

    if item.is_favorite {
        canvas.fg(&theme.colors.favorite_fg);
        canvas.text(" ★ ");
    } else {
        canvas.text("   ");
    }
    canvas.fg(base_fg);
    if item.flag.is_empty() {
        canvas.text("  ");
    } else {
        canvas.text(&item.flag);
    }

    let name_width = NAME_COLUMN_WIDTH.min(cols.saturating_sub(PREFIX_WIDTH));
    render_highlighted_text(canvas, &item.name, &item.highlight_ranges, theme, item.is_selected);
    canvas.fg(base_fg);
    canvas.spaces(name_width.saturating_sub(char_len(&item.name)));

    let mut line_len = PREFIX_WIDTH + name_width;
    let rest_len = 1 + REGION_COLUMN_WIDTH + 1 + POPULATION_COLUMN_WIDTH;
    if line_len + rest_len <= cols {
        canvas.text(&format!(
            " {:<REGION_COLUMN_WIDTH$} {:>POPULATION_COLUMN_WIDTH$}",
            item.region, item.population
        ));
        line_len += rest_len;
    }

    canvas.spaces(cols.saturating_sub(line_len));
    canvas.reset();
    row + 1
}
