//! Search bar and suggestion list renderer.

use crate::ui::helpers::{char_len, render_highlighted_text, truncate, Canvas};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{SearchBarInfo, SuggestionItem};

const SEARCH_BOX_MARGIN: usize = 2;

/// Renders the bordered search box followed by its suggestions.
///
/// Takes 3 rows for the box, one per suggestion and one more for the
/// "show all" hint when matches were cut off. Returns the next free row.
pub fn render_search_bar(canvas: &mut Canvas, row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);

    canvas.move_to(row, 1);
    canvas.spaces(SEARCH_BOX_MARGIN);
    canvas.fg(&theme.colors.search_bar_border);
    canvas.text(&format!("┌{}┐", "─".repeat(inner_width)));
    canvas.reset();

    let search_text = truncate(&format!(" Search: {}▏", search.query), inner_width);
    canvas.move_to(row + 1, 1);
    canvas.spaces(SEARCH_BOX_MARGIN);
    canvas.fg(&theme.colors.search_bar_border);
    canvas.text("│");
    canvas.fg(&theme.colors.text_normal);
    canvas.text(&search_text);
    canvas.spaces(inner_width.saturating_sub(char_len(&search_text)));
    canvas.fg(&theme.colors.search_bar_border);
    canvas.text("│");
    canvas.reset();

    canvas.move_to(row + 2, 1);
    canvas.spaces(SEARCH_BOX_MARGIN);
    canvas.fg(&theme.colors.search_bar_border);
    canvas.text(&format!("└{}┘", "─".repeat(inner_width)));
    canvas.reset();

    let mut current_row = row + 3;
    for item in &search.suggestions {
        current_row = render_suggestion(canvas, current_row, item, theme, inner_width);
    }

    if search.has_more {
        canvas.move_to(current_row, 1);
        canvas.spaces(SEARCH_BOX_MARGIN + 1);
        canvas.fg(&theme.colors.text_dim);
        canvas.text("… more matches (Tab: show all)");
        canvas.reset();
        current_row += 1;
    }

    current_row
}

fn render_suggestion(canvas: &mut Canvas, row: usize, item: &SuggestionItem, theme: &Theme, width: usize) -> usize {
    canvas.move_to(row, 1);
    canvas.spaces(SEARCH_BOX_MARGIN + 1);

    if item.is_selected {
        canvas.fg(&theme.colors.selection_fg);
        canvas.bg(&theme.colors.selection_bg);
    } else {
        canvas.fg(&theme.colors.text_normal);
    }

    let prefix = if item.flag.is_empty() {
        "   ".to_string()
    } else {
        format!("{} ", item.flag)
    };
    canvas.text(&prefix);

    let name = truncate(&item.name, width.saturating_sub(4));
    let ranges: Vec<(usize, usize)> = item.highlight.into_iter().collect();
    render_highlighted_text(canvas, &name, &ranges, theme, item.is_selected);
    canvas.spaces(width.saturating_sub(4 + char_len(&name)));
    canvas.reset();
    row + 1
}
