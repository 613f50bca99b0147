//! Country details renderer.

use crate::ui::helpers::{char_len, truncate, Canvas};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailView;

const DETAIL_INDENT: usize = 2;

/// Renders the country title followed by either its fields or a status message.
pub fn render_detail(canvas: &mut Canvas, row: usize, detail: &DetailView, theme: &Theme, cols: usize) -> usize {
    let width = cols.saturating_sub(DETAIL_INDENT);

    canvas.move_to(row, 1);
    canvas.spaces(DETAIL_INDENT);
    canvas.bold();
    canvas.fg(&theme.colors.header_fg);
    let title = if detail.flag.is_empty() {
        detail.name.clone()
    } else {
        format!("{} {}", detail.flag, detail.name)
    };
    canvas.text(&truncate(&title, width));
    canvas.reset();
    if detail.is_favorite {
        canvas.fg(&theme.colors.favorite_fg);
        canvas.text("  ★ favorite");
        canvas.reset();
    }

    let mut current_row = row + 2;

    if let Some(message) = &detail.message {
        canvas.move_to(current_row, 1);
        canvas.spaces(DETAIL_INDENT);
        if detail.message_is_error {
            canvas.fg(&theme.colors.error_fg);
        } else {
            canvas.dim();
            canvas.fg(&theme.colors.text_dim);
        }
        canvas.text(&truncate(message, width));
        canvas.reset();
        return current_row + 1;
    }

    let label_width = detail
        .fields
        .iter()
        .map(|(label, _)| char_len(label))
        .max()
        .unwrap_or(0);

    for (label, value) in &detail.fields {
        canvas.move_to(current_row, 1);
        canvas.spaces(DETAIL_INDENT);
        canvas.fg(&theme.colors.text_dim);
        canvas.text(label);
        canvas.spaces(label_width.saturating_sub(char_len(label)) + 2);
        canvas.fg(&theme.colors.text_normal);
        canvas.text(&truncate(value, width.saturating_sub(label_width + 2)));
        canvas.reset();
        current_row += 1;
    }
    current_row
}
