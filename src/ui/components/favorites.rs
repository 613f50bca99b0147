//! Favorites panel renderer.

use crate::ui::helpers::{char_len, truncate, Canvas};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FavoritesPanel;

/// Rows the panel occupies: separator, title, one per name.
#[must_use]
pub fn favorites_height(panel: &FavoritesPanel) -> usize {
    panel.names.len() + 2
}

/// Renders a blank separator, the `Favorites (n/5)` title and the names.
pub fn render_favorites(canvas: &mut Canvas, row: usize, panel: &FavoritesPanel, theme: &Theme, cols: usize) -> usize {
    canvas.move_to(row + 1, 1);
    canvas.bold();
    canvas.fg(&theme.colors.favorite_fg);
    canvas.text(&format!(" ★ Favorites ({}/{})", panel.names.len(), panel.capacity));
    canvas.reset();

    let width = cols.saturating_sub(3);
    let mut current_row = row + 2;
    for (i, name) in panel.names.iter().enumerate() {
        canvas.move_to(current_row, 1);
        canvas.spaces(3);
        if panel.selected == Some(i) {
            canvas.fg(&theme.colors.selection_fg);
            canvas.bg(&theme.colors.selection_bg);
        } else {
            canvas.fg(&theme.colors.text_normal);
        }
        let name = truncate(name, width);
        canvas.text(&name);
        if panel.selected == Some(i) {
            canvas.spaces(width.saturating_sub(char_len(&name)));
        }
        canvas.reset();
        current_row += 1;
    }
    current_row
}
