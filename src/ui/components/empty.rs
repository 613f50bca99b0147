//! Empty state component renderer.

use crate::ui::helpers::{centered, Canvas};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the message and its dimmed subtitle on two centered lines.
pub fn render_empty_state(canvas: &mut Canvas, row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    canvas.move_to(row, 1);
    canvas.fg(&theme.colors.empty_state_fg);
    centered(canvas, &empty.message, cols);
    canvas.reset();

    canvas.move_to(row + 1, 1);
    canvas.dim();
    canvas.fg(&theme.colors.text_dim);
    centered(canvas, &empty.subtitle, cols);
    canvas.reset();
    row + 2
}
