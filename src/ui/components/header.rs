//! Header component renderer.

use crate::ui::helpers::{centered, Canvas};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the bold, centered title bar at `row`. Returns the next free row.
pub fn render_header(canvas: &mut Canvas, row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    canvas.move_to(row, 1);
    canvas.bold();
    canvas.fg(&theme.colors.header_fg);
    if let Some(bg) = &theme.colors.header_bg {
        canvas.bg(bg);
    }
    centered(canvas, &header.title, cols);
    canvas.reset();
    row + 1
}
