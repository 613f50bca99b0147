//! Footer and notice line renderers.

use crate::ui::helpers::{centered, Canvas};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FooterInfo, NoticeInfo, NoticeKind};

/// Renders the dimmed keybinding hints at `row`.
pub fn render_footer(canvas: &mut Canvas, row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    canvas.move_to(row, 1);
    canvas.fg(&theme.colors.text_dim);
    centered(canvas, &footer.keybindings, cols);
    canvas.reset();
    row + 1
}

/// Renders a notice or prompt line at `row`, colored by kind.
pub fn render_notice(canvas: &mut Canvas, row: usize, notice: &NoticeInfo, theme: &Theme, cols: usize) -> usize {
    let color = match notice.kind {
        NoticeKind::Info => &theme.colors.notice_fg,
        NoticeKind::Warning | NoticeKind::Prompt => &theme.colors.favorite_fg,
        NoticeKind::Error => &theme.colors.error_fg,
    };
    canvas.move_to(row, 1);
    if notice.kind == NoticeKind::Prompt {
        canvas.bold();
    }
    canvas.fg(color);
    centered(canvas, &notice.message, cols);
    canvas.reset();
    row + 1
}
