//! Region / language picker renderer.

use crate::ui::helpers::{char_len, truncate, Canvas};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PickerView;

const PICKER_INDENT: usize = 2;

/// Renders the picker title and one line per option.
///
/// The applied option is marked with `●`; the cursor row uses selection colors.
pub fn render_picker(canvas: &mut Canvas, row: usize, picker: &PickerView, theme: &Theme, cols: usize) -> usize {
    canvas.move_to(row, 1);
    canvas.spaces(PICKER_INDENT);
    canvas.bold();
    canvas.fg(&theme.colors.header_fg);
    canvas.text(&picker.title);
    canvas.reset();

    let width = cols.saturating_sub(PICKER_INDENT * 2);
    let mut current_row = row + 2;
    for option in &picker.options {
        canvas.move_to(current_row, 1);
        canvas.spaces(PICKER_INDENT);
        if option.is_selected {
            canvas.fg(&theme.colors.selection_fg);
            canvas.bg(&theme.colors.selection_bg);
        } else if option.is_active {
            canvas.fg(&theme.colors.favorite_fg);
        } else {
            canvas.fg(&theme.colors.text_normal);
        }
        let marker = if option.is_active { "● " } else { "  " };
        let line = truncate(&format!("{marker}{}", option.label), width);
        canvas.text(&line);
        canvas.spaces(width.saturating_sub(char_len(&line)));
        canvas.reset();
        current_row += 1;
    }
    current_row
}
