//! Shared rendering utilities.
//!
//! Components draw into a [`Canvas`], a string buffer with cursor positioning
//! and styling helpers, which the renderer flushes to stdout in one write.
//! Text measurements are in characters, not bytes.

use crate::ui::theme::Theme;

/// ANSI output buffer for one frame.
#[derive(Debug, Default)]
pub struct Canvas {
    buf: String,
}

impl Canvas {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the cursor to a 1-indexed `row`/`col`.
    pub fn move_to(&mut self, row: usize, col: usize) {
        self.buf.push_str(&format!("\u{1b}[{row};{col}H"));
    }

    pub fn text(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    pub fn spaces(&mut self, n: usize) {
        self.buf.extend(std::iter::repeat(' ').take(n));
    }

    pub fn fg(&mut self, hex: &str) {
        self.buf.push_str(&Theme::fg(hex));
    }

    pub fn bg(&mut self, hex: &str) {
        self.buf.push_str(&Theme::bg(hex));
    }

    pub fn bold(&mut self) {
        self.buf.push_str(Theme::bold());
    }

    pub fn dim(&mut self) {
        self.buf.push_str(Theme::dim());
    }

    pub fn reset(&mut self) {
        self.buf.push_str(Theme::reset());
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.buf
    }
}

/// Width of `s` in characters.
#[must_use]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Cuts `s` to at most `max` characters, ending in `…` when shortened.
///
/// ```
/// use zcountries::ui::helpers::truncate;
///
/// assert_eq!(truncate("Saint Vincent and the Grenadines", 12), "Saint Vince…");
/// assert_eq!(truncate("Peru", 12), "Peru");
/// ```
#[must_use]
pub fn truncate(s: &str, max: usize) -> String {
    if char_len(s) <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = s.chars().take(max - 1).collect();
    out.push('…');
    out
}

/// Character range of the first case-insensitive occurrence of `query` in `text`.
///
/// ```
/// use zcountries::ui::helpers::match_range;
///
/// assert_eq!(match_range("New Zealand", "zea"), Some((4, 7)));
/// assert_eq!(match_range("Peru", ""), None);
/// ```
#[must_use]
pub fn match_range(text: &str, query: &str) -> Option<(usize, usize)> {
    let needle: Vec<char> = query.to_lowercase().chars().collect();
    if needle.is_empty() {
        return None;
    }

    let mut lowered = Vec::with_capacity(text.len());
    let mut origin = Vec::with_capacity(text.len());
    for (i, c) in text.chars().enumerate() {
        for l in c.to_lowercase() {
            lowered.push(l);
            origin.push(i);
        }
    }

    let start = lowered
        .windows(needle.len())
        .position(|window| window == needle.as_slice())?;
    let end = start + needle.len() - 1;
    Some((origin[start], origin[end] + 1))
}

/// Writes `text` with `ranges` drawn in match colors.
///
/// Selected rows skip match highlighting so the selection colors stay intact.
pub fn render_highlighted_text(
    canvas: &mut Canvas,
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        canvas.text(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }
        if start > current_pos {
            canvas.text(&chars[current_pos..start].iter().collect::<String>());
        }

        canvas.fg(&theme.colors.match_highlight_fg);
        canvas.bg(&theme.colors.match_highlight_bg);
        canvas.text(&chars[start..end].iter().collect::<String>());
        canvas.reset();
        canvas.fg(&theme.colors.text_normal);

        current_pos = end;
    }

    if current_pos < chars.len() {
        canvas.text(&chars[current_pos..].iter().collect::<String>());
    }
}

/// Draws `text` centered in a `cols`-wide line, padded on both sides.
pub fn centered(canvas: &mut Canvas, text: &str, cols: usize) {
    let len = char_len(text).min(cols);
    let padding = cols.saturating_sub(len) / 2;
    canvas.spaces(padding);
    canvas.text(&truncate(text, cols));
    canvas.spaces(cols.saturating_sub(padding + len));
}
