//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They hold display-ready strings and flags only.

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub body: Body,
    /// Favorites panel; shown on the catalog screen when the list is non-empty.
    pub favorites: Option<FavoritesPanel>,
    pub notice: Option<NoticeInfo>,
    pub footer: FooterInfo,
}

/// Main area of the screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    List(ListView),
    Picker(PickerView),
    Detail(DetailView),
}

/// Catalog list with optional search bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ListView {
    pub search_bar: Option<SearchBarInfo>,
    pub status: StatusLine,
    pub display_items: Vec<DisplayItem>,
    pub empty_state: Option<EmptyState>,
}

/// One catalog row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub flag: String,
    pub name: String,
    pub region: String,
    pub population: String,
    pub is_selected: bool,
    pub is_favorite: bool,

    /// `(start, end)` character indices of the search match in `name`.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Line above the table: active filter, counts, loading or error text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub kind: StatusKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Normal,
    Loading,
    Error,
}

/// Search input plus its live suggestions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
    pub suggestions: Vec<SuggestionItem>,
    /// More matches exist than are listed (Tab shows all).
    pub has_more: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionItem {
    pub flag: String,
    pub name: String,
    pub highlight: Option<(usize, usize)>,
    pub is_selected: bool,
}

/// Region or language picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerView {
    pub title: String,
    pub options: Vec<PickerOption>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOption {
    pub label: String,
    pub is_selected: bool,
    /// The option matching the currently applied filter.
    pub is_active: bool,
}

/// A single country's attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub flag: String,
    pub name: String,
    pub fields: Vec<(String, String)>,
    pub is_favorite: bool,
    /// Loading, not-found or error text shown in place of the fields.
    pub message: Option<String>,
    pub message_is_error: bool,
}

/// Bookmarked country names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoritesPanel {
    pub names: Vec<String>,
    pub selected: Option<usize>,
    pub capacity: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Shown when a successful load leaves nothing to list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Transient message line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeInfo {
    pub message: String,
    pub kind: NoticeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
    /// A yes/no question awaiting an answer.
    Prompt,
}
