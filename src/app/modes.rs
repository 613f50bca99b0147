//! Screen and input mode types.
//!
//! The screen decides what is drawn; the input mode decides how keys are
//! interpreted on that screen.
//!
//! ```rust
//! use zcountries::app::{InputMode, PickerKind, Screen};
//!
//! let screen = Screen::Catalog;
//! let mode = InputMode::Picker(PickerKind::Region);
//! assert_ne!(mode, InputMode::Normal);
//! assert_eq!(screen, Screen::default());
//! ```

/// Which top-level view is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Filterable, paginated country list with the favorites panel.
    #[default]
    Catalog,
    /// A single country's record.
    Detail,
}

/// Which option list a picker shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerKind {
    Region,
    Language,
}

impl PickerKind {
    /// First entry of the picker, which clears the filter.
    #[must_use]
    pub const fn clear_label(self) -> &'static str {
        match self {
            Self::Region => "All regions",
            Self::Language => "All languages",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Region => "Filter by region",
            Self::Language => "Filter by language",
        }
    }
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// List navigation and commands.
    #[default]
    Normal,

    /// Typing a search with live suggestions.
    Search,

    /// Choosing a region or language.
    Picker(PickerKind),

    /// Cursor is in the favorites panel.
    Favorites,

    /// Waiting for y/n on adding a favorite.
    Confirm,
}
