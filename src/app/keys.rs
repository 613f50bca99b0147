//! Key bindings.
//!
//! The shim reduces Zellij key events to [`Key`] and asks [`map_key`] which
//! [`Event`] they mean in the current screen and mode.
//!
//! | Where               | Keys                                                           |
//! |---------------------|----------------------------------------------------------------|
//! | everywhere          | `Ctrl+n` / `Ctrl+p` move down / up                             |
//! | catalog             | `j`/`k` move, `Enter` details, `/` search, `r` region,         |
//! |                     | `l` language, `m` show more, `F` favorites, `R` reload,        |
//! |                     | `Esc` clear filter, `q` quit                                   |
//! | search              | type, `Backspace`, `Tab` show all, `Enter`, `Esc`              |
//! | picker / favorites  | `j`/`k`, `Enter`, `Esc`; `d` removes a favorite               |
//! | details             | `f` toggle favorite, `R` reload, `b`/`Esc` back, `q` quit      |
//! | confirm             | `y`/`Enter` yes, `n`/`Esc` no                                  |

use super::handler::Event;
use super::modes::{InputMode, Screen};
use super::state::AppState;

/// A key press, independent of the host's key types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Ctrl(char),
    Enter,
    Esc,
    Backspace,
    Tab,
    Up,
    Down,
}

/// Interprets `key` for the current screen and input mode.
///
/// ```rust
/// use zcountries::app::{map_key, AppState, Event, Key};
/// use zcountries::storage::{FavoritesStore, MemoryStore};
/// use zcountries::ui::Theme;
///
/// let state = AppState::new(FavoritesStore::new(Box::new(MemoryStore::new())), Theme::default());
/// assert_eq!(map_key(&state, Key::Char('/')), Some(Event::SearchMode));
/// assert_eq!(map_key(&state, Key::Ctrl('n')), Some(Event::KeyDown));
/// ```
#[must_use]
pub fn map_key(state: &AppState, key: Key) -> Option<Event> {
    match key {
        Key::Ctrl('n') => return Some(Event::KeyDown),
        Key::Ctrl('p') => return Some(Event::KeyUp),
        Key::Ctrl(_) => return None,
        Key::Down => return Some(Event::KeyDown),
        Key::Up => return Some(Event::KeyUp),
        _ => {}
    }

    match (state.screen, state.input_mode) {
        (_, InputMode::Confirm) => match key {
            Key::Char('y' | 'Y') | Key::Enter => Some(Event::Confirm(true)),
            Key::Char('n' | 'N') | Key::Esc => Some(Event::Confirm(false)),
            _ => None,
        },
        (_, InputMode::Search) => match key {
            Key::Char(c) => Some(Event::Char(c)),
            Key::Backspace => Some(Event::Backspace),
            Key::Tab => Some(Event::ShowAllSuggestions),
            Key::Enter => Some(Event::Select),
            Key::Esc => Some(Event::Back),
            _ => None,
        },
        (Screen::Detail, _) => match key {
            Key::Char('f') => Some(Event::ToggleFavorite),
            Key::Char('R') => Some(Event::Reload),
            Key::Char('b') | Key::Esc | Key::Backspace => Some(Event::Back),
            Key::Char('q') => Some(Event::CloseFocus),
            _ => None,
        },
        (Screen::Catalog, InputMode::Picker(_) | InputMode::Favorites) => match key {
            Key::Char('j') => Some(Event::KeyDown),
            Key::Char('k') => Some(Event::KeyUp),
            Key::Enter => Some(Event::Select),
            Key::Char('d') if state.input_mode == InputMode::Favorites => Some(Event::RemoveFavorite),
            Key::Char('F') if state.input_mode == InputMode::Favorites => Some(Event::FocusFavorites),
            Key::Esc | Key::Char('q') => Some(Event::Back),
            _ => None,
        },
        (Screen::Catalog, InputMode::Normal) => match key {
            Key::Char('j') => Some(Event::KeyDown),
            Key::Char('k') => Some(Event::KeyUp),
            Key::Enter => Some(Event::Select),
            Key::Char('/') => Some(Event::SearchMode),
            Key::Char('r') => Some(Event::OpenRegionPicker),
            Key::Char('l') => Some(Event::OpenLanguagePicker),
            Key::Char('m') => Some(Event::ShowMore),
            Key::Char('F') => Some(Event::FocusFavorites),
            Key::Char('R') => Some(Event::Reload),
            Key::Esc => Some(Event::ClearFilters),
            Key::Char('q') => Some(Event::CloseFocus),
            _ => None,
        },
    }
}
