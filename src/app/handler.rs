//! Event handling and state transitions.
//!
//! [`handle_event`] is the single entry point: the plugin shim translates host
//! events into [`Event`]s, the handler mutates [`AppState`] and returns whether
//! to re-render plus the [`Action`]s to execute.
//!
//! Event categories:
//! - **Navigation**: `KeyDown`, `KeyUp`, `Select`, `Back`
//! - **Search**: `SearchMode`, `Char`, `Backspace`, `ShowAllSuggestions`
//! - **Catalog**: `OpenRegionPicker`, `OpenLanguagePicker`, `ShowMore`, `Reload`, `ClearFilters`
//! - **Favorites**: `FocusFavorites`, `RemoveFavorite`, `ToggleFavorite`, `Confirm`
//! - **System**: `PermissionsResult`, `WebResult`, `Timer`

use super::modes::{InputMode, PickerKind, Screen};
use super::route::Route;
use super::state::Notice;
use crate::api::{ApiRequest, ApiResponse, RequestKind};
use crate::app::{Action, AppState};
use crate::catalog::{Completion, SuggestionLimit};
use crate::domain::error::Result;
use crate::storage::{AddOutcome, CAPACITY_NOTICE};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Notice shown when the favorites file cannot be written.
pub const SAVE_FAILED_NOTICE: &str = "Could not save favorites.";

/// Application events, already interpreted for the current input mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    KeyDown,
    KeyUp,
    /// Enter: open details, apply a picker choice, commit a search.
    Select,
    /// Esc: leave the current mode or screen.
    Back,
    CloseFocus,

    SearchMode,
    Char(char),
    Backspace,
    ShowAllSuggestions,

    OpenRegionPicker,
    OpenLanguagePicker,
    ShowMore,
    Reload,
    ClearFilters,

    FocusFavorites,
    RemoveFavorite,
    ToggleFavorite,
    Confirm(bool),

    PermissionsResult {
        granted: bool,
    },

    /// A host web request finished.
    WebResult {
        status: u16,
        body: Vec<u8>,
        context: BTreeMap<String, String>,
    },

    /// A host timer fired.
    Timer,
}

impl Event {
    const fn is_input(&self) -> bool {
        !matches!(
            self,
            Self::PermissionsResult { .. } | Self::WebResult { .. } | Self::Timer
        )
    }
}

/// Processes one event.
///
/// `now` is the wall-clock time used for request deadlines.
///
/// # Errors
///
/// Returns an error only for failures the handler cannot turn into a notice.
/// Fetch and storage failures are reported through the UI instead.
///
/// # Example
///
/// ```rust
/// use zcountries::app::{handle_event, Action, AppState, Event};
/// use zcountries::storage::{FavoritesStore, MemoryStore};
/// use zcountries::ui::Theme;
///
/// let favorites = FavoritesStore::new(Box::new(MemoryStore::new()));
/// let mut state = AppState::new(favorites, Theme::default());
/// let (render, actions) =
///     handle_event(&mut state, &Event::PermissionsResult { granted: true }, chrono::Utc::now())?;
/// assert!(render);
/// assert!(matches!(actions[0], Action::WebRequest(_)));
/// # Ok::<(), zcountries::ZcountriesError>(())
/// ```
pub fn handle_event(state: &mut AppState, event: &Event, now: DateTime<Utc>) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?EventName(event)).entered();

    if event.is_input() {
        state.notice = None;
    }

    match event {
        Event::PermissionsResult { granted } => Ok(on_permissions(state, *granted, now)),
        Event::WebResult { status, body, context } => Ok(on_web_result(state, *status, body, context)),
        Event::Timer => {
            let catalog_expired = state.catalog.check_timeout(now);
            let detail_expired = state.detail.check_timeout(now);
            Ok((catalog_expired || detail_expired, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        _ => Ok(match (state.screen, state.input_mode) {
            (_, InputMode::Confirm) => on_confirm_key(state, event),
            (Screen::Detail, _) => on_detail_key(state, event, now),
            (Screen::Catalog, InputMode::Search) => on_search_key(state, event, now),
            (Screen::Catalog, InputMode::Picker(kind)) => on_picker_key(state, kind, event, now),
            (Screen::Catalog, InputMode::Favorites) => on_favorites_key(state, event, now),
            (Screen::Catalog, InputMode::Normal) => on_catalog_key(state, event, now),
        }),
    }
}

/// Keeps span fields short: web result bodies can be large.
struct EventName<'a>(&'a Event);

impl std::fmt::Debug for EventName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Event::WebResult { status, body, .. } => {
                write!(f, "WebResult({status}, {} bytes)", body.len())
            }
            other => write!(f, "{other:?}"),
        }
    }
}

fn fetch(state: &AppState, request: ApiRequest) -> Vec<Action> {
    tracing::debug!(kind = request.kind.as_str(), token = %request.token, url = %request.url, "issuing request");
    vec![
        Action::WebRequest(request),
        Action::SetTimeout {
            seconds: state.catalog.timeout_secs(),
        },
    ]
}

fn open_detail(state: &mut AppState, name: &str, now: DateTime<Utc>) -> (bool, Vec<Action>) {
    state.screen = Screen::Detail;
    state.input_mode = InputMode::Normal;
    let request = state.detail.open(name, now);
    tracing::debug!(route = %state.route().to_query(), "opening details");
    (true, fetch(state, request))
}

fn on_permissions(state: &mut AppState, granted: bool, now: DateTime<Utc>) -> (bool, Vec<Action>) {
    if !granted {
        tracing::warn!("web access denied");
        state.notice = Some(Notice::error(
            "Web access was denied; country data cannot be loaded.",
        ));
        return (true, vec![]);
    }
    if state.web_access {
        return (false, vec![]);
    }

    tracing::info!("web access granted, loading catalog");
    state.web_access = true;
    let request = state.catalog.reload(now);
    let mut actions = fetch(state, request);

    if let Some(Route::Detail { country }) = state.pending_route.take() {
        let (_, detail_actions) = open_detail(state, &country, now);
        actions.extend(detail_actions);
    }
    (true, actions)
}

fn on_web_result(
    state: &mut AppState,
    status: u16,
    body: &[u8],
    context: &BTreeMap<String, String>,
) -> (bool, Vec<Action>) {
    let Some(response) = ApiResponse::from_web_result(status, body, context) else {
        tracing::debug!(status = status, "ignoring web result without a zcountries context");
        return (false, vec![]);
    };

    let completion = match response.kind {
        RequestKind::Catalog => {
            let completion = state.catalog.complete(response.token, response.outcome);
            if completion == Completion::Applied {
                state.clamp_selection();
                if state.input_mode == InputMode::Search {
                    state.refresh_suggestions();
                }
            }
            completion
        }
        RequestKind::Detail => state.detail.complete(response.token, response.outcome),
    };
    (completion == Completion::Applied, vec![])
}

fn on_catalog_key(state: &mut AppState, event: &Event, now: DateTime<Utc>) -> (bool, Vec<Action>) {
    match event {
        Event::KeyDown => {
            state.move_selection_down();
            (true, vec![])
        }
        Event::KeyUp => {
            state.move_selection_up();
            (true, vec![])
        }
        Event::Select => match state.selected_country() {
            Some(country) => {
                let name = country.common_name().to_string();
                open_detail(state, &name, now)
            }
            None => (false, vec![]),
        },
        Event::SearchMode => {
            state.input_mode = InputMode::Search;
            state.search_query.clone_from(&state.catalog.criteria().search);
            state.clear_suggestions();
            state.refresh_suggestions();
            (true, vec![])
        }
        Event::OpenRegionPicker => open_picker(state, PickerKind::Region),
        Event::OpenLanguagePicker => open_picker(state, PickerKind::Language),
        Event::ShowMore => (state.catalog.show_more(), vec![]),
        Event::Reload => {
            let request = state.catalog.reload(now);
            (true, fetch(state, request))
        }
        Event::ClearFilters | Event::Back => {
            if state.catalog.criteria().is_empty() {
                return (false, vec![]);
            }
            state.selected_index = 0;
            state.search_query.clear();
            let request = state.catalog.set_search("", now);
            (true, fetch(state, request))
        }
        Event::FocusFavorites => {
            if state.favorites.is_empty() {
                return (false, vec![]);
            }
            state.input_mode = InputMode::Favorites;
            state.clamp_selection();
            (true, vec![])
        }
        _ => (false, vec![]),
    }
}

fn open_picker(state: &mut AppState, kind: PickerKind) -> (bool, Vec<Action>) {
    state.input_mode = InputMode::Picker(kind);
    state.picker_index = state.active_picker_index(kind);
    (true, vec![])
}

fn on_search_key(state: &mut AppState, event: &Event, now: DateTime<Utc>) -> (bool, Vec<Action>) {
    match event {
        Event::Char(c) => {
            state.search_query.push(*c);
            state.suggestion_limit = SuggestionLimit::default();
            state.suggestion_index = None;
            state.refresh_suggestions();
            tracing::trace!(query = %state.search_query, "search query updated");
            (true, vec![])
        }
        Event::Backspace => {
            state.search_query.pop();
            state.suggestion_limit = SuggestionLimit::default();
            state.suggestion_index = None;
            state.refresh_suggestions();
            (true, vec![])
        }
        Event::KeyDown => {
            let len = state.suggestions.matches.len();
            if len == 0 {
                return (false, vec![]);
            }
            state.suggestion_index = Some(state.suggestion_index.map_or(0, |i| (i + 1) % len));
            (true, vec![])
        }
        Event::KeyUp => {
            let len = state.suggestions.matches.len();
            if len == 0 {
                return (false, vec![]);
            }
            state.suggestion_index = Some(match state.suggestion_index {
                None | Some(0) => len - 1,
                Some(i) => i - 1,
            });
            (true, vec![])
        }
        Event::ShowAllSuggestions => {
            if !state.suggestions.has_more {
                return (false, vec![]);
            }
            state.suggestion_limit = SuggestionLimit::All;
            state.refresh_suggestions();
            (true, vec![])
        }
        Event::Select => {
            if let Some(country) = state.selected_suggestion() {
                let name = country.common_name().to_string();
                state.clear_suggestions();
                state.search_query.clone_from(&state.catalog.criteria().search);
                return open_detail(state, &name, now);
            }

            let query = state.search_query.clone();
            tracing::debug!(query = %query, "committing search");
            state.input_mode = InputMode::Normal;
            state.clear_suggestions();
            state.selected_index = 0;
            let request = state.catalog.set_search(&query, now);
            (true, fetch(state, request))
        }
        Event::Back => {
            state.input_mode = InputMode::Normal;
            state.clear_suggestions();
            state.search_query.clone_from(&state.catalog.criteria().search);
            (true, vec![])
        }
        _ => (false, vec![]),
    }
}

fn on_picker_key(state: &mut AppState, kind: PickerKind, event: &Event, now: DateTime<Utc>) -> (bool, Vec<Action>) {
    let count = state.picker_options(kind).len();
    match event {
        Event::KeyDown => {
            state.picker_index = (state.picker_index + 1) % count;
            (true, vec![])
        }
        Event::KeyUp => {
            state.picker_index = if state.picker_index == 0 { count - 1 } else { state.picker_index - 1 };
            (true, vec![])
        }
        Event::Select => {
            let value = if state.picker_index == 0 {
                String::new()
            } else {
                state
                    .picker_options(kind)
                    .swap_remove(state.picker_index.min(count - 1))
            };
            state.input_mode = InputMode::Normal;
            state.selected_index = 0;
            state.search_query.clear();
            let request = match kind {
                PickerKind::Region => state.catalog.select_region(&value, now),
                PickerKind::Language => state.catalog.select_language(&value, now),
            };
            (true, fetch(state, request))
        }
        Event::Back => {
            state.input_mode = InputMode::Normal;
            (true, vec![])
        }
        _ => (false, vec![]),
    }
}

fn on_favorites_key(state: &mut AppState, event: &Event, now: DateTime<Utc>) -> (bool, Vec<Action>) {
    let count = state.favorites.len();
    if count == 0 {
        state.input_mode = InputMode::Normal;
        return (true, vec![]);
    }
    match event {
        Event::KeyDown => {
            state.favorites_index = (state.favorites_index + 1) % count;
            (true, vec![])
        }
        Event::KeyUp => {
            state.favorites_index = if state.favorites_index == 0 { count - 1 } else { state.favorites_index - 1 };
            (true, vec![])
        }
        Event::Select => match state.selected_favorite() {
            Some(name) => {
                let name = name.to_string();
                open_detail(state, &name, now)
            }
            None => (false, vec![]),
        },
        Event::RemoveFavorite => {
            if let Some(name) = state.selected_favorite().map(ToString::to_string) {
                remove_favorite(state, &name);
            }
            state.clamp_selection();
            if state.favorites.is_empty() {
                state.input_mode = InputMode::Normal;
            }
            (true, vec![])
        }
        Event::Back | Event::FocusFavorites => {
            state.input_mode = InputMode::Normal;
            (true, vec![])
        }
        _ => (false, vec![]),
    }
}

fn on_detail_key(state: &mut AppState, event: &Event, now: DateTime<Utc>) -> (bool, Vec<Action>) {
    match event {
        Event::ToggleFavorite => {
            let Some(country) = state.detail.country() else {
                return (false, vec![]);
            };
            let name = country.common_name().to_string();
            if state.favorites.contains(&name) {
                remove_favorite(state, &name);
            } else {
                state.input_mode = InputMode::Confirm;
            }
            (true, vec![])
        }
        Event::Reload => {
            let name = state.detail.requested_name().to_string();
            if name.is_empty() {
                return (false, vec![]);
            }
            open_detail(state, &name, now)
        }
        Event::Back => {
            state.detail.close();
            state.screen = Screen::Catalog;
            state.input_mode = InputMode::Normal;
            state.clamp_selection();
            (true, vec![])
        }
        _ => (false, vec![]),
    }
}

fn on_confirm_key(state: &mut AppState, event: &Event) -> (bool, Vec<Action>) {
    match event {
        Event::Confirm(true) => {
            state.input_mode = InputMode::Normal;
            let name = state.detail.requested_name().to_string();
            match state.favorites.add(&name) {
                Ok(AddOutcome::Added) => {
                    state.notice = Some(Notice::info(format!("Added {name} to favorites.")));
                }
                Ok(AddOutcome::AlreadyPresent) => {}
                Ok(AddOutcome::CapacityReached) => {
                    state.notice = Some(Notice::warning(CAPACITY_NOTICE));
                }
                Err(e) => {
                    tracing::warn!(error = %e, country = %name, "failed to save favorites");
                    state.notice = Some(Notice::error(SAVE_FAILED_NOTICE));
                }
            }
            (true, vec![])
        }
        Event::Confirm(false) | Event::Back => {
            state.input_mode = InputMode::Normal;
            (true, vec![])
        }
        _ => (false, vec![]),
    }
}

fn remove_favorite(state: &mut AppState, name: &str) {
    if let Err(e) = state.favorites.remove(name) {
        tracing::warn!(error = %e, country = %name, "failed to save favorites");
        state.notice = Some(Notice::error(SAVE_FAILED_NOTICE));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiRequest;
    use crate::storage::{FavoritesStore, MemoryStore};
    use crate::ui::Theme;
    use crate::Country;

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn request_of(actions: &[Action]) -> ApiRequest {
        actions
            .iter()
            .find_map(|a| match a {
                Action::WebRequest(r) => Some(r.clone()),
                _ => None,
            })
            .unwrap()
    }

    fn respond(state: &mut AppState, request: &ApiRequest, body: &str) -> bool {
        let event = Event::WebResult {
            status: 200,
            body: body.as_bytes().to_vec(),
            context: request.context(),
        };
        handle_event(state, &event, t0()).unwrap().0
    }

    fn ready_state(body: &str) -> AppState {
        let mut state = AppState::new(FavoritesStore::new(Box::new(MemoryStore::new())), Theme::default());
        let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true }, t0()).unwrap();
        respond(&mut state, &request_of(&actions), body);
        state
    }

    const THREE: &str = r#"[{"name":{"common":"Chile"},"region":"Americas"},
        {"name":{"common":"China"},"region":"Asia"},
        {"name":{"common":"Peru"},"region":"Americas"}]"#;

    #[test]
    fn permission_grant_loads_catalog_with_timeout() {
        let mut state = AppState::new(FavoritesStore::new(Box::new(MemoryStore::new())), Theme::default());
        let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true }, t0()).unwrap();
        assert_eq!(actions.len(), 2);
        assert!(matches!(actions[1], Action::SetTimeout { seconds } if (seconds - 5.0).abs() < f64::EPSILON));

        let (_, again) = handle_event(&mut state, &Event::PermissionsResult { granted: true }, t0()).unwrap();
        assert!(again.is_empty());
    }

    #[test]
    fn pending_route_opens_details_after_grant() {
        let mut state = AppState::new(FavoritesStore::new(Box::new(MemoryStore::new())), Theme::default())
            .with_route(Route::detail("Peru"));
        let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true }, t0()).unwrap();
        assert_eq!(actions.len(), 4);
        assert_eq!(state.screen, Screen::Detail);
        assert_eq!(state.route(), Route::detail("Peru"));
    }

    #[test]
    fn typing_updates_suggestions_and_enter_commits() {
        let mut state = ready_state(THREE);
        handle_event(&mut state, &Event::SearchMode, t0()).unwrap();
        for c in "ch".chars() {
            handle_event(&mut state, &Event::Char(c), t0()).unwrap();
        }
        assert_eq!(state.suggestions.matches.len(), 2);

        let (_, actions) = handle_event(&mut state, &Event::Select, t0()).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.suggestions.is_empty());
        respond(&mut state, &request_of(&actions), THREE);
        let names: Vec<&str> = state.catalog.visible().iter().map(Country::common_name).collect();
        assert_eq!(names, vec!["Chile", "China"]);
    }

    #[test]
    fn committed_search_keeps_surrounding_spaces() {
        let mut state = ready_state(THREE);
        handle_event(&mut state, &Event::SearchMode, t0()).unwrap();
        for c in "ch ".chars() {
            handle_event(&mut state, &Event::Char(c), t0()).unwrap();
        }
        let (_, actions) = handle_event(&mut state, &Event::Select, t0()).unwrap();
        assert_eq!(state.catalog.criteria().search, "ch ");
        assert_eq!(state.search_query, "ch ");
        respond(&mut state, &request_of(&actions), THREE);
        assert!(state.catalog.visible().is_empty());
    }

    #[test]
    fn selecting_a_suggestion_opens_details() {
        let mut state = ready_state(THREE);
        handle_event(&mut state, &Event::SearchMode, t0()).unwrap();
        handle_event(&mut state, &Event::Char('p'), t0()).unwrap();
        handle_event(&mut state, &Event::KeyDown, t0()).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::Select, t0()).unwrap();
        assert_eq!(state.screen, Screen::Detail);
        assert!(request_of(&actions).url.contains("/name/Peru?"));
    }

    #[test]
    fn region_picker_applies_and_resets_search() {
        let mut state = ready_state(THREE);
        state.search_query = "ch".into();
        handle_event(&mut state, &Event::OpenRegionPicker, t0()).unwrap();
        handle_event(&mut state, &Event::KeyDown, t0()).unwrap();
        handle_event(&mut state, &Event::KeyDown, t0()).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::Select, t0()).unwrap();
        assert_eq!(state.catalog.criteria().region, "Americas");
        assert!(state.search_query.is_empty());
        respond(&mut state, &request_of(&actions), THREE);
        assert_eq!(state.catalog.visible().len(), 2);
    }

    #[test]
    fn favorite_toggle_asks_before_adding() {
        let mut state = ready_state(THREE);
        let (_, actions) = handle_event(&mut state, &Event::Select, t0()).unwrap();
        respond(&mut state, &request_of(&actions), r#"[{"name":{"common":"Chile"}}]"#);

        handle_event(&mut state, &Event::ToggleFavorite, t0()).unwrap();
        assert_eq!(state.input_mode, InputMode::Confirm);
        handle_event(&mut state, &Event::Confirm(true), t0()).unwrap();
        assert!(state.favorites.contains("Chile"));

        handle_event(&mut state, &Event::ToggleFavorite, t0()).unwrap();
        assert!(!state.favorites.contains("Chile"));
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn back_from_details_keeps_catalog() {
        let mut state = ready_state(THREE);
        handle_event(&mut state, &Event::KeyDown, t0()).unwrap();
        handle_event(&mut state, &Event::Select, t0()).unwrap();
        handle_event(&mut state, &Event::Back, t0()).unwrap();
        assert_eq!(state.screen, Screen::Catalog);
        assert_eq!(state.selected_index, 1);
        assert_eq!(state.catalog.visible().len(), 3);
    }

    #[test]
    fn notices_clear_on_next_key() {
        let mut state = ready_state(THREE);
        state.notice = Some(Notice::info("hello"));
        handle_event(&mut state, &Event::Timer, t0()).unwrap();
        assert!(state.notice.is_some());
        handle_event(&mut state, &Event::KeyDown, t0()).unwrap();
        assert!(state.notice.is_none());
    }

    #[test]
    fn foreign_web_results_are_ignored() {
        let mut state = ready_state(THREE);
        let event = Event::WebResult {
            status: 200,
            body: b"[]".to_vec(),
            context: BTreeMap::new(),
        };
        assert_eq!(handle_event(&mut state, &event, t0()).unwrap(), (false, vec![]));
    }
}
