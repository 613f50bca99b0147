//! End-to-end flows through `handle_event`, with the host simulated by
//! answering the `WebRequest` actions the handler returns.

use chrono::{DateTime, Duration, Utc};
use pretty_assertions::assert_eq;
use zcountries::api::{ApiRequest, RequestKind};
use zcountries::app::{InputMode, Notice, Route, Screen};
use zcountries::catalog::{CatalogPhase, DetailPhase, CATALOG_ERROR_MESSAGE, PAGE_SIZE};
use zcountries::storage::{FavoritesStore, MemoryStore, CAPACITY_NOTICE, FAVORITES_KEY};
use zcountries::ui::renderer::render_to_string;
use zcountries::{handle_event, Action, AppState, Event, Theme};

const CATALOG: &str = r#"[
    {"name":{"common":"Australia"},"region":"Oceania","languages":{"eng":"English"},"population":25687041,"capital":["Canberra"],"area":7692024.0,"flag":"🇦🇺"},
    {"name":{"common":"Canada"},"region":"Americas","languages":{"eng":"English","fra":"French"},"population":38005238,"capital":["Ottawa"],"area":9984670.0,"flag":"🇨🇦"}
]"#;

fn t0() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

fn state_with(backend: &MemoryStore) -> AppState {
    AppState::new(FavoritesStore::new(Box::new(backend.clone())), Theme::default())
}

fn requests(actions: &[Action]) -> Vec<ApiRequest> {
    actions
        .iter()
        .filter_map(|a| match a {
            Action::WebRequest(r) => Some(r.clone()),
            _ => None,
        })
        .collect()
}

fn send(state: &mut AppState, event: Event) -> Vec<ApiRequest> {
    let (_, actions) = handle_event(state, &event, t0()).unwrap();
    requests(&actions)
}

fn respond(state: &mut AppState, request: &ApiRequest, status: u16, body: &str) -> bool {
    let event = Event::WebResult {
        status,
        body: body.as_bytes().to_vec(),
        context: request.context(),
    };
    handle_event(state, &event, t0()).unwrap().0
}

fn visible_names(state: &AppState) -> Vec<String> {
    state
        .catalog
        .visible()
        .iter()
        .map(|c| c.common_name().to_string())
        .collect()
}

fn loaded(backend: &MemoryStore) -> AppState {
    let mut state = state_with(backend);
    let fetched = send(&mut state, Event::PermissionsResult { granted: true });
    respond(&mut state, &fetched[0], 200, CATALOG);
    state
}

#[test]
fn granting_web_access_fetches_catalog_with_timer() {
    let mut state = state_with(&MemoryStore::new());
    let (render, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true }, t0()).unwrap();

    assert!(render);
    assert_eq!(actions.len(), 2);
    let fetched = requests(&actions);
    assert_eq!(fetched[0].kind, RequestKind::Catalog);
    assert!(fetched[0].url.contains("/all?fields="));
    assert!(matches!(actions[1], Action::SetTimeout { seconds } if seconds > 0.0));
    assert!(state.catalog.is_loading());
}

#[test]
fn search_commit_narrows_catalog() {
    let mut state = loaded(&MemoryStore::new());
    assert_eq!(visible_names(&state), vec!["Australia", "Canada"]);

    send(&mut state, Event::SearchMode);
    for c in "canada".chars() {
        send(&mut state, Event::Char(c));
    }
    assert_eq!(state.suggestions.matches.len(), 1);

    let fetched = send(&mut state, Event::Select);
    assert_eq!(fetched.len(), 1);
    respond(&mut state, &fetched[0], 200, CATALOG);

    assert_eq!(state.input_mode, InputMode::Normal);
    assert_eq!(visible_names(&state), vec!["Canada"]);
}

#[test]
fn failed_fetch_shows_single_message() {
    let mut state = state_with(&MemoryStore::new());
    let fetched = send(&mut state, Event::PermissionsResult { granted: true });
    respond(&mut state, &fetched[0], 500, "oops");

    assert_eq!(state.catalog.phase(), &CatalogPhase::Error(CATALOG_ERROR_MESSAGE.to_string()));
    assert!(visible_names(&state).is_empty());
    let frame = render_to_string(&state, 30, 100);
    assert!(frame.contains(CATALOG_ERROR_MESSAGE));
}

#[test]
fn older_response_after_newer_request_is_discarded() {
    let mut state = loaded(&MemoryStore::new());

    let first = send(&mut state, Event::Reload);
    let second = send(&mut state, Event::Reload);

    assert!(!respond(&mut state, &first[0], 200, r#"[{"name":{"common":"Stale"}}]"#));
    assert!(state.catalog.is_loading());

    assert!(respond(&mut state, &second[0], 200, CATALOG));
    assert_eq!(visible_names(&state), vec!["Australia", "Canada"]);
}

#[test]
fn request_past_deadline_errors_and_late_response_is_dropped() {
    let mut state = state_with(&MemoryStore::new());
    let fetched = send(&mut state, Event::PermissionsResult { granted: true });

    let (render, _) = handle_event(&mut state, &Event::Timer, t0() + Duration::seconds(1)).unwrap();
    assert!(!render);
    assert!(state.catalog.is_loading());

    let (render, _) = handle_event(&mut state, &Event::Timer, t0() + Duration::seconds(6)).unwrap();
    assert!(render);
    assert_eq!(state.catalog.error_message(), Some(CATALOG_ERROR_MESSAGE));

    assert!(!respond(&mut state, &fetched[0], 200, CATALOG));
    assert_eq!(state.catalog.error_message(), Some(CATALOG_ERROR_MESSAGE));
}

#[test]
fn show_more_pages_through_catalog() {
    let body = serde_json::to_string(
        &(0..30)
            .map(|i| serde_json::json!({ "name": { "common": format!("Country {i:02}") } }))
            .collect::<Vec<_>>(),
    )
    .unwrap();

    let mut state = state_with(&MemoryStore::new());
    let fetched = send(&mut state, Event::PermissionsResult { granted: true });
    respond(&mut state, &fetched[0], 200, &body);

    assert_eq!(state.catalog.visible().len(), PAGE_SIZE);
    assert!(state.catalog.has_more_pages());
    send(&mut state, Event::ShowMore);
    send(&mut state, Event::ShowMore);
    assert_eq!(state.catalog.visible().len(), 30);
    assert!(!state.catalog.has_more_pages());
}

#[test]
fn favorite_toggle_confirms_then_persists() {
    let backend = MemoryStore::new();
    let mut state = loaded(&backend);

    send(&mut state, Event::KeyDown);
    let detail = send(&mut state, Event::Select);
    assert_eq!(state.screen, Screen::Detail);
    assert_eq!(detail[0].kind, RequestKind::Detail);
    respond(&mut state, &detail[0], 200, r#"[{"name":{"common":"Canada"},"capital":["Ottawa"]}]"#);
    assert!(matches!(state.detail.phase(), DetailPhase::Loaded(_)));

    send(&mut state, Event::ToggleFavorite);
    assert_eq!(state.input_mode, InputMode::Confirm);
    assert!(backend.raw(FAVORITES_KEY).is_none());

    send(&mut state, Event::Confirm(true));
    assert_eq!(backend.raw(FAVORITES_KEY).as_deref(), Some(r#"["Canada"]"#));

    send(&mut state, Event::ToggleFavorite);
    assert_eq!(backend.raw(FAVORITES_KEY).as_deref(), Some("[]"));

    send(&mut state, Event::Back);
    assert_eq!(state.screen, Screen::Catalog);
    assert_eq!(visible_names(&state), vec!["Australia", "Canada"]);
}

#[test]
fn full_favorites_raise_capacity_notice() {
    let backend = MemoryStore::with_entry(FAVORITES_KEY, r#"["A","B","C","D","E"]"#);
    let mut state = loaded(&backend);

    let detail = send(&mut state, Event::Select);
    respond(&mut state, &detail[0], 200, r#"[{"name":{"common":"Australia"}}]"#);
    send(&mut state, Event::ToggleFavorite);
    send(&mut state, Event::Confirm(true));

    assert_eq!(state.notice, Some(Notice::warning(CAPACITY_NOTICE)));
    assert_eq!(state.favorites.names(), ["A", "B", "C", "D", "E"]);
}

#[test]
fn unknown_country_reports_not_found() {
    let mut state = state_with(&MemoryStore::new());
    state.pending_route = Some(Route::detail("Atlantis"));

    let fetched = send(&mut state, Event::PermissionsResult { granted: true });
    assert_eq!(fetched.len(), 2);
    assert_eq!(state.screen, Screen::Detail);
    assert!(fetched[1].url.ends_with("/name/Atlantis?fullText=true"));

    respond(&mut state, &fetched[1], 404, r#"{"status":404,"message":"Not Found"}"#);
    assert!(matches!(state.detail.phase(), DetailPhase::NotFound { .. }));
    assert_eq!(state.detail.message().as_deref(), Some("No country found named Atlantis"));
}

#[test]
fn removing_favorite_from_panel_persists() {
    let backend = MemoryStore::with_entry(FAVORITES_KEY, r#"["India","USA"]"#);
    let mut state = loaded(&backend);

    send(&mut state, Event::FocusFavorites);
    assert_eq!(state.input_mode, InputMode::Favorites);
    send(&mut state, Event::RemoveFavorite);

    assert_eq!(backend.raw(FAVORITES_KEY).as_deref(), Some(r#"["USA"]"#));
    let frame = render_to_string(&state, 30, 100);
    assert!(frame.contains("Favorites (1/5)"));
}
