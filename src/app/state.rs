//! Application state and view model computation.
//!
//! [`AppState`] owns the two controllers, the favorites store and all
//! transient UI state (screen, input mode, cursors, search text, notice). It is
//! the single source of truth the renderer reads through
//! [`AppState::compute_viewmodel`].

use super::modes::{InputMode, PickerKind, Screen};
use super::route::Route;
use crate::api::CountryApi;
use crate::catalog::{
    suggest, CatalogController, CatalogPhase, DetailController, DetailPhase, SuggestionLimit,
    Suggestions,
};
use crate::domain::{group_thousands, Country, Region};
use crate::storage::{FavoritesStore, MAX_FAVORITES};
use crate::ui::helpers::{match_range, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    Body, DetailView, DisplayItem, EmptyState, FavoritesPanel, FooterInfo, HeaderInfo, ListView,
    NoticeInfo, NoticeKind, PickerOption, PickerView, SearchBarInfo, StatusKind, StatusLine,
    SuggestionItem, UIViewModel,
};
use chrono::Duration;

/// Languages offered by the language picker unless configured otherwise.
pub const DEFAULT_LANGUAGES: [&str; 12] = [
    "Arabic",
    "Chinese",
    "Dutch",
    "English",
    "French",
    "German",
    "Hindi",
    "Italian",
    "Japanese",
    "Portuguese",
    "Russian",
    "Spanish",
];

pub(crate) const NAME_COLUMN_WIDTH: usize = 34;
pub(crate) const REGION_COLUMN_WIDTH: usize = 12;

/// A transient message shown above the footer until the next key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
}

impl Notice {
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Info,
        }
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Warning,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Error,
        }
    }
}

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    pub catalog: CatalogController,
    pub detail: DetailController,
    pub favorites: FavoritesStore,

    pub screen: Screen,
    pub input_mode: InputMode,

    /// Text in the search box. Committed to the catalog on Enter.
    pub search_query: String,
    pub suggestions: Suggestions,
    pub suggestion_limit: SuggestionLimit,
    /// Highlighted suggestion, if the user moved into the list.
    pub suggestion_index: Option<usize>,

    /// Cursor within the visible catalog rows.
    pub selected_index: usize,
    pub favorites_index: usize,
    pub picker_index: usize,

    pub notice: Option<Notice>,

    /// Options of the language picker.
    pub languages: Vec<String>,
    pub theme: Theme,

    /// Set once the host grants web access.
    pub web_access: bool,
    /// Route to open once web access is granted.
    pub pending_route: Option<Route>,
}

impl AppState {
    /// Creates a state with default controllers and language list.
    ///
    /// ```rust
    /// use zcountries::app::AppState;
    /// use zcountries::storage::{FavoritesStore, MemoryStore};
    /// use zcountries::ui::Theme;
    ///
    /// let favorites = FavoritesStore::new(Box::new(MemoryStore::new()));
    /// let state = AppState::new(favorites, Theme::default());
    /// assert_eq!(state.selected_index, 0);
    /// let vm = state.compute_viewmodel(24, 100);
    /// assert!(vm.favorites.is_none());
    /// ```
    #[must_use]
    pub fn new(favorites: FavoritesStore, theme: Theme) -> Self {
        Self {
            catalog: CatalogController::default(),
            detail: DetailController::default(),
            favorites,
            screen: Screen::Catalog,
            input_mode: InputMode::Normal,
            search_query: String::new(),
            suggestions: Suggestions::default(),
            suggestion_limit: SuggestionLimit::default(),
            suggestion_index: None,
            selected_index: 0,
            favorites_index: 0,
            picker_index: 0,
            notice: None,
            languages: DEFAULT_LANGUAGES.iter().map(ToString::to_string).collect(),
            theme,
            web_access: false,
            pending_route: None,
        }
    }

    /// Replaces both controllers with ones using `api` and `timeout`.
    #[must_use]
    pub fn with_api(mut self, api: CountryApi, timeout: Duration) -> Self {
        self.catalog = CatalogController::new(api.clone(), timeout);
        self.detail = DetailController::new(api, timeout);
        self
    }

    #[must_use]
    pub fn with_languages(mut self, languages: Vec<String>) -> Self {
        if !languages.is_empty() {
            self.languages = languages;
        }
        self
    }

    #[must_use]
    pub fn with_route(mut self, route: Route) -> Self {
        self.pending_route = Some(route);
        self
    }

    /// The route describing what is currently shown.
    #[must_use]
    pub fn route(&self) -> Route {
        match self.screen {
            Screen::Catalog => Route::Catalog,
            Screen::Detail => Route::detail(self.detail.requested_name()),
        }
    }

    pub fn move_selection_down(&mut self) {
        let len = self.catalog.visible().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    pub fn move_selection_up(&mut self) {
        let len = self.catalog.visible().len();
        if len == 0 {
            return;
        }
        self.selected_index = if self.selected_index == 0 {
            len - 1
        } else {
            self.selected_index - 1
        };
    }

    /// Keeps the cursor inside the visible rows.
    pub fn clamp_selection(&mut self) {
        let len = self.catalog.visible().len();
        self.selected_index = if len == 0 { 0 } else { self.selected_index.min(len - 1) };
        let favorites = self.favorites.len();
        self.favorites_index = if favorites == 0 {
            0
        } else {
            self.favorites_index.min(favorites - 1)
        };
    }

    #[must_use]
    pub fn selected_country(&self) -> Option<&Country> {
        self.catalog.visible().get(self.selected_index)
    }

    #[must_use]
    pub fn selected_favorite(&self) -> Option<&str> {
        self.favorites.names().get(self.favorites_index).map(String::as_str)
    }

    /// Recomputes suggestions for the current search text.
    pub fn refresh_suggestions(&mut self) {
        self.suggestions = suggest(self.catalog.catalog(), &self.search_query, self.suggestion_limit);
        self.suggestion_index = self
            .suggestion_index
            .filter(|&i| i < self.suggestions.matches.len());
    }

    pub fn clear_suggestions(&mut self) {
        self.suggestions = Suggestions::default();
        self.suggestion_limit = SuggestionLimit::default();
        self.suggestion_index = None;
    }

    #[must_use]
    pub fn selected_suggestion(&self) -> Option<&Country> {
        self.suggestion_index
            .and_then(|i| self.suggestions.matches.get(i))
    }

    /// Picker entries; the first one clears the filter.
    #[must_use]
    pub fn picker_options(&self, kind: PickerKind) -> Vec<String> {
        let mut options = vec![kind.clear_label().to_string()];
        match kind {
            PickerKind::Region => {
                options.extend(Region::ALL.iter().map(|r| r.as_str().to_string()));
            }
            PickerKind::Language => options.extend(self.languages.iter().cloned()),
        }
        options
    }

    /// Index of the picker entry matching the applied filter.
    #[must_use]
    pub fn active_picker_index(&self, kind: PickerKind) -> usize {
        let criteria = self.catalog.criteria();
        let active = match kind {
            PickerKind::Region => &criteria.region,
            PickerKind::Language => &criteria.language,
        };
        if active.is_empty() {
            return 0;
        }
        self.picker_options(kind)
            .iter()
            .skip(1)
            .position(|option| option == active)
            .map_or(0, |i| i + 1)
    }

    /// Computes a renderable view model for a `rows` x `cols` pane.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let favorites = self.compute_favorites_panel();
        let notice = self.compute_notice();

        let body = match (self.screen, self.input_mode) {
            (Screen::Detail, _) => Body::Detail(self.compute_detail_view()),
            (Screen::Catalog, InputMode::Picker(kind)) => Body::Picker(self.compute_picker(kind)),
            (Screen::Catalog, _) => {
                let chrome = self.chrome_rows(favorites.as_ref(), notice.is_some());
                let available = rows.saturating_sub(chrome);
                Body::List(self.compute_list_view(available, cols))
            }
        };

        UIViewModel {
            header: self.compute_header(),
            body,
            favorites: (self.screen == Screen::Catalog).then_some(favorites).flatten(),
            notice,
            footer: self.compute_footer(),
        }
    }

    /// Rows taken by everything except the table body.
    ///
    /// Blank, header, border, status, column titles, border and footer, plus
    /// a trailing blank line; the search box, suggestions, favorites panel and
    /// notice add to that when present.
    fn chrome_rows(&self, favorites: Option<&FavoritesPanel>, has_notice: bool) -> usize {
        let mut chrome = 8;
        if self.input_mode == InputMode::Search {
            chrome += 3 + self.suggestions.matches.len();
            if self.suggestions.has_more {
                chrome += 1;
            }
        }
        if let Some(panel) = favorites {
            chrome += panel.names.len() + 2;
        }
        if has_notice {
            chrome += 1;
        }
        chrome
    }

    fn compute_list_view(&self, available_rows: usize, cols: usize) -> ListView {
        let visible = self.catalog.visible();

        let mut visible_start = self
            .selected_index
            .saturating_sub(available_rows / 2)
            .min(visible.len());
        let visible_end = (visible_start + available_rows).min(visible.len());
        if visible_end - visible_start < available_rows && visible.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let highlight = &self.catalog.criteria().search;
        let display_items = visible[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, country)| {
                let absolute_idx = visible_start + relative_idx;
                self.compute_display_item(country, absolute_idx, highlight, cols)
            })
            .collect();

        let empty_state = (self.catalog.phase() == &CatalogPhase::Ready && visible.is_empty())
            .then(|| EmptyState {
                message: "No countries match".to_string(),
                subtitle: "Try another search, region or language".to_string(),
            });

        ListView {
            search_bar: self.compute_search_bar(),
            status: self.compute_status(),
            display_items,
            empty_state,
        }
    }

    fn compute_display_item(&self, country: &Country, absolute_idx: usize, highlight: &str, cols: usize) -> DisplayItem {
        let name_width = NAME_COLUMN_WIDTH.min(cols.saturating_sub(4));
        let highlight_ranges = if self.input_mode == InputMode::Normal || self.input_mode == InputMode::Favorites {
            match_range(country.common_name(), highlight).into_iter().collect()
        } else {
            Vec::new()
        };

        DisplayItem {
            flag: country.flag_glyph().to_string(),
            name: truncate(country.common_name(), name_width),
            region: truncate(&country.region, REGION_COLUMN_WIDTH),
            population: group_thousands(country.population),
            is_selected: absolute_idx == self.selected_index && self.input_mode == InputMode::Normal,
            is_favorite: self.favorites.contains(country.common_name()),
            highlight_ranges,
        }
    }

    fn compute_status(&self) -> StatusLine {
        match self.catalog.phase() {
            CatalogPhase::Idle if !self.web_access => StatusLine {
                text: "Waiting for web access permission…".to_string(),
                kind: StatusKind::Loading,
            },
            CatalogPhase::Idle | CatalogPhase::Loading => StatusLine {
                text: "Loading countries…".to_string(),
                kind: StatusKind::Loading,
            },
            CatalogPhase::Error(message) => StatusLine {
                text: format!("{message}  (R: retry)"),
                kind: StatusKind::Error,
            },
            CatalogPhase::Ready => {
                let filter = self
                    .catalog
                    .criteria()
                    .describe()
                    .unwrap_or_else(|| "All countries".to_string());
                let mut text = format!(
                    "{filter} · showing {} of {}",
                    self.catalog.visible().len(),
                    self.catalog.filtered().len()
                );
                if self.catalog.has_more_pages() {
                    text.push_str("  (m: show more)");
                }
                StatusLine {
                    text,
                    kind: StatusKind::Normal,
                }
            }
        }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        if self.input_mode != InputMode::Search {
            return None;
        }
        let suggestions = self
            .suggestions
            .matches
            .iter()
            .enumerate()
            .map(|(i, country)| SuggestionItem {
                flag: country.flag_glyph().to_string(),
                name: country.common_name().to_string(),
                highlight: match_range(country.common_name(), &self.search_query),
                is_selected: self.suggestion_index == Some(i),
            })
            .collect();

        Some(SearchBarInfo {
            query: self.search_query.clone(),
            suggestions,
            has_more: self.suggestions.has_more,
        })
    }

    fn compute_picker(&self, kind: PickerKind) -> PickerView {
        let active = self.active_picker_index(kind);
        PickerView {
            title: kind.title().to_string(),
            options: self
                .picker_options(kind)
                .into_iter()
                .enumerate()
                .map(|(i, label)| PickerOption {
                    label,
                    is_selected: i == self.picker_index,
                    is_active: i == active,
                })
                .collect(),
        }
    }

    fn compute_detail_view(&self) -> DetailView {
        let is_favorite = self.favorites.contains(self.detail.requested_name());
        match self.detail.phase() {
            DetailPhase::Loaded(country) => DetailView {
                flag: country.flag_glyph().to_string(),
                name: country.common_name().to_string(),
                fields: detail_fields(country),
                is_favorite,
                message: None,
                message_is_error: false,
            },
            DetailPhase::Loading { name } => DetailView {
                flag: String::new(),
                name: name.clone(),
                fields: Vec::new(),
                is_favorite,
                message: Some(format!("Loading {name}…")),
                message_is_error: false,
            },
            DetailPhase::NotFound { name } | DetailPhase::Error { name, .. } => DetailView {
                flag: String::new(),
                name: name.clone(),
                fields: Vec::new(),
                is_favorite,
                message: self.detail.message(),
                message_is_error: true,
            },
            DetailPhase::Idle => DetailView {
                flag: String::new(),
                name: String::new(),
                fields: Vec::new(),
                is_favorite: false,
                message: None,
                message_is_error: false,
            },
        }
    }

    fn compute_favorites_panel(&self) -> Option<FavoritesPanel> {
        if self.favorites.is_empty() {
            return None;
        }
        Some(FavoritesPanel {
            names: self.favorites.names().to_vec(),
            selected: (self.input_mode == InputMode::Favorites).then_some(self.favorites_index),
            capacity: MAX_FAVORITES,
        })
    }

    fn compute_notice(&self) -> Option<NoticeInfo> {
        if self.input_mode == InputMode::Confirm {
            return Some(NoticeInfo {
                message: format!("Add {} to your favorites? (y/n)", self.detail.requested_name()),
                kind: NoticeKind::Prompt,
            });
        }
        self.notice.as_ref().map(|notice| NoticeInfo {
            message: notice.message.clone(),
            kind: notice.kind,
        })
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match self.screen {
            Screen::Catalog => " Countries ".to_string(),
            Screen::Detail => format!(" Countries › {} ", self.detail.requested_name()),
        };
        HeaderInfo { title }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.screen, self.input_mode) {
            (_, InputMode::Confirm) => "y: add  n/Esc: cancel",
            (Screen::Detail, _) => "f: toggle favorite  R: reload  b/Esc: back  q: quit",
            (Screen::Catalog, InputMode::Search) => {
                "Type to search  Ctrl+n/p: suggestions  Tab: show all  Enter: search/open  Esc: cancel"
            }
            (Screen::Catalog, InputMode::Picker(_)) => "j/k: move  Enter: apply  Esc: cancel",
            (Screen::Catalog, InputMode::Favorites) => "j/k: move  Enter: details  d: remove  Esc: back",
            (Screen::Catalog, InputMode::Normal) => {
                "j/k: move  Enter: details  /: search  r: region  l: language  m: more  F: favorites  R: reload  q: quit"
            }
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// Label/value rows of the details view.
#[must_use]
pub fn detail_fields(country: &Country) -> Vec<(String, String)> {
    let mut fields = Vec::with_capacity(7);
    if !country.name.official.is_empty() {
        fields.push(("Official name".to_string(), country.name.official.clone()));
    }
    fields.push(("Capital".to_string(), country.capital_display().to_string()));
    fields.push(("Region".to_string(), country.region.clone()));
    fields.push(("Population".to_string(), group_thousands(country.population)));
    fields.push(("Area".to_string(), format_area(country.area)));
    fields.push(("Languages".to_string(), country.languages_display()));
    let flag_image = if country.flags.png.is_empty() {
        &country.flags.svg
    } else {
        &country.flags.png
    };
    if !flag_image.is_empty() {
        fields.push(("Flag".to_string(), flag_image.clone()));
    }
    fields
}

/// Area in km² with thousands separators, keeping up to two decimals.
#[must_use]
pub fn format_area(area: f64) -> String {
    if !area.is_finite() || area <= 0.0 {
        return "N/A".to_string();
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let hundredths = (area * 100.0).round() as u64;
    let whole = group_thousands(hundredths / 100);
    match hundredths % 100 {
        0 => format!("{whole} km²"),
        fraction => {
            let fraction = format!("{fraction:02}");
            format!("{whole}.{} km²", fraction.trim_end_matches('0'))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::{DateTime, Utc};

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn state_with(countries: Vec<Country>) -> AppState {
        let mut state = AppState::new(
            FavoritesStore::new(Box::new(MemoryStore::new())),
            Theme::default(),
        );
        state.web_access = true;
        let request = state.catalog.reload(t0());
        state.catalog.complete(request.token, Ok(countries));
        state
    }

    #[test]
    fn selection_wraps() {
        let mut state = state_with(vec![Country::named("A"), Country::named("B")]);
        state.move_selection_up();
        assert_eq!(state.selected_index, 1);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn list_view_shows_status_and_rows() {
        let state = state_with(vec![Country::named("Chile"), Country::named("Peru")]);
        let vm = state.compute_viewmodel(30, 100);
        let Body::List(list) = vm.body else {
            panic!("expected list body");
        };
        assert_eq!(list.display_items.len(), 2);
        assert!(list.display_items[0].is_selected);
        assert_eq!(list.status.text, "All countries · showing 2 of 2");
    }

    #[test]
    fn list_is_windowed_to_available_rows() {
        let countries = (0..12).map(|i| Country::named(format!("C{i}"))).collect();
        let state = state_with(countries);
        let vm = state.compute_viewmodel(13, 100);
        let Body::List(list) = vm.body else {
            panic!("expected list body");
        };
        assert_eq!(list.display_items.len(), 5);
    }

    #[test]
    fn empty_ready_catalog_has_empty_state() {
        let state = state_with(Vec::new());
        let Body::List(list) = state.compute_viewmodel(24, 80).body else {
            panic!("expected list body");
        };
        assert!(list.empty_state.is_some());
    }

    #[test]
    fn picker_marks_active_option() {
        let mut state = state_with(Vec::new());
        state.catalog.select_region("Asia", t0());
        state.input_mode = InputMode::Picker(PickerKind::Region);
        state.picker_index = state.active_picker_index(PickerKind::Region);
        let Body::Picker(picker) = state.compute_viewmodel(24, 80).body else {
            panic!("expected picker body");
        };
        assert_eq!(picker.options[0].label, "All regions");
        assert!(picker.options[4].is_active);
        assert_eq!(picker.options[4].label, "Asia");
    }

    #[test]
    fn detail_fields_format_values() {
        let mut country = Country::named("Japan")
            .with_region("Asia")
            .with_language("jpn", "Japanese");
        country.capital = vec!["Tokyo".to_string()];
        country.population = 125_836_021;
        country.area = 377_930.0;
        let fields = detail_fields(&country);
        assert!(fields.contains(&("Capital".to_string(), "Tokyo".to_string())));
        assert!(fields.contains(&("Population".to_string(), "125,836,021".to_string())));
        assert!(fields.contains(&("Area".to_string(), "377,930 km²".to_string())));
        assert!(fields.contains(&("Languages".to_string(), "Japanese".to_string())));
    }

    #[test]
    fn format_area_handles_missing() {
        assert_eq!(format_area(0.0), "N/A");
        assert_eq!(format_area(f64::NAN), "N/A");
    }

    #[test]
    fn format_area_keeps_fractional_km2() {
        assert_eq!(format_area(0.49), "0.49 km²");
        assert_eq!(format_area(2.02), "2.02 km²");
        assert_eq!(format_area(1_234.5), "1,234.5 km²");
        assert_eq!(format_area(9_984_670.0), "9,984,670 km²");
    }

    #[test]
    fn small_countries_show_their_real_area() {
        let mut vatican = Country::named("Vatican City");
        vatican.area = 0.49;
        let fields = detail_fields(&vatican);
        assert!(fields.contains(&("Area".to_string(), "0.49 km²".to_string())));
    }
}
