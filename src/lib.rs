//! zcountries: a Zellij plugin for browsing the countries of the world.
//!
//! The plugin fetches the country catalog from the REST Countries API and
//! offers:
//! - Live search with capped suggestions, plus region and language filters
//! - Paged browsing, twelve countries at a time
//! - A details view per country
//! - Up to five favorites, persisted across sessions

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Host calls
//! └─────────────────────────────────────────────────────┘
//!                        │ Event ↓   ↑ Action
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Key bindings, event handling                     │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Catalog Layer │   │ Storage Layer │
//! │ (ui/)         │   │ (catalog/)    │   │ (storage/)    │
//! │ - Components  │   │ - Filtering   │   │ - Key/value   │
//! │ - Theming     │   │ - Suggestions │   │ - Favorites   │
//! │               │   │ - Controllers │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────┐
//! │  API (api/), Domain (domain/), Infrastructure       │
//! │  - Request building, response decoding              │
//! │  - Country model, errors, sandbox paths             │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The library never calls the Zellij host. Web requests and timers are
//! returned as [`Action`]s for the shim to execute, and their results come
//! back as [`Event`]s, which keeps everything below `main.rs` testable on
//! the native target.
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/zcountries.wasm" {
//!         api_base_url "https://restcountries.com/v3.1"
//!         request_timeout_secs "5"
//!         languages "English,French,Spanish"
//!         route "details?country=Japan"
//!         theme "catppuccin-latte"
//!         trace_level "debug"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use zcountries::{handle_event, Action, AppState, Event};
//! use zcountries::storage::{FavoritesStore, MemoryStore};
//! use zcountries::Theme;
//!
//! let favorites = FavoritesStore::new(Box::new(MemoryStore::new()));
//! let mut state = AppState::new(favorites, Theme::default());
//!
//! let (render, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true }, Utc::now())?;
//! assert!(render);
//! assert!(matches!(actions[0], Action::WebRequest(_)));
//! # Ok::<(), zcountries::ZcountriesError>(())
//! ```

pub mod api;
pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod storage;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, Route, Screen};
pub use domain::{Country, Result, ZcountriesError};
pub use ui::Theme;

use api::{CountryApi, DEFAULT_API_BASE_URL};
use catalog::DEFAULT_TIMEOUT_SECS;
use infrastructure::{expand_tilde, favorites_file, get_data_dir};
use std::collections::BTreeMap;
use std::path::PathBuf;
use storage::{FavoritesStore, FileStore, KeyValueStore, MemoryStore};

/// Upper bound for `request_timeout_secs` (one day).
const MAX_TIMEOUT_SECS: i64 = 86_400;

/// Plugin configuration parsed from Zellij's configuration map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// REST Countries base URL, without a trailing slash.
    pub api_base_url: String,

    /// Seconds before a pending request is treated as failed. Default: 5
    pub request_timeout_secs: u64,

    /// Overrides the data directory holding favorites and logs.
    pub data_dir: Option<String>,

    /// Options of the language picker. Empty means the built-in list.
    pub languages: Vec<String>,

    /// Route to open once web access is granted, e.g. `details?country=Peru`.
    pub route: Option<String>,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            data_dir: None,
            languages: Vec::new(),
            route: None,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Missing, empty or unparseable values fall back to their defaults.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use zcountries::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("languages".to_string(), "English, French,,".to_string());
    /// map.insert("request_timeout_secs".to_string(), "10".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.languages, vec!["English", "French"]);
    /// assert_eq!(config.request_timeout_secs, 10);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let non_empty = |key: &str| {
            config
                .get(key)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(String::from)
        };

        let api_base_url = non_empty("api_base_url")
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| url.starts_with("http://") || url.starts_with("https://"))
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let request_timeout_secs = non_empty("request_timeout_secs")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let languages = config
            .get("languages")
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        Self {
            api_base_url,
            request_timeout_secs,
            data_dir: non_empty("data_dir"),
            languages,
            route: non_empty("route"),
            theme_name: non_empty("theme"),
            theme_file: non_empty("theme_file"),
            trace_level: non_empty("trace_level"),
        }
    }

    /// Directory for favorites and log files, with `~` expanded.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .as_deref()
            .map_or_else(get_data_dir, |dir| PathBuf::from(expand_tilde(dir)))
    }

    fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            return Theme::from_file(expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }
        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }

    fn favorites_backend(&self) -> Box<dyn KeyValueStore> {
        let data_dir = self.data_dir();
        let opened = std::fs::create_dir_all(&data_dir)
            .map_err(ZcountriesError::from)
            .and_then(|()| FileStore::open(favorites_file(&data_dir)));

        match opened {
            Ok(store) => Box::new(store),
            Err(e) => {
                tracing::warn!(data_dir = %data_dir.display(), error = %e, "favorites will not persist");
                Box::new(MemoryStore::new())
            }
        }
    }
}

/// Builds the application state described by `config`.
///
/// Favorites are read from `favorites.json` in the data directory; when that
/// cannot be opened they are kept in memory for the session. A `route` that
/// does not parse is ignored.
///
/// ```rust
/// use zcountries::{initialize, Config, Route};
///
/// let dir = tempfile::tempdir().unwrap();
/// let config = Config {
///     data_dir: Some(dir.path().display().to_string()),
///     route: Some("details?country=New%20Zealand".to_string()),
///     ..Default::default()
/// };
///
/// let state = initialize(&config);
/// assert_eq!(state.pending_route, Some(Route::detail("New Zealand")));
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    let _span = tracing::debug_span!("initialize").entered();

    let api = CountryApi::new(config.api_base_url.clone());
    let secs = i64::try_from(config.request_timeout_secs).unwrap_or(i64::MAX).min(MAX_TIMEOUT_SECS);
    let timeout = chrono::Duration::seconds(secs);

    let favorites = FavoritesStore::new(config.favorites_backend());
    tracing::debug!(count = favorites.len(), "favorites loaded");

    let mut state = AppState::new(favorites, config.theme())
        .with_api(api, timeout)
        .with_languages(config.languages.clone());

    if let Some(raw) = &config.route {
        match Route::parse_query(raw) {
            Some(route) => state = state.with_route(route),
            None => tracing::warn!(route = %raw, "ignoring unrecognized route"),
        }
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn defaults_when_map_is_empty() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("api_base_url", "ftp://example.com"),
            ("request_timeout_secs", "soon"),
            ("theme", "  "),
        ]));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.theme_name, None);
    }

    #[test]
    fn base_url_loses_trailing_slash() {
        let config = Config::from_zellij(&map(&[("api_base_url", "http://localhost:8080/v3.1/")]));
        assert_eq!(config.api_base_url, "http://localhost:8080/v3.1");
    }

    #[test]
    fn data_dir_expands_tilde() {
        let config = Config::from_zellij(&map(&[("data_dir", "~/countries")]));
        assert_eq!(config.data_dir(), PathBuf::from("/host/countries"));
        assert_eq!(Config::default().data_dir(), get_data_dir());
    }

    #[test]
    fn initialize_persists_favorites_in_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_dir: Some(dir.path().display().to_string()),
            ..Default::default()
        };

        let mut state = initialize(&config);
        state.favorites.add("Japan").unwrap();

        let reopened = initialize(&config);
        assert_eq!(reopened.favorites.names(), ["Japan".to_string()]);
        assert!(dir.path().join("favorites.json").exists());
    }

    #[test]
    fn initialize_uses_configured_languages_and_theme() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_dir: Some(dir.path().display().to_string()),
            languages: vec!["Swahili".to_string()],
            theme_name: Some("catppuccin-latte".to_string()),
            route: Some("nowhere".to_string()),
            ..Default::default()
        };

        let state = initialize(&config);
        assert_eq!(state.languages, vec!["Swahili".to_string()]);
        assert_eq!(state.theme.name, "catppuccin-latte");
        assert_eq!(state.pending_route, None);
    }
}
