//! Catalog controller: fetch, filter, page.
//!
//! The controller never performs I/O. Operations that need the network return
//! an [`ApiRequest`] for the caller to issue, and the host's answer comes back
//! through [`CatalogController::complete`].

use super::filter::{filter, FilterCriteria};
use super::tracker::RequestTracker;
use crate::api::{ApiRequest, CountryApi, RequestToken};
use crate::domain::{Country, Result};
use chrono::{DateTime, Duration, Utc};

/// Rows added per "show more".
pub const PAGE_SIZE: usize = 12;

/// Message shown for any catalog fetch failure.
pub const CATALOG_ERROR_MESSAGE: &str = "Could not load country data. Please try again later.";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Lifecycle of the catalog list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogPhase {
    #[default]
    Idle,
    Loading,
    Ready,
    Error(String),
}

/// What happened to a completion handed to a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The result belonged to the current request and was applied.
    Applied,
    /// The result belonged to a superseded or expired request and was dropped.
    Stale,
}

/// Owns the fetched catalog, the active criteria and the page cursor.
#[derive(Debug, Clone)]
pub struct CatalogController {
    api: CountryApi,
    tracker: RequestTracker,
    criteria: FilterCriteria,
    catalog: Vec<Country>,
    filtered: Vec<Country>,
    page: usize,
    phase: CatalogPhase,
}

impl Default for CatalogController {
    fn default() -> Self {
        Self::new(CountryApi::default(), Duration::seconds(DEFAULT_TIMEOUT_SECS as i64))
    }
}

impl CatalogController {
    #[must_use]
    pub fn new(api: CountryApi, timeout: Duration) -> Self {
        Self {
            api,
            tracker: RequestTracker::new(timeout),
            criteria: FilterCriteria::default(),
            catalog: Vec::new(),
            filtered: Vec::new(),
            page: 1,
            phase: CatalogPhase::Idle,
        }
    }

    /// Commits a search. Clears region and language.
    pub fn set_search(&mut self, text: &str, now: DateTime<Utc>) -> ApiRequest {
        self.apply_criteria(FilterCriteria::search(text), now)
    }

    /// Selects a region (empty string clears the filter). Clears search and language.
    pub fn select_region(&mut self, region: &str, now: DateTime<Utc>) -> ApiRequest {
        self.apply_criteria(FilterCriteria::region(region), now)
    }

    /// Selects a language (empty string clears the filter). Clears search and region.
    pub fn select_language(&mut self, language: &str, now: DateTime<Utc>) -> ApiRequest {
        self.apply_criteria(FilterCriteria::language(language), now)
    }

    /// Re-fetches with the current criteria.
    pub fn reload(&mut self, now: DateTime<Utc>) -> ApiRequest {
        self.page = 1;
        self.fetch(now)
    }

    fn apply_criteria(&mut self, criteria: FilterCriteria, now: DateTime<Utc>) -> ApiRequest {
        tracing::debug!(criteria = ?criteria.describe(), "criteria changed");
        self.criteria = criteria;
        self.page = 1;
        self.fetch(now)
    }

    fn fetch(&mut self, now: DateTime<Utc>) -> ApiRequest {
        self.phase = CatalogPhase::Loading;
        let token = self.tracker.issue(now);
        self.api.all_countries(token)
    }

    /// Applies the result of a catalog request.
    ///
    /// Results for anything but the latest request are discarded. A failure
    /// keeps the previously shown list.
    pub fn complete(&mut self, token: RequestToken, outcome: Result<Vec<Country>>) -> Completion {
        let _span = tracing::debug_span!("catalog_complete", token = %token).entered();

        if !self.tracker.accept(token) {
            tracing::debug!("discarding stale catalog response");
            return Completion::Stale;
        }

        match outcome {
            Ok(countries) => {
                self.catalog = countries;
                self.filtered = filter(&self.catalog, &self.criteria);
                self.phase = CatalogPhase::Ready;
                tracing::info!(
                    total = self.catalog.len(),
                    shown = self.filtered.len(),
                    "catalog loaded"
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, "catalog fetch failed");
                self.phase = CatalogPhase::Error(CATALOG_ERROR_MESSAGE.to_string());
            }
        }
        Completion::Applied
    }

    /// Fails the pending request if its deadline has passed. Returns `true`
    /// when the phase changed.
    pub fn check_timeout(&mut self, now: DateTime<Utc>) -> bool {
        match self.tracker.expire(now) {
            Some(token) => {
                tracing::warn!(token = %token, error = %self.tracker.timeout_error(), "catalog request timed out");
                self.phase = CatalogPhase::Error(CATALOG_ERROR_MESSAGE.to_string());
                true
            }
            None => false,
        }
    }

    /// Advances the page cursor. Returns `false` when everything is already visible.
    pub fn show_more(&mut self) -> bool {
        if self.has_more_pages() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// The filtered list truncated to the current page.
    #[must_use]
    pub fn visible(&self) -> &[Country] {
        let end = self.filtered.len().min(self.page.saturating_mul(PAGE_SIZE));
        &self.filtered[..end]
    }

    #[must_use]
    pub fn has_more_pages(&self) -> bool {
        self.filtered.len() > self.page.saturating_mul(PAGE_SIZE)
    }

    /// Full catalog from the last successful fetch.
    #[must_use]
    pub fn catalog(&self) -> &[Country] {
        &self.catalog
    }

    #[must_use]
    pub fn filtered(&self) -> &[Country] {
        &self.filtered
    }

    #[must_use]
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn phase(&self) -> &CatalogPhase {
        &self.phase
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == CatalogPhase::Loading
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            CatalogPhase::Error(message) => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub fn timeout_secs(&self) -> f64 {
        self.tracker.timeout_secs()
    }
}
