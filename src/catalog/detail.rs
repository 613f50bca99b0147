//! Detail controller: a single country's record.

use super::controller::{Completion, DEFAULT_TIMEOUT_SECS};
use super::tracker::RequestTracker;
use crate::api::{ApiRequest, CountryApi, RequestToken};
use crate::domain::{Country, Result, ZcountriesError};
use chrono::{DateTime, Duration, Utc};

/// Message shown when a lookup fails for any reason other than "not found".
pub const DETAIL_ERROR_MESSAGE: &str = "Failed to load country details. Please try again later.";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DetailPhase {
    #[default]
    Idle,
    Loading {
        name: String,
    },
    Loaded(Box<Country>),
    NotFound {
        name: String,
    },
    Error {
        name: String,
        message: String,
    },
}

/// Fetches and holds the record shown on the details screen.
#[derive(Debug, Clone)]
pub struct DetailController {
    api: CountryApi,
    tracker: RequestTracker,
    phase: DetailPhase,
}

impl Default for DetailController {
    fn default() -> Self {
        Self::new(CountryApi::default(), Duration::seconds(DEFAULT_TIMEOUT_SECS as i64))
    }
}

impl DetailController {
    #[must_use]
    pub fn new(api: CountryApi, timeout: Duration) -> Self {
        Self {
            api,
            tracker: RequestTracker::new(timeout),
            phase: DetailPhase::Idle,
        }
    }

    /// Starts loading `name`, superseding any earlier lookup.
    pub fn open(&mut self, name: &str, now: DateTime<Utc>) -> ApiRequest {
        tracing::debug!(country = name, "opening details");
        self.phase = DetailPhase::Loading {
            name: name.to_string(),
        };
        let token = self.tracker.issue(now);
        self.api.country_by_name(name, token)
    }

    /// Applies a lookup result.
    ///
    /// Picks the record whose common name matches exactly, else the first one.
    /// An empty result or a 404 means the name is unknown.
    pub fn complete(&mut self, token: RequestToken, outcome: Result<Vec<Country>>) -> Completion {
        if !self.tracker.accept(token) {
            tracing::debug!(token = %token, "discarding stale detail response");
            return Completion::Stale;
        }

        let name = self.requested_name().to_string();
        self.phase = match outcome {
            Ok(mut countries) => {
                let index = countries
                    .iter()
                    .position(|c| c.common_name() == name)
                    .or_else(|| (!countries.is_empty()).then_some(0));
                match index {
                    Some(index) => DetailPhase::Loaded(Box::new(countries.swap_remove(index))),
                    None => DetailPhase::NotFound { name },
                }
            }
            Err(ZcountriesError::HttpStatus(404)) => DetailPhase::NotFound { name },
            Err(e) => {
                tracing::warn!(country = %name, error = %e, "detail fetch failed");
                DetailPhase::Error {
                    name,
                    message: DETAIL_ERROR_MESSAGE.to_string(),
                }
            }
        };
        Completion::Applied
    }

    /// Fails the pending lookup once its deadline has passed.
    pub fn check_timeout(&mut self, now: DateTime<Utc>) -> bool {
        if self.tracker.expire(now).is_none() {
            return false;
        }
        let name = self.requested_name().to_string();
        tracing::warn!(country = %name, error = %self.tracker.timeout_error(), "detail request timed out");
        self.phase = DetailPhase::Error {
            name,
            message: DETAIL_ERROR_MESSAGE.to_string(),
        };
        true
    }

    /// Leaves the details screen. A pending lookup is abandoned.
    pub fn close(&mut self) {
        self.tracker.cancel();
        self.phase = DetailPhase::Idle;
    }

    #[must_use]
    pub fn phase(&self) -> &DetailPhase {
        &self.phase
    }

    #[must_use]
    pub fn country(&self) -> Option<&Country> {
        match &self.phase {
            DetailPhase::Loaded(country) => Some(country),
            _ => None,
        }
    }

    /// Name the current lookup was opened with, or the loaded record's name.
    #[must_use]
    pub fn requested_name(&self) -> &str {
        match &self.phase {
            DetailPhase::Idle => "",
            DetailPhase::Loading { name }
            | DetailPhase::NotFound { name }
            | DetailPhase::Error { name, .. } => name,
            DetailPhase::Loaded(country) => country.common_name(),
        }
    }

    /// User-facing message for the not-found and error phases.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match &self.phase {
            DetailPhase::NotFound { name } => Some(ZcountriesError::NotFound(name.clone()).to_string()),
            DetailPhase::Error { message, .. } => Some(message.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn prefers_exact_common_name() {
        let mut detail = DetailController::default();
        let request = detail.open("Niger", t0());
        assert!(request.url.ends_with("/name/Niger?fullText=true"));

        let result = vec![Country::named("Nigeria"), Country::named("Niger")];
        detail.complete(request.token, Ok(result));
        assert_eq!(detail.country().map(Country::common_name), Some("Niger"));
    }

    #[test]
    fn falls_back_to_first_record() {
        let mut detail = DetailController::default();
        let request = detail.open("UK", t0());
        detail.complete(request.token, Ok(vec![Country::named("United Kingdom")]));
        assert_eq!(detail.country().map(Country::common_name), Some("United Kingdom"));
    }

    #[test]
    fn empty_and_404_are_not_found() {
        let mut detail = DetailController::default();
        let request = detail.open("Atlantis", t0());
        detail.complete(request.token, Ok(Vec::new()));
        assert_eq!(detail.message().as_deref(), Some("No country found named Atlantis"));

        let request = detail.open("Atlantis", t0());
        detail.complete(request.token, Err(ZcountriesError::HttpStatus(404)));
        assert!(matches!(detail.phase(), DetailPhase::NotFound { .. }));
    }

    #[test]
    fn other_failures_are_errors() {
        let mut detail = DetailController::default();
        let request = detail.open("Peru", t0());
        detail.complete(request.token, Err(ZcountriesError::HttpStatus(500)));
        assert_eq!(detail.message().as_deref(), Some(DETAIL_ERROR_MESSAGE));
        assert_eq!(detail.requested_name(), "Peru");
    }

    #[test]
    fn closing_discards_the_pending_lookup() {
        let mut detail = DetailController::default();
        let request = detail.open("Chile", t0());
        detail.close();
        assert_eq!(detail.complete(request.token, Ok(vec![Country::named("Chile")])), Completion::Stale);
        assert_eq!(detail.phase(), &DetailPhase::Idle);
    }

    #[test]
    fn timeout_becomes_error() {
        let mut detail = DetailController::new(CountryApi::default(), Duration::seconds(2));
        detail.open("Chad", t0());
        assert!(detail.check_timeout(t0() + Duration::seconds(3)));
        assert_eq!(detail.message().as_deref(), Some(DETAIL_ERROR_MESSAGE));
    }
}
