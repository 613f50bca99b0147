//! Live search suggestions.

use super::filter::name_matches;
use crate::domain::Country;

/// Number of suggestions shown before the "show all" affordance appears.
pub const SUGGESTION_CAP: usize = 5;

/// How many matches [`suggest`] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionLimit {
    /// At most this many, with `has_more` set when matches were cut off.
    Capped(usize),
    /// Every match.
    All,
}

impl Default for SuggestionLimit {
    fn default() -> Self {
        Self::Capped(SUGGESTION_CAP)
    }
}

/// Result of a suggestion query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Suggestions {
    pub matches: Vec<Country>,
    pub has_more: bool,
}

impl Suggestions {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Matches `query` against the common names in `countries`.
///
/// Uses the same case-insensitive substring rule as the search filter and
/// keeps the catalog order. An empty query yields no suggestions.
///
/// # Examples
///
/// ```
/// use zcountries::catalog::{suggest, SuggestionLimit};
/// use zcountries::Country;
///
/// let all: Vec<Country> = ["Mali", "Malta", "Malawi", "Malaysia", "Maldives", "Somalia"]
///     .into_iter()
///     .map(Country::named)
///     .collect();
///
/// let capped = suggest(&all, "mal", SuggestionLimit::default());
/// assert_eq!(capped.matches.len(), 5);
/// assert!(capped.has_more);
///
/// let everything = suggest(&all, "mal", SuggestionLimit::All);
/// assert_eq!(everything.matches.len(), 6);
/// assert!(!everything.has_more);
/// ```
#[must_use]
pub fn suggest(countries: &[Country], query: &str, limit: SuggestionLimit) -> Suggestions {
    if query.is_empty() {
        return Suggestions::default();
    }

    let query = query.to_lowercase();
    let mut matching = countries
        .iter()
        .filter(|c| name_matches(c.common_name(), &query));

    match limit {
        SuggestionLimit::All => Suggestions {
            matches: matching.cloned().collect(),
            has_more: false,
        },
        SuggestionLimit::Capped(cap) => {
            let matches: Vec<Country> = matching.by_ref().take(cap).cloned().collect();
            Suggestions {
                matches,
                has_more: matching.next().is_some(),
            }
        }
    }
}
