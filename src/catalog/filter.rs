//! Filter engine over the fetched catalog.
//!
//! Pure functions: no I/O, no state. The three criteria are mutually
//! exclusive and checked in a fixed precedence (search, then region, then
//! language); the controller guarantees at most one is set.

use super::collate::locale_cmp;
use crate::domain::Country;

/// Transient user-selected constraints applied to the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the common name.
    pub search: String,
    /// Exact region name.
    pub region: String,
    /// Exact language name.
    pub language: String,
}

impl FilterCriteria {
    #[must_use]
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search: text.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn region(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn language(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Self::default()
        }
    }

    /// `true` when no criterion is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.region.is_empty() && self.language.is_empty()
    }

    /// Short description for headers, e.g. `region: Europe`.
    #[must_use]
    pub fn describe(&self) -> Option<String> {
        if !self.search.is_empty() {
            Some(format!("search: {}", self.search))
        } else if !self.region.is_empty() {
            Some(format!("region: {}", self.region))
        } else if !self.language.is_empty() {
            Some(format!("language: {}", self.language))
        } else {
            None
        }
    }
}

/// Returns `true` if `name` contains `query`, ignoring case.
#[must_use]
pub fn name_matches(name: &str, query_lower: &str) -> bool {
    name.to_lowercase().contains(query_lower)
}

/// Applies `criteria` to `countries`.
///
/// - search: substring match on the common name, input order kept
/// - region: exact match, sorted by common name (locale-aware)
/// - language: exact match against any language name, input order kept
/// - nothing set: the full list in input order
///
/// # Examples
///
/// ```
/// use zcountries::catalog::{filter, FilterCriteria};
/// use zcountries::Country;
///
/// let all = vec![Country::named("Australia"), Country::named("Canada")];
/// let result = filter(&all, &FilterCriteria::search("canada"));
/// assert_eq!(result.len(), 1);
/// assert_eq!(result[0].common_name(), "Canada");
/// ```
#[must_use]
pub fn filter(countries: &[Country], criteria: &FilterCriteria) -> Vec<Country> {
    let _span = tracing::debug_span!(
        "filter",
        total = countries.len(),
        criteria = ?criteria.describe()
    )
    .entered();

    let result: Vec<Country> = if !criteria.search.is_empty() {
        let query = criteria.search.to_lowercase();
        countries
            .iter()
            .filter(|c| name_matches(c.common_name(), &query))
            .cloned()
            .collect()
    } else if !criteria.region.is_empty() {
        let mut matched: Vec<Country> = countries
            .iter()
            .filter(|c| c.region == criteria.region)
            .cloned()
            .collect();
        matched.sort_by(|a, b| locale_cmp(a.common_name(), b.common_name()));
        matched
    } else if !criteria.language.is_empty() {
        countries
            .iter()
            .filter(|c| c.speaks(&criteria.language))
            .cloned()
            .collect()
    } else {
        countries.to_vec()
    };

    tracing::debug!(matched = result.len(), "filter applied");
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(countries: &[Country]) -> Vec<&str> {
        countries.iter().map(Country::common_name).collect()
    }

    fn sample() -> Vec<Country> {
        vec![
            Country::named("Germany").with_region("Europe").with_language("deu", "German"),
            Country::named("Australia").with_region("Oceania").with_language("eng", "English"),
            Country::named("Austria").with_region("Europe").with_language("deu", "German"),
            Country::named("Canada")
                .with_region("Americas")
                .with_language("eng", "English")
                .with_language("fra", "French"),
            Country::named("Åland Islands").with_region("Europe").with_language("swe", "Swedish"),
        ]
    }

    #[test]
    fn no_criteria_is_identity() {
        let all = sample();
        assert_eq!(filter(&all, &FilterCriteria::default()), all);
    }

    #[test]
    fn search_is_case_insensitive_and_keeps_order() {
        let result = filter(&sample(), &FilterCriteria::search("AUST"));
        assert_eq!(names(&result), vec!["Australia", "Austria"]);
    }

    #[test]
    fn region_is_exact_and_sorted() {
        let result = filter(&sample(), &FilterCriteria::region("Europe"));
        assert_eq!(names(&result), vec!["Åland Islands", "Austria", "Germany"]);
        assert!(filter(&sample(), &FilterCriteria::region("europe")).is_empty());
    }

    #[test]
    fn language_matches_any_language_name() {
        let result = filter(&sample(), &FilterCriteria::language("English"));
        assert_eq!(names(&result), vec!["Australia", "Canada"]);
        assert_eq!(names(&filter(&sample(), &FilterCriteria::language("French"))), vec!["Canada"]);
    }

    #[test]
    fn search_takes_precedence() {
        let criteria = FilterCriteria {
            search: "can".into(),
            region: "Europe".into(),
            language: String::new(),
        };
        assert_eq!(names(&filter(&sample(), &criteria)), vec!["Canada"]);
    }

    #[test]
    fn empty_result_is_valid() {
        assert!(filter(&sample(), &FilterCriteria::search("zzz")).is_empty());
        assert!(filter(&[], &FilterCriteria::region("Asia")).is_empty());
    }

    #[test]
    fn describe_names_the_active_criterion() {
        assert_eq!(FilterCriteria::default().describe(), None);
        assert_eq!(
            FilterCriteria::language("Spanish").describe().as_deref(),
            Some("language: Spanish")
        );
    }
}
