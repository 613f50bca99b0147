//! Screen addressing.
//!
//! A details view is addressed as `details?country=<name>` with the name
//! percent-encoded; `index` (or an empty string) addresses the catalog. The
//! plugin accepts a route in its `route` configuration key to open directly
//! on a country.

use crate::api::encode_component;
use percent_encoding::percent_decode_str;

/// Where the plugin is looking.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Catalog,
    Detail {
        country: String,
    },
}

impl Route {
    #[must_use]
    pub fn detail(country: impl Into<String>) -> Self {
        Self::Detail {
            country: country.into(),
        }
    }

    /// Renders the route.
    ///
    /// ```
    /// use zcountries::app::Route;
    ///
    /// assert_eq!(Route::detail("Côte d'Ivoire").to_query(), "details?country=C%C3%B4te%20d'Ivoire");
    /// assert_eq!(Route::Catalog.to_query(), "index");
    /// ```
    #[must_use]
    pub fn to_query(&self) -> String {
        match self {
            Self::Catalog => "index".to_string(),
            Self::Detail { country } => format!("details?country={}", encode_component(country)),
        }
    }

    /// Parses a route. Unknown routes and a details route without a usable
    /// `country` parameter yield `None`.
    #[must_use]
    pub fn parse_query(route: &str) -> Option<Self> {
        let route = route.trim().trim_start_matches('/');
        let (page, query) = route.split_once('?').unwrap_or((route, ""));
        let page = page.trim_end_matches(".html");

        match page {
            "" | "index" => Some(Self::Catalog),
            "details" => {
                let raw = query
                    .split('&')
                    .filter_map(|pair| pair.split_once('='))
                    .find(|(key, _)| *key == "country")
                    .map(|(_, value)| value)?;
                let country = percent_decode_str(&raw.replace('+', " "))
                    .decode_utf8()
                    .ok()?
                    .into_owned();
                if country.trim().is_empty() {
                    None
                } else {
                    Some(Self::Detail { country })
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_detail_routes() {
        assert_eq!(
            Route::parse_query("details?country=United%20States"),
            Some(Route::detail("United States"))
        );
        assert_eq!(
            Route::parse_query("/details.html?lang=en&country=S%C3%A3o+Tom%C3%A9"),
            Some(Route::detail("São Tomé"))
        );
    }

    #[test]
    fn catalog_routes() {
        assert_eq!(Route::parse_query(""), Some(Route::Catalog));
        assert_eq!(Route::parse_query("index.html"), Some(Route::Catalog));
    }

    #[test]
    fn rejects_unusable_routes() {
        assert_eq!(Route::parse_query("details"), None);
        assert_eq!(Route::parse_query("details?country="), None);
        assert_eq!(Route::parse_query("settings"), None);
    }

    #[test]
    fn round_trips_encoded_names() {
        let route = Route::detail("Bosnia and Herzegovina");
        assert_eq!(Route::parse_query(&route.to_query()), Some(route));
    }
}
