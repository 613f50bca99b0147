//! Country record model.
//!
//! Records come from the REST Countries API (`/v3.1`). Only the fields the
//! directory uses are modelled; everything else in the payload is ignored by
//! serde. Records are treated as immutable once fetched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name block of a country record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CountryName {
    /// Common name, used as the identity key for favorites.
    pub common: String,

    #[serde(default)]
    pub official: String,
}

/// Flag image references.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Flags {
    #[serde(default)]
    pub svg: String,
    #[serde(default)]
    pub png: String,
}

/// A single country record as returned by the API.
///
/// # Examples
///
/// ```
/// use zcountries::Country;
///
/// let json = r#"{"name":{"common":"Canada"},"region":"Americas",
///                "languages":{"eng":"English","fra":"French"},"population":38005238}"#;
/// let country: Country = serde_json::from_str(json).unwrap();
/// assert_eq!(country.common_name(), "Canada");
/// assert!(country.speaks("French"));
/// assert_eq!(country.capital_display(), "N/A");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Country {
    pub name: CountryName,

    #[serde(default)]
    pub region: String,

    /// Language code → language name. Unordered in the source payload.
    #[serde(default)]
    pub languages: BTreeMap<String, String>,

    #[serde(default)]
    pub flags: Flags,

    /// Flag emoji, used in place of the image on a terminal.
    #[serde(default)]
    pub flag: Option<String>,

    #[serde(default)]
    pub capital: Vec<String>,

    #[serde(default)]
    pub population: u64,

    /// Area in km².
    #[serde(default)]
    pub area: f64,
}

impl Country {
    /// Builds a minimal record. Mostly useful for tests and fixtures.
    #[must_use]
    pub fn named(common: impl Into<String>) -> Self {
        Self {
            name: CountryName {
                common: common.into(),
                official: String::new(),
            },
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    #[must_use]
    pub fn with_language(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        self.languages.insert(code.into(), name.into());
        self
    }

    #[must_use]
    pub fn common_name(&self) -> &str {
        &self.name.common
    }

    /// Returns `true` if `language` is one of the record's language names.
    #[must_use]
    pub fn speaks(&self, language: &str) -> bool {
        self.languages.values().any(|name| name == language)
    }

    /// First capital, or `"N/A"` when the record has none.
    #[must_use]
    pub fn capital_display(&self) -> &str {
        self.capital.first().map_or("N/A", String::as_str)
    }

    /// Language names joined with `", "`.
    #[must_use]
    pub fn languages_display(&self) -> String {
        self.languages
            .values()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Flag emoji if present, otherwise an empty string.
    #[must_use]
    pub fn flag_glyph(&self) -> &str {
        self.flag.as_deref().unwrap_or("")
    }
}

/// Formats an integer with thousands separators (`38005238` → `38,005,238`).
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
