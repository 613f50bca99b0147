//! Locale-aware name ordering.
//!
//! Approximates a root-locale collation: names are compared first on a
//! primary key with accents and case removed (`"Åland Islands"` sorts with the
//! A's, `"Réunion"` before `"Romania"`), and ties fall back to plain code point
//! order so the result is total and deterministic.

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Primary collation key: canonical decomposition, combining marks dropped, lower-cased.
#[must_use]
pub fn collation_key(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Compares two names the way a reader expects them in a sorted list.
#[must_use]
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}
