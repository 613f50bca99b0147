//! Outbound request types for the REST Countries API.
//!
//! Requests are plain data: the plugin shim hands them to Zellij's
//! `web_request`, carrying [`ApiRequest::context`] along so the result can be
//! routed back to the controller that issued it.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::collections::BTreeMap;

/// Default API root.
pub const DEFAULT_API_BASE_URL: &str = "https://restcountries.com/v3.1";

/// Fields requested for the catalog. The `/all` endpoint rejects requests
/// without a field list and accepts at most ten fields.
pub const CATALOG_FIELDS: &str = "name,region,languages,flags,flag,capital,population,area";

const CONTEXT_KIND: &str = "zcountries.kind";
const CONTEXT_TOKEN: &str = "zcountries.token";

/// Characters escaped in a path segment, the same set `encodeURIComponent` leaves alone.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'$')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b',')
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Percent-encodes a country name for use in a path or query value.
///
/// ```
/// use zcountries::api::encode_component;
///
/// assert_eq!(encode_component("Côte d'Ivoire"), "C%C3%B4te%20d'Ivoire");
/// ```
#[must_use]
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// Identifies one issued request. Later requests carry larger tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestToken(u64);

impl RequestToken {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for RequestToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which controller a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// Full dataset for the catalog list.
    Catalog,
    /// Single country lookup for the details view.
    Detail,
}

impl RequestKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::Detail => "detail",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "catalog" => Some(Self::Catalog),
            "detail" => Some(Self::Detail),
            _ => None,
        }
    }
}

/// A GET request ready to be handed to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub kind: RequestKind,
    pub token: RequestToken,
    pub url: String,
}

impl ApiRequest {
    /// Context map echoed back by the host with the response.
    #[must_use]
    pub fn context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        context.insert(CONTEXT_KIND.to_string(), self.kind.as_str().to_string());
        context.insert(CONTEXT_TOKEN.to_string(), self.token.value().to_string());
        context
    }

    /// Recovers `(kind, token)` from a response context. Returns `None` for
    /// results of requests this plugin did not issue.
    #[must_use]
    pub fn parse_context(context: &BTreeMap<String, String>) -> Option<(RequestKind, RequestToken)> {
        let kind = RequestKind::parse(context.get(CONTEXT_KIND)?)?;
        let token = context.get(CONTEXT_TOKEN)?.parse::<u64>().ok()?;
        Some((kind, RequestToken::new(token)))
    }
}

/// Builds request URLs against a configurable API root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryApi {
    base_url: String,
}

impl Default for CountryApi {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl CountryApi {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// "Fetch all countries". Filtering is done client-side.
    #[must_use]
    pub fn all_countries(&self, token: RequestToken) -> ApiRequest {
        ApiRequest {
            kind: RequestKind::Catalog,
            token,
            url: format!("{}/all?fields={CATALOG_FIELDS}", self.base_url),
        }
    }

    /// "Fetch country by exact name".
    #[must_use]
    pub fn country_by_name(&self, name: &str, token: RequestToken) -> ApiRequest {
        ApiRequest {
            kind: RequestKind::Detail,
            token,
            url: format!("{}/name/{}?fullText=true", self.base_url, encode_component(name)),
        }
    }
}
