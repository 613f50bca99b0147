//! Country catalog logic: filtering, suggestions and the two controllers.
//!
//! - `collate`: locale-aware name ordering
//! - `filter`: the filter engine (pure)
//! - `suggest`: capped live suggestions (pure)
//! - `tracker`: request tokens and deadlines
//! - `controller`: catalog list fetch/filter/paging
//! - `detail`: single-country lookup

pub mod collate;
pub mod controller;
pub mod detail;
pub mod filter;
pub mod suggest;
pub mod tracker;

pub use collate::{collation_key, locale_cmp};
pub use controller::{
    CatalogController, CatalogPhase, Completion, CATALOG_ERROR_MESSAGE, DEFAULT_TIMEOUT_SECS,
    PAGE_SIZE,
};
pub use detail::{DetailController, DetailPhase, DETAIL_ERROR_MESSAGE};
pub use filter::{filter, FilterCriteria};
pub use suggest::{suggest, SuggestionLimit, Suggestions, SUGGESTION_CAP};
pub use tracker::RequestTracker;
