//! Domain layer for the zcountries plugin.
//!
//! Core domain types, independent of Zellij-specific APIs or infrastructure.
//!
//! - [`error`]: Error types and result aliases
//! - [`country`]: Country record model
//! - [`region`]: The fixed set of selectable regions

pub mod country;
pub mod error;
pub mod region;

pub use country::{group_thousands, Country, CountryName, Flags};
pub use error::{Result, ZcountriesError};
pub use region::Region;
