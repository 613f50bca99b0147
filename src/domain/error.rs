//! Error types for the zcountries plugin.
//!
//! This module defines the centralized error type [`ZcountriesError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented with the `thiserror`
//! crate. None of them is fatal to the plugin: callers degrade every failure to a
//! visible message or a logged event.

use thiserror::Error;

/// The main error type for zcountries operations.
///
/// # Examples
///
/// ```
/// use zcountries::ZcountriesError;
///
/// let err = ZcountriesError::HttpStatus(503);
/// assert_eq!(err.to_string(), "Request failed with HTTP status 503");
/// ```
#[derive(Debug, Error)]
pub enum ZcountriesError {
    /// Key-value storage operation failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON payload could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// The country API answered with a non-success status.
    #[error("Request failed with HTTP status {0}")]
    HttpStatus(u16),

    /// The country API did not answer before the request deadline.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// A lookup by exact country name returned no record.
    #[error("No country found named {0}")]
    NotFound(String),
}

/// A specialized `Result` type for zcountries operations.
pub type Result<T> = std::result::Result<T, ZcountriesError>;
