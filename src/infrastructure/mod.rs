//! Filesystem locations inside the Zellij plugin sandbox.
//!
//! The host filesystem is mounted under `/host`, so `~`-relative paths from
//! configuration have to be rewritten before use.

pub mod paths;

pub use paths::{expand_tilde, favorites_file, get_data_dir, FAVORITES_FILE};
