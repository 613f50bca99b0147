//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin shim (main.rs) and the catalog/storage/ui layers:
//!
//! ```text
//! Key / WebResult / Timer → Event → handle_event → state changes → Actions
//!                                                        ↓
//!                                   compute_viewmodel → renderer
//! ```
//!
//! # Modules
//!
//! - [`actions`]: side effects returned to the shim
//! - [`handler`]: event processing
//! - [`keys`]: key bindings per screen and mode
//! - [`modes`]: screen and input mode types
//! - [`route`]: `details?country=…` addressing
//! - [`state`]: the state container and view model computation

pub mod actions;
pub mod handler;
pub mod keys;
pub mod modes;
pub mod route;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event, SAVE_FAILED_NOTICE};
pub use keys::{map_key, Key};
pub use modes::{InputMode, PickerKind, Screen};
pub use route::Route;
pub use state::{detail_fields, format_area, AppState, Notice, DEFAULT_LANGUAGES};
