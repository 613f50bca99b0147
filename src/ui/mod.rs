//! User interface rendering layer.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → components → Canvas → stdout
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Per-section renderers
//! - [`helpers`]: Canvas, truncation and match highlighting
//! - [`theme`]: Color schemes and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_to_string};
pub use theme::Theme;
pub use viewmodel::{Body, DisplayItem, UIViewModel};
