//! Tracing setup with file-based output.
//!
//! Two sinks share one `EnvFilter`:
//!
//! ```text
//! tracing ─┬─ fmt layer ───────────────────────── zcountries.log
//!          └─ tracing-opentelemetry → OtlpFileExporter → zcountries-otlp.json
//! ```
//!
//! Both files live in the plugin data directory and rotate at 10 MB, keeping
//! three backups. The level comes from the `trace_level` config key and
//! defaults to `info`.
//!
//! ```rust
//! use zcountries::observability::init_tracing;
//! use zcountries::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("plugin initialized");
//! ```

mod init;
mod log_file;
mod otlp;

pub use init::init_tracing;
pub use log_file::RotatingFile;
