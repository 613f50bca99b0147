//! Subscriber setup.

use super::log_file::RotatingFile;
use super::otlp;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::sync::Arc;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LEVEL: &str = "info";
const LOG_FILE: &str = "zcountries.log";
const TRACE_FILE: &str = "zcountries-otlp.json";

/// Installs the global subscriber.
///
/// Does nothing when the data directory cannot be created, and only the first
/// call in a process takes effect.
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);

    let data_dir = config.data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", "zcountries"),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = otlp::tracer_provider(RotatingFile::new(data_dir.join(TRACE_FILE)), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer("zcountries"));

    let log_file = Arc::new(RotatingFile::new(data_dir.join(LOG_FILE)));
    let fmt_layer = fmt::layer().with_ansi(false).with_target(true).with_writer(log_file);

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(fmt_layer)
        .with(otel_layer)
        .try_init();
}
