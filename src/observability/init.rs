//! Tracing subscriber setup.

use super::otlp::{file_tracer_provider, SCOPE_NAME};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Trace file name inside the data directory.
pub const TRACE_FILE_NAME: &str = "skyconnect-otlp.json";

const DEFAULT_LEVEL: &str = "info";

/// Installs the global subscriber: level filter plus OTLP file export.
///
/// The filter comes from `config.trace_level` (an `EnvFilter` directive such
/// as `"debug"` or `"skyconnect=trace"`), defaulting to `info`. Traces go to
/// `<data_dir>/skyconnect-otlp.json`.
///
/// Tracing is best-effort: if the data directory cannot be created the plugin
/// runs without a subscriber. Only the first call installs anything.
///
/// # Example
///
/// ```no_run
/// use skyconnect::observability::init_tracing;
/// use skyconnect::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    if std::fs::create_dir_all(&config.data_dir).is_err() {
        return;
    }

    let filter = config
        .trace_level
        .as_deref()
        .and_then(|level| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LEVEL));

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SCOPE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = file_tracer_provider(config.data_dir.join(TRACE_FILE_NAME), resource);

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(OpenTelemetryLayer::new(provider.tracer(SCOPE_NAME)));

    if subscriber.try_init().is_ok() {
        tracing::debug!(data_dir = %config.data_dir.display(), "tracing initialized");
    }
}
