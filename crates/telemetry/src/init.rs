// Path: crates/telemetry/src/init.rs
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Environment variable holding the log filter, checked before `RUST_LOG`.
pub const LOG_ENV: &str = "BITADS_LOG";

/// Filter used when neither variable is set.
pub const DEFAULT_FILTER: &str = "info";

/// Resolves the filter directives: `BITADS_LOG`, then `RUST_LOG`, then
/// [`DEFAULT_FILTER`]. Unparsable directives fall through to the next source.
fn resolve_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initializes the global `tracing` subscriber for structured JSON logging.
///
/// The scoring crates log through `log`; those records are bridged into the
/// same subscriber. Fails if a global subscriber or logger is already set.
pub fn init_tracing() -> Result<(), anyhow::Error> {
    let fmt_layer = fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_current_span(false)
        .with_timer(fmt::time::UtcTime::rfc_3339());
    let subscriber = Registry::default().with(resolve_filter()).with(fmt_layer);
    tracing_log::LogTracer::init()?;
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_initialization_fails() {
        assert!(init_tracing().is_ok());
        tracing::info!(target: "telemetry", event = "installed");
        log::info!("bridged from log");
        assert!(init_tracing().is_err());
    }
}
