// Path: crates/telemetry/src/prometheus.rs
//! A concrete implementation of the metrics sinks using the Prometheus crate.
//!
//! Collectors are registered in the default registry; exposing them is left
//! to whichever process embeds the engine.

use crate::sinks::*;
use once_cell::sync::OnceCell;
use prometheus::{
    exponential_buckets, register_gauge_vec, register_histogram, register_int_counter_vec,
    GaugeVec, Histogram, IntCounterVec,
};

// --- Metric Statics ---
// We use OnceCell to hold the metric collectors. They will be initialized
// exactly once by the `install` function.

static MINERS_SCORED: OnceCell<GaugeVec> = OnceCell::new();
static P95_REFERENCE: OnceCell<GaugeVec> = OnceCell::new();
static BURN_PERCENTAGE: OnceCell<GaugeVec> = OnceCell::new();
static WEIGHT_SUBMISSIONS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static CYCLE_DURATION_SECONDS: OnceCell<Histogram> = OnceCell::new();
static ERRORS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();

#[derive(Debug, Clone, Copy)]
pub struct PrometheusSink;

/// Runs `f` against a collector, or does nothing if `install()` has not run yet.
fn with_metric<M>(cell: &OnceCell<M>, f: impl FnOnce(&M)) {
    if let Some(metric) = cell.get() {
        f(metric);
    }
}

impl ScoringMetricsSink for PrometheusSink {
    fn set_miners_scored(&self, scope: &str, count: u64) {
        with_metric(&MINERS_SCORED, |m| {
            m.with_label_values(&[scope]).set(count as f64)
        });
    }
    fn set_p95_references(&self, scope: &str, sales: f64, revenue_usd: f64) {
        with_metric(&P95_REFERENCE, |m| {
            m.with_label_values(&[scope, "sales"]).set(sales);
            m.with_label_values(&[scope, "revenue_usd"]).set(revenue_usd);
        });
    }
    fn set_burn_percentage(&self, scope: &str, percentage: f64) {
        with_metric(&BURN_PERCENTAGE, |m| {
            m.with_label_values(&[scope]).set(percentage)
        });
    }
    fn inc_weight_submissions(&self, scope: &str, success: bool) {
        let outcome = if success { "success" } else { "failure" };
        with_metric(&WEIGHT_SUBMISSIONS_TOTAL, |m| {
            m.with_label_values(&[scope, outcome]).inc()
        });
    }
    fn observe_cycle_duration(&self, duration_secs: f64) {
        with_metric(&CYCLE_DURATION_SECONDS, |m| m.observe(duration_secs));
    }
}

impl ErrorMetricsSink for PrometheusSink {
    fn inc_error(&self, kind: &'static str, code: &'static str) {
        with_metric(&ERRORS_TOTAL, |m| m.with_label_values(&[kind, code]).inc());
    }
}

static PROMETHEUS_SINK: PrometheusSink = PrometheusSink;

/// Registers all collectors and installs the Prometheus sink as the global sink.
///
/// Safe to call more than once; later calls return the already installed sink.
pub fn install() -> Result<&'static dyn MetricsSink, prometheus::Error> {
    if let Some(sink) = SINK.get() {
        return Ok(*sink);
    }

    MINERS_SCORED.get_or_try_init(|| {
        register_gauge_vec!(
            "bitads_miners_scored",
            "Number of miners scored in the last cycle, per scope.",
            &["scope"]
        )
    })?;
    P95_REFERENCE.get_or_try_init(|| {
        register_gauge_vec!(
            "bitads_p95_reference",
            "Smoothed P95 reference in use, per scope and metric.",
            &["scope", "metric"]
        )
    })?;
    BURN_PERCENTAGE.get_or_try_init(|| {
        register_gauge_vec!(
            "bitads_burn_percentage",
            "Share of emission redirected to the burn UID, per scope.",
            &["scope"]
        )
    })?;
    WEIGHT_SUBMISSIONS_TOTAL.get_or_try_init(|| {
        register_int_counter_vec!(
            "bitads_weight_submissions_total",
            "Weight vectors handed to the submission layer, by outcome.",
            &["scope", "outcome"]
        )
    })?;
    CYCLE_DURATION_SECONDS.get_or_try_init(|| {
        register_histogram!(
            "bitads_cycle_duration_seconds",
            "Duration of a full scoring cycle across all scopes.",
            exponential_buckets(0.001, 2.0, 16)?
        )
    })?;
    ERRORS_TOTAL.get_or_try_init(|| {
        register_int_counter_vec!(
            "bitads_errors_total",
            "Errors by kind and code.",
            &["kind", "code"]
        )
    })?;

    let sink: &'static dyn MetricsSink = &PROMETHEUS_SINK;
    Ok(*SINK.get_or_init(|| sink))
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus::Encoder;

    #[test]
    fn installed_sink_records_scoring_metrics() {
        let sink = install().unwrap();
        sink.set_burn_percentage("network", 25.0);
        sink.set_miners_scored("network", 3);
        sink.inc_error("scoring", "SCORING_INVALID_INPUT");

        // Re-installing is a no-op.
        assert!(install().is_ok());

        let mut buf = Vec::new();
        prometheus::TextEncoder::new()
            .encode(&prometheus::gather(), &mut buf)
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("bitads_burn_percentage{scope=\"network\"} 25"));
        assert!(text.contains("bitads_miners_scored{scope=\"network\"} 3"));
    }
}
