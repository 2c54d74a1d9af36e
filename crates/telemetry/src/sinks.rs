// Path: crates/telemetry/src/sinks.rs
//! Defines abstract traits for metrics reporting, decoupling core logic from the backend.

use once_cell::sync::OnceCell;

// --- Static Sink Access ---

/// A no-op sink for use in tests or when telemetry is disabled.
#[derive(Debug, Clone, Copy)]
pub struct NopSink;

/// A lazily-initialized static reference to the global `MetricsSink` implementation.
pub static SINK: OnceCell<&'static dyn MetricsSink> = OnceCell::new();
static NOP_SINK: NopSink = NopSink;

/// Returns a static reference to the configured scoring metrics sink.
/// If no sink has been initialized, it returns a no-op sink.
pub fn scoring_metrics() -> &'static dyn ScoringMetricsSink {
    match SINK.get() {
        Some(sink) => sink.as_scoring(),
        None => &NOP_SINK,
    }
}

/// Returns a static reference to the configured error metrics sink.
/// If no sink has been initialized, it returns a no-op sink.
pub fn error_metrics() -> &'static dyn ErrorMetricsSink {
    match SINK.get() {
        Some(sink) => sink.as_errors(),
        None => &NOP_SINK,
    }
}

// --- Trait Definitions ---

/// A sink for metrics produced by one scoring cycle.
pub trait ScoringMetricsSink: Send + Sync + std::fmt::Debug {
    /// Sets the number of miners scored in `scope` during the last cycle.
    fn set_miners_scored(&self, scope: &str, count: u64);
    /// Sets the smoothed P95 references in use for `scope`.
    fn set_p95_references(&self, scope: &str, sales: f64, revenue_usd: f64);
    /// Sets the burn percentage published for `scope`.
    fn set_burn_percentage(&self, scope: &str, percentage: f64);
    /// Increments the counter of weight vectors handed to the submission layer.
    fn inc_weight_submissions(&self, scope: &str, success: bool);
    /// Observes the duration of a full cycle over every scope.
    fn observe_cycle_duration(&self, duration_secs: f64);
}
impl ScoringMetricsSink for NopSink {
    fn set_miners_scored(&self, _scope: &str, _count: u64) {}
    fn set_p95_references(&self, _scope: &str, _sales: f64, _revenue_usd: f64) {}
    fn set_burn_percentage(&self, _scope: &str, _percentage: f64) {}
    fn inc_weight_submissions(&self, _scope: &str, _success: bool) {}
    fn observe_cycle_duration(&self, _duration_secs: f64) {}
}

/// A sink for recording structured error metrics.
pub trait ErrorMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments a counter for a specific error, categorized by its kind and code.
    fn inc_error(&self, kind: &'static str, code: &'static str);
}
impl ErrorMetricsSink for NopSink {
    fn inc_error(&self, _kind: &'static str, _code: &'static str) {}
}

/// A unified sink that implements all domain-specific traits, providing a single
/// point of implementation for metrics backends like Prometheus.
pub trait MetricsSink: ScoringMetricsSink + ErrorMetricsSink {
    /// Views this sink through its scoring interface.
    fn as_scoring(&self) -> &dyn ScoringMetricsSink;
    /// Views this sink through its error interface.
    fn as_errors(&self) -> &dyn ErrorMetricsSink;
}

// Blanket implementation to allow any type that implements all sub-traits
// to be used as a `MetricsSink`.
impl<T> MetricsSink for T
where
    T: ScoringMetricsSink + ErrorMetricsSink,
{
    fn as_scoring(&self) -> &dyn ScoringMetricsSink {
        self
    }
    fn as_errors(&self) -> &dyn ErrorMetricsSink {
        self
    }
}
