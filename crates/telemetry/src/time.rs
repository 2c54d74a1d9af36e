// Path: crates/telemetry/src/time.rs
use crate::sinks::ScoringMetricsSink;
use std::time::Instant;

/// Measures one validation cycle and reports it to the sink exactly once,
/// either through [`Timer::stop`] or when dropped on an early return.
pub struct Timer<'a> {
    sink: &'a dyn ScoringMetricsSink,
    start: Instant,
    reported: bool,
}

impl<'a> Timer<'a> {
    pub fn new(sink: &'a dyn ScoringMetricsSink) -> Self {
        Self {
            sink,
            start: Instant::now(),
            reported: false,
        }
    }

    /// Seconds since the timer started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Reports the duration now and returns it.
    pub fn stop(mut self) -> f64 {
        self.report()
    }

    fn report(&mut self) -> f64 {
        let secs = self.elapsed_secs();
        if !self.reported {
            self.reported = true;
            self.sink.observe_cycle_duration(secs);
        }
        secs
    }
}

impl Drop for Timer<'_> {
    fn drop(&mut self) {
        self.report();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct CountingSink(AtomicUsize);

    impl ScoringMetricsSink for CountingSink {
        fn set_miners_scored(&self, _scope: &str, _count: u64) {}
        fn set_p95_references(&self, _scope: &str, _sales: f64, _revenue_usd: f64) {}
        fn set_burn_percentage(&self, _scope: &str, _percentage: f64) {}
        fn inc_weight_submissions(&self, _scope: &str, _success: bool) {}
        fn observe_cycle_duration(&self, _duration_secs: f64) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn duration_is_reported_once() {
        let sink = CountingSink::default();
        let secs = Timer::new(&sink).stop();
        assert!(secs >= 0.0);
        assert_eq!(sink.0.load(Ordering::SeqCst), 1);

        drop(Timer::new(&sink));
        assert_eq!(sink.0.load(Ordering::SeqCst), 2);
    }
}
