// Path: crates/scoring/src/percentile.rs
//! P95 reference tracking.
//!
//! Each scope owns one [`PercentileReference`]. An update computes the raw
//! nearest-rank percentile of the current population and blends it with the
//! scope's previous smoothed value; the first observation of a scope is taken
//! as-is.

use bitads_types::app::{MinerStat, PercentileReference, PercentileSnapshot, ScopeId};
use bitads_types::config::validate_alpha;
use bitads_types::error::{ensure_non_negative, ScoringError};
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// The percentile used for normalisation references.
pub const P95: f64 = 0.95;

/// Nearest-rank percentile: the element at 1-indexed position `ceil(p * N)` of
/// the ascending sort, with the rank clamped into `[1, N]`. Empty input yields 0.
pub fn compute_percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let rank = (p * n as f64).ceil();
    // `as` saturates: NaN and negatives become 0, which the clamp lifts to 1.
    let rank = (rank as usize).clamp(1, n);
    sorted.get(rank - 1).copied().unwrap_or(0.0)
}

/// [`compute_percentile`] over integer counts.
pub fn compute_count_percentile(values: &[u64], p: f64) -> f64 {
    let as_floats: Vec<f64> = values.iter().map(|&v| v as f64).collect();
    compute_percentile(&as_floats, p)
}

/// Scope-keyed store of smoothed P95 references.
///
/// The map sits behind a single `RwLock`. An update holds the write lock from
/// reading the previous reference to storing the new one, so updates to the
/// same scope are serialised and readers never observe a partial update.
#[derive(Debug, Default)]
pub struct PercentileTracker {
    references: RwLock<BTreeMap<ScopeId, PercentileReference>>,
}

impl PercentileTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a tracker from a persisted snapshot.
    pub fn from_snapshot(snapshot: PercentileSnapshot) -> Self {
        Self {
            references: RwLock::new(snapshot.scopes),
        }
    }

    /// Copies every scope's current reference.
    pub fn snapshot(&self) -> PercentileSnapshot {
        PercentileSnapshot {
            scopes: self.references.read().clone(),
        }
    }

    /// Replaces all references with the snapshot's.
    pub fn restore(&self, snapshot: PercentileSnapshot) {
        *self.references.write() = snapshot.scopes;
    }

    /// The current reference for `scope`, if it has been observed.
    pub fn get(&self, scope: &ScopeId) -> Option<PercentileReference> {
        self.references.read().get(scope).copied()
    }

    /// Scopes with a stored reference.
    pub fn scopes(&self) -> Vec<ScopeId> {
        self.references.read().keys().cloned().collect()
    }

    /// Drops a scope's reference, e.g. when its campaign ends. The next
    /// update for that scope starts cold.
    pub fn forget(&self, scope: &ScopeId) -> Option<PercentileReference> {
        self.references.write().remove(scope)
    }

    /// Folds the current epoch's population into `scope`'s reference.
    ///
    /// `current_sales` and `current_revenue` need not have the same length;
    /// an empty population yields raw percentiles of 0.
    pub fn update(
        &self,
        scope: &ScopeId,
        current_sales: &[u64],
        current_revenue: &[f64],
        alpha: f64,
    ) -> Result<PercentileReference, ScoringError> {
        validate_alpha(alpha)?;
        for &revenue in current_revenue {
            ensure_non_negative("revenue_usd", revenue)?;
        }

        let raw_sales = compute_count_percentile(current_sales, P95);
        let raw_revenue = compute_percentile(current_revenue, P95);

        let mut references = self.references.write();
        let next = match references.get(scope) {
            Some(prev) => PercentileReference {
                p95_sales_prev: prev.smoothed_p95_sales,
                p95_sales_cur: raw_sales,
                p95_revenue_prev: prev.smoothed_p95_revenue,
                p95_revenue_cur: raw_revenue,
                smoothed_p95_sales: ema(alpha, raw_sales, prev.smoothed_p95_sales),
                smoothed_p95_revenue: ema(alpha, raw_revenue, prev.smoothed_p95_revenue),
                epochs: prev.epochs + 1,
            },
            None => PercentileReference {
                p95_sales_prev: 0.0,
                p95_sales_cur: raw_sales,
                p95_revenue_prev: 0.0,
                p95_revenue_cur: raw_revenue,
                smoothed_p95_sales: raw_sales,
                smoothed_p95_revenue: raw_revenue,
                epochs: 1,
            },
        };
        references.insert(scope.clone(), next);
        drop(references);

        log::debug!(
            "[Percentiles] scope={} epoch={} p95_sales={:.4} p95_revenue={:.4} (raw {:.4} / {:.4}, n={})",
            scope,
            next.epochs,
            next.smoothed_p95_sales,
            next.smoothed_p95_revenue,
            raw_sales,
            raw_revenue,
            current_sales.len()
        );
        Ok(next)
    }

    /// [`update`](Self::update) with the sales and revenue columns of `stats`.
    pub fn update_from_stats(
        &self,
        scope: &ScopeId,
        stats: &[MinerStat],
        alpha: f64,
    ) -> Result<PercentileReference, ScoringError> {
        let sales: Vec<u64> = stats.iter().map(|s| s.sales).collect();
        let revenue: Vec<f64> = stats.iter().map(|s| s.revenue_usd).collect();
        self.update(scope, &sales, &revenue, alpha)
    }
}

fn ema(alpha: f64, current: f64, previous: f64) -> f64 {
    alpha * current + (1.0 - alpha) * previous
}
