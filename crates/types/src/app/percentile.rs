// Path: crates/types/src/app/percentile.rs
use super::ScopeId;
use crate::error::{ensure_non_negative, ScoringError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The P95 normalisation references of one scope.
///
/// `*_cur` hold the raw percentiles of the latest epoch, `*_prev` the smoothed
/// values carried over from the epoch before it, and `smoothed_*` the values
/// scoring reads.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PercentileReference {
    /// Smoothed sales reference of the previous epoch.
    pub p95_sales_prev: f64,
    /// Raw sales P95 of the current epoch.
    pub p95_sales_cur: f64,
    /// Smoothed revenue reference of the previous epoch.
    pub p95_revenue_prev: f64,
    /// Raw revenue P95 of the current epoch.
    pub p95_revenue_cur: f64,
    /// Sales reference used for normalisation.
    pub smoothed_p95_sales: f64,
    /// Revenue reference used for normalisation.
    pub smoothed_p95_revenue: f64,
    /// Number of epochs folded into this reference.
    #[serde(default)]
    pub epochs: u64,
}

impl PercentileReference {
    /// A fixed reference, as used by scopes configured with manual P95 values.
    pub fn manual(p95_sales: f64, p95_revenue_usd: f64) -> Self {
        Self {
            p95_sales_prev: p95_sales,
            p95_sales_cur: p95_sales,
            p95_revenue_prev: p95_revenue_usd,
            p95_revenue_cur: p95_revenue_usd,
            smoothed_p95_sales: p95_sales,
            smoothed_p95_revenue: p95_revenue_usd,
            epochs: 0,
        }
    }

    /// Checks that the smoothed references are usable for normalisation.
    pub fn validate(&self) -> Result<(), ScoringError> {
        ensure_non_negative("p95_sales", self.smoothed_p95_sales)?;
        ensure_non_negative("p95_revenue", self.smoothed_p95_revenue)?;
        Ok(())
    }
}

/// A serialisable copy of every scope's reference, for persistence across restarts.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PercentileSnapshot {
    /// References keyed by scope.
    pub scopes: BTreeMap<ScopeId, PercentileReference>,
}
