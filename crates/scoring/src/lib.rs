// Path: crates/scoring/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # BitAds Scoring
//!
//! The pure numerical core of the validator. Given per-miner sales statistics
//! it produces bounded scores, maintains smoothed P95 references per scope,
//! decides how much emission to burn, and composes the normalised weight
//! vector that is submitted on chain.
//!
//! Nothing here performs I/O. The only shared state is the
//! [`PercentileTracker`], which is safe to use from several threads.

/// Emission burn percentage and the per-scope burn controller.
pub mod burn;
/// Nearest-rank percentiles and the smoothed per-scope reference store.
pub mod percentile;
/// Normalisation helpers and the per-miner score engine.
pub mod score;
/// Composition of scores and burn into a normalised weight vector.
pub mod weights;

pub use burn::{burn_percentage, compute_burn, BurnController, BurnDecision};
pub use percentile::{compute_count_percentile, compute_percentile, PercentileTracker, P95};
pub use score::ScoreEngine;
pub use weights::compose_weights;

use bitads_types::app::{MinerStat, PercentileReference, ScopeId, ScoreResult};
use bitads_types::config::{ScoreWeights, SoftCapConfig};
use bitads_types::error::ScoringError;

/// Scores a scope's miners against its current reference.
///
/// `soft_cap_enabled` toggles the default low-volume dampening (sales below 3
/// scale by 0.30). Use [`ScoreEngine`] directly for a custom threshold or factor.
pub fn score_miners(
    stats: &[MinerStat],
    reference: &PercentileReference,
    weights: ScoreWeights,
    soft_cap_enabled: bool,
) -> Result<Vec<ScoreResult>, ScoringError> {
    let soft_cap = if soft_cap_enabled {
        SoftCapConfig::default()
    } else {
        SoftCapConfig::disabled()
    };
    ScoreEngine::new(weights, soft_cap)?.score_all(stats, reference)
}

/// Folds one epoch of observations into `scope`'s smoothed reference and
/// returns the updated value.
pub fn update_percentiles(
    tracker: &PercentileTracker,
    scope: &ScopeId,
    current_sales: &[u64],
    current_revenue: &[f64],
    alpha: f64,
) -> Result<PercentileReference, ScoringError> {
    tracker.update(scope, current_sales, current_revenue, alpha)
}
