// Path: crates/scoring/src/score.rs
//! Per-miner scoring.

use bitads_types::app::{MinerStat, PercentileReference, ScoreResult};
use bitads_types::config::{ScopeConfig, ScoreWeights, SoftCapConfig};
use bitads_types::error::ScoringError;
use bitads_types::EPSILON;
use rayon::prelude::*;

/// Fraction of sales that were refunded, clamped into `[0, 1]`.
///
/// Zero sales divide by one, and refunds exceeding sales saturate at 1.
pub fn refund_rate(sales: u64, refund_orders: u64) -> f64 {
    (refund_orders as f64 / sales.max(1) as f64).min(1.0)
}

/// Square-root sales normalised against the scope's P95 sales.
pub fn sales_norm(sales: u64, p95_sales: f64) -> f64 {
    ((sales as f64).sqrt() / p95_sales.sqrt().max(EPSILON)).min(1.0)
}

/// Log revenue normalised against the scope's P95 revenue.
pub fn revenue_norm(revenue_usd: f64, p95_revenue: f64) -> f64 {
    (revenue_usd.ln_1p() / p95_revenue.ln_1p().max(EPSILON)).min(1.0)
}

/// Converts one miner's stats into a bounded score.
///
/// Pure: the same stats and reference always give the same result. A miner
/// with zero sales always scores zero, whatever its revenue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreEngine {
    weights: ScoreWeights,
    soft_cap: SoftCapConfig,
}

impl ScoreEngine {
    /// Builds an engine, validating the weight pair and soft cap.
    pub fn new(weights: ScoreWeights, soft_cap: SoftCapConfig) -> Result<Self, ScoringError> {
        weights.validate()?;
        soft_cap.validate()?;
        Ok(Self { weights, soft_cap })
    }

    /// Builds an engine from a scope's weights and soft cap.
    pub fn from_scope_config(config: &ScopeConfig) -> Result<Self, ScoringError> {
        Self::new(config.weights, config.soft_cap)
    }

    /// The sales/revenue weight pair in use.
    pub fn weights(&self) -> ScoreWeights {
        self.weights
    }

    /// The low-volume dampening in use.
    pub fn soft_cap(&self) -> SoftCapConfig {
        self.soft_cap
    }

    /// Scores one miner against `reference`.
    pub fn score(
        &self,
        stat: &MinerStat,
        reference: &PercentileReference,
    ) -> Result<ScoreResult, ScoringError> {
        reference.validate()?;
        self.score_unchecked(stat, reference)
    }

    /// Scores a whole population in parallel. Output order matches `stats`;
    /// the first invalid record fails the batch.
    pub fn score_all(
        &self,
        stats: &[MinerStat],
        reference: &PercentileReference,
    ) -> Result<Vec<ScoreResult>, ScoringError> {
        reference.validate()?;
        stats
            .par_iter()
            .map(|stat| self.score_unchecked(stat, reference))
            .collect()
    }

    /// [`score`](Self::score) for a reference the caller has already validated.
    fn score_unchecked(
        &self,
        stat: &MinerStat,
        reference: &PercentileReference,
    ) -> Result<ScoreResult, ScoringError> {
        stat.validate()?;

        let refund_multiplier = 1.0 - refund_rate(stat.sales, stat.refund_orders);
        let base = self.weights.w_sales * sales_norm(stat.sales, reference.smoothed_p95_sales)
            + self.weights.w_rev * revenue_norm(stat.revenue_usd, reference.smoothed_p95_revenue);

        // No verified sales, no score; the breakdown still shows the revenue term.
        let score = if stat.sales == 0 {
            0.0
        } else if self.soft_cap.enabled && stat.sales < self.soft_cap.threshold {
            base * refund_multiplier * self.soft_cap.factor
        } else {
            base * refund_multiplier
        };

        Ok(ScoreResult {
            miner_id: stat.miner_id.clone(),
            base,
            refund_multiplier,
            score: score.clamp(0.0, 1.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitads_test_utils::fixtures::{
        documented_reference, idle_miner, modest_miner, strong_miner,
    };
    use bitads_test_utils::{assert_approx_eq, assert_in_range};

    fn engine(soft_cap_enabled: bool) -> ScoreEngine {
        let soft_cap = SoftCapConfig {
            enabled: soft_cap_enabled,
            ..SoftCapConfig::default()
        };
        ScoreEngine::new(ScoreWeights::BALANCED, soft_cap).unwrap()
    }

    fn stat(sales: u64, revenue_usd: f64, refund_orders: u64) -> MinerStat {
        MinerStat {
            miner_id: "m".into(),
            sales,
            revenue_usd,
            refund_orders,
        }
    }

    #[test]
    fn refund_rate_guards() {
        assert_eq!(refund_rate(0, 0), 0.0);
        assert_eq!(refund_rate(0, 3), 1.0);
        assert_eq!(refund_rate(4, 9), 1.0);
        assert_eq!(refund_rate(8, 2), 0.25);
    }

    #[test]
    fn worked_examples_match_documentation() {
        let engine = engine(false);
        let reference = documented_reference();

        let strong = engine.score(&strong_miner(), &reference).unwrap();
        assert_approx_eq!(strong.score, 0.802, 5e-3);
        assert_approx_eq!(strong.refund_multiplier, 0.875, 1e-12);

        let modest = engine.score(&modest_miner(), &reference).unwrap();
        assert_approx_eq!(modest.score, 0.668, 5e-3);
    }

    #[test]
    fn zero_sales_scores_zero() {
        let result = engine(false).score(&idle_miner(), &documented_reference()).unwrap();
        assert_eq!(result.score, 0.0);
        // Revenue still shows up in the breakdown.
        assert!(result.base > 0.0);
        assert_eq!(result.refund_multiplier, 1.0);

        let capped = engine(true).score(&idle_miner(), &documented_reference()).unwrap();
        assert_eq!(capped.score, 0.0);
    }

    #[test]
    fn zero_sales_with_revenue_score_zero_in_batch() {
        let idle = stat(0, 500.0, 0);
        let results = engine(false)
            .score_all(&[idle, strong_miner()], &documented_reference())
            .unwrap();
        assert_eq!(results[0].score, 0.0);
        assert!(results[1].score > 0.0);
    }

    #[test]
    fn invalid_reference_fails_the_batch() {
        let reference = PercentileReference::manual(-1.0, 4000.0);
        let err = engine(true)
            .score_all(&[strong_miner()], &reference)
            .unwrap_err();
        assert_eq!(err.field(), Some("p95_sales"));
    }

    #[test]
    fn zero_references_do_not_divide_by_zero() {
        let reference = PercentileReference::default();
        let result = engine(false).score(&stat(5, 100.0, 0), &reference).unwrap();
        assert_eq!(result.score, 1.0);

        let nothing = engine(false).score(&stat(0, 0.0, 0), &reference).unwrap();
        assert_eq!(nothing.score, 0.0);
    }

    #[test]
    fn no_refunds_means_no_penalty() {
        let result = engine(false)
            .score(&stat(30, 1500.0, 0), &documented_reference())
            .unwrap();
        assert_eq!(result.refund_multiplier, 1.0);
        assert_eq!(result.score, result.base);
    }

    #[test]
    fn refunds_at_or_above_sales_zero_the_score() {
        let engine = engine(false);
        for refunds in [20, 21, 500] {
            let result = engine
                .score(&stat(20, 1500.0, refunds), &documented_reference())
                .unwrap();
            assert_eq!(result.score, 0.0);
        }
    }

    #[test]
    fn soft_cap_applies_below_threshold_only() {
        let reference = documented_reference();
        let capped = engine(true);
        let uncapped = engine(false);

        for sales in [1, 2] {
            let s = stat(sales, 400.0, 0);
            let with_cap = capped.score(&s, &reference).unwrap();
            let without = uncapped.score(&s, &reference).unwrap();
            assert_approx_eq!(with_cap.score, 0.30 * without.score, 1e-12);
        }
        let s = stat(3, 400.0, 0);
        assert_eq!(
            capped.score(&s, &reference).unwrap().score,
            uncapped.score(&s, &reference).unwrap().score
        );
    }

    #[test]
    fn soft_cap_threshold_and_factor_are_configurable() {
        let soft_cap = SoftCapConfig {
            enabled: true,
            threshold: 10,
            factor: 0.5,
        };
        let engine = ScoreEngine::new(ScoreWeights::REVENUE_HEAVY, soft_cap).unwrap();
        let plain = ScoreEngine::new(ScoreWeights::REVENUE_HEAVY, SoftCapConfig::disabled()).unwrap();
        let reference = documented_reference();
        let s = stat(9, 900.0, 0);
        assert_approx_eq!(
            engine.score(&s, &reference).unwrap().score,
            0.5 * plain.score(&s, &reference).unwrap().score,
            1e-12
        );
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        let err = ScoreEngine::new(
            ScoreWeights {
                w_sales: 0.4,
                w_rev: 0.4,
            },
            SoftCapConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ScoringError::InvalidConfiguration(_)));
    }

    #[test]
    fn invalid_records_fail_the_batch() {
        let mut bad = strong_miner();
        bad.revenue_usd = -5.0;
        let err = engine(true)
            .score_all(&[modest_miner(), bad], &documented_reference())
            .unwrap_err();
        assert_eq!(err.field(), Some("revenue_usd"));
    }

    #[test]
    fn batch_preserves_order_and_bounds() {
        let stats = vec![strong_miner(), idle_miner(), modest_miner()];
        let results = engine(true).score_all(&stats, &documented_reference()).unwrap();
        let ids: Vec<_> = results.iter().map(|r| r.miner_id.as_str()).collect();
        assert_eq!(ids, vec!["strong", "idle", "modest"]);
        for r in &results {
            assert_in_range!(r.score, 0.0, 1.0);
        }
    }
}
