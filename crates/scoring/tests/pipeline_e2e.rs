// Path: crates/scoring/tests/pipeline_e2e.rs
//! Runs one scope through every stage of the engine: reference update,
//! scoring, burn and weight composition.

use bitads_scoring::{
    compose_weights, compute_burn, score_miners, update_percentiles, BurnController,
    BurnDecision, PercentileTracker,
};
use bitads_test_utils::fixtures::{documented_reference, ladder_population, modest_miner, strong_miner};
use bitads_test_utils::randomness::TestRng;
use bitads_test_utils::{assert_approx_eq, assert_ok};
use bitads_types::app::{EmissionData, MinerId, MinerStat, ScopeId, Uid, BURN_UID};
use bitads_types::config::{BurnConfig, ScoreWeights};
use bitads_types::SUM_TOLERANCE;
use std::collections::BTreeMap;

fn columns(stats: &[MinerStat]) -> (Vec<u64>, Vec<f64>) {
    (
        stats.iter().map(|s| s.sales).collect(),
        stats.iter().map(|s| s.revenue_usd).collect(),
    )
}

#[test]
fn ladder_scope_end_to_end() {
    let tracker = PercentileTracker::new();
    let scope = ScopeId::campaign(7);
    let population = ladder_population();
    let (sales, revenue) = columns(&population);

    let reference = assert_ok!(update_percentiles(&tracker, &scope, &sales, &revenue, 0.4));
    assert_eq!(reference.smoothed_p95_sales, 100.0);
    assert_eq!(reference.smoothed_p95_revenue, 10_000.0);

    let scores = assert_ok!(score_miners(&population, &reference, ScoreWeights::BALANCED, true));
    // The top of the ladder sits exactly on both references.
    assert_approx_eq!(scores[9].score, 1.0, 1e-12);
    for pair in scores.windows(2) {
        assert!(pair[0].score < pair[1].score);
    }

    let burn = assert_ok!(compute_burn(15_000.0, 1.0, 10_000.0, 1.0));
    let vector = assert_ok!(compose_weights(&scores, burn));
    assert_approx_eq!(vector.total(), 1.0, SUM_TOLERANCE);
    assert_approx_eq!(vector.burn_fraction, 1.0 / 3.0, 1e-9);

    let uids: BTreeMap<MinerId, Uid> = population
        .iter()
        .enumerate()
        .map(|(i, s)| (s.miner_id.clone(), Uid(i as u16 + 1)))
        .collect();
    let by_uid = vector.to_uid_weights(&uids);
    assert!(by_uid.unresolved.is_empty());
    assert_approx_eq!(by_uid.weights[&BURN_UID], 1.0 / 3.0, 1e-9);
    assert_approx_eq!(by_uid.total(), 1.0, SUM_TOLERANCE);
}

#[test]
fn documented_miners_split_the_unburned_share() {
    let stats = [strong_miner(), modest_miner()];
    let scores = assert_ok!(score_miners(
        &stats,
        &documented_reference(),
        ScoreWeights::BALANCED,
        false
    ));
    let burn = assert_ok!(compute_burn(20_000.0, 1.0, 10_000.0, 1.5));
    assert_eq!(burn, 25.0);

    let vector = assert_ok!(compose_weights(&scores, burn));
    let strong = vector.weight_of(&"strong".into()).unwrap_or_default();
    let modest = vector.weight_of(&"modest".into()).unwrap_or_default();
    assert_approx_eq!(strong + modest, 0.75, 1e-12);
    assert_approx_eq!(strong / modest, scores[0].score / scores[1].score, 1e-9);
}

#[test]
fn all_idle_miners_receive_zero_weight() {
    let idle: Vec<MinerStat> = (0..4)
        .map(|i| MinerStat {
            miner_id: format!("idle-{i}").into(),
            sales: 0,
            revenue_usd: 100.0,
            refund_orders: 0,
        })
        .collect();
    let scores = assert_ok!(score_miners(&idle, &documented_reference(), ScoreWeights::BALANCED, true));
    let vector = assert_ok!(compose_weights(&scores, 10.0));
    assert_eq!(vector.burn_fraction, 0.1);
    assert!(vector.miners.iter().all(|(_, w)| *w == 0.0));
}

#[test]
fn repeated_runs_are_identical() {
    let mut rng = TestRng::with_default_seed();
    let population = rng.population(64);
    let reference = documented_reference();

    let first = assert_ok!(score_miners(&population, &reference, ScoreWeights::REVENUE_HEAVY, true));
    let second = assert_ok!(score_miners(&population, &reference, ScoreWeights::REVENUE_HEAVY, true));
    assert_eq!(first, second);

    let a = assert_ok!(compose_weights(&first, 12.0));
    let b = assert_ok!(compose_weights(&second, 12.0));
    assert_eq!(a, b);
}

#[test]
fn smoothed_reference_drifts_towards_new_population() {
    let tracker = PercentileTracker::new();
    let scope = ScopeId::network();
    let (sales, revenue) = columns(&ladder_population());
    assert_ok!(update_percentiles(&tracker, &scope, &sales, &revenue, 0.5));

    let doubled_sales: Vec<u64> = sales.iter().map(|s| s * 2).collect();
    let doubled_revenue: Vec<f64> = revenue.iter().map(|r| r * 2.0).collect();
    let next = assert_ok!(update_percentiles(
        &tracker,
        &scope,
        &doubled_sales,
        &doubled_revenue,
        0.5
    ));
    assert_eq!(next.smoothed_p95_sales, 150.0);
    assert_eq!(next.smoothed_p95_revenue, 15_000.0);
    assert_eq!(next.p95_sales_prev, 100.0);
}

#[test]
fn burn_controller_prefers_fixed_percentage() {
    let data = EmissionData {
        total_emission_tao: 100.0,
        tao_usd_price: 300.0,
        total_sales_usd: 1_000.0,
    };
    let computed = assert_ok!(BurnController::new(BurnConfig::default()));
    let fixed = assert_ok!(BurnController::new(BurnConfig {
        fixed_burn_percentage: Some(50.0),
        ..BurnConfig::default()
    }));

    let decision = assert_ok!(computed.decide(Some(&data)));
    assert!(matches!(decision, BurnDecision::Computed(_)));
    assert_approx_eq!(decision.percentage(), (30_000.0 - 1_000.0) / 30_000.0 * 100.0, 1e-9);
    assert_eq!(assert_ok!(fixed.decide(Some(&data))), BurnDecision::Fixed(50.0));
}
