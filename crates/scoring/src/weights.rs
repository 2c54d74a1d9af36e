// Path: crates/scoring/src/weights.rs
//! Weight composition.
//!
//! Reserves the burn share for the burn UID and splits the remainder across
//! miners in proportion to their scores.

use bitads_types::app::{ScoreResult, WeightVector};
use bitads_types::error::{ensure_non_negative, ScoringError};

/// Builds a normalised weight vector from a scope's scores.
///
/// The burn UID receives `burn_percentage / 100`; each miner receives its
/// share of the rest. When every score is zero the miners all receive zero
/// and the vector sums to the burn fraction alone.
pub fn compose_weights(
    scores: &[ScoreResult],
    burn_percentage: f64,
) -> Result<WeightVector, ScoringError> {
    ensure_non_negative("burn_percentage", burn_percentage)?;
    if burn_percentage > 100.0 {
        return Err(ScoringError::invalid_input(
            "burn_percentage",
            format!("expected a value in [0, 100], got {burn_percentage}"),
        ));
    }
    for result in scores {
        ensure_non_negative("score", result.score)?;
    }

    let burn_fraction = burn_percentage / 100.0;
    let miner_share = 1.0 - burn_fraction;
    let total: f64 = scores.iter().map(|r| r.score).sum();

    let miners = scores
        .iter()
        .map(|result| {
            let weight = if total > 0.0 {
                miner_share * result.score / total
            } else {
                0.0
            };
            (result.miner_id.clone(), weight)
        })
        .collect();

    Ok(WeightVector {
        burn_fraction,
        miners,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitads_test_utils::assert_approx_eq;
    use bitads_types::app::MinerId;
    use bitads_types::SUM_TOLERANCE;

    fn scored(id: &str, score: f64) -> ScoreResult {
        ScoreResult {
            miner_id: id.into(),
            base: score,
            refund_multiplier: 1.0,
            score,
        }
    }

    #[test]
    fn shares_follow_scores_after_burn() {
        let scores = [scored("a", 0.6), scored("b", 0.2), scored("c", 0.2)];
        let vector = compose_weights(&scores, 25.0).unwrap();

        assert_eq!(vector.burn_fraction, 0.25);
        assert_approx_eq!(vector.weight_of(&MinerId::from("a")).unwrap(), 0.45, 1e-12);
        assert_approx_eq!(vector.weight_of(&MinerId::from("b")).unwrap(), 0.15, 1e-12);
        assert_approx_eq!(vector.total(), 1.0, SUM_TOLERANCE);
    }

    #[test]
    fn no_burn_gives_everything_to_miners() {
        let scores = [scored("a", 0.5), scored("b", 0.5)];
        let vector = compose_weights(&scores, 0.0).unwrap();
        assert_eq!(vector.burn_fraction, 0.0);
        assert_approx_eq!(vector.weight_of(&MinerId::from("a")).unwrap(), 0.5, 1e-12);
    }

    #[test]
    fn all_zero_scores_leave_only_burn() {
        let scores = [scored("a", 0.0), scored("b", 0.0)];
        let vector = compose_weights(&scores, 40.0).unwrap();
        assert_eq!(vector.burn_fraction, 0.4);
        assert!(vector.miners.iter().all(|(_, w)| *w == 0.0));
        assert_eq!(vector.miners.len(), 2);
    }

    #[test]
    fn empty_population_is_burn_only() {
        let vector = compose_weights(&[], 100.0).unwrap();
        assert_eq!(vector, WeightVector::burn_only(1.0));
    }

    #[test]
    fn out_of_range_burn_is_rejected() {
        for burn in [-0.1, 100.5, f64::NAN] {
            let err = compose_weights(&[scored("a", 1.0)], burn).unwrap_err();
            assert_eq!(err.field(), Some("burn_percentage"));
        }
    }

    #[test]
    fn negative_scores_are_rejected() {
        let err = compose_weights(&[scored("a", -0.2)], 10.0).unwrap_err();
        assert_eq!(err.field(), Some("score"));
    }
}
