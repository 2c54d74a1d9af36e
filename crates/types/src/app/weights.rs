// Path: crates/types/src/app/weights.rs
use super::{MinerId, Uid, UidResolver, BURN_UID};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A normalised weight vector for one scope: the burn share reserved for
/// [`BURN_UID`] plus one fraction per scored miner, in score order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    /// Fraction assigned to the burn UID, `burn_percentage / 100`.
    pub burn_fraction: f64,
    /// Fraction assigned to each miner.
    pub miners: Vec<(MinerId, f64)>,
}

/// A weight vector keyed by chain UID, ready for submission.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UidWeights {
    /// Fractions keyed by UID, the burn UID included.
    pub weights: BTreeMap<Uid, f64>,
    /// Miners that had no registered UID and were left out.
    pub unresolved: Vec<MinerId>,
}

impl UidWeights {
    /// Sum of all fractions.
    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    /// Splits the map into parallel `uids` / `weights` vectors.
    pub fn into_parts(self) -> (Vec<Uid>, Vec<f64>) {
        self.weights.into_iter().unzip()
    }
}

impl WeightVector {
    /// A vector with no miner entries, for scopes with nobody to score.
    pub fn burn_only(burn_fraction: f64) -> Self {
        Self {
            burn_fraction,
            miners: Vec::new(),
        }
    }

    /// Sum of all fractions, the burn share included.
    pub fn total(&self) -> f64 {
        self.burn_fraction + self.miners.iter().map(|(_, w)| w).sum::<f64>()
    }

    /// Fraction assigned to `miner`, if it is part of the vector.
    pub fn weight_of(&self, miner: &MinerId) -> Option<f64> {
        self.miners
            .iter()
            .find(|(id, _)| id == miner)
            .map(|(_, w)| *w)
    }

    /// Re-keys the vector by chain UID.
    ///
    /// Miners without a UID are dropped and the miner share is renormalised
    /// over the ones that resolve. Two miners resolving to the same UID have
    /// their fractions added.
    pub fn to_uid_weights(&self, resolver: &dyn UidResolver) -> UidWeights {
        let mut unresolved = Vec::new();
        let mut resolved: Vec<(Uid, f64)> = Vec::with_capacity(self.miners.len());
        for (miner, weight) in &self.miners {
            match resolver.uid_of(miner) {
                Some(uid) => resolved.push((uid, *weight)),
                None => unresolved.push(miner.clone()),
            }
        }

        let mut weights = BTreeMap::new();
        weights.insert(BURN_UID, self.burn_fraction);

        let miner_share = self.total() - self.burn_fraction;
        let resolved_total: f64 = resolved.iter().map(|(_, w)| w).sum();
        for (uid, weight) in resolved {
            let fraction = if resolved_total > 0.0 {
                miner_share * weight / resolved_total
            } else {
                0.0
            };
            *weights.entry(uid).or_insert(0.0) += fraction;
        }

        UidWeights {
            weights,
            unresolved,
        }
    }
}
