//! Deterministic randomness for reproducible tests

use bitads_types::app::{MinerId, MinerStat};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Deterministic random number generator for tests
pub struct TestRng {
    /// Internal RNG with fixed seed
    rng: StdRng,
}

impl TestRng {
    /// Create a new test RNG with the specified seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a test RNG with the default seed 12345
    pub fn with_default_seed() -> Self {
        Self::new(12345)
    }

    /// Generate a random miner record.
    ///
    /// Refund counts occasionally exceed sales to mimic noisy feeds.
    pub fn miner_stat(&mut self, miner_id: impl Into<MinerId>) -> MinerStat {
        let sales = self.rng.gen_range(0..=200u64);
        let refund_orders = if self.rng.gen_bool(0.1) {
            sales + self.rng.gen_range(1..=5u64)
        } else {
            self.rng.gen_range(0..=sales / 4)
        };
        MinerStat {
            miner_id: miner_id.into(),
            sales,
            revenue_usd: self.rng.gen_range(0.0..20_000.0),
            refund_orders,
        }
    }

    /// Generate a population of `size` miners named `miner-0`, `miner-1`, ...
    pub fn population(&mut self, size: usize) -> Vec<MinerStat> {
        (0..size)
            .map(|i| self.miner_stat(format!("miner-{i}")))
            .collect()
    }

    /// Generate a random value
    pub fn next_u64(&mut self) -> u64 {
        self.rng.gen()
    }
}

// Implement Default trait instead of just a method named default
impl Default for TestRng {
    fn default() -> Self {
        Self::with_default_seed()
    }
}
