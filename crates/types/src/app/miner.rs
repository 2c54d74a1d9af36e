// Path: crates/types/src/app/miner.rs
use super::MinerId;
use crate::error::{ensure_non_negative, ScoringError};
use serde::{Deserialize, Serialize};

/// Verified performance of one miner over the trailing scoring window.
///
/// Counts are unsigned, so only `revenue_usd` needs runtime validation.
/// `refund_orders` may exceed `sales` when the feed is noisy; scoring clamps
/// the refund rate rather than rejecting the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinerStat {
    /// The miner this record belongs to.
    pub miner_id: MinerId,
    /// Count of verified orders in the window.
    pub sales: u64,
    /// Verified net revenue (post-refund) in USD.
    pub revenue_usd: f64,
    /// Count of refunded orders among the verified sales.
    pub refund_orders: u64,
}

impl MinerStat {
    /// Builds a validated record.
    pub fn new(
        miner_id: impl Into<MinerId>,
        sales: u64,
        revenue_usd: f64,
        refund_orders: u64,
    ) -> Result<Self, ScoringError> {
        let stat = Self {
            miner_id: miner_id.into(),
            sales,
            revenue_usd,
            refund_orders,
        };
        stat.validate()?;
        Ok(stat)
    }

    /// Builds a record from a feed that carries signed counts, rejecting negatives.
    pub fn from_raw(
        miner_id: impl Into<MinerId>,
        sales: i64,
        revenue_usd: f64,
        refund_orders: i64,
    ) -> Result<Self, ScoringError> {
        let sales = u64::try_from(sales).map_err(|_| {
            ScoringError::invalid_input("sales", format!("expected a non-negative count, got {sales}"))
        })?;
        let refund_orders = u64::try_from(refund_orders).map_err(|_| {
            ScoringError::invalid_input(
                "refund_orders",
                format!("expected a non-negative count, got {refund_orders}"),
            )
        })?;
        Self::new(miner_id, sales, revenue_usd, refund_orders)
    }

    /// Checks the float fields, which serde cannot constrain.
    pub fn validate(&self) -> Result<(), ScoringError> {
        ensure_non_negative("revenue_usd", self.revenue_usd)?;
        Ok(())
    }
}

/// The score assigned to one miner for one cycle, with its breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// The scored miner.
    pub miner_id: MinerId,
    /// Weighted blend of normalised sales and revenue, in `[0, 1]`.
    pub base: f64,
    /// `1 - refund_rate`, in `[0, 1]`.
    pub refund_multiplier: f64,
    /// Final bounded score in `[0, 1]`.
    pub score: f64,
}

impl ScoreResult {
    /// A zero score for a miner that produced no verified work.
    pub fn zero(miner_id: MinerId) -> Self {
        Self {
            miner_id,
            base: 0.0,
            refund_multiplier: 1.0,
            score: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_rejects_negative_counts() {
        let err = MinerStat::from_raw("m1", -1, 10.0, 0).unwrap_err();
        assert_eq!(err.field(), Some("sales"));

        let err = MinerStat::from_raw("m1", 4, 10.0, -2).unwrap_err();
        assert_eq!(err.field(), Some("refund_orders"));
    }

    #[test]
    fn negative_revenue_is_rejected() {
        let err = MinerStat::new("m1", 4, -0.01, 0).unwrap_err();
        assert_eq!(err.field(), Some("revenue_usd"));
    }

    #[test]
    fn refunds_above_sales_are_accepted() {
        let stat = MinerStat::from_raw("m1", 2, 50.0, 5).unwrap();
        assert_eq!(stat.refund_orders, 5);
    }

    #[test]
    fn negative_counts_fail_to_deserialize() {
        let json = r#"{"miner_id":"m1","sales":-3,"revenue_usd":1.0,"refund_orders":0}"#;
        assert!(serde_json::from_str::<MinerStat>(json).is_err());
    }
}
