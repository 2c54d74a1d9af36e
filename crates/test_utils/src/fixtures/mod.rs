//! Miner populations and references for reproducible tests

use bitads_types::app::{MinerStat, PercentileReference};

/// Documented network-scope reference: P95 sales 60, P95 revenue 4000 USD.
pub fn documented_reference() -> PercentileReference {
    PercentileReference::manual(60.0, 4000.0)
}

/// A strong miner from the documentation; scores about 0.802 with
/// weights (0.40, 0.60) and the soft cap disabled.
pub fn strong_miner() -> MinerStat {
    MinerStat {
        miner_id: "strong".into(),
        sales: 48,
        revenue_usd: 2300.0,
        refund_orders: 6,
    }
}

/// A smaller miner from the documentation; scores about 0.668 under the same setup.
pub fn modest_miner() -> MinerStat {
    MinerStat {
        miner_id: "modest".into(),
        sales: 10,
        revenue_usd: 3000.0,
        refund_orders: 1,
    }
}

/// A miner with revenue but no verified sales.
pub fn idle_miner() -> MinerStat {
    MinerStat {
        miner_id: "idle".into(),
        sales: 0,
        revenue_usd: 500.0,
        refund_orders: 0,
    }
}

/// Ten miners with sales 10, 20, ..., 100 and revenue 100x their sales.
pub fn ladder_population() -> Vec<MinerStat> {
    (1..=10u64)
        .map(|i| MinerStat {
            miner_id: format!("ladder-{i}").into(),
            sales: i * 10,
            revenue_usd: (i * 1000) as f64,
            refund_orders: 0,
        })
        .collect()
}
