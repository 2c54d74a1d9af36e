// Path: crates/validator/src/ports.rs
//! Trait definitions for the collaborators a validation cycle talks to: the
//! campaign registry, the statistics feed, the emission feed, the metagraph
//! and the weight submission layer.

use async_trait::async_trait;
use bitads_types::app::{Campaign, EmissionData, MinerStat, ScopeId, Uid};
use bitads_types::config::ValidatorConfig;
use serde::{Deserialize, Serialize};

pub use bitads_types::app::UidResolver;

/// Lists the scopes to score this cycle.
#[async_trait]
pub trait CampaignSource: Send + Sync {
    /// Returns every campaign to process, in processing order.
    async fn campaigns(&self) -> anyhow::Result<Vec<Campaign>>;
}

/// Supplies verified per-miner statistics.
#[async_trait]
pub trait MinerStatsSource: Send + Sync {
    /// Fetches every miner's statistics for `scope` over the trailing
    /// `window_days`. An empty vector means nobody is active in the scope.
    async fn fetch_window(&self, scope: &ScopeId, window_days: u32)
        -> anyhow::Result<Vec<MinerStat>>;
}

/// Supplies the emission and sales figures the burn is computed from.
#[async_trait]
pub trait BurnDataSource: Send + Sync {
    /// Returns the figures for `scope`, or `None` when no burn should be
    /// computed for it.
    async fn burn_data(&self, scope: &ScopeId) -> anyhow::Result<Option<EmissionData>>;
}

/// Receives finished weight vectors.
#[async_trait]
pub trait WeightSink: Send + Sync {
    /// Publishes one scope's weights.
    async fn publish(&self, submission: &WeightSubmission) -> anyhow::Result<()>;
}

/// One scope's weights, keyed by UID, ready for the chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightSubmission {
    pub scope: ScopeId,
    pub mech_id: u16,
    /// Ascending UIDs; the burn UID is always first.
    pub uids: Vec<Uid>,
    /// Fractions aligned with `uids`.
    pub weights: Vec<f64>,
    pub burn_percentage: f64,
}

/// A fixed campaign list.
#[derive(Debug, Clone, Default)]
pub struct StaticCampaigns(pub Vec<Campaign>);

impl StaticCampaigns {
    /// The network scope under `network_mechid`, followed by one
    /// `campaign:<id>` scope per id under `campaign_mechid`.
    pub fn from_config<I, S>(config: &ValidatorConfig, campaign_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: std::fmt::Display,
    {
        let network = Campaign {
            scope: ScopeId::network(),
            mech_id: config.network_mechid,
        };
        let campaigns = campaign_ids.into_iter().map(|id| Campaign {
            scope: ScopeId::campaign(id),
            mech_id: config.campaign_mechid,
        });
        Self(std::iter::once(network).chain(campaigns).collect())
    }
}

#[async_trait]
impl CampaignSource for StaticCampaigns {
    async fn campaigns(&self) -> anyhow::Result<Vec<Campaign>> {
        Ok(self.0.clone())
    }
}
