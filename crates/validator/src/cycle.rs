// Path: crates/validator/src/cycle.rs
//! One pass of the validator: every campaign is scored, burned, composed,
//! aligned to UIDs and published. Scheduling the passes is the caller's job.

use crate::error::CycleError;
use crate::ports::{
    BurnDataSource, CampaignSource, MinerStatsSource, UidResolver, WeightSink, WeightSubmission,
};
use bitads_scoring::{compose_weights, BurnController, BurnDecision, PercentileTracker, ScoreEngine};
use bitads_telemetry::sinks::{ErrorMetricsSink, ScoringMetricsSink};
use bitads_telemetry::time::Timer;
use bitads_telemetry::{error_metrics, scoring_metrics};
use bitads_types::app::{Campaign, MinerId, PercentileReference, ScopeId, WeightVector};
use bitads_types::config::{P95Config, ValidatorConfig};
use bitads_types::error::ErrorCode;
use std::sync::Arc;

/// The collaborators a cycle reads from and publishes to.
#[derive(Clone)]
pub struct CyclePorts {
    pub campaigns: Arc<dyn CampaignSource>,
    pub stats: Arc<dyn MinerStatsSource>,
    pub burn: Arc<dyn BurnDataSource>,
    pub uids: Arc<dyn UidResolver + Send + Sync>,
    pub sink: Arc<dyn WeightSink>,
}

/// What happened to one scope during a cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeReport {
    pub scope: ScopeId,
    pub mech_id: u16,
    pub miners_scored: usize,
    pub reference: Option<PercentileReference>,
    /// The controller's decision. An empty scope publishes everything to the
    /// burn UID whatever this says.
    pub burn: BurnDecision,
    /// Miners left out of the submission because they have no UID.
    pub unresolved: Vec<MinerId>,
    pub submission: WeightSubmission,
}

/// A scope that was skipped because it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeFailure {
    pub scope: ScopeId,
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleReport {
    pub published: Vec<ScopeReport>,
    pub failed: Vec<ScopeFailure>,
}

impl CycleReport {
    /// Whether every scope was published.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn scope(&self, scope: &ScopeId) -> Option<&ScopeReport> {
        self.published.iter().find(|r| &r.scope == scope)
    }
}

/// Drives the scoring engine over every campaign once per call.
pub struct ValidationCycle {
    config: ValidatorConfig,
    tracker: Arc<PercentileTracker>,
    ports: CyclePorts,
    scoring_metrics: &'static dyn ScoringMetricsSink,
    error_metrics: &'static dyn ErrorMetricsSink,
}

impl ValidationCycle {
    /// Validates `config` and binds the cycle to its collaborators. Metrics go
    /// to whichever sink is installed globally at this point.
    pub fn new(
        config: ValidatorConfig,
        tracker: Arc<PercentileTracker>,
        ports: CyclePorts,
    ) -> Result<Self, CycleError> {
        config.validate().map_err(CycleError::Config)?;
        Ok(Self {
            config,
            tracker,
            ports,
            scoring_metrics: scoring_metrics(),
            error_metrics: error_metrics(),
        })
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// The shared reference store, e.g. for persisting a snapshot after a cycle.
    pub fn tracker(&self) -> &Arc<PercentileTracker> {
        &self.tracker
    }

    /// Processes every campaign in order.
    ///
    /// Only a failure to list campaigns aborts the pass. A scope that fails
    /// is logged, counted and recorded in the report; the rest still run.
    pub async fn run_once(&self) -> Result<CycleReport, CycleError> {
        let timer = Timer::new(self.scoring_metrics);

        let campaigns = match self.ports.campaigns.campaigns().await {
            Ok(campaigns) => campaigns,
            Err(e) => {
                let err = CycleError::Campaigns(e);
                self.error_metrics.inc_error("cycle", err.code());
                return Err(err);
            }
        };
        tracing::info!(target: "cycle", event = "start", campaigns = campaigns.len());

        let mut report = CycleReport::default();
        for campaign in &campaigns {
            match self.run_scope(campaign).await {
                Ok(scope_report) => report.published.push(scope_report),
                Err(err) => {
                    tracing::warn!(
                        target: "cycle",
                        event = "scope_failed",
                        scope = %campaign.scope,
                        code = err.code(),
                        error = %err
                    );
                    self.error_metrics.inc_error("cycle", err.code());
                    report.failed.push(ScopeFailure {
                        scope: campaign.scope.clone(),
                        code: err.code(),
                        message: err.to_string(),
                    });
                }
            }
        }

        let duration_secs = timer.stop();
        tracing::info!(
            target: "cycle",
            event = "complete",
            published = report.published.len(),
            failed = report.failed.len(),
            duration_secs
        );
        Ok(report)
    }

    async fn run_scope(&self, campaign: &Campaign) -> Result<ScopeReport, CycleError> {
        let scope = &campaign.scope;
        let scope_config = self.config.scope_config(scope);

        let stats = self
            .ports
            .stats
            .fetch_window(scope, self.config.window_days)
            .await
            .map_err(|e| CycleError::port(scope, "miner_stats", e))?;

        let controller =
            BurnController::new(scope_config.burn).map_err(|e| CycleError::scoring(scope, e))?;
        let emission = self
            .ports
            .burn
            .burn_data(scope)
            .await
            .map_err(|e| CycleError::port(scope, "burn_data", e))?;
        let burn = controller
            .decide(emission.as_ref())
            .map_err(|e| CycleError::scoring(scope, e))?;

        let (vector, reference, burn_percentage) = if stats.is_empty() {
            tracing::info!(target: "cycle", event = "empty_scope", scope = %scope);
            (WeightVector::burn_only(1.0), None, 100.0)
        } else {
            let reference = match scope_config.p95 {
                P95Config::Manual {
                    p95_sales,
                    p95_revenue_usd,
                } => PercentileReference::manual(p95_sales, p95_revenue_usd),
                P95Config::Auto { ema_alpha } => self
                    .tracker
                    .update_from_stats(scope, &stats, ema_alpha)
                    .map_err(|e| CycleError::scoring(scope, e))?,
            };
            let vector = ScoreEngine::from_scope_config(&scope_config)
                .and_then(|engine| engine.score_all(&stats, &reference))
                .and_then(|scores| compose_weights(&scores, burn.percentage()))
                .map_err(|e| CycleError::scoring(scope, e))?;
            (vector, Some(reference), burn.percentage())
        };

        let by_uid = vector.to_uid_weights(self.ports.uids.as_ref());
        if !by_uid.unresolved.is_empty() {
            tracing::warn!(
                target: "cycle",
                event = "unresolved_miners",
                scope = %scope,
                count = by_uid.unresolved.len(),
                miners = ?by_uid.unresolved
            );
        }
        let unresolved = by_uid.unresolved.clone();
        let (uids, weights) = by_uid.into_parts();
        let submission = WeightSubmission {
            scope: scope.clone(),
            mech_id: campaign.mech_id,
            uids,
            weights,
            burn_percentage,
        };

        let published = self.ports.sink.publish(&submission).await;
        self.scoring_metrics
            .inc_weight_submissions(scope.as_str(), published.is_ok());
        published.map_err(|e| CycleError::port(scope, "weight_sink", e))?;

        self.scoring_metrics
            .set_miners_scored(scope.as_str(), stats.len() as u64);
        self.scoring_metrics
            .set_burn_percentage(scope.as_str(), burn_percentage);
        if let Some(reference) = &reference {
            self.scoring_metrics.set_p95_references(
                scope.as_str(),
                reference.smoothed_p95_sales,
                reference.smoothed_p95_revenue,
            );
        }

        tracing::info!(
            target: "cycle",
            event = "published",
            scope = %scope,
            mech_id = campaign.mech_id,
            miners = stats.len(),
            burn_percentage,
            uids = submission.uids.len()
        );

        Ok(ScopeReport {
            scope: scope.clone(),
            mech_id: campaign.mech_id,
            miners_scored: stats.len(),
            reference,
            burn,
            unresolved,
            submission,
        })
    }
}
