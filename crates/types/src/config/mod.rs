// Path: crates/types/src/config/mod.rs

//! Configuration structures for the scoring engine and the validation cycle.
use crate::app::ScopeId;
use crate::error::ScoringError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-scope scoring parameters.
pub mod scoring;
pub use scoring::*;

/// Configuration for the validation cycle (`validator.toml`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Length of the trailing statistics window, in days.
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    /// Mechanism id the network scope publishes under.
    #[serde(default)]
    pub network_mechid: u16,
    /// Mechanism id used for campaigns that do not carry their own.
    #[serde(default = "default_campaign_mechid")]
    pub campaign_mechid: u16,
    /// P95 source for the network scope when it has no explicit override.
    #[serde(default = "default_network_p95")]
    pub network_p95: P95Config,
    /// Parameters applied to every scope without an override.
    #[serde(default)]
    pub defaults: ScopeConfig,
    /// Per-scope overrides.
    #[serde(default)]
    pub scopes: BTreeMap<ScopeId, ScopeConfig>,
}

fn default_window_days() -> u32 {
    30
}
fn default_campaign_mechid() -> u16 {
    1
}
fn default_network_p95() -> P95Config {
    P95Config::Manual {
        p95_sales: 60.0,
        p95_revenue_usd: 4000.0,
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            network_mechid: 0,
            campaign_mechid: default_campaign_mechid(),
            network_p95: default_network_p95(),
            defaults: ScopeConfig::default(),
            scopes: BTreeMap::new(),
        }
    }
}

impl ValidatorConfig {
    /// Resolves the effective parameters for `scope`.
    pub fn scope_config(&self, scope: &ScopeId) -> ScopeConfig {
        if let Some(cfg) = self.scopes.get(scope) {
            return *cfg;
        }
        let mut cfg = self.defaults;
        if scope.is_network() {
            cfg.p95 = self.network_p95;
        }
        cfg
    }

    /// Validates the whole configuration. Call once at startup.
    pub fn validate(&self) -> Result<(), ScoringError> {
        if self.window_days == 0 {
            return Err(ScoringError::InvalidConfiguration(
                "'window_days' must be greater than 0".to_string(),
            ));
        }
        self.network_p95.validate()?;
        self.defaults.validate()?;
        for (scope, cfg) in &self.scopes {
            cfg.validate().map_err(|e| {
                ScoringError::InvalidConfiguration(format!("scope '{scope}': {e}"))
            })?;
        }
        Ok(())
    }
}
