// Path: crates/types/src/config/scoring.rs
//! Per-scope scoring parameters.

use crate::error::ScoringError;
use crate::SUM_TOLERANCE;
use serde::{Deserialize, Serialize};

/// Lowest accepted smoothing factor for automatic P95 references.
pub const MIN_EMA_ALPHA: f64 = 0.3;
/// Highest accepted smoothing factor for automatic P95 references.
pub const MAX_EMA_ALPHA: f64 = 0.5;

/// The sales/revenue blend used to build a miner's base score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Weight of the normalised sales term.
    pub w_sales: f64,
    /// Weight of the normalised revenue term.
    pub w_rev: f64,
}

impl ScoreWeights {
    /// Balanced preset.
    pub const BALANCED: Self = Self {
        w_sales: 0.40,
        w_rev: 0.60,
    };
    /// Revenue-heavy preset used by some deployments.
    pub const REVENUE_HEAVY: Self = Self {
        w_sales: 0.15,
        w_rev: 0.85,
    };

    /// Builds a validated weight pair.
    pub fn new(w_sales: f64, w_rev: f64) -> Result<Self, ScoringError> {
        let weights = Self { w_sales, w_rev };
        weights.validate()?;
        Ok(weights)
    }

    /// Both weights must be non-negative and sum to one.
    pub fn validate(&self) -> Result<(), ScoringError> {
        let finite = self.w_sales.is_finite() && self.w_rev.is_finite();
        if !finite || self.w_sales < 0.0 || self.w_rev < 0.0 {
            return Err(ScoringError::InvalidConfiguration(format!(
                "score weights must be finite and non-negative, got ({}, {})",
                self.w_sales, self.w_rev
            )));
        }
        let sum = self.w_sales + self.w_rev;
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(ScoringError::InvalidConfiguration(format!(
                "w_sales + w_rev must equal 1.0, got {sum}"
            )));
        }
        Ok(())
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::BALANCED
    }
}

/// Penalty for miners with very few sales.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoftCapConfig {
    /// Whether the penalty is applied.
    #[serde(default = "default_soft_cap_enabled")]
    pub enabled: bool,
    /// Miners with fewer sales than this are penalised.
    #[serde(default = "default_soft_cap_threshold")]
    pub threshold: u64,
    /// Multiplier applied to penalised scores.
    #[serde(default = "default_soft_cap_factor")]
    pub factor: f64,
}

fn default_soft_cap_enabled() -> bool {
    true
}
fn default_soft_cap_threshold() -> u64 {
    3
}
fn default_soft_cap_factor() -> f64 {
    0.30
}

impl SoftCapConfig {
    /// A soft cap with the default threshold and factor, switched off.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ScoringError> {
        if !(0.0..=1.0).contains(&self.factor) {
            return Err(ScoringError::InvalidConfiguration(format!(
                "soft_cap.factor must lie in [0, 1], got {}",
                self.factor
            )));
        }
        Ok(())
    }
}

impl Default for SoftCapConfig {
    fn default() -> Self {
        Self {
            enabled: default_soft_cap_enabled(),
            threshold: default_soft_cap_threshold(),
            factor: default_soft_cap_factor(),
        }
    }
}

/// How a scope obtains its P95 references.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum P95Config {
    /// Fixed references, never recomputed.
    Manual {
        /// Sales reference.
        p95_sales: f64,
        /// Revenue reference in USD.
        p95_revenue_usd: f64,
    },
    /// References recomputed from the scope's population every epoch and
    /// smoothed with an exponential moving average.
    Auto {
        /// Weight of the newest observation.
        #[serde(default = "default_ema_alpha")]
        ema_alpha: f64,
    },
}

pub(crate) fn default_ema_alpha() -> f64 {
    0.4
}

impl P95Config {
    pub fn validate(&self) -> Result<(), ScoringError> {
        match *self {
            Self::Manual {
                p95_sales,
                p95_revenue_usd,
            } => {
                let valid = |v: f64| v.is_finite() && v >= 0.0;
                if !valid(p95_sales) || !valid(p95_revenue_usd) {
                    return Err(ScoringError::InvalidConfiguration(format!(
                        "manual P95 values must be finite and non-negative, got ({p95_sales}, {p95_revenue_usd})"
                    )));
                }
                Ok(())
            }
            Self::Auto { ema_alpha } => validate_alpha(ema_alpha),
        }
    }
}

impl Default for P95Config {
    fn default() -> Self {
        Self::Auto {
            ema_alpha: default_ema_alpha(),
        }
    }
}

/// Checks a smoothing factor against the accepted range.
pub fn validate_alpha(alpha: f64) -> Result<(), ScoringError> {
    if !(MIN_EMA_ALPHA..=MAX_EMA_ALPHA).contains(&alpha) {
        return Err(ScoringError::InvalidConfiguration(format!(
            "ema_alpha must lie in [{MIN_EMA_ALPHA}, {MAX_EMA_ALPHA}], got {alpha}"
        )));
    }
    Ok(())
}

/// Emission burn parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BurnConfig {
    /// Target sales-to-emission ratio.
    #[serde(default = "default_target_ratio")]
    pub target_ratio: f64,
    /// When set, this percentage is burned regardless of the economics.
    #[serde(default)]
    pub fixed_burn_percentage: Option<f64>,
}

fn default_target_ratio() -> f64 {
    1.0
}

impl BurnConfig {
    pub fn validate(&self) -> Result<(), ScoringError> {
        if !self.target_ratio.is_finite() || self.target_ratio <= 0.0 {
            return Err(ScoringError::InvalidConfiguration(format!(
                "target_ratio must be > 0, got {}",
                self.target_ratio
            )));
        }
        if let Some(fixed) = self.fixed_burn_percentage {
            if !(0.0..=100.0).contains(&fixed) {
                return Err(ScoringError::InvalidConfiguration(format!(
                    "fixed_burn_percentage must lie in [0, 100], got {fixed}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for BurnConfig {
    fn default() -> Self {
        Self {
            target_ratio: default_target_ratio(),
            fixed_burn_percentage: None,
        }
    }
}

/// Everything needed to score one scope.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScopeConfig {
    #[serde(default)]
    pub weights: ScoreWeights,
    #[serde(default)]
    pub soft_cap: SoftCapConfig,
    #[serde(default)]
    pub p95: P95Config,
    #[serde(default)]
    pub burn: BurnConfig,
}

impl ScopeConfig {
    pub fn validate(&self) -> Result<(), ScoringError> {
        self.weights.validate()?;
        self.soft_cap.validate()?;
        self.p95.validate()?;
        self.burn.validate()
    }
}
