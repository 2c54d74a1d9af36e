// Path: crates/types/src/app/burn.rs
use crate::error::{ensure_non_negative, ScoringError};
use serde::{Deserialize, Serialize};

/// Network economics for one burn calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BurnInput {
    /// Emission paid to miners over the window, in TAO.
    pub total_emission_tao: f64,
    /// TAO price in USD.
    pub tao_usd_price: f64,
    /// Verified sales generated by miners over the window, in USD.
    pub total_sales_usd: f64,
    /// Target sales-to-emission ratio; `1.0` means miners earn what they generate.
    #[serde(default = "default_target_ratio")]
    pub target_ratio: f64,
}

fn default_target_ratio() -> f64 {
    1.0
}

impl BurnInput {
    /// Validates every field, naming the first offending one.
    pub fn validate(&self) -> Result<(), ScoringError> {
        ensure_non_negative("total_emission_tao", self.total_emission_tao)?;
        ensure_non_negative("tao_usd_price", self.tao_usd_price)?;
        ensure_non_negative("total_sales_usd", self.total_sales_usd)?;
        if !self.target_ratio.is_finite() || self.target_ratio <= 0.0 {
            return Err(ScoringError::InvalidConfiguration(format!(
                "target_ratio must be a finite value > 0, got {}",
                self.target_ratio
            )));
        }
        Ok(())
    }
}

/// Emission and sales figures reported for a scope, before a target ratio is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionData {
    /// Emission paid to miners over the window, in TAO.
    pub total_emission_tao: f64,
    /// TAO price in USD.
    pub tao_usd_price: f64,
    /// Verified sales generated by miners over the window, in USD.
    pub total_sales_usd: f64,
}

impl EmissionData {
    /// Pairs the figures with a configured target ratio.
    pub fn with_target_ratio(self, target_ratio: f64) -> BurnInput {
        BurnInput {
            total_emission_tao: self.total_emission_tao,
            tao_usd_price: self.tao_usd_price,
            total_sales_usd: self.total_sales_usd,
            target_ratio,
        }
    }
}
