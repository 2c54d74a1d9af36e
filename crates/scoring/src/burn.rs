// Path: crates/scoring/src/burn.rs
//! Emission burn controller.
//!
//! Caps aggregate miner payout at `target_ratio` times the verified sales
//! value they generated; the excess emission is redirected to the burn UID.

use bitads_types::app::{BurnInput, EmissionData};
use bitads_types::config::BurnConfig;
use bitads_types::error::ScoringError;

/// Percentage of emission to burn, in `[0, 100]`.
///
/// Zero whenever the emission's USD value does not exceed the sales target,
/// including when there is no emission at all.
pub fn compute_burn(
    total_emission_tao: f64,
    tao_usd_price: f64,
    total_sales_usd: f64,
    target_ratio: f64,
) -> Result<f64, ScoringError> {
    burn_percentage(&BurnInput {
        total_emission_tao,
        tao_usd_price,
        total_sales_usd,
        target_ratio,
    })
}

/// [`compute_burn`] over a [`BurnInput`].
pub fn burn_percentage(input: &BurnInput) -> Result<f64, ScoringError> {
    input.validate()?;

    let emission_usd = input.total_emission_tao * input.tao_usd_price;
    if emission_usd <= 0.0 {
        return Ok(0.0);
    }
    let target_usd = input.total_sales_usd * input.target_ratio;
    let burn = (emission_usd - target_usd) / emission_usd * 100.0;
    Ok(burn.clamp(0.0, 100.0))
}

/// Where a scope's burn percentage came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BurnDecision {
    /// A configured percentage, used regardless of the economics.
    Fixed(f64),
    /// Derived from emission and sales figures.
    Computed(f64),
    /// No fixed value and no figures for the scope: nothing is burned.
    Disabled,
}

impl BurnDecision {
    pub fn percentage(&self) -> f64 {
        match *self {
            Self::Fixed(p) | Self::Computed(p) => p,
            Self::Disabled => 0.0,
        }
    }
}

/// Resolves a scope's burn from its configuration and reported economics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurnController {
    config: BurnConfig,
}

impl BurnController {
    pub fn new(config: BurnConfig) -> Result<Self, ScoringError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// A fixed percentage wins; otherwise the figures are run through
    /// [`burn_percentage`] with the configured target ratio.
    pub fn decide(&self, emission: Option<&EmissionData>) -> Result<BurnDecision, ScoringError> {
        if let Some(fixed) = self.config.fixed_burn_percentage {
            return Ok(BurnDecision::Fixed(fixed));
        }
        match emission {
            Some(data) => {
                let input = data.with_target_ratio(self.config.target_ratio);
                burn_percentage(&input).map(BurnDecision::Computed)
            }
            None => Ok(BurnDecision::Disabled),
        }
    }
}
