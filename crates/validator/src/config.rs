// Path: crates/validator/src/config.rs
use crate::error::CycleError;
use bitads_types::config::ValidatorConfig;
use std::path::Path;

/// Reads and validates a `validator.toml`.
pub fn load_config(path: impl AsRef<Path>) -> Result<ValidatorConfig, CycleError> {
    let raw = std::fs::read_to_string(path.as_ref())?;
    parse_config(&raw)
}

/// Parses and validates a TOML document.
pub fn parse_config(raw: &str) -> Result<ValidatorConfig, CycleError> {
    let config: ValidatorConfig = toml::from_str(raw)?;
    config.validate().map_err(CycleError::Config)?;
    Ok(config)
}
