// Path: crates/validator/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # BitAds Validator
//!
//! Wires the scoring engine to its collaborators. A [`ValidationCycle`] pulls
//! campaigns, statistics and emission figures through the [`ports`], runs
//! each scope through the engine and hands the UID-aligned weights to a
//! [`ports::WeightSink`]. Transport, keys and scheduling live behind the
//! ports and in the embedding process.

/// Loading `validator.toml`.
pub mod config;
/// The single-pass validation cycle and its report.
pub mod cycle;
/// The error type for configuration loading and cycle execution.
pub mod error;
/// Async traits for the cycle's collaborators.
pub mod ports;
/// JSON persistence of percentile references.
pub mod store;

pub use config::load_config;
pub use cycle::{CyclePorts, CycleReport, ScopeFailure, ScopeReport, ValidationCycle};
pub use error::CycleError;
pub use ports::WeightSubmission;
