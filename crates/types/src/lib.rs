// Path: crates/types/src/lib.rs
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

//! # BitAds Types
//!
//! Core data structures shared by the scoring engine and the validation cycle:
//! per-miner statistics, percentile references, burn inputs, weight vectors,
//! configuration and errors.

/// Miner statistics, score results, percentile references and weight vectors.
pub mod app;
/// Serde configuration structures for scoring, percentiles and burn.
pub mod config;
/// Error enums and their stable error codes.
pub mod error;

/// Floor applied to normalisation denominators so a zero reference never divides by zero.
pub const EPSILON: f64 = 1e-9;

/// Tolerance used when checking that fractions or weight pairs sum to one.
pub const SUM_TOLERANCE: f64 = 1e-6;
