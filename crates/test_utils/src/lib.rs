// Path: crates/test_utils/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # BitAds Test Utilities
//!
//! Assertion macros, deterministic randomness and miner population fixtures
//! shared by the scoring and validator test suites.

pub mod assertions;
pub mod fixtures;
pub mod randomness;
