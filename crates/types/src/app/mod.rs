// Path: crates/types/src/app/mod.rs
//! Application-level data model: the inputs, references and outputs that
//! flow through one scoring cycle.

mod burn;
mod identity;
mod miner;
mod percentile;
mod weights;

pub use burn::*;
pub use identity::*;
pub use miner::*;
pub use percentile::*;
pub use weights::*;
