// Path: crates/types/src/app/identity.rs
//! Identifiers for miners, scoring scopes and chain UIDs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque miner identifier (a hotkey on chain), unique within a scope.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MinerId(pub String);

impl MinerId {
    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MinerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MinerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for MinerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// An aggregation boundary: the whole network or a single campaign.
/// Each scope owns its own percentile reference and miner population.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeId(pub String);

impl ScopeId {
    /// The identifier of the network-wide scope.
    pub const NETWORK: &'static str = "network";

    /// Returns the network-wide scope.
    pub fn network() -> Self {
        Self(Self::NETWORK.to_string())
    }

    /// Returns a campaign scope in the `campaign:<id>` form.
    pub fn campaign(campaign_id: impl fmt::Display) -> Self {
        Self(format!("campaign:{campaign_id}"))
    }

    /// Whether this is the network-wide scope.
    pub fn is_network(&self) -> bool {
        self.0 == Self::NETWORK
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ScopeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A neuron UID on the subnet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uid(pub u16);

/// The reserved UID that receives the burn share of every weight vector.
pub const BURN_UID: Uid = Uid(0);

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A scoring scope paired with the mechanism id its weights are published under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    /// The scope whose miners are scored.
    pub scope: ScopeId,
    /// The mechanism id the resulting weight vector is submitted for.
    pub mech_id: u16,
}

impl fmt::Display for Campaign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Campaign(scope={}, mech_id={})", self.scope, self.mech_id)
    }
}

/// Maps miner identifiers to their current chain UID.
pub trait UidResolver {
    /// Returns the UID registered for `miner`, if any.
    fn uid_of(&self, miner: &MinerId) -> Option<Uid>;
}

impl UidResolver for std::collections::BTreeMap<MinerId, Uid> {
    fn uid_of(&self, miner: &MinerId) -> Option<Uid> {
        self.get(miner).copied()
    }
}

impl UidResolver for std::collections::HashMap<MinerId, Uid> {
    fn uid_of(&self, miner: &MinerId) -> Option<Uid> {
        self.get(miner).copied()
    }
}
