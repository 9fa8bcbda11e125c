//! Strongly-typed identifiers for mesh and traffic-network entities.

use std::fmt;

/// Identifies a sub-domain (mesh tile) within a decomposed domain.
///
/// Sub-domain IDs are assigned by the upstream domain decomposition and
/// are stable across runs; records persist them unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubDomainId(pub u32);

impl fmt::Display for SubDomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SubDomainId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a traffic-network node (a link endpoint).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
