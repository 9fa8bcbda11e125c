//! Error types for mesh construction.

use std::error::Error;
use std::fmt;

use plume_core::SubDomainId;

/// Errors detected while building a [`Mesh`](crate::Mesh).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MeshError {
    /// A sub-domain boundary has fewer than three vertices and cannot
    /// enclose any point.
    DegenerateBoundary {
        /// The sub-domain with the bad boundary.
        sub_domain: SubDomainId,
        /// Number of vertices found.
        vertex_count: usize,
    },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateBoundary {
                sub_domain,
                vertex_count,
            } => write!(
                f,
                "sub-domain {sub_domain} boundary has {vertex_count} vertices, need at least 3"
            ),
        }
    }
}

impl Error for MeshError {}
