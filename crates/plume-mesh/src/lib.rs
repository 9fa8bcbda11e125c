//! Mesh structures and receptor assignment for the Plume pipeline.
//!
//! A [`Mesh`] is the set of sub-domain tiles a run is processed over:
//! either the utility metadata's decomposition or the whole bounding
//! box as a single tile. Tiles iterate in a deterministic, stable
//! order — record emission order depends on it.
//!
//! [`assign_receptors`] places every receptor point into every tile
//! whose boundary polygon contains it and fixes the per-tile ordering
//! that feature vectors are built in.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod assign;
pub mod error;
pub mod mesh;
pub mod polygon;

pub use assign::assign_receptors;
pub use error::MeshError;
pub use mesh::{Mesh, SubDomain};
pub use polygon::Polygon;
