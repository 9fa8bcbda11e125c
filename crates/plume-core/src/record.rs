//! The persisted pre-processed record.

use crate::id::SubDomainId;

/// One `(input, labels)` training pair for a sub-domain at an hour.
///
/// `input` is `[normalized time] + normalized weather (4 scalars) +
/// link block (20 × 5 scalars, zero padded) + normalized receptor
/// coordinates (2 scalars per receptor)`. `labels` holds one
/// background-subtracted estimate per (receptor, pollutant) pair, in
/// sorted receptor order and canonical pollutant order.
///
/// Within one run, `input` length is constant for a given receptor
/// count and `labels` length is a multiple of the pollutant count.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProcessedRecord {
    /// Number of tiles in the processed mesh.
    pub mesh_size: usize,
    /// Sub-domain this record describes.
    pub sub_domain: SubDomainId,
    /// Normalized feature vector.
    pub input: Vec<f64>,
    /// Background-subtracted label vector.
    pub labels: Vec<f64>,
}
