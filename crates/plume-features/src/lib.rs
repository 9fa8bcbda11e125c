//! Normalization statistics and feature/label vector assembly.
//!
//! [`NormStats`](stats::NormStats) is computed once per run from the
//! full configured time range and held immutable; the
//! [`FeatureAssembler`](assemble::FeatureAssembler) applies it to every
//! (hour, sub-domain) pair, producing fixed-layout
//! [`ProcessedRecord`](plume_core::ProcessedRecord)s with a zero-padded
//! 20-link block and background-subtracted labels.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod assemble;
pub mod stats;

pub use assemble::{
    input_len, label_len, AssembleError, FeatureAssembler, HourFrame, MAX_LINKS, SCALARS_PER_LINK,
};
pub use stats::{NormStats, Stat, StatsError};
