//! Temporal alignment, batched persistence, and run orchestration.
//!
//! The pipeline walks an hourly timeline, joins four independently
//! sampled sources by timestamp, carries stale background-pollution
//! values forward, delegates vector assembly to `plume-features`, and
//! buffers records into threshold-sized batches for the output store.
//! [`process_runs`](run::process_runs) drives the whole thing for a
//! configured list of estimate-run tags.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod aligner;
pub mod config;
pub mod error;
pub mod metrics;
pub mod run;
pub mod writer;

pub use aligner::TemporalAligner;
pub use config::{ConfigError, MeshMode, RunConfig, DEFAULT_FLUSH_THRESHOLD};
pub use error::PipelineError;
pub use metrics::{AlignmentCounts, RunReport};
pub use run::process_runs;
pub use writer::{BatchedWriter, WriterStats};
