//! Plume: an air-quality pre-processing pipeline.
//!
//! Transforms raw simulation and measurement time series — traffic
//! volumes, weather, modeled pollutant concentrations, background
//! measurements, mesh geometry — into fixed-shape, normalized
//! feature/label vectors for training a sequence model. This facade
//! crate re-exports the public API of the Plume sub-crates; for most
//! users a single `plume` dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use plume::mesh::Polygon;
//! use plume::prelude::*;
//!
//! // A mesh tile boundary and a receptor point inside it.
//! let tile = Polygon::new(vec![
//!     LatLon::new(0.0, 0.0),
//!     LatLon::new(0.0, 1.0),
//!     LatLon::new(1.0, 1.0),
//!     LatLon::new(1.0, 0.0),
//! ])
//! .unwrap();
//! assert!(tile.contains(&LatLon::new(0.25, 0.75)));
//!
//! // Standardization round-trips through its statistic.
//! let stat = Stat { mean: 150.0, std: 50.0 };
//! assert_eq!(stat.normalize(150.0), 0.0);
//! assert_eq!(stat.denormalize(stat.normalize(200.0)), 200.0);
//!
//! // Every record's link block is padded to the same width.
//! assert_eq!(input_len(0), 1 + 4 + MAX_LINKS * SCALARS_PER_LINK);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `plume-core` | IDs, pollutants, series, records, store traits |
//! | [`mesh`] | `plume-mesh` | Tiles, polygons, receptor assignment |
//! | [`features`] | `plume-features` | Normalization statistics and vector assembly |
//! | [`pipeline`] | `plume-pipeline` | Temporal alignment, batching, orchestration |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, series, and store traits (`plume-core`).
pub use plume_core as types;

/// Normalization statistics and vector assembly (`plume-features`).
pub use plume_features as features;

/// Mesh structures and receptor assignment (`plume-mesh`).
pub use plume_mesh as mesh;

/// Temporal alignment, batching, and orchestration (`plume-pipeline`).
pub use plume_pipeline as pipeline;

/// The most commonly used items, re-exported flat.
pub mod prelude {
    pub use plume_core::{
        BackgroundSource, BoundingBox, EstimateSource, LatLon, Link, NodeId, Pollutant,
        ProcessedRecord, RecordSink, SubDomainId, TrafficSource, UtilitySource, WeatherSample,
        WeatherSource,
    };
    pub use plume_features::{
        input_len, label_len, FeatureAssembler, NormStats, Stat, MAX_LINKS, SCALARS_PER_LINK,
    };
    pub use plume_mesh::{assign_receptors, Mesh, Polygon};
    pub use plume_pipeline::{
        process_runs, BatchedWriter, MeshMode, PipelineError, RunConfig, RunReport,
        TemporalAligner, DEFAULT_FLUSH_THRESHOLD,
    };
}
