//! Core types and store traits for the Plume pre-processing pipeline.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the data model shared across the workspace — identifiers, the
//! pollutant enumeration, geographic primitives, time-keyed input
//! series, the persisted record — and the traits through which the
//! pipeline talks to its upstream and downstream stores.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod geo;
pub mod id;
pub mod pollutant;
pub mod record;
pub mod series;
pub mod traits;

pub use error::{SinkError, SourceError};
pub use geo::{BoundingBox, LatLon, Link, LinkGeometry};
pub use id::{NodeId, SubDomainId};
pub use pollutant::Pollutant;
pub use record::ProcessedRecord;
pub use series::{
    BackgroundSeries, DomainMetadata, EstimateSeries, SubDomainSpec, TrafficSeries, WeatherSample,
    WeatherSeries,
};
pub use traits::{
    BackgroundSource, EstimateQuery, EstimateSource, RecordSink, TrafficSource, UtilitySource,
    WeatherSource,
};
