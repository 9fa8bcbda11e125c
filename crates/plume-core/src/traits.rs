//! Store traits: the seams between the pipeline and its collaborators.
//!
//! Upstream stores are read-only and queried once per run or once per
//! input source; the output store accepts ordered record batches. The
//! pipeline takes these as explicit handles, so a run's collaborators
//! are scoped to the invocation rather than process-global.

use chrono::{DateTime, Utc};

use crate::error::{SinkError, SourceError};
use crate::geo::{LatLon, Link};
use crate::record::ProcessedRecord;
use crate::series::{
    BackgroundSeries, DomainMetadata, EstimateSeries, TrafficSeries, WeatherSeries,
};

/// Hourly weather observations, queried by time range.
pub trait WeatherSource {
    /// All samples with `start <= timestamp <= end`.
    fn weather_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<WeatherSeries, SourceError>;
}

/// Sparse background-pollution measurements, queried by time range.
pub trait BackgroundSource {
    /// All measurement updates with `start <= timestamp <= end`.
    fn background_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<BackgroundSeries, SourceError>;
}

/// Domain-decomposition metadata, queried by run tag.
pub trait UtilitySource {
    /// Metadata for a run tag, or `None` if the tag is unknown.
    fn domain_metadata(&self, run_tag: &str) -> Result<Option<DomainMetadata>, SourceError>;
}

/// Hourly traffic volumes, queried by time range and link list.
pub trait TrafficSource {
    /// Volumes for the given canonical links, `start <= timestamp <= end`.
    fn volumes_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        links: &[Link],
    ) -> Result<TrafficSeries, SourceError>;
}

/// Dispersion-model estimates, queried by time range and run tag.
pub trait EstimateSource {
    /// Estimates and the receptor list the model was evaluated at.
    fn estimates_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        run_tag: &str,
    ) -> Result<EstimateQuery, SourceError>;
}

/// Result of an estimate query.
#[derive(Clone, Debug)]
pub struct EstimateQuery {
    /// Modeled concentrations over the queried range.
    pub estimates: EstimateSeries,
    /// Receptor points, in store order.
    pub receptors: Vec<LatLon>,
}

/// Output store accepting ordered batches of processed records.
pub trait RecordSink {
    /// Persist a batch.
    ///
    /// On success the whole batch is durable; on error the caller must
    /// treat the batch as not persisted and keep it for retry or
    /// diagnosis.
    fn insert_many(&mut self, records: &[ProcessedRecord]) -> Result<(), SinkError>;
}
