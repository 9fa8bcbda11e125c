//! In-memory stores and fixtures for Plume development.
//!
//! Provides [`MemoryStore`] — an implementation of every upstream
//! source trait backed by pre-populated series — and [`MemorySink`],
//! which records each bulk insert as a separate batch so tests can
//! assert on flush boundaries.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use chrono::{DateTime, TimeZone, Utc};
use indexmap::IndexMap;

use plume_core::{
    BackgroundSeries, BackgroundSource, DomainMetadata, EstimateQuery, EstimateSeries,
    EstimateSource, LatLon, Link, ProcessedRecord, RecordSink, SinkError, SourceError,
    TrafficSeries, TrafficSource, UtilitySource, WeatherSeries, WeatherSource,
};

pub mod fixtures;

/// Shorthand for an hour-aligned UTC timestamp.
pub fn hour(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

/// In-memory implementation of every upstream source trait.
///
/// Pre-populate the public fields, then hand references to the
/// pipeline. Range queries filter inclusively on both ends; the
/// estimate query ignores the run tag and serves the same series for
/// every tag.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    pub weather: WeatherSeries,
    pub background: BackgroundSeries,
    pub traffic: TrafficSeries,
    pub estimates: EstimateSeries,
    pub receptors: Vec<LatLon>,
    pub metadata: IndexMap<String, DomainMetadata>,
}

impl WeatherSource for MemoryStore {
    fn weather_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<WeatherSeries, SourceError> {
        let mut out = WeatherSeries::new();
        for (t, sample) in self.weather.iter() {
            if start <= t && t <= end {
                out.insert(t, *sample);
            }
        }
        Ok(out)
    }
}

impl BackgroundSource for MemoryStore {
    fn background_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<BackgroundSeries, SourceError> {
        let mut out = BackgroundSeries::new();
        for (t, update) in self.background.iter() {
            if start <= t && t <= end {
                for (&pollutant, &value) in update {
                    out.insert(t, pollutant, value);
                }
            }
        }
        Ok(out)
    }
}

impl UtilitySource for MemoryStore {
    fn domain_metadata(&self, run_tag: &str) -> Result<Option<DomainMetadata>, SourceError> {
        Ok(self.metadata.get(run_tag).cloned())
    }
}

impl TrafficSource for MemoryStore {
    fn volumes_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        links: &[Link],
    ) -> Result<TrafficSeries, SourceError> {
        let mut out = TrafficSeries::new();
        for (t, volumes) in self.traffic.iter() {
            if start <= t && t <= end {
                for (&link, &volume) in volumes {
                    if links.contains(&link) {
                        out.insert(t, link, volume);
                    }
                }
            }
        }
        Ok(out)
    }
}

impl EstimateSource for MemoryStore {
    fn estimates_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        _run_tag: &str,
    ) -> Result<EstimateQuery, SourceError> {
        let mut out = EstimateSeries::new();
        for (t, by_receptor) in self.estimates.iter() {
            if start <= t && t <= end {
                for (&receptor, by_pollutant) in by_receptor {
                    for (&pollutant, &value) in by_pollutant {
                        out.insert(t, receptor, pollutant, value);
                    }
                }
            }
        }
        Ok(EstimateQuery {
            estimates: out,
            receptors: self.receptors.clone(),
        })
    }
}

/// Output sink recording every bulk insert as a separate batch.
///
/// Set `fail_next_insert` to make the next `insert_many` return an
/// error (and reset the flag), for exercising flush-failure paths.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    pub batches: Vec<Vec<ProcessedRecord>>,
    pub fail_next_insert: bool,
}

impl MemorySink {
    /// Iterate all persisted records across batches, in insert order.
    pub fn records(&self) -> impl Iterator<Item = &ProcessedRecord> {
        self.batches.iter().flatten()
    }

    /// Total number of persisted records.
    pub fn total_records(&self) -> usize {
        self.batches.iter().map(Vec::len).sum()
    }
}

impl RecordSink for MemorySink {
    fn insert_many(&mut self, records: &[ProcessedRecord]) -> Result<(), SinkError> {
        if self.fail_next_insert {
            self.fail_next_insert = false;
            return Err(SinkError::InsertFailed {
                reason: "injected failure".into(),
            });
        }
        self.batches.push(records.to_vec());
        Ok(())
    }
}
