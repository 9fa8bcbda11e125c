//! Time-keyed input series and the utility-store metadata payload.
//!
//! All series preserve the order the store returned them in and have
//! explicit absent-key semantics: a missing timestamp means "no sample
//! this hour", a missing link means "no recorded volume", a missing
//! receptor or pollutant means "no estimate".

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::geo::{BoundingBox, LatLon, Link, LinkGeometry};
use crate::id::SubDomainId;
use crate::pollutant::Pollutant;

/// One hourly weather observation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeatherSample {
    /// Wind direction in degrees.
    pub wind_dir: f64,
    /// Wind speed in m/s.
    pub wind_speed: f64,
    /// Standard deviation of the wind direction in degrees.
    pub wind_dir_std: f64,
    /// Air temperature in °C.
    pub temperature: f64,
}

impl WeatherSample {
    /// The sample as a fixed-order 4-vector.
    pub fn to_array(self) -> [f64; 4] {
        [
            self.wind_dir,
            self.wind_speed,
            self.wind_dir_std,
            self.temperature,
        ]
    }
}

/// Hourly weather samples keyed by timestamp.
#[derive(Clone, Debug, Default)]
pub struct WeatherSeries {
    samples: IndexMap<DateTime<Utc>, WeatherSample>,
}

impl WeatherSeries {
    /// Create an empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the sample for an hour.
    pub fn insert(&mut self, timestamp: DateTime<Utc>, sample: WeatherSample) {
        self.samples.insert(timestamp, sample);
    }

    /// The sample for an hour, if one was recorded.
    pub fn get(&self, timestamp: DateTime<Utc>) -> Option<&WeatherSample> {
        self.samples.get(&timestamp)
    }

    /// Number of sampled hours.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the series has no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterate `(timestamp, sample)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (DateTime<Utc>, &WeatherSample)> {
        self.samples.iter().map(|(t, s)| (*t, s))
    }

    /// Iterate samples in insertion order.
    pub fn samples(&self) -> impl Iterator<Item = &WeatherSample> {
        self.samples.values()
    }
}

/// Hourly traffic volumes keyed by timestamp, then by canonical link.
#[derive(Clone, Debug, Default)]
pub struct TrafficSeries {
    hours: IndexMap<DateTime<Utc>, IndexMap<Link, f64>>,
}

impl TrafficSeries {
    /// Create an empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a volume for a link at an hour.
    ///
    /// Volume keys are expected in canonical (sorted-endpoint) form.
    pub fn insert(&mut self, timestamp: DateTime<Utc>, link: Link, volume: f64) {
        self.hours.entry(timestamp).or_default().insert(link, volume);
    }

    /// All link volumes recorded for an hour, if the hour is present.
    pub fn hour(&self, timestamp: DateTime<Utc>) -> Option<&IndexMap<Link, f64>> {
        self.hours.get(&timestamp)
    }

    /// Whether any volume was recorded for an hour.
    pub fn contains_hour(&self, timestamp: DateTime<Utc>) -> bool {
        self.hours.contains_key(&timestamp)
    }

    /// Every recorded volume, across all hours and links.
    pub fn volumes(&self) -> impl Iterator<Item = f64> + '_ {
        self.hours.values().flat_map(|links| links.values().copied())
    }

    /// Iterate `(timestamp, link volumes)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (DateTime<Utc>, &IndexMap<Link, f64>)> {
        self.hours.iter().map(|(t, links)| (*t, links))
    }

    /// Number of hours with at least one recorded volume.
    pub fn len(&self) -> usize {
        self.hours.len()
    }

    /// Whether no hour has a recorded volume.
    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }
}

/// Sparse background-pollution measurement updates.
///
/// Only hours with a new measurement are present; the temporal aligner
/// carries values forward across the gaps.
#[derive(Clone, Debug, Default)]
pub struct BackgroundSeries {
    updates: IndexMap<DateTime<Utc>, IndexMap<Pollutant, f64>>,
}

impl BackgroundSeries {
    /// Create an empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a measured background value for a pollutant at an hour.
    pub fn insert(&mut self, timestamp: DateTime<Utc>, pollutant: Pollutant, value: f64) {
        self.updates
            .entry(timestamp)
            .or_default()
            .insert(pollutant, value);
    }

    /// The measurement update for an hour, if one arrived.
    pub fn update_at(&self, timestamp: DateTime<Utc>) -> Option<&IndexMap<Pollutant, f64>> {
        self.updates.get(&timestamp)
    }

    /// Iterate `(timestamp, update)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (DateTime<Utc>, &IndexMap<Pollutant, f64>)> {
        self.updates.iter().map(|(t, update)| (*t, update))
    }

    /// Number of hours with a measurement update.
    pub fn len(&self) -> usize {
        self.updates.len()
    }

    /// Whether no update is present.
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }
}

/// Modeled concentrations keyed by timestamp, receptor, and pollutant.
///
/// Sparse on every level: a receptor or pollutant with no modeled value
/// at an hour is simply absent.
#[derive(Clone, Debug, Default)]
pub struct EstimateSeries {
    hours: IndexMap<DateTime<Utc>, IndexMap<LatLon, IndexMap<Pollutant, f64>>>,
}

impl EstimateSeries {
    /// Create an empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a modeled concentration.
    pub fn insert(
        &mut self,
        timestamp: DateTime<Utc>,
        receptor: LatLon,
        pollutant: Pollutant,
        value: f64,
    ) {
        self.hours
            .entry(timestamp)
            .or_default()
            .entry(receptor)
            .or_default()
            .insert(pollutant, value);
    }

    /// All estimates for an hour, if the model produced any.
    pub fn hour(
        &self,
        timestamp: DateTime<Utc>,
    ) -> Option<&IndexMap<LatLon, IndexMap<Pollutant, f64>>> {
        self.hours.get(&timestamp)
    }

    /// Whether the model produced any estimate for an hour.
    pub fn contains_hour(&self, timestamp: DateTime<Utc>) -> bool {
        self.hours.contains_key(&timestamp)
    }

    /// Iterate `(timestamp, estimates)` pairs in insertion order.
    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (DateTime<Utc>, &IndexMap<LatLon, IndexMap<Pollutant, f64>>)> {
        self.hours.iter().map(|(t, by_receptor)| (*t, by_receptor))
    }

    /// Number of hours with estimates.
    pub fn len(&self) -> usize {
        self.hours.len()
    }

    /// Whether no hour has estimates.
    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }
}

/// Boundary and link set of one sub-domain, as stored in the utility
/// metadata.
#[derive(Clone, Debug)]
pub struct SubDomainSpec {
    /// Boundary polygon vertices.
    pub boundary: Vec<LatLon>,
    /// Links inside the sub-domain, endpoint order as stored.
    pub links: Vec<Link>,
}

/// Utility-store payload describing the modeled domain for one run tag.
#[derive(Clone, Debug)]
pub struct DomainMetadata {
    /// Bounding box of the whole modeled area.
    pub bounding_box: BoundingBox,
    /// Sub-domain decomposition, in stable store order.
    pub sub_domains: IndexMap<SubDomainId, SubDomainSpec>,
    /// Start/end coordinates per link, keyed by stored endpoint order.
    pub link_geometry: IndexMap<Link, LinkGeometry>,
}
