//! The hourly temporal aligner.
//!
//! Walks the configured time range one hour at a time, joining weather,
//! traffic, background, and estimate sources by timestamp. Weather and
//! traffic gate the whole hour; background updates merge into a running
//! carry-forward mapping; estimate presence is checked once per hour
//! and gates every sub-domain for that hour. Surviving hours are
//! assembled per sub-domain in mesh order and pushed to the writer.

use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;

use plume_core::{
    BackgroundSeries, EstimateSeries, LatLon, Pollutant, RecordSink, SubDomainId, TrafficSeries,
    WeatherSeries,
};
use plume_features::{FeatureAssembler, HourFrame};
use plume_mesh::Mesh;

use crate::error::PipelineError;
use crate::metrics::AlignmentCounts;
use crate::writer::BatchedWriter;

/// Joins the four input series on an hourly timeline and drives the
/// assembler for every (hour, sub-domain) pair with complete data.
pub struct TemporalAligner<'a> {
    mesh: &'a Mesh,
    receptor_coords: &'a IndexMap<SubDomainId, Vec<LatLon>>,
    assembler: FeatureAssembler<'a>,
    weather: &'a WeatherSeries,
    background: &'a BackgroundSeries,
    traffic: &'a TrafficSeries,
    estimates: &'a EstimateSeries,
}

impl<'a> TemporalAligner<'a> {
    /// Create an aligner over one run's prepared inputs.
    ///
    /// `receptor_coords` must be the per-tile sorted assignment for
    /// `mesh` (see [`plume_mesh::assign_receptors`]).
    pub fn new(
        mesh: &'a Mesh,
        receptor_coords: &'a IndexMap<SubDomainId, Vec<LatLon>>,
        assembler: FeatureAssembler<'a>,
        weather: &'a WeatherSeries,
        background: &'a BackgroundSeries,
        traffic: &'a TrafficSeries,
        estimates: &'a EstimateSeries,
    ) -> Self {
        Self {
            mesh,
            receptor_coords,
            assembler,
            weather,
            background,
            traffic,
            estimates,
        }
    }

    /// Walk the timeline from `date_start` to `date_end` inclusive.
    ///
    /// The background state starts from the empirical defaults and is
    /// mutated in place as measurement updates arrive; it is never
    /// reset mid-run. Hours skipped for missing weather or traffic do
    /// not consume their background update either — the update is
    /// applied only when the hour passes both gates.
    ///
    /// # Errors
    ///
    /// Assembly and flush failures abort the walk; everything already
    /// flushed stays persisted and the current buffer stays in the
    /// writer.
    pub fn run<S: RecordSink + ?Sized>(
        &self,
        date_start: DateTime<Utc>,
        date_end: DateTime<Utc>,
        writer: &mut BatchedWriter<'_, S>,
    ) -> Result<AlignmentCounts, PipelineError> {
        let mut counts = AlignmentCounts::default();
        let mut background_state: IndexMap<Pollutant, f64> = Pollutant::ALL
            .iter()
            .map(|p| (*p, p.empirical_background()))
            .collect();

        let step = Duration::hours(1);
        let mut current = date_start;
        while current <= date_end {
            let Some(weather) = self.weather.get(current) else {
                counts.hours_skipped_no_weather += 1;
                current += step;
                continue;
            };
            let Some(volumes) = self.traffic.hour(current) else {
                counts.hours_skipped_no_traffic += 1;
                current += step;
                continue;
            };

            if let Some(update) = self.background.update_at(current) {
                // Pollutants absent from the update keep their carried
                // values.
                for (&pollutant, &value) in update {
                    background_state.insert(pollutant, value);
                }
            }

            let Some(estimates) = self.estimates.hour(current) else {
                counts.hours_skipped_no_estimates += 1;
                current += step;
                continue;
            };

            let frame = HourFrame {
                timestamp: current,
                weather,
                volumes,
                background: &background_state,
                estimates,
            };
            for (id, tile) in self.mesh.iter() {
                let receptors = self
                    .receptor_coords
                    .get(&id)
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                let record = self.assembler.assemble(&frame, id, &tile.links, receptors)?;
                if writer.push(record)? {
                    tracing::info!(hour = %current, "flushed batch, complete up to here");
                }
            }
            counts.hours_processed += 1;
            current += step;
        }

        Ok(counts)
    }
}
