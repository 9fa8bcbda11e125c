//! Per-tag run orchestration.
//!
//! Weather and background measurements are fetched once and shared;
//! everything else — metadata, traffic, estimates, the mesh, the
//! statistics — is fetched and rebuilt per run tag, because each
//! estimate run carries its own decomposition and link set.

use std::time::Instant;

use plume_core::{
    BackgroundSource, EstimateQuery, EstimateSource, Link, RecordSink, SubDomainId, TrafficSource,
    UtilitySource, WeatherSource,
};
use plume_features::{FeatureAssembler, NormStats};
use plume_mesh::{assign_receptors, Mesh};

use crate::aligner::TemporalAligner;
use crate::config::{MeshMode, RunConfig};
use crate::error::PipelineError;
use crate::metrics::RunReport;
use crate::writer::BatchedWriter;

/// Pre-process every configured run tag into the output sink.
///
/// Runs with missing metadata or an empty sub-domain selection are
/// skipped with a warning and produce no report; every other failure
/// aborts the invocation. Reports come back in run-tag order.
///
/// # Errors
///
/// [`PipelineError::Config`] before anything is queried; then any
/// subsystem failure from fetching, statistic computation, mesh
/// construction, assembly, or flushing.
pub fn process_runs<W, B, U, T, E, S>(
    config: &RunConfig,
    weather_source: &W,
    background_source: &B,
    utility_source: &U,
    traffic_source: &T,
    estimate_source: &E,
    sink: &mut S,
) -> Result<Vec<RunReport>, PipelineError>
where
    W: WeatherSource,
    B: BackgroundSource,
    U: UtilitySource,
    T: TrafficSource,
    E: EstimateSource,
    S: RecordSink,
{
    config.validate()?;

    tracing::info!(start = %config.date_start, end = %config.date_end, "fetching shared series");
    let weather = weather_source.weather_range(config.date_start, config.date_end)?;
    let background = background_source.background_range(config.date_start, config.date_end)?;

    let mut reports = Vec::new();
    for run_tag in &config.run_tags {
        tracing::info!(%run_tag, "pre-processing run");
        let started = Instant::now();

        let Some(metadata) = utility_source.domain_metadata(run_tag)? else {
            tracing::warn!(%run_tag, "no domain metadata, skipping run");
            continue;
        };

        let selected: Vec<SubDomainId> = metadata
            .sub_domains
            .keys()
            .copied()
            .filter(|id| config.sub_domain_selection.contains(id))
            .collect();
        if selected.is_empty() {
            tracing::warn!(
                %run_tag,
                selection = ?config.sub_domain_selection,
                "no sub-domains survive the selection, skipping run"
            );
            continue;
        }

        let links: Vec<Link> = metadata
            .sub_domains
            .iter()
            .filter(|(id, _)| selected.contains(id))
            .flat_map(|(_, spec)| spec.links.iter().copied())
            .collect();
        let canonical: Vec<Link> = links.iter().map(|link| link.canonical()).collect();

        let traffic =
            traffic_source.volumes_range(config.date_start, config.date_end, &canonical)?;
        let EstimateQuery {
            estimates,
            receptors,
        } = estimate_source.estimates_range(config.date_start, config.date_end, run_tag)?;

        let mesh = match config.mesh_mode {
            MeshMode::SingleTile => Mesh::single_tile(&metadata.bounding_box, links),
            MeshMode::SubDomains => Mesh::from_metadata(&metadata, &selected)?,
        };

        let stats = NormStats::compute(
            config.date_start,
            config.date_end,
            &weather,
            &traffic,
            &metadata.bounding_box,
        )?;
        let receptor_coords = assign_receptors(&mesh, &receptors);
        let assembler = FeatureAssembler::new(&stats, &metadata.link_geometry, mesh.len());

        let aligner = TemporalAligner::new(
            &mesh,
            &receptor_coords,
            assembler,
            &weather,
            &background,
            &traffic,
            &estimates,
        );
        let mut writer = BatchedWriter::new(sink, config.flush_threshold);
        let counts = aligner.run(config.date_start, config.date_end, &mut writer)?;
        let totals = writer.finish()?;

        let elapsed = started.elapsed();
        tracing::info!(
            %run_tag,
            records = totals.records,
            batches = totals.batches,
            hours = counts.hours_processed,
            ?elapsed,
            "run complete"
        );
        reports.push(RunReport {
            run_tag: run_tag.clone(),
            counts,
            records_emitted: totals.records,
            batches_flushed: totals.batches,
            elapsed,
        });
    }

    Ok(reports)
}
