//! Fixed-width feature/label vector assembly.
//!
//! One record per (hour, sub-domain) pair. The input layout is
//! `[time] + weather(4) + link block(20 × 5) + receptor coords(2 × n)`;
//! the link block is zero padded to its fixed width, while the receptor
//! block length follows the sub-domain's actual receptor count. Labels
//! are background-subtracted estimates, one per (receptor, pollutant).

use std::error::Error;
use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use plume_core::{
    LatLon, Link, LinkGeometry, Pollutant, ProcessedRecord, SubDomainId, WeatherSample,
};

use crate::stats::NormStats;

// ── Layout ──────────────────────────────────────────────────────

/// Maximum links encoded per sub-domain; fewer links are zero padded.
pub const MAX_LINKS: usize = 20;

/// Scalars per encoded link: start coord (2) + end coord (2) + volume.
pub const SCALARS_PER_LINK: usize = 5;

/// Scalars contributed by the weather sample.
pub const WEATHER_SCALARS: usize = 4;

/// Raw labels below this are treated as model artifacts and reset to
/// zero — the dispersion model's traffic contribution should never be
/// largely negative.
const LABEL_FLOOR: f64 = -1.0;

/// Length of `input` for a sub-domain with `receptor_count` receptors.
pub fn input_len(receptor_count: usize) -> usize {
    1 + WEATHER_SCALARS + MAX_LINKS * SCALARS_PER_LINK + 2 * receptor_count
}

/// Length of `labels` for `receptor_count` receptors.
pub fn label_len(receptor_count: usize) -> usize {
    receptor_count * Pollutant::ALL.len()
}

// ── Error type ──────────────────────────────────────────────────

/// Errors from record assembly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssembleError {
    /// A sub-domain carries more links than the fixed block width.
    TooManyLinks {
        /// The offending sub-domain.
        sub_domain: SubDomainId,
        /// Its link count.
        count: usize,
    },
    /// A link has no geometry entry, so its endpoint coordinates cannot
    /// be encoded.
    MissingLinkGeometry {
        /// The link without geometry.
        link: Link,
    },
}

impl fmt::Display for AssembleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyLinks { sub_domain, count } => write!(
                f,
                "sub-domain {sub_domain} has {count} links, the feature layout holds {MAX_LINKS}"
            ),
            Self::MissingLinkGeometry { link } => {
                write!(f, "link {link} has no geometry entry")
            }
        }
    }
}

impl Error for AssembleError {}

// ── HourFrame ───────────────────────────────────────────────────

/// Per-hour slice of every aligned source, borrowed by the assembler.
#[derive(Clone, Copy, Debug)]
pub struct HourFrame<'a> {
    /// The hour being assembled.
    pub timestamp: DateTime<Utc>,
    /// Weather sample at the hour.
    pub weather: &'a WeatherSample,
    /// Canonical-link volumes at the hour.
    pub volumes: &'a IndexMap<Link, f64>,
    /// Carried background state at the hour.
    pub background: &'a IndexMap<Pollutant, f64>,
    /// Estimates at the hour, keyed by receptor then pollutant.
    pub estimates: &'a IndexMap<LatLon, IndexMap<Pollutant, f64>>,
}

// ── FeatureAssembler ────────────────────────────────────────────

/// Builds one [`ProcessedRecord`] per (hour, sub-domain) pair.
///
/// Holds the run-constant inputs — statistics, link geometry, mesh
/// size — compiled once and applied to every frame.
#[derive(Clone, Copy, Debug)]
pub struct FeatureAssembler<'a> {
    stats: &'a NormStats,
    link_geometry: &'a IndexMap<Link, LinkGeometry>,
    mesh_size: usize,
}

impl<'a> FeatureAssembler<'a> {
    /// Create an assembler over run-constant inputs.
    pub fn new(
        stats: &'a NormStats,
        link_geometry: &'a IndexMap<Link, LinkGeometry>,
        mesh_size: usize,
    ) -> Self {
        Self {
            stats,
            link_geometry,
            mesh_size,
        }
    }

    /// Assemble the record for one sub-domain at one hour.
    ///
    /// `links` keep their stored endpoint orientation (geometry keys);
    /// volumes are looked up under the canonical form. A link with no
    /// volume this hour contributes a literal `0.0` in its volume slot.
    /// `receptors` must already be in the sub-domain's sorted order. A
    /// receptor or pollutant absent from the hour's estimates yields
    /// label `0`; raw labels below `-1` are reset to `0`.
    ///
    /// # Errors
    ///
    /// [`AssembleError::TooManyLinks`] if the sub-domain exceeds the
    /// fixed link-block width; [`AssembleError::MissingLinkGeometry`]
    /// if a link has no geometry entry.
    pub fn assemble(
        &self,
        frame: &HourFrame<'_>,
        sub_domain: SubDomainId,
        links: &[Link],
        receptors: &[LatLon],
    ) -> Result<ProcessedRecord, AssembleError> {
        if links.len() > MAX_LINKS {
            return Err(AssembleError::TooManyLinks {
                sub_domain,
                count: links.len(),
            });
        }

        let mut input = Vec::with_capacity(input_len(receptors.len()));
        input.push(self.stats.normalize_time(frame.timestamp));
        input.extend(self.stats.normalize_weather(frame.weather));

        for &link in links {
            let geometry = self
                .link_geometry
                .get(&link)
                .ok_or(AssembleError::MissingLinkGeometry { link })?;
            input.extend(self.stats.normalize_coord(geometry.start));
            input.extend(self.stats.normalize_coord(geometry.end));
            match frame.volumes.get(&link.canonical()) {
                Some(&volume) => input.push(self.stats.normalize_volume(volume)),
                None => input.push(0.0),
            }
        }
        input.extend(std::iter::repeat(0.0).take((MAX_LINKS - links.len()) * SCALARS_PER_LINK));

        let mut labels = Vec::with_capacity(label_len(receptors.len()));
        for receptor in receptors {
            input.extend(self.stats.normalize_coord(*receptor));
            let estimated = frame.estimates.get(receptor);
            for pollutant in Pollutant::ALL {
                let raw = match estimated.and_then(|by_pollutant| by_pollutant.get(&pollutant)) {
                    Some(estimate) => {
                        let background = frame
                            .background
                            .get(&pollutant)
                            .copied()
                            .unwrap_or_else(|| pollutant.empirical_background());
                        estimate - background
                    }
                    None => 0.0,
                };
                labels.push(if raw < LABEL_FLOOR { 0.0 } else { raw });
            }
        }

        Ok(ProcessedRecord {
            mesh_size: self.mesh_size,
            sub_domain,
            input,
            labels,
        })
    }
}
