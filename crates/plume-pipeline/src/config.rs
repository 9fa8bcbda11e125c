//! Run configuration and validation.

use std::error::Error;
use std::fmt;

use chrono::{DateTime, Utc};

use plume_core::SubDomainId;

/// Default number of buffered records before a flush.
///
/// Store round-trips are slow compared to assembly, so records are
/// accumulated and bulk-inserted.
pub const DEFAULT_FLUSH_THRESHOLD: usize = 100_000;

/// How a run's mesh is built from the domain metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeshMode {
    /// One synthetic tile covering the whole bounding box.
    SingleTile,
    /// The metadata's sub-domain decomposition.
    SubDomains,
}

/// Parameters of one pre-processing invocation.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// First hour of the processed range (inclusive).
    pub date_start: DateTime<Utc>,
    /// Last hour of the processed range (inclusive).
    pub date_end: DateTime<Utc>,
    /// Mesh construction mode.
    pub mesh_mode: MeshMode,
    /// Sub-domains to process; everything else is dropped from the mesh.
    pub sub_domain_selection: Vec<SubDomainId>,
    /// Estimate-run tags to process, in order.
    pub run_tags: Vec<String>,
    /// Buffered records per flush.
    pub flush_threshold: usize,
}

impl RunConfig {
    /// Check structural invariants before any store is queried.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EmptyTimeRange`] unless `date_start < date_end` —
    /// an equal or inverted range degenerates the time statistic;
    /// [`ConfigError::ZeroFlushThreshold`] for a threshold of zero;
    /// [`ConfigError::NoRunTags`] when there is nothing to process.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.date_start >= self.date_end {
            return Err(ConfigError::EmptyTimeRange {
                start: self.date_start,
                end: self.date_end,
            });
        }
        if self.flush_threshold == 0 {
            return Err(ConfigError::ZeroFlushThreshold);
        }
        if self.run_tags.is_empty() {
            return Err(ConfigError::NoRunTags);
        }
        Ok(())
    }
}

/// Errors detected during [`RunConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `date_start` is not strictly before `date_end`.
    EmptyTimeRange {
        /// Configured start of the range.
        start: DateTime<Utc>,
        /// Configured end of the range.
        end: DateTime<Utc>,
    },
    /// The flush threshold is zero.
    ZeroFlushThreshold,
    /// No run tags were configured.
    NoRunTags,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTimeRange { start, end } => {
                write!(f, "date range [{start}, {end}] must be strictly increasing")
            }
            Self::ZeroFlushThreshold => write!(f, "flush threshold must be at least 1"),
            Self::NoRunTags => write!(f, "no run tags configured"),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn config() -> RunConfig {
        RunConfig {
            date_start: Utc.with_ymd_and_hms(2017, 7, 1, 0, 0, 0).unwrap(),
            date_end: Utc.with_ymd_and_hms(2018, 5, 2, 23, 0, 0).unwrap(),
            mesh_mode: MeshMode::SubDomains,
            sub_domain_selection: vec![SubDomainId(6), SubDomainId(7)],
            run_tags: vec!["2019-05-21 10 5".into()],
            flush_threshold: DEFAULT_FLUSH_THRESHOLD,
        }
    }

    #[test]
    fn valid_config_passes() {
        assert_eq!(config().validate(), Ok(()));
    }

    #[test]
    fn equal_dates_are_rejected() {
        let mut cfg = config();
        cfg.date_end = cfg.date_start;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::EmptyTimeRange { .. })
        ));
    }

    #[test]
    fn zero_threshold_is_rejected() {
        let mut cfg = config();
        cfg.flush_threshold = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroFlushThreshold));
    }

    #[test]
    fn missing_run_tags_are_rejected() {
        let mut cfg = config();
        cfg.run_tags.clear();
        assert_eq!(cfg.validate(), Err(ConfigError::NoRunTags));
    }
}
