//! The pipeline's top-level error type.

use std::error::Error;
use std::fmt;

use plume_core::{SinkError, SourceError};
use plume_features::{AssembleError, StatsError};
use plume_mesh::MeshError;

use crate::config::ConfigError;

/// Error from a pipeline invocation, wrapping the failing subsystem.
#[derive(Clone, Debug, PartialEq)]
pub enum PipelineError {
    /// Configuration validation failed.
    Config(ConfigError),
    /// Statistic computation failed.
    Stats(StatsError),
    /// Mesh construction failed.
    Mesh(MeshError),
    /// Record assembly failed.
    Assemble(AssembleError),
    /// An upstream store query failed.
    Source(SourceError),
    /// A flush to the output store failed.
    Flush(SinkError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Stats(e) => write!(f, "stats: {e}"),
            Self::Mesh(e) => write!(f, "mesh: {e}"),
            Self::Assemble(e) => write!(f, "assemble: {e}"),
            Self::Source(e) => write!(f, "source: {e}"),
            Self::Flush(e) => write!(f, "flush: {e}"),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Stats(e) => Some(e),
            Self::Mesh(e) => Some(e),
            Self::Assemble(e) => Some(e),
            Self::Source(e) => Some(e),
            Self::Flush(e) => Some(e),
        }
    }
}

impl From<ConfigError> for PipelineError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<StatsError> for PipelineError {
    fn from(e: StatsError) -> Self {
        Self::Stats(e)
    }
}

impl From<MeshError> for PipelineError {
    fn from(e: MeshError) -> Self {
        Self::Mesh(e)
    }
}

impl From<AssembleError> for PipelineError {
    fn from(e: AssembleError) -> Self {
        Self::Assemble(e)
    }
}

impl From<SourceError> for PipelineError {
    fn from(e: SourceError) -> Self {
        Self::Source(e)
    }
}

impl From<SinkError> for PipelineError {
    fn from(e: SinkError) -> Self {
        Self::Flush(e)
    }
}
