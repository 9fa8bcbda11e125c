//! Error types for store queries and record persistence.

use std::error::Error;
use std::fmt;

/// Errors from an upstream store query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceError {
    /// The store could not be reached or the query failed outright.
    QueryFailed {
        /// Which store failed.
        store: String,
        /// Human-readable description of the failure.
        reason: String,
    },
    /// The store returned data the pipeline cannot interpret.
    Malformed {
        /// Which store returned the data.
        store: String,
        /// Description of the problem.
        reason: String,
    },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QueryFailed { store, reason } => {
                write!(f, "query against '{store}' failed: {reason}")
            }
            Self::Malformed { store, reason } => {
                write!(f, "malformed data from '{store}': {reason}")
            }
        }
    }
}

impl Error for SourceError {}

/// Errors from the output store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SinkError {
    /// A bulk insert failed; the batch must be treated as not persisted.
    InsertFailed {
        /// Description of the failure.
        reason: String,
    },
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsertFailed { reason } => write!(f, "bulk insert failed: {reason}"),
        }
    }
}

impl Error for SinkError {}
