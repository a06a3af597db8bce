//! Error types for the directory merge.

use crate::listing::EntryKind;
use crate::report::MergeReport;
use std::path::PathBuf;
use thiserror::Error;

/// Filesystem step that failed mid-merge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOp {
    Read,
    Delete,
    Move,
}

impl std::fmt::Display for MergeOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergeOp::Read => write!(f, "read"),
            MergeOp::Delete => write!(f, "delete"),
            MergeOp::Move => write!(f, "move"),
        }
    }
}

/// Errors raised while indexing or merging directories
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Invalid target {}: {reason}", .path.display())]
    InvalidTarget { path: PathBuf, reason: String },

    #[error("Unable to read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported {kind} entry: {}", .path.display())]
    UnsupportedEntry { path: PathBuf, kind: EntryKind },

    #[error(
        "Failed to {op} {}: {source} ({} deleted, {} moved before failure)",
        .path.display(),
        .report.deleted,
        .report.moved
    )]
    Aborted {
        path: PathBuf,
        op: MergeOp,
        #[source]
        source: std::io::Error,
        report: Box<MergeReport>,
    },

    #[error("Counts do not match: {total} seen, {deleted} deleted, {moved} moved")]
    ConsistencyViolation {
        total: usize,
        deleted: usize,
        moved: usize,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl MergeError {
    /// Errors caused by bad invocation rather than a failed run.
    ///
    /// These are raised before any mutation happens.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            MergeError::NotADirectory(_) | MergeError::InvalidTarget { .. }
        )
    }

    /// The report accumulated before an aborted merge, if any
    pub fn partial_report(&self) -> Option<&MergeReport> {
        match self {
            MergeError::Aborted { report, .. } => Some(report),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for MergeError {
    fn from(err: config::ConfigError) -> Self {
        MergeError::ConfigError(err.to_string())
    }
}
