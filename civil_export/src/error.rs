//! Error types for export operations.

use std::io;

use thiserror::Error;

/// The main error type for export operations.
///
/// Only [`ExportError::NotFound`] and the I/O variants abort an export.
/// The remaining variants describe a single skipped element and end up as
/// diagnostics in the run's [`ExportReport`](crate::report::ExportReport).
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Cannot find the specified {kind}: {selector}")]
    NotFound { kind: &'static str, selector: String },

    #[error("Station {station} is outside every region of the baseline")]
    NoRegionMatch { station: f64 },

    #[error("Unresolved {kind} reference: {index}")]
    UnresolvedReference { kind: &'static str, index: usize },

    #[error("Baseline {baseline} has no alignment geometry")]
    EmptyAlignment { baseline: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid model snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ExportError>;
