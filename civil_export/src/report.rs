//! Per-run diagnostics collected while exporting.

use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{ExportError, Result};

/// Kind of element-level problem that was skipped over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// A point's station lies outside every region of its baseline.
    NoRegionMatch,
    /// An assembly, subassembly or link reference could not be resolved.
    UnresolvedReference,
    /// A baseline could not place a point in 3D.
    Geometry,
    /// A surface triangle collected fewer than three vertices.
    IncompleteTriangle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Where it happened, e.g. `Main/baseline 0/feature line TOP/point 4`.
    pub context: String,
    pub message: String,
}

/// Everything that was skipped during one export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportReport {
    pub diagnostics: Vec<Diagnostic>,
}

impl ExportReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a skipped element.
    pub fn record(&mut self, kind: DiagnosticKind, context: impl Into<String>, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            kind,
            context: context.into(),
            message: message.into(),
        };
        if kind == DiagnosticKind::IncompleteTriangle {
            debug!("{}: {}", diagnostic.context, diagnostic.message);
        } else {
            warn!("{}: {}", diagnostic.context, diagnostic.message);
        }
        self.diagnostics.push(diagnostic);
    }

    /// Records an element-level [`ExportError`].
    pub fn record_error(&mut self, context: impl Into<String>, err: &ExportError) {
        let kind = match err {
            ExportError::NoRegionMatch { .. } => DiagnosticKind::NoRegionMatch,
            ExportError::EmptyAlignment { .. } => DiagnosticKind::Geometry,
            _ => DiagnosticKind::UnresolvedReference,
        };
        self.record(kind, context, err.to_string());
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Writes the report as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        crate::io::write_string(path, &json)?;
        Ok(())
    }
}
