//! Scoped read-only access to a model snapshot.

use log::debug;

use crate::error::{ExportError, Result};
use crate::model::{AssemblyDef, Corridor, LandFeatureLine, Model, SubassemblyDef, TinSurface};

/// Objects that can be picked by handle on the command surface.
pub trait Handled {
    /// Kind name used in "not found" messages.
    const KIND: &'static str;

    fn handle(&self) -> &str;
    fn name(&self) -> &str;
}

impl Handled for Corridor {
    const KIND: &'static str = "corridor";

    fn handle(&self) -> &str {
        &self.handle
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Handled for TinSurface {
    const KIND: &'static str = "surface";

    fn handle(&self) -> &str {
        &self.handle
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Handled for LandFeatureLine {
    const KIND: &'static str = "feature line";

    fn handle(&self) -> &str {
        &self.handle
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Normalizes a handle typed by a user: surrounding whitespace and quotes are
/// dropped and hex digits are upper-cased. Blank input means "no selector".
pub fn normalize_handle(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_matches('"').trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_ascii_uppercase())
    }
}

/// Read-only view of a [`Model`] for the duration of one export.
///
/// The session borrows the snapshot immutably, so nothing can modify it
/// while an export walks it.
#[derive(Debug)]
pub struct ModelSession<'m> {
    model: &'m Model,
}

impl<'m> ModelSession<'m> {
    pub fn open(model: &'m Model) -> Self {
        debug!("Opened session on {}", model.name);
        Self { model }
    }

    /// Drawing name.
    pub fn name(&self) -> &'m str {
        &self.model.name
    }

    /// Resolves a region's assembly reference. A missing reference is not an
    /// error; an index outside the arena is.
    pub fn assembly(&self, index: Option<usize>) -> Result<Option<&'m AssemblyDef>> {
        match index {
            None => Ok(None),
            Some(i) => self
                .model
                .assemblies
                .get(i)
                .map(Some)
                .ok_or(ExportError::UnresolvedReference {
                    kind: "assembly",
                    index: i,
                }),
        }
    }

    /// Resolves an applied subassembly's definition reference.
    pub fn subassembly(&self, index: Option<usize>) -> Result<Option<&'m SubassemblyDef>> {
        match index {
            None => Ok(None),
            Some(i) => self
                .model
                .subassemblies
                .get(i)
                .map(Some)
                .ok_or(ExportError::UnresolvedReference {
                    kind: "subassembly",
                    index: i,
                }),
        }
    }

    /// Picks the objects matching `selector` out of `items`.
    ///
    /// Without a selector every item is returned. A selector that matches
    /// nothing is reported as [`ExportError::NotFound`].
    pub fn select<T: Handled>(&self, items: &'m [T], selector: Option<&str>) -> Result<Vec<&'m T>> {
        let Some(wanted) = selector.and_then(normalize_handle) else {
            return Ok(items.iter().collect());
        };
        let picked: Vec<&T> = items
            .iter()
            .filter(|item| normalize_handle(item.handle()).as_deref() == Some(wanted.as_str()))
            .collect();
        if picked.is_empty() {
            return Err(ExportError::NotFound {
                kind: T::KIND,
                selector: wanted,
            });
        }
        debug!("Selector {} matched {} {}(s)", wanted, picked.len(), T::KIND);
        Ok(picked)
    }

    pub fn corridors(&self, selector: Option<&str>) -> Result<Vec<&'m Corridor>> {
        self.select(&self.model.corridors, selector)
    }

    pub fn surfaces(&self, selector: Option<&str>) -> Result<Vec<&'m TinSurface>> {
        self.select(&self.model.surfaces, selector)
    }

    pub fn feature_lines(&self, selector: Option<&str>) -> Result<Vec<&'m LandFeatureLine>> {
        self.select(&self.model.feature_lines, selector)
    }
}

impl Drop for ModelSession<'_> {
    fn drop(&mut self) {
        debug!("Closed session on {}", self.model.name);
    }
}
