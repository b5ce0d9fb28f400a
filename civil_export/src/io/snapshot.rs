//! JSON snapshots of a design model.

use std::path::Path;

use log::info;

use crate::error::Result;
use crate::model::Model;

/// Loads a model snapshot written by the host-side extractor.
pub fn read_model_json(path: &Path) -> Result<Model> {
    let contents = super::read_to_string(path)?;
    let model: Model = serde_json::from_str(&contents)?;
    info!(
        "Loaded {} ({} corridors, {} surfaces, {} feature lines)",
        path.display(),
        model.corridors.len(),
        model.surfaces.len(),
        model.feature_lines.len()
    );
    Ok(model)
}

pub fn write_model_json(path: &Path, model: &Model) -> Result<()> {
    let json = serde_json::to_string_pretty(model)?;
    super::write_string(path, &json)?;
    Ok(())
}
