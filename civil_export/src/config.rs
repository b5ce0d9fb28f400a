//! Output location and file naming.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

static FILE_NAME_UNSAFE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[<>:"/\\|?*\x00-\x1F]"#).expect("valid file name pattern"));

/// Settings shared by all export operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Directory receiving the export documents.
    pub output_dir: PathBuf,
}

impl ExportConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Full destination path for `file_name`.
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl Default for ExportConfig {
    /// Per-user temporary directory.
    fn default() -> Self {
        Self::new(std::env::temp_dir())
    }
}

/// Replaces characters that are not allowed in file names with `_`.
pub fn sanitize_file_component(name: &str) -> String {
    FILE_NAME_UNSAFE.replace_all(name.trim(), "_").into_owned()
}

/// Builds `<stem>.xml`, or `<stem>_<entity>.xml` when the export was narrowed
/// to a single named entity.
pub fn output_file_name(stem: &str, single_entity: Option<&str>) -> String {
    match single_entity {
        Some(name) => format!("{}_{}.xml", stem, sanitize_file_component(name)),
        None => format!("{stem}.xml"),
    }
}
