//! Export engine for civil design models.
//!
//! A [`model::Model`] snapshot is opened in a [`session::ModelSession`], the
//! corridor hierarchy is walked with [`walker`], and [`export`] assembles the
//! XML documents written by [`io::xml`].

pub mod alignment;
pub mod config;
pub mod correlator;
pub mod document;
pub mod dtm;
pub mod error;
pub mod export;
pub mod geometry;
pub mod io;
pub mod model;
pub mod report;
pub mod session;
pub mod side;
pub mod walker;

pub use config::ExportConfig;
pub use error::{ExportError, Result};
pub use export::{Export, ExportKind};
pub use model::Model;
pub use session::ModelSession;
pub use walker::Selection;
