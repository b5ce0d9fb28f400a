//! Read-only snapshot of a civil design model.
//!
//! Every record is a plain struct; cross references (region → assembly,
//! applied subassembly → subassembly definition, shape → link) are integer
//! indices into the owning arena instead of live object handles.

use serde::{Deserialize, Serialize};

use crate::alignment::HorizontalAlignment;
use crate::geometry::{Point3, StationOffsetElevation};

/// Identity of a TIN triangle inside its surface.
pub type TriangleId = u64;

/// Snapshot of one drawing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Model {
    /// Drawing name, emitted on the `Document` element.
    pub name: String,
    #[serde(default)]
    pub corridors: Vec<Corridor>,
    #[serde(default)]
    pub feature_lines: Vec<LandFeatureLine>,
    #[serde(default)]
    pub surfaces: Vec<TinSurface>,
    #[serde(default)]
    pub assemblies: Vec<AssemblyDef>,
    #[serde(default)]
    pub subassemblies: Vec<SubassemblyDef>,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Assembly definition referenced by regions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblyDef {
    pub name: String,
    #[serde(default)]
    pub handle: String,
}

/// Subassembly definition referenced by applied subassemblies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubassemblyDef {
    pub name: String,
    #[serde(default)]
    pub handle: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Corridor {
    pub name: String,
    #[serde(default)]
    pub handle: String,
    #[serde(default)]
    pub baselines: Vec<Baseline>,
}

/// Longitudinal reference of a corridor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Baseline {
    pub name: String,
    #[serde(default)]
    pub alignment: HorizontalAlignment,
    /// Station value at the start of `alignment`.
    #[serde(default)]
    pub start_station: f64,
    #[serde(default)]
    pub regions: Vec<Region>,
    /// Computed feature lines grouped by code, in stored code order.
    #[serde(default)]
    pub feature_lines: Vec<FeatureLineGroup>,
}

impl Baseline {
    /// Converts baseline-relative coordinates to a 3D position.
    pub fn station_offset_elevation_to_xyz(&self, soe: StationOffsetElevation) -> Option<Point3> {
        let local = StationOffsetElevation {
            station: soe.station - self.start_station,
            ..soe
        };
        self.alignment.station_offset_elevation_to_xyz(local)
    }
}

/// Station interval of a baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub start: f64,
    pub end: f64,
    /// Index into [`Model::assemblies`].
    #[serde(default)]
    pub assembly: Option<usize>,
    #[serde(default)]
    pub applied_assemblies: Vec<AppliedAssembly>,
}

/// Assembly instance placed at a station.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppliedAssembly {
    pub station: f64,
    #[serde(default)]
    pub subassemblies: Vec<AppliedSubassembly>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppliedSubassembly {
    /// Index into [`Model::subassemblies`].
    #[serde(default)]
    pub subassembly: Option<usize>,
    pub origin: StationOffsetElevation,
    #[serde(default)]
    pub shapes: Vec<CalculatedShape>,
    #[serde(default)]
    pub links: Vec<CalculatedLink>,
}

/// Closed region bounded by links of the same applied subassembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatedShape {
    #[serde(default)]
    pub codes: Vec<String>,
    /// Indices into the owning [`AppliedSubassembly::links`].
    #[serde(default)]
    pub links: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatedLink {
    #[serde(default)]
    pub codes: Vec<String>,
    #[serde(default)]
    pub points: Vec<CalculatedPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatedPoint {
    pub soe: StationOffsetElevation,
    #[serde(default)]
    pub codes: Vec<String>,
}

/// Corridor feature lines sharing a point code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureLineGroup {
    pub code: String,
    #[serde(default)]
    pub lines: Vec<CorridorFeatureLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorridorFeatureLine {
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub points: Vec<FeatureLinePoint>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FeatureLinePoint {
    pub station: f64,
    pub offset: f64,
    pub location: Point3,
    #[serde(default)]
    pub is_break: bool,
}

/// Stand-alone grading feature line drawn in model space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandFeatureLine {
    pub name: String,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub handle: String,
    #[serde(default)]
    pub points: Vec<Point3>,
}

/// Triangulated surface described by per-vertex triangle adjacency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TinSurface {
    pub name: String,
    #[serde(default)]
    pub handle: String,
    #[serde(default)]
    pub vertices: Vec<TinVertex>,
    /// Triangles excluded from the visible surface (hide boundaries, etc.).
    #[serde(default)]
    pub hidden_triangles: Vec<TriangleId>,
}

impl TinSurface {
    /// Visibility predicate over the surface triangles.
    pub fn is_visible(&self, triangle: TriangleId) -> bool {
        !self.hidden_triangles.contains(&triangle)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TinVertex {
    pub location: Point3,
    /// Triangles incident to this vertex.
    #[serde(default)]
    pub triangles: Vec<TriangleId>,
}
