//! Basic geometry primitives shared by the model snapshot and the exporters.

/// Representation of a 2D point.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Representation of a 3D point.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Position of a point relative to a baseline: longitudinal station, lateral
/// offset (negative to the left) and elevation.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StationOffsetElevation {
    pub station: f64,
    pub offset: f64,
    pub elevation: f64,
}

impl StationOffsetElevation {
    pub fn new(station: f64, offset: f64, elevation: f64) -> Self {
        Self {
            station,
            offset,
            elevation,
        }
    }
}

/// Representation of a circular arc defined by its center, radius and start/end
/// angles (in radians).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Arc {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Arc {
    /// Creates a new `Arc`.
    pub fn new(center: Point, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Self {
            center,
            radius,
            start_angle,
            end_angle,
        }
    }

    /// Returns the length of the arc.
    pub fn length(&self) -> f64 {
        let sweep = (self.end_angle - self.start_angle).abs();
        self.radius * sweep
    }
}

/// Calculates the Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
}

/// Calculates the Euclidean distance between two 3D points.
pub fn distance3(a: Point3, b: Point3) -> f64 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2) + (b.z - a.z).powi(2)).sqrt()
}

/// Tolerance under which two computed points are considered the same vertex.
pub const POINT_TOLERANCE: f64 = 1e-10;

/// Appends `p` unless an equal point (within [`POINT_TOLERANCE`]) is already
/// present. Keeps the order of first appearance.
pub fn push_unique(points: &mut Vec<Point3>, p: Point3) -> bool {
    if points.iter().any(|q| distance3(*q, p) <= POINT_TOLERANCE) {
        return false;
    }
    points.push(p);
    true
}
