//! Horizontal alignments used as baseline reference curves.

use crate::geometry::{distance, Arc, Point, Point3, StationOffsetElevation};

/// Individual elements of a horizontal alignment.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub enum HorizontalElement {
    /// Straight tangent between two points.
    Tangent { start: Point, end: Point },
    /// Circular curve described by an [`Arc`].
    Curve { arc: Arc },
}

impl HorizontalElement {
    fn length(&self) -> f64 {
        match self {
            HorizontalElement::Tangent { start, end } => distance(*start, *end),
            HorizontalElement::Curve { arc } => arc.length(),
        }
    }

    fn start_point(&self) -> Point {
        match self {
            HorizontalElement::Tangent { start, .. } => *start,
            HorizontalElement::Curve { arc } => Point::new(
                arc.center.x + arc.radius * arc.start_angle.cos(),
                arc.center.y + arc.radius * arc.start_angle.sin(),
            ),
        }
    }

    fn end_point(&self) -> Point {
        match self {
            HorizontalElement::Tangent { end, .. } => *end,
            HorizontalElement::Curve { arc } => Point::new(
                arc.center.x + arc.radius * arc.end_angle.cos(),
                arc.center.y + arc.radius * arc.end_angle.sin(),
            ),
        }
    }

    fn point_at(&self, s: f64) -> Point {
        match self {
            HorizontalElement::Tangent { start, end } => {
                let len = distance(*start, *end);
                let t = if len.abs() < f64::EPSILON {
                    0.0
                } else {
                    s / len
                };
                Point::new(
                    start.x + t * (end.x - start.x),
                    start.y + t * (end.y - start.y),
                )
            }
            HorizontalElement::Curve { arc } => {
                let dir = if arc.end_angle >= arc.start_angle {
                    1.0
                } else {
                    -1.0
                };
                let ang = arc.start_angle + s / arc.radius * dir;
                Point::new(
                    arc.center.x + arc.radius * ang.cos(),
                    arc.center.y + arc.radius * ang.sin(),
                )
            }
        }
    }

    fn direction_at(&self, s: f64) -> (f64, f64) {
        match self {
            HorizontalElement::Tangent { start, end } => {
                let dx = end.x - start.x;
                let dy = end.y - start.y;
                let len = (dx * dx + dy * dy).sqrt();
                if len.abs() < f64::EPSILON {
                    (0.0, 0.0)
                } else {
                    (dx / len, dy / len)
                }
            }
            HorizontalElement::Curve { arc } => {
                let dir = if arc.end_angle >= arc.start_angle {
                    1.0
                } else {
                    -1.0
                };
                let ang = arc.start_angle + s / arc.radius * dir;
                let tangent = ang + dir * std::f64::consts::FRAC_PI_2;
                (tangent.cos(), tangent.sin())
            }
        }
    }
}

/// Horizontal alignment consisting of tangent and curve elements.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct HorizontalAlignment {
    pub elements: Vec<HorizontalElement>,
}

impl HorizontalAlignment {
    /// Creates a new horizontal alignment from vertices interpreted as tangent segments.
    pub fn new(vertices: Vec<Point>) -> Self {
        let mut elements = Vec::new();
        for pair in vertices.windows(2) {
            elements.push(HorizontalElement::Tangent {
                start: pair[0],
                end: pair[1],
            });
        }
        Self { elements }
    }

    /// Total length of the alignment.
    pub fn length(&self) -> f64 {
        self.elements.iter().map(|e| e.length()).sum()
    }

    /// Position and unit tangent at `station`. Stations before the start or
    /// past the end are extrapolated along the first or last tangent.
    /// Returns `None` only for an alignment without elements.
    pub fn frame_at(&self, station: f64) -> Option<(Point, (f64, f64))> {
        let first = self.elements.first()?;
        if station < 0.0 {
            let p = first.start_point();
            let d = first.direction_at(0.0);
            return Some((Point::new(p.x + station * d.0, p.y + station * d.1), d));
        }
        let mut remaining = station;
        for elem in &self.elements {
            let len = elem.length();
            if remaining <= len {
                return Some((elem.point_at(remaining), elem.direction_at(remaining)));
            }
            remaining -= len;
        }
        let last = self.elements.last()?;
        let p = last.end_point();
        let d = last.direction_at(last.length());
        Some((
            Point::new(p.x + remaining * d.0, p.y + remaining * d.1),
            d,
        ))
    }

    /// Converts a station/offset/elevation triple into a 3D position. `station`
    /// is measured from the start of the alignment; positive offsets lie to
    /// the right of the direction of travel.
    pub fn station_offset_elevation_to_xyz(&self, soe: StationOffsetElevation) -> Option<Point3> {
        let (center, dir) = self.frame_at(soe.station)?;
        let right = (dir.1, -dir.0);
        Some(Point3::new(
            center.x + soe.offset * right.0,
            center.y + soe.offset * right.1,
            soe.elevation,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight() -> HorizontalAlignment {
        HorizontalAlignment::new(vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)])
    }

    #[test]
    fn frame_on_tangent() {
        let hal = straight();
        assert_eq!(hal.length(), 100.0);
        assert_eq!(hal.frame_at(25.0), Some((Point::new(25.0, 0.0), (1.0, 0.0))));
    }

    #[test]
    fn extrapolates_before_the_start() {
        let hal = straight();
        let (p, _) = hal.frame_at(-5.0).unwrap();
        assert!((p.x + 5.0).abs() < 1e-9);
        assert!(p.y.abs() < 1e-9);
    }

    #[test]
    fn positive_offset_is_right_of_travel() {
        let hal = straight();
        let p = hal
            .station_offset_elevation_to_xyz(StationOffsetElevation::new(10.0, 2.0, 5.0))
            .unwrap();
        assert!((p.x - 10.0).abs() < 1e-9);
        assert!((p.y + 2.0).abs() < 1e-9);
        assert_eq!(p.z, 5.0);
    }

    #[test]
    fn extrapolates_past_the_end() {
        let hal = straight();
        let (p, d) = hal.frame_at(110.0).unwrap();
        assert!((p.x - 110.0).abs() < 1e-9);
        assert_eq!(d, (1.0, 0.0));
    }

    #[test]
    fn empty_alignment_has_no_frame() {
        let hal = HorizontalAlignment::default();
        assert!(hal.frame_at(0.0).is_none());
        assert!(hal
            .station_offset_elevation_to_xyz(StationOffsetElevation::new(0.0, 0.0, 0.0))
            .is_none());
    }

    #[test]
    fn quarter_curve_end() {
        let arc = Arc::new(Point::new(0.0, 0.0), 10.0, 0.0, std::f64::consts::FRAC_PI_2);
        let hal = HorizontalAlignment {
            elements: vec![HorizontalElement::Curve { arc }],
        };
        let (end, _) = hal.frame_at(arc.length()).unwrap();
        assert!(end.x.abs() < 1e-9);
        assert!((end.y - 10.0).abs() < 1e-9);
    }
}
