//! Face topology for triangulated surfaces.
//!
//! Surfaces arrive as vertices that each know their incident triangles. The
//! reconstruction below turns that adjacency back into triangle records of
//! three vertex ids.

use std::collections::HashMap;

use log::debug;

use crate::model::{TinSurface, TinVertex, TriangleId};

/// Result of [`reconstruct_faces`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Faces {
    /// Completed triangles in order of first appearance. Vertex order follows
    /// traversal order and carries no winding guarantee.
    pub triangles: Vec<[usize; 3]>,
    /// Visible triangles that collected fewer than three vertices.
    pub incomplete: usize,
}

/// Rebuilds triangle faces from per-vertex adjacency.
///
/// Vertex ids are enumeration positions. Each triangle accepted by
/// `is_visible` collects the ids of the vertices that reference it, at most
/// three and without repeats. Triangles left with fewer than three ids are
/// dropped and counted in [`Faces::incomplete`].
pub fn reconstruct_faces<F>(vertices: &[TinVertex], is_visible: F) -> Faces
where
    F: Fn(TriangleId) -> bool,
{
    let mut slots: HashMap<TriangleId, usize> = HashMap::new();
    let mut corners: Vec<Vec<usize>> = Vec::new();

    for (id, vertex) in vertices.iter().enumerate() {
        for &tri in &vertex.triangles {
            if !is_visible(tri) {
                continue;
            }
            match slots.get(&tri) {
                Some(&slot) => {
                    let list = &mut corners[slot];
                    if !list.contains(&id) && list.len() < 3 {
                        list.push(id);
                    }
                }
                None => {
                    slots.insert(tri, corners.len());
                    corners.push(vec![id]);
                }
            }
        }
    }

    let mut faces = Faces::default();
    for list in corners {
        match list.as_slice() {
            &[a, b, c] => faces.triangles.push([a, b, c]),
            _ => faces.incomplete += 1,
        }
    }
    faces
}

impl TinSurface {
    /// Rebuilds the visible faces of the surface.
    pub fn faces(&self) -> Faces {
        let faces = reconstruct_faces(&self.vertices, |t| self.is_visible(t));
        debug!(
            "Surface {}: {} vertices, {} triangles, {} incomplete",
            self.name,
            self.vertices.len(),
            faces.triangles.len(),
            faces.incomplete
        );
        faces
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point3;

    fn vertex(x: f64, y: f64, triangles: &[TriangleId]) -> TinVertex {
        TinVertex {
            location: Point3::new(x, y, 0.0),
            triangles: triangles.to_vec(),
        }
    }

    /// Unit square split along the 0-2 diagonal into triangles 10 and 11.
    fn square() -> Vec<TinVertex> {
        vec![
            vertex(0.0, 0.0, &[10, 11]),
            vertex(1.0, 0.0, &[10]),
            vertex(1.0, 1.0, &[10, 11]),
            vertex(0.0, 1.0, &[11]),
        ]
    }

    #[test]
    fn two_triangles_sharing_an_edge() {
        let faces = reconstruct_faces(&square(), |_| true);
        assert_eq!(faces.incomplete, 0);
        assert_eq!(faces.triangles, vec![[0, 1, 2], [0, 2, 3]]);
        for tri in &faces.triangles {
            assert!(tri[0] != tri[1] && tri[1] != tri[2] && tri[0] != tri[2]);
            assert!(tri.iter().all(|&v| v < 4));
        }
    }

    #[test]
    fn hidden_triangle_never_emitted() {
        let faces = reconstruct_faces(&square(), |t| t != 11);
        assert_eq!(faces.triangles, vec![[0, 1, 2]]);
        assert_eq!(faces.incomplete, 0);
    }

    #[test]
    fn triangle_on_the_edge_of_the_vertex_set_is_incomplete() {
        // triangle 12 is referenced by only two of the snapshot vertices
        let mut verts = square();
        verts[1].triangles.push(12);
        verts[2].triangles.push(12);
        let faces = reconstruct_faces(&verts, |_| true);
        assert_eq!(faces.triangles.len(), 2);
        assert_eq!(faces.incomplete, 1);
    }

    #[test]
    fn repeated_adjacency_does_not_duplicate_ids() {
        let verts = vec![
            vertex(0.0, 0.0, &[1, 1]),
            vertex(1.0, 0.0, &[1]),
            vertex(0.0, 1.0, &[1]),
            vertex(1.0, 1.0, &[1]),
        ];
        let faces = reconstruct_faces(&verts, |_| true);
        // fourth vertex is ignored once three ids are held
        assert_eq!(faces.triangles, vec![[0, 1, 2]]);
    }

    #[test]
    fn surface_hides_listed_triangles() {
        let surface = TinSurface {
            name: "EG".into(),
            handle: "2F1".into(),
            vertices: square(),
            hidden_triangles: vec![10],
        };
        let faces = surface.faces();
        assert_eq!(faces.triangles, vec![[0, 2, 3]]);
        assert_eq!(faces.incomplete, 0);
    }
}
