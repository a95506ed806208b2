//! Triangle mesh storage and bookkeeping
//!
//! Meshes carry positions, normals and UVs per vertex plus a triangle index
//! list. Counts (vertices, edges, triangles) are what query operations
//! report back to callers; transforms and merges feed the boolean and
//! export paths.

use std::collections::HashSet;

use glam::{Mat4, Vec2, Vec3};

/// A vertex with position, normal, and UV coordinates
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv: uv.to_array(),
        }
    }
}

/// A triangle mesh
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Count unique undirected edges
    pub fn edge_count(&self) -> usize {
        let mut edges = HashSet::new();
        for tri in self.indices.chunks(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                edges.insert((a.min(b), a.max(b)));
            }
        }
        edges.len()
    }

    /// Calculate face normals and smooth them
    pub fn recalculate_normals(&mut self) {
        for v in &mut self.vertices {
            v.normal = [0.0, 0.0, 0.0];
        }

        // Accumulate area-weighted face normals
        for tri in self.indices.chunks(3) {
            let i0 = tri[0] as usize;
            let i1 = tri[1] as usize;
            let i2 = tri[2] as usize;

            let p0 = Vec3::from_array(self.vertices[i0].position);
            let p1 = Vec3::from_array(self.vertices[i1].position);
            let p2 = Vec3::from_array(self.vertices[i2].position);

            let face_normal = (p1 - p0).cross(p2 - p0);
            for &i in &[i0, i1, i2] {
                self.vertices[i].normal[0] += face_normal.x;
                self.vertices[i].normal[1] += face_normal.y;
                self.vertices[i].normal[2] += face_normal.z;
            }
        }

        for v in &mut self.vertices {
            let n = Vec3::from_array(v.normal).normalize_or_zero();
            v.normal = n.to_array();
        }
    }

    /// Append another mesh, re-basing its indices
    pub fn merge(&mut self, other: &Mesh) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    /// A copy with positions and normals taken through `transform`
    pub fn transformed(&self, transform: Mat4) -> Mesh {
        let vertices = self
            .vertices
            .iter()
            .map(|v| {
                let position = transform.transform_point3(Vec3::from_array(v.position));
                let normal = transform
                    .transform_vector3(Vec3::from_array(v.normal))
                    .normalize_or_zero();
                Vertex {
                    position: position.to_array(),
                    normal: normal.to_array(),
                    uv: v.uv,
                }
            })
            .collect();
        Mesh {
            vertices,
            indices: self.indices.clone(),
        }
    }

    /// Axis-aligned bounds, None for an empty mesh
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut iter = self.vertices.iter().map(|v| Vec3::from_array(v.position));
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives;

    #[test]
    fn test_cube_counts() {
        let cube = primitives::cube(2.0);
        assert_eq!(cube.vertex_count(), 8);
        assert_eq!(cube.triangle_count(), 12);
        assert_eq!(cube.edge_count(), 18);
    }

    #[test]
    fn test_merge_rebases_indices() {
        let mut a = primitives::plane(1.0);
        let b = primitives::plane(1.0);
        a.merge(&b);
        assert_eq!(a.vertex_count(), 8);
        assert_eq!(a.triangle_count(), 4);
        assert!(a.indices.iter().skip(6).all(|&i| i >= 4));
    }

    #[test]
    fn test_transformed_moves_bounds() {
        let cube = primitives::cube(2.0);
        let moved = cube.transformed(Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0)));
        let (min, max) = moved.bounds().expect("non-empty");
        assert!((min.x - 4.0).abs() < 1e-5);
        assert!((max.x - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_recalculated_normals_are_unit_length() {
        let mut sphere = primitives::uv_sphere(1.0, 16, 8);
        sphere.recalculate_normals();
        for v in &sphere.vertices {
            let len = Vec3::from_array(v.normal).length();
            assert!((len - 1.0).abs() < 1e-4, "normal length {len}");
        }
    }
}
