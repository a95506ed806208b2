//! Parametric mesh primitives
//!
//! Generator parameters and defaults follow the host's primitive-add
//! operations (size 2 cubes, 32-segment spheres, Z-up). All generators
//! share vertices and smooth normals; exporters do not require flat
//! shading.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

use crate::mesh::{Mesh, Vertex};

/// Axis-aligned cube centered at the origin
pub fn cube(size: f32) -> Mesh {
    let h = size / 2.0;
    let corners = [
        // Front face (z+)
        [-h, -h, h],
        [h, -h, h],
        [h, h, h],
        [-h, h, h],
        // Back face (z-)
        [-h, -h, -h],
        [h, -h, -h],
        [h, h, -h],
        [-h, h, -h],
    ];
    let mut mesh = Mesh::new();
    for p in corners {
        mesh.vertices.push(Vertex::new(
            Vec3::from_array(p),
            Vec3::ZERO,
            Vec2::ZERO,
        ));
    }
    mesh.indices = vec![
        // Front
        0, 1, 2, 0, 2, 3, //
        // Back
        5, 4, 7, 5, 7, 6, //
        // Left
        4, 0, 3, 4, 3, 7, //
        // Right
        1, 5, 6, 1, 6, 2, //
        // Top
        3, 2, 6, 3, 6, 7, //
        // Bottom
        4, 5, 1, 4, 1, 0,
    ];
    mesh.recalculate_normals();
    mesh
}

/// Square plane in the XY plane at z = 0
pub fn plane(size: f32) -> Mesh {
    let h = size / 2.0;
    let mut mesh = Mesh::new();
    for (p, uv) in [
        ([-h, -h, 0.0], [0.0, 0.0]),
        ([h, -h, 0.0], [1.0, 0.0]),
        ([h, h, 0.0], [1.0, 1.0]),
        ([-h, h, 0.0], [0.0, 1.0]),
    ] {
        mesh.vertices.push(Vertex {
            position: p,
            normal: [0.0, 0.0, 1.0],
            uv,
        });
    }
    mesh.indices = vec![0, 1, 2, 0, 2, 3];
    mesh
}

/// UV sphere with poles along the Z axis
///
/// Vertex count is `segments * (rings - 1) + 2`, matching the host's
/// UV-sphere topology.
pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> Mesh {
    let segments = segments.max(3);
    let rings = rings.max(2);

    let mut mesh = Mesh::new();
    mesh.vertices.push(Vertex::new(
        Vec3::new(0.0, 0.0, radius),
        Vec3::Z,
        Vec2::new(0.5, 1.0),
    ));
    for ring in 1..rings {
        let phi = std::f32::consts::PI * ring as f32 / rings as f32;
        let (sin_phi, cos_phi) = phi.sin_cos();
        for seg in 0..segments {
            let theta = TAU * seg as f32 / segments as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();
            let dir = Vec3::new(sin_phi * cos_theta, sin_phi * sin_theta, cos_phi);
            mesh.vertices.push(Vertex::new(
                dir * radius,
                dir,
                Vec2::new(seg as f32 / segments as f32, 1.0 - ring as f32 / rings as f32),
            ));
        }
    }
    let bottom = mesh.vertices.len() as u32;
    mesh.vertices.push(Vertex::new(
        Vec3::new(0.0, 0.0, -radius),
        Vec3::NEG_Z,
        Vec2::new(0.5, 0.0),
    ));

    let ring_start = |ring: u32| 1 + (ring - 1) * segments;

    // Top cap
    for seg in 0..segments {
        let a = ring_start(1) + seg;
        let b = ring_start(1) + (seg + 1) % segments;
        mesh.indices.extend([0, a, b]);
    }
    // Bands between rings
    for ring in 1..rings - 1 {
        for seg in 0..segments {
            let next = (seg + 1) % segments;
            let a = ring_start(ring) + seg;
            let b = ring_start(ring) + next;
            let c = ring_start(ring + 1) + seg;
            let d = ring_start(ring + 1) + next;
            mesh.indices.extend([a, c, d, a, d, b]);
        }
    }
    // Bottom cap
    for seg in 0..segments {
        let a = ring_start(rings - 1) + seg;
        let b = ring_start(rings - 1) + (seg + 1) % segments;
        mesh.indices.extend([bottom, b, a]);
    }

    mesh
}

/// Cylinder along the Z axis
pub fn cylinder(radius: f32, depth: f32, vertices: u32) -> Mesh {
    cone(radius, radius, depth, vertices)
}

/// Conic frustum along the Z axis; `radius2 = 0` gives a pointed cone
pub fn cone(radius1: f32, radius2: f32, depth: f32, vertices: u32) -> Mesh {
    let n = vertices.max(3);
    let h = depth / 2.0;

    let mut mesh = Mesh::new();
    let ring = |mesh: &mut Mesh, radius: f32, z: f32| -> u32 {
        let start = mesh.vertices.len() as u32;
        for seg in 0..n {
            let theta = TAU * seg as f32 / n as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();
            mesh.vertices.push(Vertex::new(
                Vec3::new(radius * cos_theta, radius * sin_theta, z),
                Vec3::ZERO,
                Vec2::new(seg as f32 / n as f32, (z + h) / depth),
            ));
        }
        start
    };

    let bottom_ring = ring(&mut mesh, radius1, -h);

    if radius2 > 0.0 {
        let top_ring = ring(&mut mesh, radius2, h);
        for seg in 0..n {
            let next = (seg + 1) % n;
            let a = bottom_ring + seg;
            let b = bottom_ring + next;
            let c = top_ring + seg;
            let d = top_ring + next;
            mesh.indices.extend([a, b, d, a, d, c]);
        }
        // Top cap
        let top_center = mesh.vertices.len() as u32;
        mesh.vertices
            .push(Vertex::new(Vec3::new(0.0, 0.0, h), Vec3::Z, Vec2::new(0.5, 1.0)));
        for seg in 0..n {
            let a = top_ring + seg;
            let b = top_ring + (seg + 1) % n;
            mesh.indices.extend([top_center, a, b]);
        }
    } else {
        // Pointed cone: sides fan to the apex
        let apex = mesh.vertices.len() as u32;
        mesh.vertices
            .push(Vertex::new(Vec3::new(0.0, 0.0, h), Vec3::Z, Vec2::new(0.5, 1.0)));
        for seg in 0..n {
            let a = bottom_ring + seg;
            let b = bottom_ring + (seg + 1) % n;
            mesh.indices.extend([a, b, apex]);
        }
    }

    // Bottom cap
    let bottom_center = mesh.vertices.len() as u32;
    mesh.vertices.push(Vertex::new(
        Vec3::new(0.0, 0.0, -h),
        Vec3::NEG_Z,
        Vec2::new(0.5, 0.0),
    ));
    for seg in 0..n {
        let a = bottom_ring + seg;
        let b = bottom_ring + (seg + 1) % n;
        mesh.indices.extend([bottom_center, b, a]);
    }

    mesh.recalculate_normals();
    mesh
}

/// Torus around the Z axis
pub fn torus(major_radius: f32, minor_radius: f32, major_segments: u32, minor_segments: u32) -> Mesh {
    let maj = major_segments.max(3);
    let min = minor_segments.max(3);

    let mut mesh = Mesh::new();
    for i in 0..maj {
        let u = TAU * i as f32 / maj as f32;
        let (sin_u, cos_u) = u.sin_cos();
        let center = Vec3::new(major_radius * cos_u, major_radius * sin_u, 0.0);
        for j in 0..min {
            let v = TAU * j as f32 / min as f32;
            let (sin_v, cos_v) = v.sin_cos();
            let normal = Vec3::new(cos_u * cos_v, sin_u * cos_v, sin_v);
            mesh.vertices.push(Vertex::new(
                center + normal * minor_radius,
                normal,
                Vec2::new(i as f32 / maj as f32, j as f32 / min as f32),
            ));
        }
    }

    for i in 0..maj {
        let i_next = (i + 1) % maj;
        for j in 0..min {
            let j_next = (j + 1) % min;
            let a = i * min + j;
            let b = i * min + j_next;
            let c = i_next * min + j;
            let d = i_next * min + j_next;
            mesh.indices.extend([a, c, d, a, d, b]);
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_vertex_count_matches_topology() {
        let sphere = uv_sphere(1.0, 32, 16);
        assert_eq!(sphere.vertex_count(), 32 * 15 + 2);
        // segments top + segments bottom + 2 per quad in 14 bands
        assert_eq!(sphere.triangle_count(), 32 + 32 + 32 * 14 * 2);
    }

    #[test]
    fn test_cylinder_is_closed() {
        let cyl = cylinder(1.0, 2.0, 32);
        // 2 rings + 2 cap centers
        assert_eq!(cyl.vertex_count(), 32 * 2 + 2);
        // side quads + two cap fans
        assert_eq!(cyl.triangle_count(), 32 * 2 + 32 * 2);
    }

    #[test]
    fn test_pointed_cone_topology() {
        let c = cone(1.0, 0.0, 2.0, 16);
        assert_eq!(c.vertex_count(), 16 + 2);
        assert_eq!(c.triangle_count(), 16 * 2);
    }

    #[test]
    fn test_torus_counts() {
        let t = torus(1.0, 0.25, 48, 12);
        assert_eq!(t.vertex_count(), 48 * 12);
        assert_eq!(t.triangle_count(), 48 * 12 * 2);
    }

    #[test]
    fn test_sphere_radius_respected() {
        let sphere = uv_sphere(2.5, 16, 8);
        for v in &sphere.vertices {
            let r = glam::Vec3::from_array(v.position).length();
            assert!((r - 2.5).abs() < 1e-4);
        }
    }
}
