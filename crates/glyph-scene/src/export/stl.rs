//! STL file export (binary format)
//!
//! Binary STL is the compact, widely supported variant. STL carries no
//! materials or UVs, only face geometry.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::mesh::Mesh;

/// Export a mesh to binary STL
///
/// Layout:
/// - 80 bytes: header text
/// - 4 bytes: triangle count (u32 little-endian)
/// - 50 bytes per triangle: normal, three vertices, attribute count
pub fn export_stl(mesh: &Mesh, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    let header = format!(
        "Glyph STL Export - {} vertices, {} triangles",
        mesh.vertices.len(),
        mesh.indices.len() / 3
    );
    let mut header_bytes = [b' '; 80];
    let header_len = header.len().min(80);
    header_bytes[..header_len].copy_from_slice(&header.as_bytes()[..header_len]);
    writer.write_all(&header_bytes)?;

    let num_triangles = (mesh.indices.len() / 3) as u32;
    writer.write_all(&num_triangles.to_le_bytes())?;

    for tri in mesh.indices.chunks(3) {
        let v0 = &mesh.vertices[tri[0] as usize];
        let v1 = &mesh.vertices[tri[1] as usize];
        let v2 = &mesh.vertices[tri[2] as usize];

        // STL expects face normals, not the smoothed vertex normals
        let edge1 = [
            v1.position[0] - v0.position[0],
            v1.position[1] - v0.position[1],
            v1.position[2] - v0.position[2],
        ];
        let edge2 = [
            v2.position[0] - v0.position[0],
            v2.position[1] - v0.position[1],
            v2.position[2] - v0.position[2],
        ];
        let normal = [
            edge1[1] * edge2[2] - edge1[2] * edge2[1],
            edge1[2] * edge2[0] - edge1[0] * edge2[2],
            edge1[0] * edge2[1] - edge1[1] * edge2[0],
        ];
        let len = (normal[0] * normal[0] + normal[1] * normal[1] + normal[2] * normal[2]).sqrt();
        let normal = if len > 0.0 {
            [normal[0] / len, normal[1] / len, normal[2] / len]
        } else {
            [0.0, 0.0, 1.0]
        };

        for n in normal {
            writer.write_all(&n.to_le_bytes())?;
        }
        for v in [v0, v1, v2] {
            for p in v.position {
                writer.write_all(&p.to_le_bytes())?;
            }
        }
        writer.write_all(&0u16.to_le_bytes())?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("glyph_test_{}", name))
    }

    #[test]
    fn test_export_stl_triangle_size() {
        let mesh = primitives::plane(1.0);
        let path = temp_path("plane.stl");
        export_stl(&mesh, &path).unwrap();

        // 80 (header) + 4 (count) + 50 * 2 triangles
        let metadata = std::fs::metadata(&path).unwrap();
        assert_eq!(metadata.len(), 184);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_export_stl_cube_size() {
        let mesh = primitives::cube(1.0);
        let path = temp_path("cube.stl");
        export_stl(&mesh, &path).unwrap();

        // 80 + 4 + (50 * 12)
        let metadata = std::fs::metadata(&path).unwrap();
        assert_eq!(metadata.len(), 684);

        let _ = std::fs::remove_file(&path);
    }
}
