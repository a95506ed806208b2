//! OBJ file export

#![allow(clippy::uninlined_format_args)]

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::mesh::Mesh;

/// Export a mesh to OBJ format
pub fn export_obj(mesh: &Mesh, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "# Glyph OBJ Export")?;
    writeln!(writer, "# Vertices: {}", mesh.vertices.len())?;
    writeln!(writer, "# Triangles: {}", mesh.indices.len() / 3)?;
    writeln!(writer)?;

    for v in &mesh.vertices {
        writeln!(
            writer,
            "v {} {} {}",
            v.position[0], v.position[1], v.position[2]
        )?;
    }
    writeln!(writer)?;

    for v in &mesh.vertices {
        writeln!(writer, "vt {} {}", v.uv[0], v.uv[1])?;
    }
    writeln!(writer)?;

    for v in &mesh.vertices {
        writeln!(writer, "vn {} {} {}", v.normal[0], v.normal[1], v.normal[2])?;
    }
    writeln!(writer)?;

    // OBJ uses 1-based indexing
    for tri in mesh.indices.chunks(3) {
        let i0 = tri[0] + 1;
        let i1 = tri[1] + 1;
        let i2 = tri[2] + 1;
        writeln!(
            writer,
            "f {}/{}/{} {}/{}/{} {}/{}/{}",
            i0, i0, i0, i1, i1, i1, i2, i2, i2
        )?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives;

    #[test]
    fn test_export_obj_structure() {
        let mesh = primitives::plane(1.0);
        let path = std::env::temp_dir().join("glyph_test_plane.obj");
        export_obj(&mesh, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().filter(|l| l.starts_with("v ")).count(), 4);
        assert_eq!(contents.lines().filter(|l| l.starts_with("vn ")).count(), 4);
        assert_eq!(contents.lines().filter(|l| l.starts_with("f ")).count(), 2);
        // 1-based indices
        assert!(contents.contains("f 1/1/1 2/2/2 3/3/3"));

        let _ = std::fs::remove_file(&path);
    }
}
