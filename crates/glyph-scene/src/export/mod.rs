//! Mesh export
//!
//! Exports write world-space geometry, so object transforms are already
//! baked by the time a mesh reaches a writer.

mod gltf;
mod obj;
mod stl;

use std::path::Path;

use crate::document::Document;
use crate::error::{Result, SceneError};
use crate::mesh::Mesh;

pub use gltf::export_gltf;
pub use obj::export_obj;
pub use stl::export_stl;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Stl,
    Obj,
    Gltf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Stl => "stl",
            Self::Obj => "obj",
            Self::Gltf => "gltf",
        }
    }
}

/// Export document geometry to `path` in the given format.
///
/// With `only` set, exports that single object; otherwise all visible
/// mesh objects are merged. Returns the triangle count written.
pub fn export_document(
    doc: &Document,
    format: ExportFormat,
    path: &Path,
    only: Option<&str>,
) -> Result<usize> {
    let mesh = doc.collect_world_mesh(only)?;
    if mesh.triangle_count() == 0 {
        return Err(SceneError::Export("no mesh geometry to export".into()));
    }
    export_mesh(&mesh, format, path)?;
    Ok(mesh.triangle_count())
}

pub fn export_mesh(mesh: &Mesh, format: ExportFormat, path: &Path) -> Result<()> {
    match format {
        ExportFormat::Stl => export_stl(mesh, path),
        ExportFormat::Obj => export_obj(mesh, path),
        ExportFormat::Gltf => export_gltf(mesh, path),
    }
}
