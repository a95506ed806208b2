//! Shared adapter helpers

use glam::Vec3;
use glyph_bridge::{AdapterError, Params};
use glyph_scene::{Object, SceneError};
use serde_json::{Value, json};

/// Map a document error onto the bridge's adapter error shape
pub(crate) fn scene_err(err: SceneError) -> AdapterError {
    let kind = match &err {
        SceneError::ObjectNotFound(_) => "object_not_found",
        SceneError::MaterialNotFound(_) => "material_not_found",
        SceneError::ModifierNotFound(_) => "modifier_not_found",
        SceneError::NotAMesh(_) => "not_a_mesh",
        SceneError::Export(_) => "export_failed",
        SceneError::Io(_) => "io_error",
    };
    AdapterError::new(kind, err.to_string())
}

pub(crate) fn vec3_param(params: &Params, key: &str) -> Result<Vec3, AdapterError> {
    let [x, y, z] = params.require_vec3(key)?;
    Ok(Vec3::new(x as f32, y as f32, z as f32))
}

pub(crate) fn opt_vec3_param(params: &Params, key: &str) -> Option<Vec3> {
    params
        .opt_vec3(key)
        .map(|[x, y, z]| Vec3::new(x as f32, y as f32, z as f32))
}

pub(crate) fn vec3_json(v: Vec3) -> Value {
    json!([v.x, v.y, v.z])
}

/// Standard creation payload: name plus mesh statistics
pub(crate) fn mesh_summary(obj: &Object) -> Value {
    let (vertices, faces) = match &obj.mesh {
        Some(mesh) => (mesh.vertex_count(), mesh.triangle_count()),
        None => (0, 0),
    };
    json!({
        "object": obj.name,
        "type": obj.kind.as_str(),
        "vertices": vertices,
        "faces": faces,
    })
}
