//! glTF 2.0 file export
//!
//! Writes a single self-contained .gltf with the vertex and index data
//! embedded as a base64 data URI. Viewers need no sidecar .bin file.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::json;

use crate::error::Result;
use crate::mesh::Mesh;

const COMPONENT_F32: u32 = 5126;
const COMPONENT_U32: u32 = 5125;
const TARGET_ARRAY_BUFFER: u32 = 34962;
const TARGET_ELEMENT_ARRAY_BUFFER: u32 = 34963;

/// Export a mesh to glTF 2.0 with an embedded buffer
pub fn export_gltf(mesh: &Mesh, path: &Path) -> Result<()> {
    let positions_size = mesh.vertices.len() * 12;
    let normals_size = mesh.vertices.len() * 12;
    let uvs_size = mesh.vertices.len() * 8;
    let indices_size = mesh.indices.len() * 4;

    let mut min = [f32::MAX; 3];
    let mut max = [f32::MIN; 3];
    for v in &mesh.vertices {
        for i in 0..3 {
            min[i] = min[i].min(v.position[i]);
            max[i] = max[i].max(v.position[i]);
        }
    }

    let mut buffer = Vec::with_capacity(positions_size + normals_size + uvs_size + indices_size);
    for v in &mesh.vertices {
        for p in v.position {
            buffer.extend_from_slice(&p.to_le_bytes());
        }
    }
    for v in &mesh.vertices {
        for n in v.normal {
            buffer.extend_from_slice(&n.to_le_bytes());
        }
    }
    for v in &mesh.vertices {
        for t in v.uv {
            buffer.extend_from_slice(&t.to_le_bytes());
        }
    }
    for i in &mesh.indices {
        buffer.extend_from_slice(&i.to_le_bytes());
    }

    let normals_offset = positions_size;
    let uvs_offset = normals_offset + normals_size;
    let indices_offset = uvs_offset + uvs_size;

    let doc = json!({
        "asset": { "version": "2.0", "generator": "Glyph" },
        "scene": 0,
        "scenes": [{ "nodes": [0] }],
        "nodes": [{ "mesh": 0 }],
        "meshes": [{
            "primitives": [{
                "attributes": { "POSITION": 0, "NORMAL": 1, "TEXCOORD_0": 2 },
                "indices": 3
            }]
        }],
        "accessors": [
            {
                "bufferView": 0,
                "componentType": COMPONENT_F32,
                "count": mesh.vertices.len(),
                "type": "VEC3",
                "min": min,
                "max": max
            },
            {
                "bufferView": 1,
                "componentType": COMPONENT_F32,
                "count": mesh.vertices.len(),
                "type": "VEC3"
            },
            {
                "bufferView": 2,
                "componentType": COMPONENT_F32,
                "count": mesh.vertices.len(),
                "type": "VEC2"
            },
            {
                "bufferView": 3,
                "componentType": COMPONENT_U32,
                "count": mesh.indices.len(),
                "type": "SCALAR"
            }
        ],
        "bufferViews": [
            { "buffer": 0, "byteOffset": 0, "byteLength": positions_size, "target": TARGET_ARRAY_BUFFER },
            { "buffer": 0, "byteOffset": normals_offset, "byteLength": normals_size, "target": TARGET_ARRAY_BUFFER },
            { "buffer": 0, "byteOffset": uvs_offset, "byteLength": uvs_size, "target": TARGET_ARRAY_BUFFER },
            { "buffer": 0, "byteOffset": indices_offset, "byteLength": indices_size, "target": TARGET_ELEMENT_ARRAY_BUFFER }
        ],
        "buffers": [{
            "byteLength": buffer.len(),
            "uri": format!("data:application/octet-stream;base64,{}", STANDARD.encode(&buffer))
        }]
    });

    let out = serde_json::to_string_pretty(&doc)
        .map_err(|e| crate::error::SceneError::Export(e.to_string()))?;
    std::fs::write(path, out)?;
    Ok(())
}
