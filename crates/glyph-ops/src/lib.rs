//! # Glyph Ops
//!
//! The collaborator surface: every operation an agent can invoke against
//! the scene document, one thin adapter each. Adapters validate nothing
//! structural (the bridge registry already did) and only apply defaults,
//! mutate the document and shape the result payload.

pub mod animation;
pub mod booleans;
pub mod curves;
pub mod export;
pub mod materials;
pub mod modifiers;
pub mod physics;
pub mod primitives;
pub mod queries;
pub mod transforms;
pub mod view;

mod util;

use glyph_bridge::Registry;
use glyph_scene::Document;

/// Build the full operation registry
pub fn registry() -> Registry<Document> {
    let mut reg = Registry::new();
    primitives::register(&mut reg);
    curves::register(&mut reg);
    transforms::register(&mut reg);
    booleans::register(&mut reg);
    modifiers::register(&mut reg);
    materials::register(&mut reg);
    animation::register(&mut reg);
    physics::register(&mut reg);
    queries::register(&mut reg);
    export::register(&mut reg);
    view::register(&mut reg);
    reg
}

#[cfg(test)]
pub(crate) mod testing {
    use glyph_bridge::AdapterError;
    use glyph_scene::Document;
    use serde_json::Value;

    /// Resolve and invoke one operation against a document, synchronously
    pub(crate) fn invoke(
        doc: &mut Document,
        op: &str,
        value: Value,
    ) -> Result<Value, AdapterError> {
        let params = match value {
            Value::Object(map) => map,
            _ => unreachable!("test params must be objects"),
        };
        let call = crate::registry()
            .resolve(op, params, None)
            .expect("call should pass validation");
        call.operation.invoke(doc, &call.params)
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_registry_contains_every_operation() {
        let reg = super::registry();
        for name in [
            "create_cube",
            "create_sphere",
            "create_cylinder",
            "create_cone",
            "create_torus",
            "create_plane",
            "create_bezier",
            "create_nurbs",
            "create_path",
            "move_object",
            "rotate_object",
            "scale_object",
            "copy_object",
            "delete_object",
            "boolean_union",
            "boolean_difference",
            "boolean_intersect",
            "add_modifier",
            "remove_modifier",
            "apply_modifier",
            "add_bevel",
            "add_solidify",
            "add_mirror",
            "add_array",
            "add_subdivision",
            "create_material",
            "assign_material",
            "insert_keyframe",
            "create_armature",
            "set_frame_range",
            "goto_frame",
            "add_rigid_body",
            "add_cloth",
            "bake_physics",
            "get_state",
            "list_objects",
            "get_object_details",
            "measure_distance",
            "health_check",
            "export_stl",
            "export_obj",
            "export_gltf",
            "set_view",
            "set_visibility",
        ] {
            assert!(reg.contains(name), "missing operation {name}");
        }
        assert_eq!(reg.len(), 44);
    }
}
