//! Mesh primitive creation

use glyph_bridge::{Operation, ParamKind, ParamSpec, Registry};
use glyph_scene::{Document, Object, primitives};
use serde_json::json;

use crate::util::{mesh_summary, vec3_param};

pub(crate) fn register(reg: &mut Registry<Document>) {
    reg.register(
        Operation::new("create_cube", |doc: &mut Document, params| {
            let name = params.require_str("name")?.to_string();
            let size = params.require_f64("size")? as f32;
            let mut obj = Object::with_mesh(name, primitives::cube(size));
            obj.location = vec3_param(params, "location")?;
            let name = doc.insert(obj);
            Ok(mesh_summary(doc.object(&name).map_err(crate::util::scene_err)?))
        })
        .param(ParamSpec::defaulted("name", ParamKind::Str, json!("Cube")))
        .param(ParamSpec::defaulted("size", ParamKind::Float, json!(2.0)))
        .param(ParamSpec::defaulted("location", ParamKind::Vec3, json!([0.0, 0.0, 0.0]))),
    );

    reg.register(
        Operation::new("create_sphere", |doc: &mut Document, params| {
            let name = params.require_str("name")?.to_string();
            let radius = params.require_f64("radius")? as f32;
            let segments = params.require_i64("segments")?.max(3) as u32;
            let rings = params.require_i64("rings")?.max(2) as u32;
            let mut obj =
                Object::with_mesh(name, primitives::uv_sphere(radius, segments, rings));
            obj.location = vec3_param(params, "location")?;
            let name = doc.insert(obj);
            Ok(mesh_summary(doc.object(&name).map_err(crate::util::scene_err)?))
        })
        .param(ParamSpec::defaulted("name", ParamKind::Str, json!("Sphere")))
        .param(ParamSpec::defaulted("radius", ParamKind::Float, json!(1.0)))
        .param(ParamSpec::defaulted("segments", ParamKind::Int, json!(32)))
        .param(ParamSpec::defaulted("rings", ParamKind::Int, json!(16)))
        .param(ParamSpec::defaulted("location", ParamKind::Vec3, json!([0.0, 0.0, 0.0]))),
    );

    reg.register(
        Operation::new("create_cylinder", |doc: &mut Document, params| {
            let name = params.require_str("name")?.to_string();
            let radius = params.require_f64("radius")? as f32;
            let depth = params.require_f64("depth")? as f32;
            let vertices = params.require_i64("vertices")?.max(3) as u32;
            let mut obj =
                Object::with_mesh(name, primitives::cylinder(radius, depth, vertices));
            obj.location = vec3_param(params, "location")?;
            let name = doc.insert(obj);
            Ok(mesh_summary(doc.object(&name).map_err(crate::util::scene_err)?))
        })
        .param(ParamSpec::defaulted("name", ParamKind::Str, json!("Cylinder")))
        .param(ParamSpec::defaulted("radius", ParamKind::Float, json!(1.0)))
        .param(ParamSpec::defaulted("depth", ParamKind::Float, json!(2.0)))
        .param(ParamSpec::defaulted("vertices", ParamKind::Int, json!(32)))
        .param(ParamSpec::defaulted("location", ParamKind::Vec3, json!([0.0, 0.0, 0.0]))),
    );

    reg.register(
        Operation::new("create_cone", |doc: &mut Document, params| {
            let name = params.require_str("name")?.to_string();
            let radius1 = params.require_f64("radius1")? as f32;
            let radius2 = params.require_f64("radius2")? as f32;
            let depth = params.require_f64("depth")? as f32;
            let vertices = params.require_i64("vertices")?.max(3) as u32;
            let mut obj =
                Object::with_mesh(name, primitives::cone(radius1, radius2, depth, vertices));
            obj.location = vec3_param(params, "location")?;
            let name = doc.insert(obj);
            Ok(mesh_summary(doc.object(&name).map_err(crate::util::scene_err)?))
        })
        .param(ParamSpec::defaulted("name", ParamKind::Str, json!("Cone")))
        .param(ParamSpec::defaulted("radius1", ParamKind::Float, json!(1.0)))
        .param(ParamSpec::defaulted("radius2", ParamKind::Float, json!(0.0)))
        .param(ParamSpec::defaulted("depth", ParamKind::Float, json!(2.0)))
        .param(ParamSpec::defaulted("vertices", ParamKind::Int, json!(32)))
        .param(ParamSpec::defaulted("location", ParamKind::Vec3, json!([0.0, 0.0, 0.0]))),
    );

    reg.register(
        Operation::new("create_torus", |doc: &mut Document, params| {
            let name = params.require_str("name")?.to_string();
            let major_radius = params.require_f64("major_radius")? as f32;
            let minor_radius = params.require_f64("minor_radius")? as f32;
            let major_segments = params.require_i64("major_segments")?.max(3) as u32;
            let minor_segments = params.require_i64("minor_segments")?.max(3) as u32;
            let mut obj = Object::with_mesh(
                name,
                primitives::torus(major_radius, minor_radius, major_segments, minor_segments),
            );
            obj.location = vec3_param(params, "location")?;
            let name = doc.insert(obj);
            Ok(mesh_summary(doc.object(&name).map_err(crate::util::scene_err)?))
        })
        .param(ParamSpec::defaulted("name", ParamKind::Str, json!("Torus")))
        .param(ParamSpec::defaulted("major_radius", ParamKind::Float, json!(1.0)))
        .param(ParamSpec::defaulted("minor_radius", ParamKind::Float, json!(0.25)))
        .param(ParamSpec::defaulted("major_segments", ParamKind::Int, json!(48)))
        .param(ParamSpec::defaulted("minor_segments", ParamKind::Int, json!(12)))
        .param(ParamSpec::defaulted("location", ParamKind::Vec3, json!([0.0, 0.0, 0.0]))),
    );

    reg.register(
        Operation::new("create_plane", |doc: &mut Document, params| {
            let name = params.require_str("name")?.to_string();
            let size = params.require_f64("size")? as f32;
            let mut obj = Object::with_mesh(name, primitives::plane(size));
            obj.location = vec3_param(params, "location")?;
            let name = doc.insert(obj);
            Ok(mesh_summary(doc.object(&name).map_err(crate::util::scene_err)?))
        })
        .param(ParamSpec::defaulted("name", ParamKind::Str, json!("Plane")))
        .param(ParamSpec::defaulted("size", ParamKind::Float, json!(2.0)))
        .param(ParamSpec::defaulted("location", ParamKind::Vec3, json!([0.0, 0.0, 0.0]))),
    );
}

#[cfg(test)]
mod tests {
    use glyph_scene::Document;
    use serde_json::json;

    use crate::testing::invoke;

    #[test]
    fn test_create_cube_defaults() {
        let mut doc = Document::new();
        let result = invoke(&mut doc, "create_cube", json!({})).unwrap();
        assert_eq!(result["object"], "Cube");
        assert_eq!(result["type"], "MESH");
        assert_eq!(result["vertices"], 8);
        assert_eq!(result["faces"], 12);
    }

    #[test]
    fn test_create_cube_name_collision_renames() {
        let mut doc = Document::new();
        invoke(&mut doc, "create_cube", json!({})).unwrap();
        let second = invoke(&mut doc, "create_cube", json!({})).unwrap();
        assert_eq!(second["object"], "Cube.001");
    }

    #[test]
    fn test_create_sphere_places_object() {
        let mut doc = Document::new();
        let result = invoke(
            &mut doc,
            "create_sphere",
            json!({ "name": "Ball", "radius": 2.0, "location": [1.0, 2.0, 3.0] }),
        )
        .unwrap();
        assert_eq!(result["object"], "Ball");
        let obj = doc.object("Ball").unwrap();
        assert_eq!(obj.location, glam::Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_create_plane_vertex_count() {
        let mut doc = Document::new();
        let result = invoke(&mut doc, "create_plane", json!({ "size": 4.0 })).unwrap();
        assert_eq!(result["vertices"], 4);
        assert_eq!(result["faces"], 2);
    }

    #[test]
    fn test_schema_defaults_reach_adapter() {
        let reg = crate::registry();
        let call = reg
            .resolve("create_sphere", serde_json::Map::new(), None)
            .unwrap();
        assert_eq!(call.params.require_f64("radius").ok(), Some(1.0));
        assert_eq!(call.params.require_i64("segments").ok(), Some(32));
        assert_eq!(call.params.require_vec3("location").ok(), Some([0.0, 0.0, 0.0]));
    }
}
