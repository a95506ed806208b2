//! Physics setup and baking

use glyph_bridge::{Operation, ParamKind, ParamSpec, Registry};
use glyph_scene::{Cloth, Document, RigidBody};
use serde_json::json;

use crate::util::scene_err;

pub(crate) fn register(reg: &mut Registry<Document>) {
    reg.register(
        Operation::new("add_rigid_body", |doc: &mut Document, params| {
            let object = params.require_str("object")?;
            let body_type = params.require_str("type")?.to_ascii_uppercase();
            let mass = params.require_f64("mass")?;
            let friction = params.require_f64("friction")?;
            let restitution = params.require_f64("restitution")?;
            let shape = params.require_str("shape")?.to_ascii_uppercase();
            let obj = doc.object_mut(object).map_err(scene_err)?;
            obj.rigid_body = Some(RigidBody {
                body_type: body_type.clone(),
                mass,
                friction,
                restitution,
                shape: shape.clone(),
            });
            Ok(json!({
                "object": obj.name,
                "rigid_body": {
                    "type": body_type,
                    "mass": mass,
                    "shape": shape,
                },
            }))
        })
        .param(ParamSpec::required("object", ParamKind::Str))
        .param(ParamSpec::defaulted("type", ParamKind::Str, json!("ACTIVE")))
        .param(ParamSpec::defaulted("mass", ParamKind::Float, json!(1.0)))
        .param(ParamSpec::defaulted("friction", ParamKind::Float, json!(0.5)))
        .param(ParamSpec::defaulted("restitution", ParamKind::Float, json!(0.0)))
        .param(ParamSpec::defaulted("shape", ParamKind::Str, json!("CONVEX_HULL"))),
    );

    reg.register(
        Operation::new("add_cloth", |doc: &mut Document, params| {
            let object = params.require_str("object")?;
            let mass = params.require_f64("mass")?;
            let stiffness = params.require_f64("stiffness")?;
            let obj = doc.object_mut(object).map_err(scene_err)?;
            obj.cloth = Some(Cloth { mass, stiffness });
            Ok(json!({
                "object": obj.name,
                "cloth": { "mass": mass, "stiffness": stiffness },
            }))
        })
        .param(ParamSpec::required("object", ParamKind::Str))
        .param(ParamSpec::defaulted("mass", ParamKind::Float, json!(0.3)))
        .param(ParamSpec::defaulted("stiffness", ParamKind::Float, json!(15.0))),
    );

    reg.register(
        Operation::new("bake_physics", |doc: &mut Document, params| {
            let frame_start = params.require_i64("frame_start")?;
            let frame_end = params.require_i64("frame_end")?;
            doc.frame_start = frame_start;
            doc.frame_end = frame_end;
            doc.physics_baked = true;
            Ok(json!({ "frame_start": frame_start, "frame_end": frame_end }))
        })
        .param(ParamSpec::defaulted("frame_start", ParamKind::Int, json!(1)))
        .param(ParamSpec::defaulted("frame_end", ParamKind::Int, json!(250))),
    );
}

#[cfg(test)]
mod tests {
    use glyph_scene::Document;
    use serde_json::json;

    use crate::testing::invoke;

    #[test]
    fn test_add_rigid_body_defaults() {
        let mut doc = Document::new();
        invoke(&mut doc, "create_cube", json!({})).unwrap();
        let result = invoke(&mut doc, "add_rigid_body", json!({ "object": "Cube" })).unwrap();
        assert_eq!(result["rigid_body"]["type"], "ACTIVE");
        assert_eq!(result["rigid_body"]["shape"], "CONVEX_HULL");
        let rb = doc.object("Cube").unwrap().rigid_body.as_ref().unwrap();
        assert_eq!(rb.mass, 1.0);
        assert_eq!(rb.friction, 0.5);
    }

    #[test]
    fn test_add_cloth() {
        let mut doc = Document::new();
        invoke(&mut doc, "create_plane", json!({})).unwrap();
        invoke(
            &mut doc,
            "add_cloth",
            json!({ "object": "Plane", "stiffness": 30.0 }),
        )
        .unwrap();
        let cloth = doc.object("Plane").unwrap().cloth.as_ref().unwrap();
        assert_eq!(cloth.stiffness, 30.0);
        assert_eq!(cloth.mass, 0.3);
    }

    #[test]
    fn test_bake_physics_sets_range_and_flag() {
        let mut doc = Document::new();
        invoke(
            &mut doc,
            "bake_physics",
            json!({ "frame_start": 1, "frame_end": 100 }),
        )
        .unwrap();
        assert!(doc.physics_baked);
        assert_eq!(doc.frame_end, 100);
    }
}
