//! Object transform operations

use glam::Vec3;
use glyph_bridge::{AdapterError, Operation, ParamKind, ParamSpec, Registry};
use glyph_scene::Document;
use serde_json::json;

use crate::util::{opt_vec3_param, scene_err, vec3_json, vec3_param};

pub(crate) fn register(reg: &mut Registry<Document>) {
    reg.register(
        Operation::new("move_object", |doc: &mut Document, params| {
            let name = params.require_str("object")?;
            let obj = doc.object_mut(name).map_err(scene_err)?;
            if let Some(location) = opt_vec3_param(params, "location") {
                obj.location = location;
            } else if let Some(offset) = opt_vec3_param(params, "offset") {
                obj.location += offset;
            }
            Ok(json!({
                "object": obj.name,
                "location": vec3_json(obj.location),
            }))
        })
        .param(ParamSpec::required("object", ParamKind::Str))
        .param(ParamSpec::optional("location", ParamKind::Vec3))
        .param(ParamSpec::optional("offset", ParamKind::Vec3)),
    );

    reg.register(
        Operation::new("rotate_object", |doc: &mut Document, params| {
            let name = params.require_str("object")?;
            let axis = params.opt_str("axis").map(str::to_ascii_uppercase);
            let angle = params.require_f64("angle")? as f32;
            let obj = doc.object_mut(name).map_err(scene_err)?;
            if let Some(rotation) = opt_vec3_param(params, "rotation") {
                obj.rotation = rotation;
            } else if let Some(axis) = axis {
                match axis.as_str() {
                    "X" => obj.rotation.x += angle,
                    "Y" => obj.rotation.y += angle,
                    "Z" => obj.rotation.z += angle,
                    other => {
                        return Err(AdapterError::new(
                            "invalid_axis",
                            format!("axis must be X, Y or Z, got '{other}'"),
                        ));
                    }
                }
            }
            Ok(json!({
                "object": obj.name,
                "rotation_euler": vec3_json(obj.rotation),
            }))
        })
        .param(ParamSpec::required("object", ParamKind::Str))
        .param(ParamSpec::optional("rotation", ParamKind::Vec3))
        .param(ParamSpec::optional("axis", ParamKind::Str))
        .param(ParamSpec::defaulted("angle", ParamKind::Float, json!(0.0))),
    );

    reg.register(
        Operation::new("scale_object", |doc: &mut Document, params| {
            let name = params.require_str("object")?;
            let uniform = params.opt_f64("uniform");
            let scale = vec3_param(params, "scale")?;
            let obj = doc.object_mut(name).map_err(scene_err)?;
            obj.scale = match uniform {
                Some(u) => Vec3::splat(u as f32),
                None => scale,
            };
            Ok(json!({
                "object": obj.name,
                "scale": vec3_json(obj.scale),
            }))
        })
        .param(ParamSpec::required("object", ParamKind::Str))
        .param(ParamSpec::defaulted("scale", ParamKind::Vec3, json!([1.0, 1.0, 1.0])))
        .param(ParamSpec::optional("uniform", ParamKind::Float)),
    );

    reg.register(
        Operation::new("copy_object", |doc: &mut Document, params| {
            let name = params.require_str("object")?;
            let mut copy = doc.object(name).map_err(scene_err)?.clone();
            if let Some(new_name) = params.opt_str("new_name") {
                copy.name = new_name.to_string();
            }
            if let Some(location) = opt_vec3_param(params, "location") {
                copy.location = location;
            }
            let final_name = doc.insert(copy);
            let location = doc.object(&final_name).map_err(scene_err)?.location;
            Ok(json!({
                "object": final_name,
                "original": name,
                "location": vec3_json(location),
            }))
        })
        .param(ParamSpec::required("object", ParamKind::Str))
        .param(ParamSpec::optional("new_name", ParamKind::Str))
        .param(ParamSpec::optional("location", ParamKind::Vec3))
        .param(ParamSpec::optional("linked", ParamKind::Bool)),
    );

    reg.register(
        Operation::new("delete_object", |doc: &mut Document, params| {
            let name = params.require_str("object")?;
            let removed = doc.remove(name).map_err(scene_err)?;
            Ok(json!({ "deleted": removed.name }))
        })
        .param(ParamSpec::required("object", ParamKind::Str)),
    );
}
