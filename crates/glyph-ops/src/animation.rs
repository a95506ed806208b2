//! Animation and rigging operations

use glyph_bridge::{Operation, ParamKind, ParamSpec, Registry};
use glyph_scene::{Document, Keyframe, Object, ObjectKind};
use serde_json::json;

use crate::util::{scene_err, vec3_param};

pub(crate) fn register(reg: &mut Registry<Document>) {
    reg.register(
        Operation::new("insert_keyframe", |doc: &mut Document, params| {
            let object = params.require_str("object")?;
            let data_path = params.require_str("data_path")?.to_string();
            if let Some(frame) = params.opt_i64("frame") {
                doc.current_frame = frame;
            }
            let frame = doc.current_frame;
            let obj = doc.object_mut(object).map_err(scene_err)?;
            obj.keyframes.push(Keyframe {
                frame,
                channel: data_path.clone(),
            });
            Ok(json!({
                "object": obj.name,
                "data_path": data_path,
                "frame": frame,
            }))
        })
        .param(ParamSpec::required("object", ParamKind::Str))
        .param(ParamSpec::defaulted("data_path", ParamKind::Str, json!("location")))
        .param(ParamSpec::optional("frame", ParamKind::Int)),
    );

    reg.register(
        Operation::new("create_armature", |doc: &mut Document, params| {
            let name = params.require_str("name")?.to_string();
            let mut obj = Object::new(name, ObjectKind::Armature);
            obj.location = vec3_param(params, "location")?;
            let name = doc.insert(obj);
            // A freshly added armature has its single default bone
            Ok(json!({ "armature": name, "bones": 1 }))
        })
        .param(ParamSpec::defaulted("name", ParamKind::Str, json!("Armature")))
        .param(ParamSpec::defaulted("location", ParamKind::Vec3, json!([0.0, 0.0, 0.0]))),
    );

    reg.register(
        Operation::new("set_frame_range", |doc: &mut Document, params| {
            let start = params.require_i64("start")?;
            let end = params.require_i64("end")?;
            doc.frame_start = start;
            doc.frame_end = end;
            Ok(json!({ "frame_start": start, "frame_end": end }))
        })
        .param(ParamSpec::defaulted("start", ParamKind::Int, json!(1)))
        .param(ParamSpec::defaulted("end", ParamKind::Int, json!(250))),
    );

    reg.register(
        Operation::new("goto_frame", |doc: &mut Document, params| {
            doc.current_frame = params.require_i64("frame")?;
            Ok(json!({ "frame": doc.current_frame }))
        })
        .param(ParamSpec::defaulted("frame", ParamKind::Int, json!(1))),
    );
}
