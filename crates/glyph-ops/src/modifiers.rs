//! Modifier stack operations
//!
//! Modifiers are recorded on the object with their settings; `apply`
//! marks the modifier as baked by removing it from the stack. Geometry
//! evaluation of generator modifiers is left to the real host.

use glyph_bridge::{AdapterError, Operation, ParamKind, ParamSpec, Registry};
use glyph_scene::{Document, Modifier, SceneError};
use serde_json::{Map, Value, json};

use crate::util::scene_err;

fn push_modifier(
    doc: &mut Document,
    object: &str,
    name: String,
    kind: &str,
    settings: Map<String, Value>,
) -> Result<String, AdapterError> {
    let obj = doc.object_mut(object).map_err(scene_err)?;
    obj.modifiers.push(Modifier {
        name: name.clone(),
        kind: kind.to_string(),
        settings,
    });
    Ok(name)
}

pub(crate) fn register(reg: &mut Registry<Document>) {
    reg.register(
        Operation::new("add_modifier", |doc: &mut Document, params| {
            let object = params.require_str("object")?.to_string();
            let kind = match params.opt_str("modifier_type") {
                Some(kind) if !kind.is_empty() => kind.to_ascii_uppercase(),
                _ => return Err(AdapterError::missing("modifier_type")),
            };
            // Name falls back to the modifier type, so it cannot carry a
            // schema default.
            let name = params.opt_str("name").unwrap_or(kind.as_str()).to_string();
            let settings = match params.value("settings") {
                Some(Value::Object(map)) => map.clone(),
                _ => Map::new(),
            };
            let name = push_modifier(doc, &object, name, &kind, settings)?;
            Ok(json!({ "object": object, "modifier": name, "type": kind }))
        })
        .param(ParamSpec::required("object", ParamKind::Str))
        .param(ParamSpec::optional("modifier_type", ParamKind::Str))
        .param(ParamSpec::optional("name", ParamKind::Str))
        .param(ParamSpec::defaulted("settings", ParamKind::Object, json!({}))),
    );

    reg.register(
        Operation::new("remove_modifier", |doc: &mut Document, params| {
            let object = params.require_str("object")?;
            let modifier = params.require_str("modifier")?;
            let obj = doc.object_mut(object).map_err(scene_err)?;
            obj.remove_modifier(modifier)
                .ok_or_else(|| scene_err(SceneError::ModifierNotFound(modifier.to_string())))?;
            Ok(json!({ "object": obj.name, "removed": modifier }))
        })
        .param(ParamSpec::required("object", ParamKind::Str))
        .param(ParamSpec::required("modifier", ParamKind::Str)),
    );

    reg.register(
        Operation::new("apply_modifier", |doc: &mut Document, params| {
            let object = params.require_str("object")?;
            let modifier = params.require_str("modifier")?;
            let obj = doc.object_mut(object).map_err(scene_err)?;
            obj.remove_modifier(modifier)
                .ok_or_else(|| scene_err(SceneError::ModifierNotFound(modifier.to_string())))?;
            Ok(json!({ "object": obj.name, "applied": modifier }))
        })
        .param(ParamSpec::required("object", ParamKind::Str))
        .param(ParamSpec::required("modifier", ParamKind::Str)),
    );

    reg.register(
        Operation::new("add_bevel", |doc: &mut Document, params| {
            let object = params.require_str("object")?.to_string();
            let width = params.require_f64("width")?;
            let segments = params.require_i64("segments")?;
            let limit_method = params.require_str("limit_method")?.to_ascii_uppercase();
            let angle_limit = params.require_f64("angle_limit")?;
            let mut settings = Map::new();
            settings.insert("width".into(), Value::from(width));
            settings.insert("segments".into(), Value::from(segments));
            settings.insert("limit_method".into(), Value::from(limit_method));
            settings.insert("angle_limit".into(), Value::from(angle_limit));
            let name = push_modifier(doc, &object, "Bevel".into(), "BEVEL", settings)?;
            Ok(json!({
                "object": object,
                "modifier": name,
                "width": width,
                "segments": segments,
            }))
        })
        .param(ParamSpec::required("object", ParamKind::Str))
        .param(ParamSpec::defaulted("width", ParamKind::Float, json!(0.1)))
        .param(ParamSpec::defaulted("segments", ParamKind::Int, json!(1)))
        .param(ParamSpec::defaulted("limit_method", ParamKind::Str, json!("NONE")))
        .param(ParamSpec::defaulted("angle_limit", ParamKind::Float, json!(30.0))),
    );

    reg.register(
        Operation::new("add_solidify", |doc: &mut Document, params| {
            let object = params.require_str("object")?.to_string();
            let thickness = params.require_f64("thickness")?;
            let offset = params.require_f64("offset")?;
            let use_even_offset = params.require_bool("use_even_offset")?;
            let mut settings = Map::new();
            settings.insert("thickness".into(), Value::from(thickness));
            settings.insert("offset".into(), Value::from(offset));
            settings.insert("use_even_offset".into(), Value::from(use_even_offset));
            let name = push_modifier(doc, &object, "Solidify".into(), "SOLIDIFY", settings)?;
            Ok(json!({
                "object": object,
                "modifier": name,
                "thickness": thickness,
            }))
        })
        .param(ParamSpec::required("object", ParamKind::Str))
        .param(ParamSpec::defaulted("thickness", ParamKind::Float, json!(0.1)))
        .param(ParamSpec::defaulted("offset", ParamKind::Float, json!(-1.0)))
        .param(ParamSpec::defaulted("use_even_offset", ParamKind::Bool, json!(true))),
    );

    reg.register(
        Operation::new("add_mirror", |doc: &mut Document, params| {
            let object = params.require_str("object")?.to_string();
            let use_clip = params.require_bool("use_clip")?;
            // Axis is either a string like "xy" or an array of three booleans
            let use_axis = match params.value("axis") {
                Some(Value::Array(items)) => {
                    let mut axis = [false; 3];
                    for (slot, item) in axis.iter_mut().zip(items) {
                        *slot = item.as_bool().unwrap_or(false);
                    }
                    axis
                }
                Some(Value::String(s)) => {
                    let s = s.to_ascii_lowercase();
                    [s.contains('x'), s.contains('y'), s.contains('z')]
                }
                _ => [false; 3],
            };
            let mut settings = Map::new();
            settings.insert("use_axis".into(), json!(use_axis));
            settings.insert("use_clip".into(), Value::from(use_clip));
            if let Some(mirror_object) = params.opt_str("mirror_object") {
                settings.insert("mirror_object".into(), Value::from(mirror_object));
            }
            let name = push_modifier(doc, &object, "Mirror".into(), "MIRROR", settings)?;
            Ok(json!({
                "object": object,
                "modifier": name,
                "axis": use_axis,
            }))
        })
        .param(ParamSpec::required("object", ParamKind::Str))
        .param(ParamSpec::defaulted("axis", ParamKind::Any, json!("x")))
        .param(ParamSpec::defaulted("use_clip", ParamKind::Bool, json!(false)))
        .param(ParamSpec::optional("mirror_object", ParamKind::Str)),
    );

    reg.register(
        Operation::new("add_array", |doc: &mut Document, params| {
            let object = params.require_str("object")?.to_string();
            let count = params.require_i64("count")?;
            let offset = params.require_vec3("offset")?;
            let use_relative = params.require_bool("use_relative_offset")?;
            let mut settings = Map::new();
            settings.insert("count".into(), Value::from(count));
            settings.insert("use_relative_offset".into(), Value::from(use_relative));
            if use_relative {
                settings.insert("relative_offset".into(), json!(offset));
            }
            if let Some(constant) = params.opt_vec3("constant_offset") {
                settings.insert("constant_offset".into(), json!(constant));
            }
            let name = push_modifier(doc, &object, "Array".into(), "ARRAY", settings)?;
            Ok(json!({
                "object": object,
                "modifier": name,
                "count": count,
            }))
        })
        .param(ParamSpec::required("object", ParamKind::Str))
        .param(ParamSpec::defaulted("count", ParamKind::Int, json!(2)))
        .param(ParamSpec::defaulted("offset", ParamKind::Vec3, json!([1.0, 0.0, 0.0])))
        .param(ParamSpec::defaulted("use_relative_offset", ParamKind::Bool, json!(true)))
        .param(ParamSpec::optional("constant_offset", ParamKind::Vec3)),
    );

    reg.register(
        Operation::new("add_subdivision", |doc: &mut Document, params| {
            let object = params.require_str("object")?.to_string();
            let levels = params.require_i64("levels")?;
            // Render levels track viewport levels unless set explicitly,
            // so the fallback is decided here rather than in the schema.
            let render_levels = params.opt_i64("render_levels").unwrap_or(levels);
            let use_limit_surface = params.require_bool("use_limit_surface")?;
            let mut settings = Map::new();
            settings.insert("levels".into(), Value::from(levels));
            settings.insert("render_levels".into(), Value::from(render_levels));
            settings.insert("use_limit_surface".into(), Value::from(use_limit_surface));
            let name = push_modifier(doc, &object, "Subdivision".into(), "SUBSURF", settings)?;
            Ok(json!({
                "object": object,
                "modifier": name,
                "levels": levels,
                "render_levels": render_levels,
            }))
        })
        .param(ParamSpec::required("object", ParamKind::Str))
        .param(ParamSpec::defaulted("levels", ParamKind::Int, json!(2)))
        .param(ParamSpec::optional("render_levels", ParamKind::Int))
        .param(ParamSpec::defaulted("use_limit_surface", ParamKind::Bool, json!(true))),
    );
}
