//! Boolean operations between two mesh objects
//!
//! There is no CSG kernel behind these. Union merges the target's
//! world-space geometry into the base object; difference and intersect
//! keep the base geometry unchanged. Modifier bookkeeping and target
//! deletion follow the host application's behavior so agent workflows
//! that chain booleans keep working.

use glyph_bridge::{Operation, ParamKind, ParamSpec, Registry};
use glyph_scene::{Document, Modifier};
use serde_json::{Map, Value, json};

use crate::util::scene_err;

fn boolean_op(
    doc: &mut Document,
    operation: &str,
    object: &str,
    target: &str,
    apply: bool,
    delete_target: bool,
) -> Result<Value, glyph_bridge::AdapterError> {
    doc.object(object).map_err(scene_err)?;
    let target_world = doc
        .object(target)
        .map_err(|_| {
            glyph_bridge::AdapterError::new(
                "object_not_found",
                format!("target '{target}' not found"),
            )
        })?
        .world_mesh();

    if apply {
        if operation == "UNION" {
            if let Some(target_mesh) = target_world {
                let obj = doc.object_mut(object).map_err(scene_err)?;
                // Fold the target into base-local space before merging
                let to_local = obj.transform().inverse();
                let local = target_mesh.transformed(to_local);
                match obj.mesh.as_mut() {
                    Some(mesh) => mesh.merge(&local),
                    None => obj.mesh = Some(local),
                }
            }
        }
        if delete_target {
            doc.remove(target).map_err(scene_err)?;
        }
    } else {
        let obj = doc.object_mut(object).map_err(scene_err)?;
        let mut settings = Map::new();
        settings.insert("operation".into(), Value::from(operation));
        settings.insert("target".into(), Value::from(target));
        obj.modifiers.push(Modifier {
            name: format!("Boolean_{operation}"),
            kind: "BOOLEAN".into(),
            settings,
        });
    }

    let obj = doc.object(object).map_err(scene_err)?;
    let (vertices, faces) = match &obj.mesh {
        Some(mesh) => (mesh.vertex_count(), mesh.triangle_count()),
        None => (0, 0),
    };
    Ok(json!({
        "object": obj.name,
        "operation": operation,
        "vertices": vertices,
        "faces": faces,
    }))
}

fn register_boolean(reg: &mut Registry<Document>, op: &'static str, operation: &'static str) {
    reg.register(
        Operation::new(op, move |doc: &mut Document, params| {
            let object = params.require_str("object")?.to_string();
            let target = params.require_str("target")?.to_string();
            let apply = params.require_bool("apply")?;
            let delete_target = params.require_bool("delete_target")?;
            boolean_op(doc, operation, &object, &target, apply, delete_target)
        })
        .param(ParamSpec::required("object", ParamKind::Str))
        .param(ParamSpec::required("target", ParamKind::Str))
        .param(ParamSpec::defaulted("apply", ParamKind::Bool, json!(true)))
        .param(ParamSpec::defaulted("delete_target", ParamKind::Bool, json!(true))),
    );
}

pub(crate) fn register(reg: &mut Registry<Document>) {
    register_boolean(reg, "boolean_union", "UNION");
    register_boolean(reg, "boolean_difference", "DIFFERENCE");
    register_boolean(reg, "boolean_intersect", "INTERSECT");
}
