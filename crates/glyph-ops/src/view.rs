//! Viewport state operations

use glyph_bridge::{AdapterError, Operation, ParamKind, ParamSpec, Registry};
use glyph_scene::{Document, ViewDirection};
use serde_json::{Value, json};

use crate::util::scene_err;

pub(crate) fn register(reg: &mut Registry<Document>) {
    reg.register(
        Operation::new("set_view", |doc: &mut Document, params| {
            let direction = params.require_str("direction")?.to_string();
            let view = ViewDirection::parse(&direction).ok_or_else(|| {
                AdapterError::new(
                    "invalid_view",
                    format!("unknown view direction '{direction}'"),
                )
            })?;
            doc.view = view;
            Ok(json!({ "direction": view.as_str() }))
        })
        .param(ParamSpec::defaulted("direction", ParamKind::Str, json!("front"))),
    );

    reg.register(
        Operation::new("set_visibility", |doc: &mut Document, params| {
            let visible = params.require_bool("visible")?;
            let solo = params.require_bool("solo")?;

            let mut targets: Vec<String> = Vec::new();
            if let Some(single) = params.opt_str("object_name") {
                targets.push(single.to_string());
            }
            if let Some(Value::Array(items)) = params.value("object_names") {
                for item in items {
                    if let Some(name) = item.as_str() {
                        targets.push(name.to_string());
                    }
                }
            }
            if targets.is_empty() {
                return Err(AdapterError::new(
                    "missing_parameter",
                    "no objects specified (use object_name or object_names)",
                ));
            }

            // Validate before mutating anything
            for name in &targets {
                doc.object(name).map_err(scene_err)?;
            }

            if solo {
                for obj in &mut doc.objects {
                    if !targets.contains(&obj.name) {
                        obj.visible = false;
                    }
                }
            }
            for name in &targets {
                doc.object_mut(name).map_err(scene_err)?.visible = visible;
            }

            Ok(json!({
                "objects": targets,
                "visible": visible,
                "solo": solo,
            }))
        })
        .param(ParamSpec::optional("object_name", ParamKind::Str))
        .param(ParamSpec::optional("object_names", ParamKind::Array))
        .param(ParamSpec::defaulted("visible", ParamKind::Bool, json!(true)))
        .param(ParamSpec::defaulted("solo", ParamKind::Bool, json!(false))),
    );
}
