//! Read-only scene queries

use glyph_bridge::{Operation, ParamKind, ParamSpec, Registry};
use glyph_scene::{Document, Object};
use serde_json::{Value, json};

use crate::util::{scene_err, vec3_json};

fn object_brief(obj: &Object) -> Value {
    json!({
        "name": obj.name,
        "type": obj.kind.as_str(),
        "location": vec3_json(obj.location),
    })
}

pub(crate) fn register(reg: &mut Registry<Document>) {
    reg.register(Operation::new("get_state", |doc: &mut Document, _params| {
        let objects: Vec<Value> = doc
            .objects
            .iter()
            .map(|obj| {
                let mut entry = json!({
                    "name": obj.name,
                    "type": obj.kind.as_str(),
                    "location": vec3_json(obj.location),
                    "rotation": vec3_json(obj.rotation),
                    "scale": vec3_json(obj.scale),
                    "visible": obj.visible,
                });
                if let Some(mesh) = &obj.mesh {
                    entry["vertices"] = mesh.vertex_count().into();
                    entry["faces"] = mesh.triangle_count().into();
                    entry["edges"] = mesh.edge_count().into();
                }
                entry
            })
            .collect();
        Ok(json!({
            "scene": doc.name,
            "frame": doc.current_frame,
            "object_count": objects.len(),
            "objects": objects,
        }))
    }));

    reg.register(
        Operation::new("list_objects", |doc: &mut Document, params| {
            let filter = params.opt_str("type").map(str::to_ascii_uppercase);
            let objects: Vec<Value> = doc
                .objects
                .iter()
                .filter(|obj| {
                    filter
                        .as_deref()
                        .is_none_or(|wanted| obj.kind.as_str() == wanted)
                })
                .map(object_brief)
                .collect();
            Ok(json!({ "count": objects.len(), "objects": objects }))
        })
        .param(ParamSpec::optional("type", ParamKind::Str)),
    );

    reg.register(
        Operation::new("get_object_details", |doc: &mut Document, params| {
            let name = params.require_str("object")?;
            let obj = doc.object(name).map_err(scene_err)?;
            let mut details = json!({
                "name": obj.name,
                "type": obj.kind.as_str(),
                "location": vec3_json(obj.location),
                "rotation_euler": vec3_json(obj.rotation),
                "scale": vec3_json(obj.scale),
                "dimensions": vec3_json(obj.dimensions()),
                "visible": obj.visible,
                "modifiers": obj.modifiers.iter().map(|m| m.name.clone()).collect::<Vec<_>>(),
                "materials": obj.material.iter().collect::<Vec<_>>(),
            });
            if let Some(mesh) = &obj.mesh {
                details["mesh"] = json!({
                    "vertices": mesh.vertex_count(),
                    "edges": mesh.edge_count(),
                    "faces": mesh.triangle_count(),
                });
                if let Some((min, max)) = obj.world_mesh().as_ref().and_then(|m| m.bounds()) {
                    details["bounding_box"] = json!({
                        "min": vec3_json(min),
                        "max": vec3_json(max),
                    });
                }
            }
            Ok(json!({ "object": details }))
        })
        .param(ParamSpec::required("object", ParamKind::Str)),
    );

    reg.register(
        Operation::new("measure_distance", |doc: &mut Document, params| {
            let name1 = params.require_str("object1")?;
            let name2 = params.require_str("object2")?;
            let obj1 = doc.object(name1).map_err(scene_err)?;
            let obj2 = doc.object(name2).map_err(scene_err)?;
            let distance = (obj1.location - obj2.location).length();
            Ok(json!({
                "object1": obj1.name,
                "object2": obj2.name,
                "distance": distance,
                "location1": vec3_json(obj1.location),
                "location2": vec3_json(obj2.location),
            }))
        })
        .param(ParamSpec::required("object1", ParamKind::Str))
        .param(ParamSpec::required("object2", ParamKind::Str)),
    );

    reg.register(Operation::new("health_check", |doc: &mut Document, _params| {
        Ok(json!({
            "version": env!("CARGO_PKG_VERSION"),
            "scene": doc.name,
            "object_count": doc.objects.len(),
        }))
    }));
}
