//! Material creation and assignment

use glyph_bridge::{AdapterError, Operation, ParamKind, ParamSpec, Registry};
use glyph_scene::{Document, Material};
use serde_json::{Value, json};

use crate::util::scene_err;

/// RGBA from a 3- or 4-element array, alpha defaulting to 1
fn color_param(value: Option<&Value>) -> Result<[f64; 4], AdapterError> {
    let invalid = || AdapterError::new("invalid_color", "color must be 3 or 4 numbers");
    let items = value.and_then(Value::as_array).ok_or_else(invalid)?;
    if !(3..=4).contains(&items.len()) {
        return Err(invalid());
    }
    let mut color = [0.0, 0.0, 0.0, 1.0];
    for (slot, item) in color.iter_mut().zip(items) {
        *slot = item.as_f64().ok_or_else(invalid)?;
    }
    Ok(color)
}

pub(crate) fn register(reg: &mut Registry<Document>) {
    reg.register(
        Operation::new("create_material", |doc: &mut Document, params| {
            let name = params.require_str("name")?.to_string();
            let color = color_param(params.value("color"))?;
            let metallic = params.require_f64("metallic")?;
            let roughness = params.require_f64("roughness")?;
            doc.add_material(Material {
                name: name.clone(),
                color,
                metallic,
                roughness,
            });
            Ok(json!({ "material": name, "color": color }))
        })
        .param(ParamSpec::defaulted("name", ParamKind::Str, json!("Material")))
        .param(ParamSpec::defaulted("color", ParamKind::Array, json!([0.8, 0.8, 0.8, 1.0])))
        .param(ParamSpec::defaulted("metallic", ParamKind::Float, json!(0.0)))
        .param(ParamSpec::defaulted("roughness", ParamKind::Float, json!(0.5))),
    );

    reg.register(
        Operation::new("assign_material", |doc: &mut Document, params| {
            let object = params.require_str("object")?;
            let material = params.require_str("material")?;
            doc.material(material).map_err(scene_err)?;
            let obj = doc.object_mut(object).map_err(scene_err)?;
            obj.material = Some(material.to_string());
            Ok(json!({ "object": obj.name, "material": material }))
        })
        .param(ParamSpec::required("object", ParamKind::Str))
        .param(ParamSpec::required("material", ParamKind::Str)),
    );
}

#[cfg(test)]
mod tests {
    use glyph_scene::Document;
    use serde_json::json;

    use crate::testing::invoke;

    #[test]
    fn test_create_material_defaults() {
        let mut doc = Document::new();
        let result = invoke(&mut doc, "create_material", json!({})).unwrap();
        assert_eq!(result["material"], "Material");
        assert_eq!(result["color"], json!([0.8, 0.8, 0.8, 1.0]));
        assert_eq!(doc.material("Material").unwrap().roughness, 0.5);
    }

    #[test]
    fn test_create_material_rgb_gets_alpha() {
        let mut doc = Document::new();
        let result = invoke(
            &mut doc,
            "create_material",
            json!({ "name": "Red", "color": [1.0, 0.0, 0.0] }),
        )
        .unwrap();
        assert_eq!(result["color"], json!([1.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_create_material_rejects_malformed_color() {
        let mut doc = Document::new();
        let err = invoke(
            &mut doc,
            "create_material",
            json!({ "color": [1.0, 0.0] }),
        )
        .unwrap_err();
        assert_eq!(err.kind, "invalid_color");
    }

    #[test]
    fn test_assign_requires_existing_material() {
        let mut doc = Document::new();
        invoke(&mut doc, "create_cube", json!({})).unwrap();
        let err = invoke(
            &mut doc,
            "assign_material",
            json!({ "object": "Cube", "material": "Nope" }),
        )
        .unwrap_err();
        assert_eq!(err.kind, "material_not_found");
    }

    #[test]
    fn test_assign_material() {
        let mut doc = Document::new();
        invoke(&mut doc, "create_cube", json!({})).unwrap();
        invoke(&mut doc, "create_material", json!({ "name": "Steel" })).unwrap();
        invoke(
            &mut doc,
            "assign_material",
            json!({ "object": "Cube", "material": "Steel" }),
        )
        .unwrap();
        assert_eq!(doc.object("Cube").unwrap().material.as_deref(), Some("Steel"));
    }
}
