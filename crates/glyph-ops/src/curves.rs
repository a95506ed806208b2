//! Curve object creation
//!
//! Curves carry no tessellated geometry here; the document tracks them as
//! curve objects with a spline count so queries and transforms still work.

use glyph_bridge::{Operation, ParamKind, ParamSpec, Registry};
use glyph_scene::{Document, Object, ObjectKind};
use serde_json::json;

use crate::util::vec3_param;

fn register_curve(reg: &mut Registry<Document>, op: &'static str, default_name: &'static str) {
    reg.register(
        Operation::new(op, move |doc: &mut Document, params| {
            let name = params.require_str("name")?.to_string();
            let mut obj = Object::new(name, ObjectKind::Curve);
            obj.spline_count = 1;
            obj.location = vec3_param(params, "location")?;
            let name = doc.insert(obj);
            Ok(json!({
                "object": name,
                "type": "CURVE",
                "spline_count": 1,
            }))
        })
        .param(ParamSpec::defaulted("name", ParamKind::Str, json!(default_name)))
        .param(ParamSpec::defaulted("location", ParamKind::Vec3, json!([0.0, 0.0, 0.0]))),
    );
}

pub(crate) fn register(reg: &mut Registry<Document>) {
    register_curve(reg, "create_bezier", "BezierCurve");
    register_curve(reg, "create_nurbs", "NurbsCurve");
    register_curve(reg, "create_path", "Path");
}
