//! Export operations
//!
//! Each operation writes world-space geometry to disk synchronously on
//! the host thread, exactly like the host's own exporters.

use std::path::Path;

use glyph_bridge::{Operation, ParamKind, ParamSpec, Registry};
use glyph_scene::Document;
use glyph_scene::export::{ExportFormat, export_document};
use serde_json::json;

use crate::util::scene_err;

fn register_export(
    reg: &mut Registry<Document>,
    op: &'static str,
    format: ExportFormat,
    format_name: &'static str,
) {
    reg.register(
        Operation::new(op, move |doc: &mut Document, params| {
            let filepath = params.require_str("filepath")?;
            let only = params.opt_str("object");
            let triangles =
                export_document(doc, format, Path::new(filepath), only).map_err(scene_err)?;
            Ok(json!({
                "filepath": filepath,
                "format": format_name,
                "triangles": triangles,
            }))
        })
        .param(ParamSpec::required("filepath", ParamKind::Str))
        .param(ParamSpec::optional("object", ParamKind::Str)),
    );
}

pub(crate) fn register(reg: &mut Registry<Document>) {
    register_export(reg, "export_stl", ExportFormat::Stl, "STL");
    register_export(reg, "export_obj", ExportFormat::Obj, "OBJ");
    register_export(reg, "export_gltf", ExportFormat::Gltf, "GLTF");
}
