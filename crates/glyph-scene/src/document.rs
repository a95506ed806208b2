//! Scene document
//!
//! The [`Document`] is the single mutable state the dispatcher hands to
//! adapters. It is not thread safe on purpose; only the host loop thread
//! touches it.

use glam::Vec3;

use crate::error::{Result, SceneError};
use crate::mesh::Mesh;
use crate::object::Object;

/// Named viewing direction for the working viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewDirection {
    Front,
    Back,
    Left,
    Right,
    Top,
    Bottom,
    #[default]
    Isometric,
}

impl ViewDirection {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "FRONT" => Some(Self::Front),
            "BACK" => Some(Self::Back),
            "LEFT" => Some(Self::Left),
            "RIGHT" => Some(Self::Right),
            "TOP" => Some(Self::Top),
            "BOTTOM" => Some(Self::Bottom),
            "ISO" | "ISOMETRIC" => Some(Self::Isometric),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Front => "FRONT",
            Self::Back => "BACK",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Top => "TOP",
            Self::Bottom => "BOTTOM",
            Self::Isometric => "ISOMETRIC",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Material {
    pub name: String,
    /// Linear RGBA base color
    pub color: [f64; 4],
    pub metallic: f64,
    pub roughness: f64,
}

#[derive(Debug, Clone)]
pub struct Document {
    pub name: String,
    pub objects: Vec<Object>,
    pub materials: Vec<Material>,
    pub frame_start: i64,
    pub frame_end: i64,
    pub current_frame: i64,
    pub view: ViewDirection,
    pub physics_baked: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            name: "Scene".into(),
            objects: Vec::new(),
            materials: Vec::new(),
            frame_start: 1,
            frame_end: 250,
            current_frame: 1,
            view: ViewDirection::default(),
            physics_baked: false,
        }
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an object, renaming it `Name.001` style if the name is taken.
    /// Returns the final name.
    pub fn insert(&mut self, mut object: Object) -> String {
        object.name = self.unique_name(&object.name);
        let name = object.name.clone();
        self.objects.push(object);
        name
    }

    fn unique_name(&self, base: &str) -> String {
        if self.object(base).is_err() {
            return base.to_string();
        }
        for n in 1u32.. {
            let candidate = format!("{base}.{n:03}");
            if self.object(&candidate).is_err() {
                return candidate;
            }
        }
        unreachable!()
    }

    pub fn object(&self, name: &str) -> Result<&Object> {
        self.objects
            .iter()
            .find(|o| o.name == name)
            .ok_or_else(|| SceneError::ObjectNotFound(name.to_string()))
    }

    pub fn object_mut(&mut self, name: &str) -> Result<&mut Object> {
        self.objects
            .iter_mut()
            .find(|o| o.name == name)
            .ok_or_else(|| SceneError::ObjectNotFound(name.to_string()))
    }

    pub fn remove(&mut self, name: &str) -> Result<Object> {
        let idx = self
            .objects
            .iter()
            .position(|o| o.name == name)
            .ok_or_else(|| SceneError::ObjectNotFound(name.to_string()))?;
        Ok(self.objects.remove(idx))
    }

    /// Duplicates an object, offsetting the copy and giving it a fresh name
    pub fn duplicate(&mut self, name: &str, offset: Vec3) -> Result<String> {
        let mut copy = self.object(name)?.clone();
        copy.location += offset;
        Ok(self.insert(copy))
    }

    pub fn add_material(&mut self, material: Material) {
        if let Some(existing) = self.materials.iter_mut().find(|m| m.name == material.name) {
            *existing = material;
        } else {
            self.materials.push(material);
        }
    }

    pub fn material(&self, name: &str) -> Result<&Material> {
        self.materials
            .iter()
            .find(|m| m.name == name)
            .ok_or_else(|| SceneError::MaterialNotFound(name.to_string()))
    }

    /// World-space meshes of all visible mesh objects, merged into one.
    /// With `only` set, restricts to that single object.
    pub fn collect_world_mesh(&self, only: Option<&str>) -> Result<Mesh> {
        let mut merged = Mesh::new();
        match only {
            Some(name) => {
                let obj = self.object(name)?;
                let mesh = obj
                    .world_mesh()
                    .ok_or_else(|| SceneError::NotAMesh(name.to_string()))?;
                merged.merge(&mesh);
            }
            None => {
                for obj in self.objects.iter().filter(|o| o.visible) {
                    if let Some(mesh) = obj.world_mesh() {
                        merged.merge(&mesh);
                    }
                }
            }
        }
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectKind;
    use crate::primitives;

    #[test]
    fn test_insert_renames_on_collision() {
        let mut doc = Document::new();
        assert_eq!(doc.insert(Object::new("Cube", ObjectKind::Mesh)), "Cube");
        assert_eq!(doc.insert(Object::new("Cube", ObjectKind::Mesh)), "Cube.001");
        assert_eq!(doc.insert(Object::new("Cube", ObjectKind::Mesh)), "Cube.002");
    }

    #[test]
    fn test_remove_unknown_object() {
        let mut doc = Document::new();
        assert!(matches!(
            doc.remove("Ghost"),
            Err(SceneError::ObjectNotFound(_))
        ));
    }

    #[test]
    fn test_duplicate_offsets_copy() {
        let mut doc = Document::new();
        doc.insert(Object::with_mesh("Cube", primitives::cube(2.0)));
        let copy = doc.duplicate("Cube", Vec3::new(3.0, 0.0, 0.0)).unwrap();
        assert_eq!(copy, "Cube.001");
        assert_eq!(doc.object(&copy).unwrap().location.x, 3.0);
        assert_eq!(doc.object("Cube").unwrap().location.x, 0.0);
    }

    #[test]
    fn test_add_material_replaces_same_name() {
        let mut doc = Document::new();
        doc.add_material(Material {
            name: "Steel".into(),
            color: [0.5, 0.5, 0.5, 1.0],
            metallic: 1.0,
            roughness: 0.4,
        });
        doc.add_material(Material {
            name: "Steel".into(),
            color: [0.6, 0.6, 0.6, 1.0],
            metallic: 1.0,
            roughness: 0.2,
        });
        assert_eq!(doc.materials.len(), 1);
        assert_eq!(doc.material("Steel").unwrap().roughness, 0.2);
    }

    #[test]
    fn test_collect_world_mesh_skips_hidden() {
        let mut doc = Document::new();
        doc.insert(Object::with_mesh("A", primitives::cube(1.0)));
        doc.insert(Object::with_mesh("B", primitives::cube(1.0)));
        doc.object_mut("B").unwrap().visible = false;
        let merged = doc.collect_world_mesh(None).unwrap();
        assert_eq!(merged.vertex_count(), 8);
    }

    #[test]
    fn test_collect_world_mesh_single_requires_mesh() {
        let mut doc = Document::new();
        doc.insert(Object::new("Rig", ObjectKind::Armature));
        assert!(matches!(
            doc.collect_world_mesh(Some("Rig")),
            Err(SceneError::NotAMesh(_))
        ));
    }
}
