//! Scene objects
//!
//! An [`Object`] carries a transform plus kind-specific data. Rotation is
//! stored in degrees because every driving agent speaks degrees; it is
//! converted to radians only when the transform matrix is built.

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde_json::{Map, Value};

use crate::mesh::Mesh;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Mesh,
    Curve,
    Armature,
    Empty,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mesh => "MESH",
            Self::Curve => "CURVE",
            Self::Armature => "ARMATURE",
            Self::Empty => "EMPTY",
        }
    }
}

/// Procedural modifier attached to an object, applied lazily
#[derive(Debug, Clone)]
pub struct Modifier {
    pub name: String,
    pub kind: String,
    pub settings: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Keyframe {
    pub frame: i64,
    pub channel: String,
}

#[derive(Debug, Clone)]
pub struct RigidBody {
    pub body_type: String,
    pub mass: f64,
    pub friction: f64,
    pub restitution: f64,
    pub shape: String,
}

#[derive(Debug, Clone)]
pub struct Cloth {
    pub mass: f64,
    pub stiffness: f64,
}

#[derive(Debug, Clone)]
pub struct Object {
    pub name: String,
    pub kind: ObjectKind,
    pub location: Vec3,
    /// Euler rotation in degrees, XYZ order
    pub rotation: Vec3,
    pub scale: Vec3,
    pub visible: bool,
    pub mesh: Option<Mesh>,
    pub spline_count: usize,
    pub modifiers: Vec<Modifier>,
    pub material: Option<String>,
    pub keyframes: Vec<Keyframe>,
    pub rigid_body: Option<RigidBody>,
    pub cloth: Option<Cloth>,
}

impl Object {
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            kind,
            location: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            visible: true,
            mesh: None,
            spline_count: 0,
            modifiers: Vec::new(),
            material: None,
            keyframes: Vec::new(),
            rigid_body: None,
            cloth: None,
        }
    }

    pub fn with_mesh(name: impl Into<String>, mesh: Mesh) -> Self {
        let mut obj = Self::new(name, ObjectKind::Mesh);
        obj.mesh = Some(mesh);
        obj
    }

    /// Local-to-world matrix from location, rotation and scale
    pub fn transform(&self) -> Mat4 {
        let rot = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x.to_radians(),
            self.rotation.y.to_radians(),
            self.rotation.z.to_radians(),
        );
        Mat4::from_scale_rotation_translation(self.scale, rot, self.location)
    }

    /// World-space bounding-box extents, zero if the object has no mesh
    pub fn dimensions(&self) -> Vec3 {
        match self.world_mesh().as_ref().and_then(Mesh::bounds) {
            Some((min, max)) => max - min,
            None => Vec3::ZERO,
        }
    }

    /// Mesh with the object transform baked into vertex positions
    pub fn world_mesh(&self) -> Option<Mesh> {
        self.mesh.as_ref().map(|m| m.transformed(self.transform()))
    }

    pub fn modifier(&self, name: &str) -> Option<&Modifier> {
        self.modifiers.iter().find(|m| m.name == name)
    }

    pub fn remove_modifier(&mut self, name: &str) -> Option<Modifier> {
        let idx = self.modifiers.iter().position(|m| m.name == name)?;
        Some(self.modifiers.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives;

    #[test]
    fn test_transform_applies_scale_and_translation() {
        let mut obj = Object::with_mesh("Cube", primitives::cube(2.0));
        obj.location = Vec3::new(5.0, 0.0, 0.0);
        obj.scale = Vec3::new(2.0, 1.0, 1.0);

        let dims = obj.dimensions();
        assert!((dims.x - 4.0).abs() < 1e-5);
        assert!((dims.y - 2.0).abs() < 1e-5);

        let (min, max) = obj.world_mesh().unwrap().bounds().unwrap();
        assert!((min.x - 3.0).abs() < 1e-5);
        assert!((max.x - 7.0).abs() < 1e-5);
    }

    #[test]
    fn test_rotation_is_degrees() {
        let mut obj = Object::with_mesh("Plane", primitives::plane(2.0));
        obj.rotation = Vec3::new(90.0, 0.0, 0.0);
        // A Z-facing plane rotated 90 degrees about X spans the XZ plane.
        let dims = obj.dimensions();
        assert!(dims.y.abs() < 1e-4);
        assert!((dims.z - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_empty_object_has_zero_dimensions() {
        let obj = Object::new("Anchor", ObjectKind::Empty);
        assert_eq!(obj.dimensions(), Vec3::ZERO);
    }

    #[test]
    fn test_modifier_removal() {
        let mut obj = Object::with_mesh("Cube", primitives::cube(1.0));
        obj.modifiers.push(Modifier {
            name: "Bevel".into(),
            kind: "BEVEL".into(),
            settings: Map::new(),
        });
        assert!(obj.modifier("Bevel").is_some());
        assert!(obj.remove_modifier("Bevel").is_some());
        assert!(obj.remove_modifier("Bevel").is_none());
    }
}
