//! # Glyph Scene
//!
//! In-process stand-in for the modeling host's document model.
//!
//! The bridge dispatches calls against a mutable host value; this crate
//! provides that host: a [`Document`] of named objects with transforms,
//! mesh data, materials, modifiers and animation state, plus mesh
//! exporters for STL, OBJ and glTF.
//!
//! ## Units and Conventions
//!
//! - **Distances**: arbitrary units, `1.0` = 1 meter
//! - **Angles**: object rotations are stored in degrees, generator
//!   functions take radians internally
//! - **Coordinate system**: right-handed, Z-up

pub mod document;
pub mod export;
pub mod mesh;
pub mod object;
pub mod primitives;

mod error;

pub use document::{Document, Material, ViewDirection};
pub use error::{Result, SceneError};
pub use mesh::{Mesh, Vertex};
pub use object::{Cloth, Keyframe, Modifier, Object, ObjectKind, RigidBody};
