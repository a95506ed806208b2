//! Error types for the host document

use thiserror::Error;

/// Result type alias using the scene's error type
pub type Result<T> = std::result::Result<T, SceneError>;

/// Errors that can occur while mutating or exporting the document
#[derive(Error, Debug)]
pub enum SceneError {
    /// Named object does not exist in the document
    #[error("object '{0}' not found")]
    ObjectNotFound(String),

    /// Named material does not exist in the document
    #[error("material '{0}' not found")]
    MaterialNotFound(String),

    /// Named modifier does not exist on the object
    #[error("modifier '{0}' not found")]
    ModifierNotFound(String),

    /// The operation requires mesh data the object does not carry
    #[error("object '{0}' is not a mesh")]
    NotAMesh(String),

    /// Export failed
    #[error("export failed: {0}")]
    Export(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
