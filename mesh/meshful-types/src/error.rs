//! Error types for mesh queries.

use thiserror::Error;

/// Result type alias for mesh queries.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors that can occur when querying a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MeshError {
    /// The query needs at least one triangle.
    #[error("mesh has no triangles")]
    EmptyMesh,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MeshError::EmptyMesh;
        assert!(format!("{err}").contains("no triangles"));
    }
}
