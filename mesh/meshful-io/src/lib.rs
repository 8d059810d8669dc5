//! Mesh file I/O for meshful.
//!
//! This crate reads and writes [`Mesh`] triangle soups:
//!
//! - **STL** (Stereolithography) - Binary, and ASCII behind the `ascii` feature
//! - **OBJ** (Wavefront) - ASCII, with an MTL library for face colors
//!
//! The binary STL codec works on any [`std::io::Read`]/[`std::io::Write`],
//! so sockets, pipes and in-memory buffers are handled the same way as
//! files.
//!
//! # Example
//!
//! ```
//! use meshful_io::{decode, encode};
//! use meshful_types::unit_tetrahedron;
//!
//! let mut bytes = Vec::new();
//! encode(&unit_tetrahedron(), &mut bytes).unwrap();
//! assert_eq!(bytes.len(), 84 + 4 * 50);
//!
//! let mesh = decode(bytes.as_slice()).unwrap();
//! assert_eq!(mesh, unit_tetrahedron());
//! ```
//!
//! # Format Detection
//!
//! Files are dispatched by extension:
//!
//! ```no_run
//! use meshful_io::{load_mesh, save_mesh};
//!
//! // Format detected from .stl extension
//! let mesh = load_mesh("model.stl").unwrap();
//!
//! // Save to a different format
//! save_mesh(&mesh, "model.obj").unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod obj;
mod params;
mod stl;

pub use error::{IoError, IoResult};
pub use obj::{
    load_obj, read_mtl, read_obj, read_obj_with_materials, save_obj, write_obj, Materials,
    UNTINTED,
};
pub use params::{StlReadParams, StlWriteParams, DEFAULT_HEADER};
#[cfg(feature = "ascii")]
pub use stl::{decode_ascii, decode_ascii_with};
pub use stl::{
    decode, decode_binary, decode_binary_with, decode_with, encode, encode_ascii, encode_binary,
    encode_binary_with, encode_with, load_stl, load_stl_with, save_stl, save_stl_with, sniff,
    StlKind, ASCII_MARKER, HEADER_SIZE, PREAMBLE_SIZE, RECORD_SIZE,
};

use std::path::Path;

use meshful_types::Mesh;

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshFormat {
    /// STL (Stereolithography) format.
    /// Supports binary and ASCII variants.
    Stl,
    /// OBJ (Wavefront) format.
    /// Vertices, triangular faces and MTL diffuse colors.
    Obj,
}

impl MeshFormat {
    /// Detect format from file extension.
    ///
    /// # Returns
    ///
    /// The detected format, or `None` if the extension is not recognized.
    #[must_use]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "stl" => Some(Self::Stl),
            "obj" => Some(Self::Obj),
            _ => None,
        }
    }

    /// Get the canonical file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Stl => "stl",
            Self::Obj => "obj",
        }
    }
}

fn format_of(path: &Path) -> IoResult<MeshFormat> {
    MeshFormat::from_path(path).ok_or_else(|| IoError::UnknownFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    })
}

/// Load a mesh from a file, detecting format from extension.
///
/// # Errors
///
/// Returns an error if:
/// - The file format cannot be determined from the extension
/// - The file cannot be read
/// - The file content is invalid for the detected format
///
/// # Example
///
/// ```no_run
/// use meshful_io::load_mesh;
///
/// let mesh = load_mesh("model.stl").unwrap();
/// ```
pub fn load_mesh<P: AsRef<Path>>(path: P) -> IoResult<Mesh> {
    let path = path.as_ref();
    match format_of(path)? {
        MeshFormat::Stl => load_stl(path),
        MeshFormat::Obj => load_obj(path),
    }
}

/// Save a mesh to a file, detecting format from extension.
///
/// STL is written as binary.
///
/// # Errors
///
/// Returns an error if:
/// - The file format cannot be determined from the extension
/// - The file cannot be written
pub fn save_mesh<P: AsRef<Path>>(mesh: &Mesh, path: P) -> IoResult<()> {
    let path = path.as_ref();
    match format_of(path)? {
        MeshFormat::Stl => save_stl(mesh, path, true),
        MeshFormat::Obj => save_obj(mesh, path),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use meshful_types::unit_tetrahedron;

    #[test]
    fn format_from_path_stl() {
        assert_eq!(MeshFormat::from_path("model.stl"), Some(MeshFormat::Stl));
        assert_eq!(MeshFormat::from_path("model.STL"), Some(MeshFormat::Stl));
        assert_eq!(
            MeshFormat::from_path("/path/to/model.stl"),
            Some(MeshFormat::Stl)
        );
    }

    #[test]
    fn format_from_path_obj() {
        assert_eq!(MeshFormat::from_path("model.obj"), Some(MeshFormat::Obj));
        assert_eq!(MeshFormat::from_path("model.OBJ"), Some(MeshFormat::Obj));
    }

    #[test]
    fn format_from_path_unknown() {
        assert_eq!(MeshFormat::from_path("model.ply"), None);
        assert_eq!(MeshFormat::from_path("model"), None);
    }

    #[test]
    fn format_extension() {
        assert_eq!(MeshFormat::Stl.extension(), "stl");
        assert_eq!(MeshFormat::Obj.extension(), "obj");
    }

    #[test]
    fn unknown_extension_is_an_error() {
        let err = load_mesh("model.xyz").unwrap_err();
        assert!(matches!(err, IoError::UnknownFormat { ref extension } if extension == "xyz"));

        let err = save_mesh(&unit_tetrahedron(), "no_extension").unwrap_err();
        assert!(matches!(err, IoError::UnknownFormat { ref extension } if extension == "(none)"));
    }

    #[test]
    fn save_and_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["tet.stl", "tet.obj"] {
            let path = dir.path().join(name);
            save_mesh(&unit_tetrahedron(), &path).unwrap();
            let back = load_mesh(&path).unwrap();
            assert_eq!(back.len(), 4);
            assert_eq!(back.bounding_box().unwrap(), meshful_types::Vec3::new(1.0, 1.0, 1.0));
        }
    }
}
