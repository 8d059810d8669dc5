//! 3D triangle-mesh interchange: STL and OBJ+MTL I/O with geometric queries.
//!
//! This umbrella crate re-exports the meshful crates and ships the
//! `meshful` command-line tool.
//!
//! # Quick Start
//!
//! ```no_run
//! use meshful::prelude::*;
//!
//! // Load a mesh (format from extension)
//! let mesh = load_mesh("model.stl").unwrap();
//!
//! println!("{}", MeshReport::new(&mesh));
//!
//! // Convert to OBJ, writing model.mtl alongside
//! save_mesh(&mesh, "model.obj").unwrap();
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - Core data structures: `Mesh`, `Triangle`, `Vec3`, `Aabb`
//! - [`io`] - Binary/ASCII STL and OBJ+MTL codecs, file helpers
//! - [`report`] - Geometric summary used by `meshful info`
//!
//! # Feature Flags
//!
//! - `ascii` (default) - ASCII STL decoding
//! - `serde` - `Serialize`/`Deserialize` on the core types

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub use meshful_io as io;
pub use meshful_types as types;

pub mod report;

pub use report::MeshReport;

/// Commonly used types and functions.
///
/// ```
/// use meshful::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use meshful_types::{Aabb, Color, Mesh, MeshError, Triangle, TriangleAttribute, Vec3};

    // I/O
    pub use meshful_io::{decode, encode, load_mesh, save_mesh, IoError, MeshFormat};

    pub use crate::report::MeshReport;
}
