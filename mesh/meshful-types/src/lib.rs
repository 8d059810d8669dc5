//! Core mesh types for meshful.
//!
//! This crate provides the format-agnostic in-memory representation that
//! every reader populates and every writer consumes:
//!
//! - [`Vec3`] - A single-precision 3D vector (vertex or normal)
//! - [`Triangle`] - Three vertices, a stored normal, and an optional attribute
//! - [`TriangleAttribute`] - Either a [`Color`] (OBJ/MTL) or a raw STL `u16`
//! - [`Mesh`] - An ordered triangle soup with bounding box, volume and area
//! - [`Aabb`] - Axis-aligned bounding box
//!
//! # Units
//!
//! This library is **unit-agnostic**. Coordinates are stored as `f32`, the
//! precision of the STL wire format; derived quantities (dot products,
//! volumes, areas) are accumulated in `f64`.
//!
//! # Coordinate System
//!
//! Uses a **right-handed coordinate system**. Face winding is
//! **counter-clockwise (CCW) when viewed from outside**, so a closed mesh
//! wound that way has a positive [`Mesh::volume`].
//!
//! # Example
//!
//! ```
//! use meshful_types::{Mesh, Triangle, Vec3};
//!
//! let tri = Triangle::new(
//!     [
//!         Vec3::new(0.0, 0.0, 0.0),
//!         Vec3::new(1.0, 0.0, 0.0),
//!         Vec3::new(0.0, 1.0, 0.0),
//!     ],
//!     Vec3::new(0.0, 0.0, 1.0),
//! );
//! let mesh = Mesh::new(vec![tri]);
//!
//! assert_eq!(mesh.len(), 1);
//! assert_eq!(mesh.bounding_box().unwrap(), Vec3::new(1.0, 1.0, 0.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod error;
mod mesh;
mod triangle;
mod vec3;

pub use bounds::Aabb;
pub use error::{MeshError, MeshResult};
pub use mesh::{unit_tetrahedron, Mesh};
pub use triangle::{Color, Triangle, TriangleAttribute};
pub use vec3::Vec3;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
