//! Triangle-soup mesh.

use std::slice;

use crate::{Aabb, MeshError, MeshResult, Triangle, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An ordered collection of independent triangles.
///
/// Unlike an indexed mesh, triangles do not share vertices; each owns its
/// three positions. Order is preserved exactly as read so that re-encoding
/// a decoded mesh reproduces the same records.
///
/// A `Mesh` is an immutable snapshot: it is built whole (by a reader or
/// from application code) and replaced rather than edited.
///
/// # Example
///
/// ```
/// use meshful_types::{unit_tetrahedron, Vec3};
///
/// let mesh = unit_tetrahedron();
/// assert_eq!(mesh.len(), 4);
/// assert_eq!(mesh.bounding_box().unwrap(), Vec3::new(1.0, 1.0, 1.0));
/// assert!(mesh.volume() > 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Mesh {
    triangles: Vec<Triangle>,
}

impl Mesh {
    /// Create a mesh that owns `triangles`.
    #[inline]
    #[must_use]
    pub const fn new(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    /// The triangles, in file order.
    #[inline]
    #[must_use]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Number of triangles.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Check if the mesh has no triangles.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Iterate over the triangles.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Triangle> {
        self.triangles.iter()
    }

    /// Take the triangles back out of the mesh.
    #[inline]
    #[must_use]
    pub fn into_triangles(self) -> Vec<Triangle> {
        self.triangles
    }

    /// Iterate over every vertex of every triangle.
    pub fn vertices(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.triangles.iter().flat_map(|t| t.vertices)
    }

    /// Axis-aligned bounds of all vertices, or `None` for an empty mesh.
    #[must_use]
    pub fn bounds(&self) -> Option<Aabb> {
        if self.is_empty() {
            return None;
        }
        Some(Aabb::from_points(self.vertices()))
    }

    /// Size of the axis-aligned bounding box (`max - min` per axis).
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::EmptyMesh`] if the mesh has no triangles.
    pub fn bounding_box(&self) -> MeshResult<Vec3> {
        self.bounds()
            .map(|aabb| aabb.size())
            .ok_or(MeshError::EmptyMesh)
    }

    /// Enclosed volume as the sum of per-triangle signed volumes.
    ///
    /// Uses the divergence theorem: each face forms a tetrahedron with the
    /// origin. For a closed mesh with outward (CCW from outside) winding
    /// this is the positive enclosed volume. For open or inconsistently
    /// wound meshes the sum is well defined but has no physical meaning.
    /// An empty mesh has volume `0.0`.
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.triangles.iter().map(Triangle::signed_volume).sum()
    }

    /// Total surface area.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.triangles.iter().map(Triangle::area).sum()
    }
}

impl From<Vec<Triangle>> for Mesh {
    fn from(triangles: Vec<Triangle>) -> Self {
        Self::new(triangles)
    }
}

impl FromIterator<Triangle> for Mesh {
    fn from_iter<I: IntoIterator<Item = Triangle>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Mesh {
    type Item = &'a Triangle;
    type IntoIter = slice::Iter<'a, Triangle>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The right-angled unit tetrahedron with outward winding.
///
/// Vertices at the origin and the three unit axis points; volume `1/6`.
///
/// # Example
///
/// ```
/// use meshful_types::unit_tetrahedron;
///
/// let tet = unit_tetrahedron();
/// assert!((tet.volume() - 1.0 / 6.0).abs() < 1e-10);
/// ```
#[must_use]
pub fn unit_tetrahedron() -> Mesh {
    let o = Vec3::new(0.0, 0.0, 0.0);
    let x = Vec3::new(1.0, 0.0, 0.0);
    let y = Vec3::new(0.0, 1.0, 0.0);
    let z = Vec3::new(0.0, 0.0, 1.0);
    let diagonal = 1.0 / 3.0_f32.sqrt();

    Mesh::new(vec![
        // z = 0 face, normal -Z
        Triangle::new([o, y, x], Vec3::new(0.0, 0.0, -1.0)),
        // y = 0 face, normal -Y
        Triangle::new([o, x, z], Vec3::new(0.0, -1.0, 0.0)),
        // slanted face
        Triangle::new([z, x, y], Vec3::new(diagonal, diagonal, diagonal)),
        // x = 0 face, normal -X
        Triangle::new([o, z, y], Vec3::new(-1.0, 0.0, 0.0)),
    ])
}

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_mesh() {
        let mesh = Mesh::default();
        assert!(mesh.is_empty());
        assert_eq!(mesh.bounds(), None);
        assert_eq!(mesh.bounding_box(), Err(MeshError::EmptyMesh));
        assert_eq!(mesh.volume(), 0.0);
        assert_eq!(mesh.surface_area(), 0.0);
    }

    #[test]
    fn tetrahedron_bounding_box() {
        let tet = unit_tetrahedron();
        assert_eq!(tet.bounding_box().unwrap(), Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn bounding_box_keeps_finite_axes_when_one_is_nan() {
        let mesh = Mesh::new(vec![Triangle::new(
            [
                Vec3::new(f32::NAN, 0.0, 0.0),
                Vec3::new(f32::NAN, 5.0, 0.0),
                Vec3::new(f32::NAN, 0.0, 7.0),
            ],
            Vec3::zero(),
        )]);
        let bb = mesh.bounding_box().unwrap();
        assert!(bb.x.is_nan());
        assert_eq!(bb.y, 5.0);
        assert_eq!(bb.z, 7.0);
    }

    #[test]
    fn tetrahedron_volume() {
        let tet = unit_tetrahedron();
        let vol = tet.volume();
        assert!(vol > 0.0);
        assert_relative_eq!(vol, 1.0 / 6.0, epsilon = 1e-10);
    }

    #[test]
    fn tetrahedron_faces_have_area() {
        let tet = unit_tetrahedron();
        for tri in &tet {
            assert!(tri.area() > 0.0);
        }
        // Three right triangles of area 1/2 and one equilateral of side sqrt(2).
        let expected = 1.5 + 3.0_f64.sqrt() / 2.0;
        assert_relative_eq!(tet.surface_area(), expected, epsilon = 1e-6);
    }

    #[test]
    fn reversed_winding_negates_volume() {
        let flipped: Mesh = unit_tetrahedron()
            .iter()
            .map(|t| {
                let [a, b, c] = t.vertices;
                Triangle::new([a, c, b], -t.normal)
            })
            .collect();
        assert_relative_eq!(flipped.volume(), -1.0 / 6.0, epsilon = 1e-10);
    }

    #[test]
    fn translated_tetrahedron_keeps_volume() {
        let shift = |v: Vec3| Vec3::new(v.x + 10.0, v.y - 4.0, v.z + 2.5);
        let moved: Mesh = unit_tetrahedron()
            .iter()
            .map(|t| Triangle::new(t.vertices.map(shift), t.normal))
            .collect();

        // Per-triangle terms are no longer zero, but the sum is unchanged.
        assert!(moved.iter().any(|t| t.signed_volume() < 0.0));
        assert_relative_eq!(moved.volume(), 1.0 / 6.0, epsilon = 1e-5);
        assert_eq!(moved.bounding_box().unwrap(), Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn order_is_preserved() {
        let tet = unit_tetrahedron();
        let triangles = tet.clone().into_triangles();
        let rebuilt = Mesh::from(triangles);
        assert_eq!(rebuilt, tet);
        assert_eq!(rebuilt.triangles()[2].vertices[0], Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn vertices_iterates_all_corners() {
        assert_eq!(unit_tetrahedron().vertices().count(), 12);
    }
}
