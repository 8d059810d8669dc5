//! Triangle type and its per-face attribute.

use crate::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// RGB color with floating point components in `[0, 1]`.
///
/// This is the diffuse (`Kd`) color carried through OBJ/MTL files.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color {
    /// Red component.
    pub red: f32,
    /// Green component.
    pub green: f32,
    /// Blue component.
    pub blue: f32,
}

impl Color {
    /// Create a new color from RGB components.
    ///
    /// # Example
    ///
    /// ```
    /// use meshful_types::Color;
    ///
    /// let orange = Color::new(1.0, 0.5, 0.0);
    /// assert_eq!(orange.green, 0.5);
    /// ```
    #[inline]
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }
}

/// Optional per-triangle data, tagged by the format that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TriangleAttribute {
    /// Material color, as read from or written to OBJ/MTL.
    Color(Color),
    /// The raw 16-bit attribute field of a binary STL record.
    Raw(u16),
}

/// A triangle with concrete vertex positions and a stored normal.
///
/// The vertex order defines the winding. The normal is stored data and is
/// never re-derived from the vertices; a file may carry a normal that
/// disagrees with its winding and it is kept as-is.
///
/// # Example
///
/// ```
/// use meshful_types::{Triangle, Vec3};
///
/// let tri = Triangle::new(
///     [
///         Vec3::new(0.0, 0.0, 0.0),
///         Vec3::new(1.0, 0.0, 0.0),
///         Vec3::new(0.0, 1.0, 0.0),
///     ],
///     Vec3::new(0.0, 0.0, 1.0),
/// );
///
/// assert!((tri.area() - 0.5).abs() < 1e-10);
/// assert!(tri.attribute.is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle {
    /// The three vertices, in winding order.
    pub vertices: [Vec3; 3],
    /// Facet normal as stored by the source.
    pub normal: Vec3,
    /// Color or raw attribute, depending on the source format.
    pub attribute: Option<TriangleAttribute>,
}

impl Triangle {
    /// Create a triangle without an attribute.
    #[inline]
    #[must_use]
    pub const fn new(vertices: [Vec3; 3], normal: Vec3) -> Self {
        Self {
            vertices,
            normal,
            attribute: None,
        }
    }

    /// Attach an attribute, replacing any existing one.
    #[inline]
    #[must_use]
    pub const fn with_attribute(mut self, attribute: TriangleAttribute) -> Self {
        self.attribute = Some(attribute);
        self
    }

    /// Signed volume of the tetrahedron spanned by this triangle and the origin.
    ///
    /// Equal to `v0 · (v1 × v2) / 6`. The sign depends on the winding and on
    /// which side of the triangle the origin lies, so individual terms of a
    /// closed mesh may be negative even though their sum is not.
    ///
    /// # Example
    ///
    /// ```
    /// use meshful_types::{Triangle, Vec3};
    ///
    /// let tri = Triangle::new(
    ///     [
    ///         Vec3::new(0.0, 0.0, 1.0),
    ///         Vec3::new(1.0, 0.0, 0.0),
    ///         Vec3::new(0.0, 1.0, 0.0),
    ///     ],
    ///     Vec3::zero(),
    /// );
    /// assert!((tri.signed_volume() - 1.0 / 6.0).abs() < 1e-10);
    /// ```
    #[inline]
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        let [v0, v1, v2] = self.vertices;
        v0.dot(v1.cross(v2)) / 6.0
    }

    /// Surface area. Zero for collinear or coincident vertices.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        let [v0, v1, v2] = self.vertices;
        (v0 - v1).to_f64().cross(&(v0 - v2).to_f64()).norm() * 0.5
    }

    /// Unit normal derived from the winding (right-hand rule).
    ///
    /// Returns `None` for degenerate triangles. This does not touch
    /// [`Triangle::normal`].
    #[must_use]
    pub fn computed_normal(&self) -> Option<Vec3> {
        let [v0, v1, v2] = self.vertices;
        let n = (v1 - v0).to_f64().cross(&(v2 - v0).to_f64());
        let len = n.norm();
        if len > f64::EPSILON {
            #[allow(clippy::cast_possible_truncation)]
            // Truncation: normals are stored in f32 like every other component
            let unit = Vec3::new((n.x / len) as f32, (n.y / len) as f32, (n.z / len) as f32);
            Some(unit)
        } else {
            None
        }
    }

    /// The color, if this triangle carries one.
    #[inline]
    #[must_use]
    pub const fn color(&self) -> Option<Color> {
        match self.attribute {
            Some(TriangleAttribute::Color(color)) => Some(color),
            _ => None,
        }
    }

    /// The raw STL attribute field, if this triangle carries one.
    #[inline]
    #[must_use]
    pub const fn raw_attribute(&self) -> Option<u16> {
        match self.attribute {
            Some(TriangleAttribute::Raw(value)) => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tri(v0: [f32; 3], v1: [f32; 3], v2: [f32; 3]) -> Triangle {
        Triangle::new([v0.into(), v1.into(), v2.into()], Vec3::zero())
    }

    #[test]
    fn right_triangle_area() {
        let t = tri([0.0, 0.0, 0.0], [3.0, 0.0, 0.0], [0.0, 4.0, 0.0]);
        assert_relative_eq!(t.area(), 6.0);
    }

    #[test]
    fn degenerate_area_is_zero() {
        let collinear = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
        assert_eq!(collinear.area(), 0.0);

        let coincident = tri([1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, 1.0]);
        assert_eq!(coincident.area(), 0.0);
    }

    #[test]
    fn signed_volume_flips_with_winding() {
        let t = tri([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let flipped = tri([0.0, 0.0, 1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]);
        assert_relative_eq!(t.signed_volume(), 1.0 / 6.0);
        assert_relative_eq!(flipped.signed_volume(), -1.0 / 6.0);
    }

    #[test]
    fn triangle_through_origin_has_zero_volume() {
        let t = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        assert_eq!(t.signed_volume(), 0.0);
    }

    #[test]
    fn stored_normal_is_not_recomputed() {
        let stored = Vec3::new(0.0, 0.0, -1.0);
        let t = Triangle::new(
            [
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            stored,
        );
        assert_eq!(t.normal, stored);
        assert_eq!(t.computed_normal(), Some(Vec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn degenerate_has_no_computed_normal() {
        let t = tri([0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [2.0, 2.0, 2.0]);
        assert!(t.computed_normal().is_none());
    }

    #[test]
    fn attribute_accessors() {
        let base = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        assert_eq!(base.color(), None);
        assert_eq!(base.raw_attribute(), None);

        let red = Color::new(1.0, 0.0, 0.0);
        let colored = base.with_attribute(TriangleAttribute::Color(red));
        assert_eq!(colored.color(), Some(red));
        assert_eq!(colored.raw_attribute(), None);

        let raw = base.with_attribute(TriangleAttribute::Raw(0x7c00));
        assert_eq!(raw.raw_attribute(), Some(0x7c00));
        assert_eq!(raw.color(), None);
    }
}
