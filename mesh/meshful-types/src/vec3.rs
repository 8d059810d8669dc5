//! Single-precision 3-component vector.

use std::ops::{Neg, Sub};

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A vector of three `f32` components.
///
/// Used for both triangle vertices and normals. Values are copied, never
/// shared; every operation returns a new `Vec3`. NaN and infinite
/// components are carried through unchanged.
///
/// # Example
///
/// ```
/// use meshful_types::Vec3;
///
/// let x = Vec3::new(1.0, 0.0, 0.0);
/// let y = Vec3::new(0.0, 1.0, 0.0);
///
/// assert_eq!(x.cross(y), Vec3::new(0.0, 0.0, 1.0));
/// assert_eq!(x.dot(y), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec3 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
}

impl Vec3 {
    /// Create a vector from its components.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// The zero vector.
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Right-handed cross product `self × other`.
    ///
    /// Anti-commutative: `a.cross(b) == -b.cross(a)`, and `a.cross(a)` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use meshful_types::Vec3;
    ///
    /// let a = Vec3::new(1.0, 2.0, 3.0);
    /// let b = Vec3::new(-4.0, 0.5, 2.0);
    /// assert_eq!(a.cross(b), -b.cross(a));
    /// ```
    #[inline]
    #[must_use]
    pub fn cross(self, other: Self) -> Self {
        Vector3::from(self).cross(&Vector3::from(other)).into()
    }

    /// Dot product, accumulated in `f64`.
    ///
    /// Components are widened before multiplying.
    #[inline]
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.to_f64().dot(&other.to_f64())
    }

    /// Component-wise difference `self - other`.
    #[inline]
    #[must_use]
    pub fn diff(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    /// Euclidean length, computed in `f64`.
    #[inline]
    #[must_use]
    pub fn length(self) -> f64 {
        self.to_f64().norm()
    }

    /// Widen to an `f64` nalgebra vector.
    #[inline]
    #[must_use]
    pub fn to_f64(self) -> Vector3<f64> {
        Vector3::new(f64::from(self.x), f64::from(self.y), f64::from(self.z))
    }

    /// Components as an array `[x, y, z]`.
    #[inline]
    #[must_use]
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl Sub for Vec3 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.diff(rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl From<[f32; 3]> for Vec3 {
    #[inline]
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vec3> for [f32; 3] {
    #[inline]
    fn from(v: Vec3) -> Self {
        v.to_array()
    }
}

impl From<Vector3<f32>> for Vec3 {
    #[inline]
    fn from(v: Vector3<f32>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vec3> for Vector3<f32> {
    #[inline]
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Point3<f32>> for Vec3 {
    #[inline]
    fn from(p: Point3<f32>) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

impl From<Vec3> for Point3<f32> {
    #[inline]
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn cross_of_basis_vectors() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        let z = Vec3::new(0.0, 0.0, 1.0);

        assert_eq!(x.cross(y), z);
        assert_eq!(y.cross(z), x);
        assert_eq!(z.cross(x), y);
        assert_eq!(y.cross(x), -z);
    }

    #[test]
    fn cross_with_self_is_zero() {
        let a = Vec3::new(3.0, -7.5, 0.25);
        assert_eq!(a.cross(a), Vec3::zero());
    }

    #[test]
    fn dot_is_widened() {
        let a = Vec3::new(1.0e8, 1.0, -1.0e8);
        let b = Vec3::new(1.0, 1.0, 1.0);
        assert_eq!(a.dot(b), 1.0);
    }

    #[test]
    fn diff_matches_sub_operator() {
        let a = Vec3::new(5.0, 3.0, 1.0);
        let b = Vec3::new(1.0, 1.0, 1.0);
        assert_eq!(a.diff(b), Vec3::new(4.0, 2.0, 0.0));
        assert_eq!(a - b, a.diff(b));
    }

    #[test]
    fn non_finite_passes_through() {
        let a = Vec3::new(f32::NAN, f32::INFINITY, 1.0);
        let d = a.diff(Vec3::zero());
        assert!(d.x.is_nan());
        assert!(d.y.is_infinite());
    }

    #[test]
    fn length_of_3_4_0() {
        assert_relative_eq!(Vec3::new(3.0, 4.0, 0.0).length(), 5.0);
    }

    #[test]
    fn nalgebra_conversions() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let n: Vector3<f32> = v.into();
        let p: Point3<f32> = v.into();
        assert_eq!(Vec3::from(n), v);
        assert_eq!(Vec3::from(p), v);
        assert_eq!(<[f32; 3]>::from(v), [1.0, 2.0, 3.0]);
    }

    fn small_vec() -> impl Strategy<Value = Vec3> {
        (-1.0e3f32..1.0e3, -1.0e3f32..1.0e3, -1.0e3f32..1.0e3)
            .prop_map(|(x, y, z)| Vec3::new(x, y, z))
    }

    proptest! {
        #[test]
        fn cross_is_perpendicular(a in small_vec(), b in small_vec()) {
            let c = a.cross(b);
            // Tolerance scales with the magnitudes involved in f32 rounding.
            let scale = a.length() * a.length() * b.length();
            prop_assert!(a.dot(c).abs() <= 1e-5 * scale.max(1.0));
        }

        #[test]
        fn cross_is_anti_commutative(a in small_vec(), b in small_vec()) {
            prop_assert_eq!(a.cross(b), -b.cross(a));
        }
    }
}
