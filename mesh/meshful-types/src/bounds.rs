//! Axis-aligned bounding box.

use nalgebra::Point3;

use crate::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box (AABB) in mesh coordinates.
///
/// # Example
///
/// ```
/// use meshful_types::{Aabb, Vec3};
///
/// let points = [
///     Vec3::new(0.0, 0.0, 0.0),
///     Vec3::new(10.0, 5.0, 3.0),
///     Vec3::new(-2.0, 8.0, 1.0),
/// ];
///
/// let aabb = Aabb::from_points(points.iter().copied());
/// assert_eq!(aabb.size(), Vec3::new(12.0, 8.0, 3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Minimum corner (smallest x, y, z values).
    pub min: Point3<f32>,
    /// Maximum corner (largest x, y, z values).
    pub max: Point3<f32>,
}

impl Aabb {
    /// Create an empty (invalid) AABB.
    ///
    /// An empty AABB has min > max, which is useful as a starting point
    /// for expanding to include points.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
            max: Point3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    /// Create an AABB from an iterator of points.
    ///
    /// Returns an empty AABB if the iterator is empty.
    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        let mut aabb = Self::empty();
        for point in points {
            aabb.expand_to_include(point);
        }
        aabb
    }

    /// Check if this AABB is empty (min > max on any axis).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grow the box to contain `point`.
    ///
    /// Comparisons follow `f32::min`/`f32::max`, so a NaN component leaves
    /// the corresponding bound unchanged.
    pub fn expand_to_include(&mut self, point: Vec3) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// Extent along each axis (`max - min`).
    ///
    /// An axis that never saw a comparable value (an empty box, or points
    /// that are all NaN on that axis) has a NaN extent. The other axes keep
    /// their extents.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        Vec3::new(
            extent(self.min.x, self.max.x),
            extent(self.min.y, self.max.y),
            extent(self.min.z, self.max.z),
        )
    }

    /// Center point of the box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        nalgebra::center(&self.min, &self.max).into()
    }
}

fn extent(min: f32, max: f32) -> f32 {
    if max >= min {
        max - min
    } else {
        f32::NAN
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_empty() {
        let aabb = Aabb::empty();
        assert!(aabb.is_empty());
        assert!(aabb.size().to_array().iter().all(|v| v.is_nan()));
    }

    #[test]
    fn nan_axis_keeps_other_extents() {
        let aabb = Aabb::from_points([
            Vec3::new(f32::NAN, 0.0, 0.0),
            Vec3::new(f32::NAN, 5.0, 0.0),
            Vec3::new(f32::NAN, 0.0, 7.0),
        ]);
        let size = aabb.size();
        assert!(size.x.is_nan());
        assert_eq!(size.y, 5.0);
        assert_eq!(size.z, 7.0);
    }

    #[test]
    fn nan_mixed_with_numbers_is_skipped() {
        let aabb = Aabb::from_points([Vec3::new(1.0, 0.0, 0.0), Vec3::new(f32::NAN, 2.0, 0.0)]);
        assert_eq!(aabb.size(), Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn single_point_has_zero_size() {
        let aabb = Aabb::from_points([Vec3::new(1.0, 2.0, 3.0)]);
        assert!(!aabb.is_empty());
        assert_eq!(aabb.size(), Vec3::zero());
        assert_eq!(aabb.center(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn expand_tracks_min_and_max() {
        let mut aabb = Aabb::empty();
        aabb.expand_to_include(Vec3::new(-1.0, 4.0, 0.0));
        aabb.expand_to_include(Vec3::new(3.0, -2.0, 5.0));

        assert_eq!(aabb.min, Point3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, Point3::new(3.0, 4.0, 5.0));
        assert_eq!(aabb.size(), Vec3::new(4.0, 6.0, 5.0));
        assert_eq!(aabb.center(), Vec3::new(1.0, 1.0, 2.5));
    }
}
