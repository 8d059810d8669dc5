//! Geometric summary of a mesh.

use meshful_types::{Aabb, Mesh, Vec3};

/// Summary of a mesh's size and geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshReport {
    /// Number of triangles.
    pub triangle_count: usize,
    /// Axis-aligned bounds, `None` for an empty mesh.
    pub bounds: Option<Aabb>,
    /// Signed volume. Negative when the winding is inside-out.
    pub volume: f64,
    /// Total surface area.
    pub surface_area: f64,
    /// Number of triangles with (near) zero area.
    pub degenerate_count: usize,
}

impl MeshReport {
    /// Summarize `mesh`.
    #[must_use]
    pub fn new(mesh: &Mesh) -> Self {
        Self {
            triangle_count: mesh.len(),
            bounds: mesh.bounds(),
            volume: mesh.volume(),
            surface_area: mesh.surface_area(),
            degenerate_count: mesh
                .iter()
                .filter(|t| t.computed_normal().is_none())
                .count(),
        }
    }

    /// Bounding box extents, `None` for an empty mesh.
    #[must_use]
    pub fn size(&self) -> Option<Vec3> {
        self.bounds.as_ref().map(Aabb::size)
    }

    /// Whether the volume suggests the faces are wound inward.
    #[must_use]
    pub fn is_inside_out(&self) -> bool {
        self.volume < 0.0
    }
}

impl std::fmt::Display for MeshReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Mesh Report:")?;
        writeln!(f, "  Triangles: {}", self.triangle_count)?;

        match &self.bounds {
            Some(bounds) => {
                let size = bounds.size();
                writeln!(
                    f,
                    "  Bounds: ({}, {}, {}) to ({}, {}, {})",
                    bounds.min.x, bounds.min.y, bounds.min.z, bounds.max.x, bounds.max.y, bounds.max.z
                )?;
                writeln!(f, "  Size: {} x {} x {}", size.x, size.y, size.z)?;
            }
            None => writeln!(f, "  Bounds: (empty)")?,
        }

        writeln!(f, "  Volume: {:.6}", self.volume)?;
        writeln!(f, "  Surface area: {:.6}", self.surface_area)?;
        let winding = if self.volume > 0.0 {
            "Outward"
        } else if self.is_inside_out() {
            "Inside-out"
        } else {
            // Zero or NaN volume: empty, flat or open.
            "Undetermined"
        };
        writeln!(f, "  Winding: {winding}")?;

        if self.degenerate_count > 0 {
            writeln!(f, "  Degenerate triangles: {}", self.degenerate_count)?;
        }
        Ok(())
    }
}
