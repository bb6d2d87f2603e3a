//! Accessors the scanline renderer uses to pull geometry out of a
//! compiled scene.
//!
//! Triangle indices passed in must be below `triangle_count()` and corners
//! in `0..3`; both were validated during compilation, so out-of-range
//! arguments are caller bugs and panic.

use crate::model::{Scene, ShadingMode, Vertex};

/// One triangle corner in image space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedVertex {
    pub x: i32,
    pub y: i32,
    /// Depth, finite and non-negative.
    pub z: f32,
}

impl Scene {
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    fn corner(&self, tri: usize, corner: usize) -> &Vertex {
        let t = &self.triangles[tri];
        let idx = [t.i, t.j, t.k][corner];
        // indices were range-checked against the vertex count at compile time
        &self.vertices[idx as usize]
    }

    /// Position of corner `corner` of triangle `tri`.
    pub fn triangle_vertex(&self, tri: usize, corner: usize) -> ProjectedVertex {
        let v = self.corner(tri, corner);
        ProjectedVertex {
            x: v.x,
            y: v.y,
            z: v.z as f32,
        }
    }

    /// Every triangle uses the scene-wide shading mode.
    pub fn triangle_mode(&self, tri: usize) -> ShadingMode {
        debug_assert!(tri < self.triangles.len());
        self.config.shading
    }

    /// Color written for every pixel of a flat-shaded triangle.
    pub fn flat_color(&self, tri: usize) -> u32 {
        self.triangles[tri].color
    }

    /// Color loaded into a mixing register for an interpolated corner.
    pub fn corner_color(&self, tri: usize, corner: usize) -> u32 {
        self.corner(tri, corner).color
    }
}
