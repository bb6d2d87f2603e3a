// numeric limits shared by both compiler passes
pub const MAX_DIM: i32 = 16384;
pub const MAX_VERTICES: usize = 16384;
pub const MAX_TRIANGLES: usize = 16384;

/// Largest packed RGB value a color literal may carry.
pub const MAX_RGB: u32 = 0xff_ffff;

use serde::Serialize;

/// How the renderer colors each triangle.
///
/// `shade vertex` selects `Interpolated` and `shade triangle` selects
/// `Flat`; the renderer's callbacks depend on exactly this mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadingMode {
    /// One color per triangle.
    Flat,
    /// One color per vertex, mixed across the triangle face.
    Interpolated,
}

/// Values fixed by the metacommand header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScriptConfig {
    /// Output width in pixels, in `[1, MAX_DIM]`.
    pub width: i32,
    /// Output height in pixels, in `[1, MAX_DIM]`.
    pub height: i32,
    pub shading: ShadingMode,
}

/// Declaration totals gathered by the counting scan, each at most
/// `MAX_VERTICES` / `MAX_TRIANGLES`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptCounts {
    pub vertices: usize,
    pub triangles: usize,
}

/// Everything the first pass learns about a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptSummary {
    pub config: ScriptConfig,
    pub counts: ScriptCounts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Vertex {
    pub x: i32,
    pub y: i32,
    /// Depth, never negative. Smaller is closer to the viewer.
    pub z: i32,
    /// Packed RGB, only meaningful under interpolated shading.
    pub color: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Triangle {
    /// Vertex indices, each in `[0, vertex count)`.
    pub i: i32,
    pub j: i32,
    pub k: i32,
    /// Packed RGB, only meaningful under flat shading.
    pub color: u32,
}

/// Fully validated output of the compiler, handed to the renderer.
///
/// The geometry is frozen: a `Scene` can only be built from a completed
/// declaration store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scene {
    pub config: ScriptConfig,
    pub(crate) vertices: Box<[Vertex]>,
    pub(crate) triangles: Box<[Triangle]>,
}

impl Scene {
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }
}
