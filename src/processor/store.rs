//! Exactly-sized geometry buffers filled during the second pass.

use thiserror::Error;

use crate::model::{Scene, ScriptConfig, ScriptCounts, Triangle, Vertex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("declaration store is full")]
pub struct StoreFull;

/// Append-only vertex and triangle storage.
///
/// Capacities are fixed at construction from the first-pass counts and
/// the only way in is a bounded append, so nothing can be written past
/// the declared totals.
#[derive(Debug)]
pub struct DeclarationStore {
    vertices: Vec<Vertex>,
    triangles: Vec<Triangle>,
    vertex_capacity: usize,
    triangle_capacity: usize,
}

impl DeclarationStore {
    pub fn new(counts: ScriptCounts) -> Self {
        Self {
            vertices: Vec::with_capacity(counts.vertices),
            triangles: Vec::with_capacity(counts.triangles),
            vertex_capacity: counts.vertices,
            triangle_capacity: counts.triangles,
        }
    }

    /// Total number of vertices the script declares.
    pub fn vertex_capacity(&self) -> usize {
        self.vertex_capacity
    }

    pub fn triangle_capacity(&self) -> usize {
        self.triangle_capacity
    }

    pub fn declare_vertex(&mut self, vertex: Vertex) -> Result<usize, StoreFull> {
        if self.vertices.len() >= self.vertex_capacity {
            return Err(StoreFull);
        }
        self.vertices.push(vertex);
        Ok(self.vertices.len() - 1)
    }

    pub fn declare_triangle(&mut self, triangle: Triangle) -> Result<usize, StoreFull> {
        if self.triangles.len() >= self.triangle_capacity {
            return Err(StoreFull);
        }
        self.triangles.push(triangle);
        Ok(self.triangles.len() - 1)
    }

    /// True once every declared vertex and triangle has been written.
    pub fn is_complete(&self) -> bool {
        self.vertices.len() == self.vertex_capacity
            && self.triangles.len() == self.triangle_capacity
    }

    /// Freeze a complete store into a scene. Returns the store unchanged
    /// if declarations are still missing.
    pub fn into_scene(self, config: ScriptConfig) -> Result<Scene, Self> {
        if !self.is_complete() {
            return Err(self);
        }
        Ok(Scene {
            config,
            vertices: self.vertices.into_boxed_slice(),
            triangles: self.triangles.into_boxed_slice(),
        })
    }
}
