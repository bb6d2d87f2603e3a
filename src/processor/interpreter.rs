//! Second pass: a small stack machine that replays the script body and
//! materializes vertices and triangles into the declaration store.
//
//  Body operations (operands deepest first):
//
//      interpolated:  x y z {rgb} v      i j k t
//      flat:          x y z v            i j k {rgb} t

use log::debug;

use crate::error::{ErrorKind, ScriptResult};
use crate::model::{ScriptConfig, ShadingMode, Triangle, Vertex};

use super::lexer::{Entity, EntitySource, StringKind};
use super::literal::{parse_int, parse_rgb};
use super::stack::Stack;
use super::store::DeclarationStore;

use super::stack::StackValue::{Integer, RgbColor};

pub struct Interpreter<'s> {
    config: ScriptConfig,
    /// First-pass vertex total; triangle indices are checked against it so
    /// that forward references are legal.
    vertex_count: usize,
    stack: Stack,
    store: &'s mut DeclarationStore,
}

impl<'s> Interpreter<'s> {
    pub fn new(config: ScriptConfig, store: &'s mut DeclarationStore) -> Self {
        Self {
            config,
            vertex_count: store.vertex_capacity(),
            stack: Stack::new(),
            store,
        }
    }

    /// Run every entity from the current position up to `Eof`.
    ///
    /// `src` must have been rewound; metacommands are skipped since the
    /// first pass already validated them.
    pub fn run<S: EntitySource>(&mut self, src: &mut S) -> ScriptResult<()> {
        loop {
            let ent = src.read()?;
            if ent == Entity::Eof {
                return Ok(());
            }
            if ent.is_meta() {
                continue;
            }
            self.execute(ent).map_err(|kind| kind.at(src.line()))?;
        }
    }

    /// Check that the run consumed everything it declared.
    pub fn finish(self) -> ScriptResult<()> {
        if !self.store.is_complete() {
            return Err(ErrorKind::SyncMismatch.at(0));
        }
        if !self.stack.is_empty() {
            return Err(ErrorKind::StackDataRemaining.at(0));
        }
        debug!(
            "pass 2 complete: {} vertices, {} triangles",
            self.store.vertex_capacity(),
            self.store.triangle_capacity()
        );
        Ok(())
    }

    fn execute(&mut self, ent: Entity) -> Result<(), ErrorKind> {
        match ent {
            Entity::Str {
                kind: StringKind::Curly,
                prefix: None,
                payload,
            } => {
                let rgb = parse_rgb(&payload).map_err(|_| ErrorKind::InvalidRgbLiteral)?;
                self.stack.push(RgbColor(rgb))
            }
            Entity::Numeric(token) => {
                let value = parse_int(&token).map_err(|_| ErrorKind::InvalidIntegerLiteral)?;
                self.stack.push(Integer(value))
            }
            Entity::Operation(op) => match op.as_str() {
                "v" => self.op_vertex(),
                "t" => self.op_triangle(),
                _ => Err(ErrorKind::UnsupportedOperation),
            },
            _ => Err(ErrorKind::UnsupportedEntityType),
        }
    }

    fn op_vertex(&mut self) -> Result<(), ErrorKind> {
        let (vertex, arity) = match self.config.shading {
            ShadingMode::Interpolated => match self.stack.peek::<4>()? {
                [Integer(x), Integer(y), Integer(z), RgbColor(color)] => {
                    (Vertex { x, y, z, color }, 4)
                }
                _ => return Err(ErrorKind::OperationSyntaxError),
            },
            ShadingMode::Flat => match self.stack.peek::<3>()? {
                [Integer(x), Integer(y), Integer(z)] => (Vertex { x, y, z, color: 0 }, 3),
                _ => return Err(ErrorKind::OperationSyntaxError),
            },
        };

        if vertex.z < 0 {
            return Err(ErrorKind::NegativeZCoordinate);
        }

        self.stack.pop(arity);
        self.store
            .declare_vertex(vertex)
            .map_err(|_| ErrorKind::SyncMismatch)?;
        Ok(())
    }

    fn op_triangle(&mut self) -> Result<(), ErrorKind> {
        let (triangle, arity) = match self.config.shading {
            ShadingMode::Flat => match self.stack.peek::<4>()? {
                [Integer(i), Integer(j), Integer(k), RgbColor(color)] => {
                    (Triangle { i, j, k, color }, 4)
                }
                _ => return Err(ErrorKind::OperationSyntaxError),
            },
            ShadingMode::Interpolated => match self.stack.peek::<3>()? {
                [Integer(i), Integer(j), Integer(k)] => (Triangle { i, j, k, color: 0 }, 3),
                _ => return Err(ErrorKind::OperationSyntaxError),
            },
        };

        let count = self.vertex_count;
        let in_range = |idx: i32| usize::try_from(idx).is_ok_and(|idx| idx < count);
        if ![triangle.i, triangle.j, triangle.k].into_iter().all(in_range) {
            return Err(ErrorKind::InvalidVertexIndex);
        }

        self.stack.pop(arity);
        self.store
            .declare_triangle(triangle)
            .map_err(|_| ErrorKind::SyncMismatch)?;
        Ok(())
    }
}
