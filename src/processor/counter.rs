//! Counting scan over the script body.
//!
//! Nothing is executed here; we only make sure no metacommand appears
//! after the header and tally the `v` and `t` operations so the
//! declaration store can be sized exactly.

use crate::error::{ErrorKind, ScriptResult};
use crate::model::{MAX_TRIANGLES, MAX_VERTICES, ScriptCounts};

use super::lexer::{Entity, EntitySource};

/// Count body declarations, starting at `first` (already read from `src`).
///
/// On success `src` is positioned at end of input. On error its position
/// is unspecified and it must be rewound before reuse.
pub fn count_body<S: EntitySource>(src: &mut S, first: Entity) -> ScriptResult<ScriptCounts> {
    let mut counts = ScriptCounts::default();

    let mut ent = first;
    while ent != Entity::Eof {
        if ent.is_meta() {
            return Err(ErrorKind::StrayMetacommand.at(src.line()));
        }
        if let Entity::Operation(op) = &ent {
            match op.as_str() {
                "v" if counts.vertices < MAX_VERTICES => counts.vertices += 1,
                "v" => return Err(ErrorKind::TooManyVertices.at(src.line())),
                "t" if counts.triangles < MAX_TRIANGLES => counts.triangles += 1,
                "t" => return Err(ErrorKind::TooManyTriangles.at(src.line())),
                _ => {}
            }
        }
        ent = src.read()?;
    }

    src.consume_trailing()
        .map_err(|e| ErrorKind::from(e).at(src.line()))?;

    Ok(counts)
}
