//! The two-pass scene compiler.
//!
//! Pass 1 reads the header and counts declarations; pass 2 rewinds the
//! same source and replays the body through the stack machine into an
//! exactly-sized declaration store.
pub mod counter;
pub mod header;
pub mod interpreter;
pub mod lexer;
pub mod literal;
pub mod stack;
pub mod store;

use log::{debug, info};

use crate::error::{ErrorKind, ScriptResult};
use crate::model::{Scene, ScriptSummary};

use interpreter::Interpreter;
use lexer::{EntitySource, Lexer};
use store::DeclarationStore;

/// Header + counting scan. Rewinds `src` first.
pub fn first_pass<S: EntitySource>(src: &mut S) -> ScriptResult<ScriptSummary> {
    src.rewind();
    let (config, first) = header::parse_header(src)?;
    let counts = counter::count_body(src, first)?;

    info!(
        "{}x{} {:?} shading, {} vertices, {} triangles",
        config.width, config.height, config.shading, counts.vertices, counts.triangles
    );
    Ok(ScriptSummary { config, counts })
}

/// Replay the body into a fresh store sized from `summary`.
///
/// Counts that disagree with the script fail with `SyncMismatch`.
pub fn second_pass<S: EntitySource>(src: &mut S, summary: &ScriptSummary) -> ScriptResult<Scene> {
    let mut store = DeclarationStore::new(summary.counts);

    src.rewind();
    let mut interp = Interpreter::new(summary.config, &mut store);
    interp.run(src)?;
    interp.finish()?;

    store
        .into_scene(summary.config)
        .map_err(|_| ErrorKind::SyncMismatch.at(0))
}

/// Compile a script from any rewindable entity source.
pub fn compile<S: EntitySource>(src: &mut S) -> ScriptResult<Scene> {
    debug!("pass 1");
    let summary = first_pass(src)?;
    debug!("pass 2");
    second_pass(src, &summary)
}

pub fn compile_str(script: &str) -> ScriptResult<Scene> {
    compile(&mut Lexer::new(script))
}
