pub mod cli;
pub mod error;
pub mod model;
pub mod processor;
pub mod scene;
pub mod writer;

pub use error::{ErrorKind, ScriptError, error_message};
pub use model::Scene;
pub use processor::{compile, compile_str};

use std::borrow::Cow;

use anyhow::Context;
use log::{debug, warn};

pub fn run(args: &cli::Cli) -> anyhow::Result<()> {
    // 1. ── Read ───────────────────────────────────────────────────────
    let bytes = std::fs::read(&args.script).context("Failed to open script file")?;
    debug!("read {} bytes from {}", bytes.len(), args.script.display());

    // Invalid UTF-8 becomes U+FFFD, which is only harmless inside comments.
    let script = String::from_utf8_lossy(&bytes);
    if let Cow::Owned(_) = script {
        warn!("{} is not valid UTF-8", args.script.display());
    }

    // 2. ── Compile ────────────────────────────────────────────────────
    let scene = compile_str(&script)?;

    // 3. ── Write output ───────────────────────────────────────────────
    writer::json::emit(&scene, &args.output)
        .with_context(|| format!("Writing {}", args.output.display()))?;

    Ok(())
}
