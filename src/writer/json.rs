//! Write a compiled scene as JSON.

use anyhow::{Context, Result};
use log::info;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::model::Scene;

pub fn emit(scene: &Scene, out_path: &Path) -> Result<()> {
    if let Some(dir) = out_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("Creating {}", dir.display()))?;
    }

    let file =
        File::create(out_path).with_context(|| format!("Creating {}", out_path.display()))?;
    let mut w = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut w, scene).context("Serializing scene")?;
    writeln!(w)?;
    w.flush()?;

    info!(
        "wrote {} vertices, {} triangles to {}",
        scene.vertices().len(),
        scene.triangles().len(),
        out_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::compile_str;

    #[test]
    fn test_emit_scene() {
        let scene = compile_str(
            "%dhrender; %dim 2 3; %shade triangle;\n0 0 1 v 0 0 0 {00ff00} t\n|;",
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("scene.json");
        emit(&scene, &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["config"]["width"], 2);
        assert_eq!(value["config"]["height"], 3);
        assert_eq!(value["config"]["shading"], "flat");
        assert_eq!(value["vertices"][0]["z"], 1);
        assert_eq!(value["triangles"][0]["color"], 0x00ff00);
    }
}
