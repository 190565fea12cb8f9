//! Export sinks for the current tree
//!
//! Both exports consume a finished snapshot: the structured one serializes
//! the node graph, the image one rasterizes the scene as it is currently
//! viewed. An empty tree produces nothing.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bst_canvas::{encode_png, rasterize, Scene, ViewBox};
use bst_tree::Bst;
use log::info;

use crate::config::ExportOptions;

/// Serialize `tree` as pretty-printed JSON.
///
/// Each node is written as `value`, `left`, `right`, `depth`, `height`,
/// with absent children as `null`. Returns `None` for an empty tree.
pub fn tree_json(tree: &Bst) -> Result<Option<String>> {
    let Some(root) = tree.root() else {
        return Ok(None);
    };
    let json = serde_json::to_string_pretty(root).context("Failed to serialize tree")?;
    Ok(Some(json))
}

/// Rasterize `scene` through `view_box` and encode it as PNG.
///
/// Returns `None` when the scene is empty.
pub fn scene_png(
    scene: &Scene,
    view_box: &ViewBox,
    options: &ExportOptions,
) -> Result<Option<Vec<u8>>> {
    if scene.is_empty() {
        return Ok(None);
    }
    let image = rasterize(scene, view_box, options.png_width, options.png_height);
    encode_png(&image).map(Some)
}

/// Write `contents` to `file_name` inside `dir`
pub fn write_export(dir: &Path, file_name: &str, contents: &[u8]) -> Result<PathBuf> {
    let path = dir.join(file_name);
    fs::write(&path, contents)
        .with_context(|| format!("Failed to write export to {}", path.display()))?;
    info!("Exported {} bytes to {}", contents.len(), path.display());
    Ok(path)
}
