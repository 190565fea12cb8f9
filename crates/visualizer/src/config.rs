//! Configuration for a visualizer session
//!
//! Every section falls back to its defaults, so a config file only needs the
//! keys it wants to change.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use bst_canvas::{LayoutOptions, ThemeMode, ViewportOptions};
use bst_tree::AnimationOptions;
use log::info;
use serde::{Deserialize, Serialize};

/// Output settings for exports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Width of exported PNG images, in pixels
    pub png_width: u32,

    /// Height of exported PNG images, in pixels
    pub png_height: u32,

    /// File name used when saving the tree as JSON
    pub json_file_name: String,

    /// File name used when saving the diagram as PNG
    pub png_file_name: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            png_width: 800,
            png_height: 600,
            json_file_name: "bst-data.json".to_string(),
            png_file_name: "bst-visualization.png".to_string(),
        }
    }
}

impl ExportOptions {
    /// Set the PNG size
    pub fn png_size(mut self, width: u32, height: u32) -> Self {
        self.png_width = width;
        self.png_height = height;
        self
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    /// Zoom limits, zoom steps and the initial view
    pub viewport: ViewportOptions,

    /// Node spacing
    pub layout: LayoutOptions,

    /// Traversal pacing
    pub animation: AnimationOptions,

    /// Initial theme
    pub theme: ThemeMode,

    /// Export sizes and file names
    pub export: ExportOptions,
}

impl VisualizerConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the viewport options
    pub fn viewport(mut self, viewport: ViewportOptions) -> Self {
        self.viewport = viewport;
        self
    }

    /// Set the layout options
    pub fn layout(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }

    /// Set the animation options
    pub fn animation(mut self, animation: AnimationOptions) -> Self {
        self.animation = animation;
        self
    }

    /// Set the initial theme
    pub fn theme(mut self, theme: ThemeMode) -> Self {
        self.theme = theme;
        self
    }

    /// Set the export options
    pub fn export(mut self, export: ExportOptions) -> Self {
        self.export = export;
        self
    }

    /// Parse a configuration from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse visualizer config")
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_json_str(&json)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bst_tree::Speed;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_object_is_default() {
        let config = VisualizerConfig::from_json_str("{}").unwrap();
        assert_eq!(config, VisualizerConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config = VisualizerConfig::from_json_str(
            r#"{
                "theme": "dark",
                "animation": { "speed": 5.0 },
                "viewport": { "max_zoom": 3.0 },
                "export": { "png_width": 1024 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.theme, ThemeMode::Dark);
        assert_eq!(config.animation.speed, Speed::new(2.0));
        assert_eq!(config.animation.base_delay_ms, 500);
        assert_eq!(config.viewport.max_zoom, 3.0);
        assert_eq!(config.viewport.min_zoom, 0.5);
        assert_eq!(config.export.png_width, 1024);
        assert_eq!(config.export.png_height, 600);
        assert_eq!(config.export.json_file_name, "bst-data.json");
    }

    #[test]
    fn test_malformed_config() {
        let err = VisualizerConfig::from_json_str("{ theme: ").unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = VisualizerConfig::load(Path::new("/nonexistent/bst.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/bst.json"));
    }
}
