//! Canvas for binary search tree diagrams
//!
//! Turns a tree into something drawable and controls how it is viewed.
//!
//! # Core Concepts
//!
//! - **Layout**: Places every node at a deterministic diagram coordinate
//! - **Viewport**: The pannable, zoomable window into diagram space
//! - **Theme**: Light and dark palettes, with traversal highlight colors
//! - **Scene**: Painter-ordered shapes, serializable to SVG or rasterized
//!
//! # Example
//!
//! ```
//! use bst_canvas::prelude::*;
//! use bst_tree::Bst;
//!
//! let tree = Bst::from_values([5, 3, 8]);
//! let layout = TreeLayout::compute(&tree, &LayoutOptions::default());
//! let scene = Scene::build(&layout, &ThemeMode::Light.palette(), |_| NodeHighlight::Unvisited);
//!
//! let viewport = Viewport::default();
//! let image = rasterize(&scene, &viewport.view_box(), 160, 120);
//! assert_eq!(image.width(), 160);
//! ```

pub mod layout;
mod options;
mod raster;
mod scene;
mod theme;
mod viewport;

pub use layout::{node_position, LayoutOptions, PlacedNode, Side, TreeLayout};
pub use options::ViewportOptions;
pub use raster::{encode_png, rasterize, save_png};
pub use scene::{highlight, Scene, Shape};
pub use theme::{rgb, to_hex, Color, NodeHighlight, Palette, ThemeMode};
pub use viewport::{ViewBox, Viewport};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::layout::{LayoutOptions, TreeLayout};
    pub use crate::options::ViewportOptions;
    pub use crate::raster::rasterize;
    pub use crate::scene::Scene;
    pub use crate::theme::{NodeHighlight, Palette, ThemeMode};
    pub use crate::viewport::{ViewBox, Viewport};
}
