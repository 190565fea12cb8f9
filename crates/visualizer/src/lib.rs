// Visualizer session for binary search trees
// This crate ties the tree model and the canvas together behind one state
// struct, with input parsing, random trees, configuration and exports

mod app;
mod config;
mod export;
mod input;
mod random;

pub use app::App;
pub use config::{ExportOptions, VisualizerConfig};
pub use export::{scene_png, tree_json, write_export};
pub use input::parse_value;
pub use random::{random_tree, random_values, NODE_COUNT, VALUE_RANGE};

pub use bst_canvas;
pub use bst_tree;
