// Binary search tree model for the visualizer
// This crate provides the tree, its traversals and the undo/redo history

mod history;
mod node;
mod traversal;

pub use history::History;
pub use node::{
    height, insert, recompute_heights_and_depths, Bst, InsertOutcome, TreeNode, EMPTY_HEIGHT,
};
pub use traversal::{
    visit_order, AnimationOptions, RunId, Speed, Traversal, TraversalEvent, TraversalOrder,
    TraversalRun, TraversalState, TraversalStatus,
};
