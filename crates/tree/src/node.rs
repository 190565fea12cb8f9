//! Core node types for the binary search tree model

use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Height reported for a missing subtree.
///
/// A leaf therefore has height 0 and every other node is one taller than its
/// tallest child.
pub const EMPTY_HEIGHT: i32 = -1;

/// A single node in the tree.
///
/// `depth` and `height` are derived values. They are recomputed for the whole
/// tree after every structural change and never maintained incrementally.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TreeNode {
    /// The key stored at this node
    pub value: i64,

    /// Subtree holding values strictly less than `value`
    pub left: Option<Box<TreeNode>>,

    /// Subtree holding values strictly greater than `value`
    pub right: Option<Box<TreeNode>>,

    /// Distance from the root (root = 0)
    pub depth: u32,

    /// Longest path down to a leaf (leaf = 0)
    pub height: i32,
}

impl TreeNode {
    /// Create a detached leaf node
    pub fn leaf(value: i64) -> Self {
        Self {
            value,
            left: None,
            right: None,
            depth: 0,
            height: 0,
        }
    }

    /// Returns true if the node has no children
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Count the nodes in this subtree
    pub fn count(&self) -> usize {
        1 + self.left.as_ref().map_or(0, |n| n.count()) + self.right.as_ref().map_or(0, |n| n.count())
    }

    /// Find the node holding `value` in this subtree
    pub fn find(&self, value: i64) -> Option<&TreeNode> {
        let mut current = Some(self);
        while let Some(node) = current {
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(node),
            };
        }
        None
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (h:{} d:{})", self.value, self.height, self.depth)
    }
}

/// Outcome of inserting a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new node was attached
    Inserted,
    /// The value was already present; the tree is unchanged
    Duplicate,
}

impl InsertOutcome {
    /// Returns true if the tree changed
    pub fn is_inserted(self) -> bool {
        matches!(self, InsertOutcome::Inserted)
    }
}

/// Height of an optional subtree, [`EMPTY_HEIGHT`] when absent
pub fn height(node: Option<&TreeNode>) -> i32 {
    node.map_or(EMPTY_HEIGHT, |n| n.height)
}

/// Insert `value` below `root` and return the new root.
///
/// Values equal to an existing key are dropped: the walk only descends on
/// strictly less or strictly greater. Heights and depths of the returned tree
/// are recomputed from scratch.
pub fn insert(root: Option<Box<TreeNode>>, value: i64) -> Box<TreeNode> {
    let (mut root, _) = insert_node(root, value);
    recompute_heights_and_depths(&mut root);
    root
}

fn insert_node(node: Option<Box<TreeNode>>, value: i64) -> (Box<TreeNode>, InsertOutcome) {
    match node {
        None => (Box::new(TreeNode::leaf(value)), InsertOutcome::Inserted),
        Some(mut n) => {
            let outcome = match value.cmp(&n.value) {
                Ordering::Less => {
                    let (child, outcome) = insert_node(n.left.take(), value);
                    n.left = Some(child);
                    outcome
                }
                Ordering::Greater => {
                    let (child, outcome) = insert_node(n.right.take(), value);
                    n.right = Some(child);
                    outcome
                }
                Ordering::Equal => InsertOutcome::Duplicate,
            };
            (n, outcome)
        }
    }
}

/// Recompute `depth` and `height` for every node under `root`.
///
/// `root` gets depth 0 and each child sits one level below its parent.
pub fn recompute_heights_and_depths(root: &mut TreeNode) {
    update_node(root, 0);
}

fn update_node(node: &mut TreeNode, depth: u32) -> i32 {
    node.depth = depth;
    let left = node
        .left
        .as_deref_mut()
        .map_or(EMPTY_HEIGHT, |child| update_node(child, depth + 1));
    let right = node
        .right
        .as_deref_mut()
        .map_or(EMPTY_HEIGHT, |child| update_node(child, depth + 1));
    node.height = left.max(right) + 1;
    node.height
}

/// A binary search tree, possibly empty.
///
/// This is the unit captured by undo/redo snapshots. Cloning performs a deep
/// copy, so every snapshot owns its nodes independently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Bst {
    root: Option<Box<TreeNode>>,
}

impl Bst {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree by inserting `values` in order
    pub fn from_values(values: impl IntoIterator<Item = i64>) -> Self {
        let mut tree = Self::new();
        for value in values {
            tree.insert(value);
        }
        tree
    }

    /// Insert a value, ignoring duplicates
    pub fn insert(&mut self, value: i64) -> InsertOutcome {
        let (mut root, outcome) = insert_node(self.root.take(), value);
        if outcome.is_inserted() {
            recompute_heights_and_depths(&mut root);
        }
        self.root = Some(root);
        debug_assert!(self.is_valid_bst(), "insert broke the ordering invariant");
        outcome
    }

    /// The root node, if any
    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_deref()
    }

    /// Returns true if the tree has no nodes
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.root.as_ref().map_or(0, |n| n.count())
    }

    /// Height of the whole tree, -1 when empty
    pub fn height(&self) -> i32 {
        height(self.root())
    }

    /// Check whether `value` is stored in the tree
    pub fn contains(&self, value: i64) -> bool {
        self.root().and_then(|n| n.find(value)).is_some()
    }

    /// Look up the node holding `value`
    pub fn find(&self, value: i64) -> Option<&TreeNode> {
        self.root().and_then(|n| n.find(value))
    }

    /// Check the strict ordering invariant over the whole tree
    pub fn is_valid_bst(&self) -> bool {
        fn within(node: Option<&TreeNode>, low: Option<i64>, high: Option<i64>) -> bool {
            let Some(node) = node else {
                return true;
            };
            if low.is_some_and(|l| node.value <= l) || high.is_some_and(|h| node.value >= h) {
                return false;
            }
            within(node.left.as_deref(), low, Some(node.value))
                && within(node.right.as_deref(), Some(node.value), high)
        }
        within(self.root(), None, None)
    }
}

impl From<Box<TreeNode>> for Bst {
    fn from(mut root: Box<TreeNode>) -> Self {
        recompute_heights_and_depths(&mut root);
        Self { root: Some(root) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_into_empty() {
        let root = insert(None, 7);
        assert_eq!(root.value, 7);
        assert!(root.is_leaf());
        assert_eq!(root.height, 0);
        assert_eq!(root.depth, 0);
    }

    #[test]
    fn test_insert_places_by_comparison() {
        let root = insert(Some(insert(None, 5)), 3);
        let root = insert(Some(root), 8);

        assert_eq!(root.left.as_ref().map(|n| n.value), Some(3));
        assert_eq!(root.right.as_ref().map(|n| n.value), Some(8));
        assert_eq!(root.height, 1);
    }

    #[test]
    fn test_duplicate_is_ignored() {
        let mut tree = Bst::new();
        assert_eq!(tree.insert(5), InsertOutcome::Inserted);
        assert_eq!(tree.insert(5), InsertOutcome::Duplicate);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_heights_and_depths() {
        let tree = Bst::from_values([5, 3, 8, 1, 4]);
        let root = tree.root().unwrap();
        assert_eq!(root.height, 2);
        assert_eq!(root.depth, 0);

        let three = tree.find(3).unwrap();
        assert_eq!((three.height, three.depth), (1, 1));

        let eight = tree.find(8).unwrap();
        assert_eq!((eight.height, eight.depth), (0, 1));

        let one = tree.find(1).unwrap();
        assert_eq!((one.height, one.depth), (0, 2));
    }

    #[test]
    fn test_empty_height() {
        assert_eq!(height(None), EMPTY_HEIGHT);
        assert_eq!(Bst::new().height(), -1);
    }

    #[test]
    fn test_contains_and_find() {
        let tree = Bst::from_values([50, 20, 70]);
        assert!(tree.contains(20));
        assert!(!tree.contains(21));
        assert_eq!(tree.find(70).map(|n| n.depth), Some(1));
    }

    #[test]
    fn test_invalid_tree_detected() {
        let mut root = Box::new(TreeNode::leaf(10));
        root.left = Some(Box::new(TreeNode::leaf(12)));
        assert!(!Bst::from(root).is_valid_bst());
    }

    #[test]
    fn test_display() {
        let tree = Bst::from_values([2, 1]);
        assert_eq!(tree.root().unwrap().to_string(), "2 (h:1 d:0)");
    }
}
