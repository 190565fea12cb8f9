//! Layout of a binary search tree into diagram coordinates.
//!
//! The layout is a pure function of the tree: the root sits at the origin,
//! each level is a fixed distance below its parent, and the horizontal
//! offset from the parent shrinks geometrically with depth. Trees deeper
//! than a handful of levels, or strongly skewed ones, can produce overlapping
//! subtrees; no collision pass is applied.

use bst_tree::{Bst, TreeNode};
use derive_more::Display;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Which side of its parent a node hangs from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum Side {
    /// The root has no parent.
    #[default]
    #[display(fmt = "root")]
    Root,

    /// Left child.
    #[display(fmt = "left")]
    Left,

    /// Right child.
    #[display(fmt = "right")]
    Right,
}

/// Spacing parameters for the tree layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Vertical distance between two levels.
    pub vertical_spacing: f64,

    /// Lower bound for the per-level horizontal spacing.
    pub min_horizontal_spacing: f64,

    /// Spread divided by `level + 1` to get the per-level spacing.
    pub horizontal_spread: f64,

    /// Base of the exponential widening for shallow levels.
    pub growth_factor: f64,

    /// Radius of a node circle.
    pub node_radius: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            vertical_spacing: 80.0,
            min_horizontal_spacing: 60.0,
            horizontal_spread: 200.0,
            growth_factor: 1.5,
            node_radius: 25.0,
        }
    }
}

impl LayoutOptions {
    /// Create a new layout configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the spacing between levels.
    pub fn vertical_spacing(mut self, spacing: f64) -> Self {
        self.vertical_spacing = spacing;
        self
    }

    /// Set the minimum horizontal spacing.
    pub fn min_horizontal_spacing(mut self, spacing: f64) -> Self {
        self.min_horizontal_spacing = spacing;
        self
    }

    /// Set the node radius.
    pub fn node_radius(mut self, radius: f64) -> Self {
        self.node_radius = radius;
        self
    }

    /// Horizontal offset of a node at `level` from its parent.
    pub fn horizontal_offset(&self, level: u32, total_levels: u32) -> f64 {
        let spacing = self
            .min_horizontal_spacing
            .max(self.horizontal_spread / f64::from(level + 1));
        let exponent = i32::try_from(total_levels).unwrap_or(i32::MAX)
            - i32::try_from(level).unwrap_or(i32::MAX);
        spacing * self.growth_factor.powi(exponent)
    }
}

/// Position of a node given its level, the tree's level count, its parent's
/// x coordinate and its side.
///
/// The root is always placed at the origin.
pub fn node_position(
    level: u32,
    total_levels: u32,
    parent_x: f64,
    side: Side,
    options: &LayoutOptions,
) -> Point {
    let y = f64::from(level) * options.vertical_spacing;
    if level == 0 {
        return Point::new(0.0, y);
    }

    let offset = options.horizontal_offset(level, total_levels);
    let x = match side {
        Side::Left => parent_x - offset,
        Side::Right => parent_x + offset,
        Side::Root => parent_x,
    };
    Point::new(x, y)
}

/// A node with its computed position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacedNode {
    /// The node's value.
    pub value: i64,

    /// Distance from the root.
    pub depth: u32,

    /// Height of the node's subtree.
    pub height: i32,

    /// Center of the node circle.
    pub position: Point,

    /// Center of the parent's circle, `None` for the root.
    pub parent: Option<Point>,

    /// Side of the parent this node hangs from.
    pub side: Side,
}

/// The positioned nodes of a tree, in preorder.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TreeLayout {
    nodes: Vec<PlacedNode>,
    node_radius: f64,
}

impl TreeLayout {
    /// Lay out `tree`.
    ///
    /// The level count is the tree height plus one and is taken from the
    /// current root each time.
    pub fn compute(tree: &Bst, options: &LayoutOptions) -> Self {
        let mut layout = Self {
            nodes: Vec::with_capacity(tree.len()),
            node_radius: options.node_radius,
        };
        if let Some(root) = tree.root() {
            let total_levels = u32::try_from(tree.height() + 1).unwrap_or(0);
            layout.place(root, 0, total_levels, None, Side::Root, options);
        }
        layout
    }

    fn place(
        &mut self,
        node: &TreeNode,
        level: u32,
        total_levels: u32,
        parent: Option<Point>,
        side: Side,
        options: &LayoutOptions,
    ) {
        let parent_x = parent.map_or(0.0, |p| p.x);
        let position = node_position(level, total_levels, parent_x, side, options);
        self.nodes.push(PlacedNode {
            value: node.value,
            depth: node.depth,
            height: node.height,
            position,
            parent,
            side,
        });

        if let Some(left) = node.left.as_deref() {
            let parent = Some(position);
            self.place(left, level + 1, total_levels, parent, Side::Left, options);
        }
        if let Some(right) = node.right.as_deref() {
            let parent = Some(position);
            self.place(right, level + 1, total_levels, parent, Side::Right, options);
        }
    }

    /// Placed nodes in preorder.
    pub fn nodes(&self) -> &[PlacedNode] {
        &self.nodes
    }

    /// Returns true if there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Radius used for node circles.
    pub fn node_radius(&self) -> f64 {
        self.node_radius
    }

    /// Position of the node holding `value`.
    pub fn position_of(&self, value: i64) -> Option<Point> {
        self.nodes
            .iter()
            .find(|n| n.value == value)
            .map(|n| n.position)
    }

    /// Area covered by the node circles, `None` when empty.
    pub fn bounds(&self) -> Option<Rect> {
        let r = self.node_radius;
        self.nodes
            .iter()
            .map(|n| Rect::from_center_size(n.position, (r * 2.0, r * 2.0)))
            .reduce(|acc, rect| acc.union(rect))
    }

    /// Pairs of nodes whose circles overlap.
    pub fn overlaps(&self) -> Vec<(i64, i64)> {
        let min_distance = self.node_radius * 2.0;
        let mut pairs = Vec::new();
        for (i, a) in self.nodes.iter().enumerate() {
            for b in &self.nodes[i + 1..] {
                if a.position.distance(b.position) < min_distance {
                    pairs.push((a.value, b.value));
                }
            }
        }
        pairs
    }
}
