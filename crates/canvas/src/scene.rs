//! Drawable description of a laid-out tree.
//!
//! A [`Scene`] is a flat, painter-ordered list of shapes built from a
//! [`TreeLayout`], a [`Palette`] and the traversal highlight of each node.
//! Renderers (SVG text, raster image) consume scenes and never look at the
//! tree itself.

use bst_tree::TraversalState;
use kurbo::{Point, Size};
use log::trace;

use crate::layout::TreeLayout;
use crate::theme::{to_hex, Color, NodeHighlight, Palette};
use crate::viewport::ViewBox;

/// Stroke width of edges and node outlines.
pub const STROKE_WIDTH: f64 = 2.0;

/// Font size of the value inside a node.
pub const VALUE_FONT_SIZE: f64 = 14.0;

/// Font size of the height/depth label.
pub const LABEL_FONT_SIZE: f64 = 12.0;

/// Gap between a node circle and its label.
const LABEL_GAP: f64 = 5.0;

/// Highlight of `value` given a traversal state.
pub fn highlight(state: &TraversalState, value: i64) -> NodeHighlight {
    if state.is_current(value) {
        NodeHighlight::Current
    } else if state.is_visited(value) {
        NodeHighlight::Visited
    } else {
        NodeHighlight::Unvisited
    }
}

/// A single drawable element.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// A straight connector between parent and child.
    Edge {
        /// Parent center.
        from: Point,
        /// Child center.
        to: Point,
        /// Stroke color.
        color: Color,
    },

    /// A node circle.
    Node {
        /// Value held by the node.
        value: i64,
        /// Circle center.
        center: Point,
        /// Circle radius.
        radius: f64,
        /// Fill color, chosen by highlight.
        fill: Color,
        /// Outline color.
        stroke: Color,
        /// Traversal highlight.
        highlight: NodeHighlight,
    },

    /// Centered text.
    Text {
        /// Anchor point (horizontal center).
        anchor: Point,
        /// The string to draw.
        text: String,
        /// Text color.
        color: Color,
        /// Font size in diagram units.
        font_size: f64,
        /// Bold value text, vertically centered on the anchor.
        emphasis: bool,
    },
}

/// Painter-ordered shapes for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    shapes: Vec<Shape>,
}

impl Scene {
    /// Build the scene for `layout`.
    ///
    /// Each node contributes, in order: the edge to its parent, its circle,
    /// its value and its `h:{height} d:{depth}` label. Nodes follow the
    /// layout's preorder, so children paint over their parents' edges.
    pub fn build(
        layout: &TreeLayout,
        palette: &Palette,
        node_highlight: impl Fn(i64) -> NodeHighlight,
    ) -> Self {
        let radius = layout.node_radius();
        let mut shapes = Vec::with_capacity(layout.nodes().len() * 4);

        for node in layout.nodes() {
            if let Some(parent) = node.parent {
                shapes.push(Shape::Edge {
                    from: parent,
                    to: node.position,
                    color: palette.edge,
                });
            }

            let highlight = node_highlight(node.value);
            shapes.push(Shape::Node {
                value: node.value,
                center: node.position,
                radius,
                fill: palette.node_fill(highlight),
                stroke: palette.node_stroke,
                highlight,
            });
            shapes.push(Shape::Text {
                anchor: node.position,
                text: node.value.to_string(),
                color: palette.value_text,
                font_size: VALUE_FONT_SIZE,
                emphasis: true,
            });
            shapes.push(Shape::Text {
                anchor: Point::new(node.position.x, node.position.y - radius - LABEL_GAP),
                text: format!("h:{} d:{}", node.height, node.depth),
                color: palette.label_text,
                font_size: LABEL_FONT_SIZE,
                emphasis: false,
            });
        }

        trace!("scene with {} shapes", shapes.len());
        Self { shapes }
    }

    /// Build the scene with highlights taken from a traversal state.
    pub fn with_traversal(layout: &TreeLayout, palette: &Palette, state: &TraversalState) -> Self {
        Self::build(layout, palette, |value| highlight(state, value))
    }

    /// All shapes in painting order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Returns true if there is nothing to paint.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Highlight of the node holding `value`, if drawn.
    pub fn highlight_of(&self, value: i64) -> Option<NodeHighlight> {
        self.shapes.iter().find_map(|shape| match shape {
            Shape::Node {
                value: v,
                highlight,
                ..
            } if *v == value => Some(*highlight),
            _ => None,
        })
    }

    /// Serialize the scene as a standalone SVG document.
    ///
    /// `size` sets the document's width and height attributes; the diagram
    /// is mapped onto it through `view_box`.
    pub fn to_svg(&self, view_box: &ViewBox, size: Size) -> String {
        let mut lines = Vec::with_capacity(self.shapes.len() + 2);
        lines.push(format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{}">"#,
            size.width,
            size.height,
            view_box.to_svg_attr()
        ));
        lines.extend(self.shapes.iter().map(svg_element));
        lines.push("</svg>".to_string());

        let mut svg = lines.join("\n");
        svg.push('\n');
        svg
    }
}

fn svg_element(shape: &Shape) -> String {
    match shape {
        Shape::Edge { from, to, color } => format!(
            r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
            from.x,
            from.y,
            to.x,
            to.y,
            to_hex(*color),
            STROKE_WIDTH
        ),
        Shape::Node {
            center,
            radius,
            fill,
            stroke,
            ..
        } => format!(
            r#"  <circle cx="{}" cy="{}" r="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
            center.x,
            center.y,
            radius,
            to_hex(*fill),
            to_hex(*stroke),
            STROKE_WIDTH
        ),
        Shape::Text {
            anchor,
            text,
            color,
            font_size,
            emphasis,
        } => {
            let extra = if *emphasis {
                r#" dominant-baseline="middle" font-weight="bold""#
            } else {
                ""
            };
            format!(
                r#"  <text x="{}" y="{}" text-anchor="middle" fill="{}" font-size="{}"{}>{}</text>"#,
                anchor.x,
                anchor.y,
                to_hex(*color),
                font_size,
                extra,
                escape_xml(text)
            )
        }
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
