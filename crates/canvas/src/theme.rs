//! Color palettes for the tree diagram
//!
//! Two palettes are provided, one for light and one for dark backgrounds.
//! Node fills encode the traversal highlight: the node being visited, nodes
//! already visited, and everything else.

use derive_more::Display;
use image::Rgba;
use serde::{Deserialize, Serialize};

/// An RGBA color
pub type Color = Rgba<u8>;

/// Build an opaque color from a `0xRRGGBB` literal
pub const fn rgb(hex: u32) -> Color {
    Rgba([(hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 0xFF])
}

/// Format a color as `#rrggbb` for SVG output
pub fn to_hex(color: Color) -> String {
    let [r, g, b, _] = color.0;
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Light or dark appearance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Dark shapes on a light background
    #[default]
    #[display(fmt = "light")]
    Light,

    /// Light shapes on a dark background
    #[display(fmt = "dark")]
    Dark,
}

impl ThemeMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// Switch to the other mode in place
    pub fn toggle(&mut self) {
        *self = self.toggled();
    }

    /// Palette for this mode
    pub fn palette(self) -> Palette {
        match self {
            ThemeMode::Light => Palette::light(),
            ThemeMode::Dark => Palette::dark(),
        }
    }
}

/// How a node should be emphasised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum NodeHighlight {
    /// The node currently being visited
    #[display(fmt = "current")]
    Current,

    /// A node visited earlier in the traversal
    #[display(fmt = "visited")]
    Visited,

    /// Not visited yet
    #[display(fmt = "unvisited")]
    Unvisited,
}

/// Colors for the tree diagram
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    /// Fill of the node being visited (pink)
    pub current_node: Color,

    /// Fill of visited nodes (blue)
    pub visited_node: Color,

    /// Fill of unvisited nodes (green)
    pub unvisited_node: Color,

    /// Outline of node circles
    pub node_stroke: Color,

    /// Parent-child connectors
    pub edge: Color,

    /// Value drawn inside a node
    pub value_text: Color,

    /// Height/depth label above a node
    pub label_text: Color,
}

impl Palette {
    /// Palette for light backgrounds
    pub fn light() -> Self {
        Self {
            current_node: rgb(0xEC4899),
            visited_node: rgb(0x3B82F6),
            unvisited_node: rgb(0x10B981),
            node_stroke: rgb(0xD1D5DB),
            edge: rgb(0x9CA3AF),
            value_text: rgb(0xFFFFFF),
            label_text: rgb(0x4B5563),
        }
    }

    /// Palette for dark backgrounds
    pub fn dark() -> Self {
        Self {
            current_node: rgb(0xF472B6),
            visited_node: rgb(0x60A5FA),
            unvisited_node: rgb(0x34D399),
            node_stroke: rgb(0x4B5563),
            edge: rgb(0x4B5563),
            value_text: rgb(0x111827),
            label_text: rgb(0x9CA3AF),
        }
    }

    /// Fill for a node with the given highlight
    pub fn node_fill(&self, highlight: NodeHighlight) -> Color {
        match highlight {
            NodeHighlight::Current => self.current_node,
            NodeHighlight::Visited => self.visited_node,
            NodeHighlight::Unvisited => self.unvisited_node,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::light()
    }
}
