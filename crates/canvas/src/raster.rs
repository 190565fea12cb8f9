//! Raster rendering of scenes through the `image` crate.
//!
//! Shapes are drawn with simple coverage tests (distance to a segment,
//! distance to a center) on a transparent background. Text is not rasterized;
//! the SVG output carries the labels.

use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use image::{ImageFormat, RgbaImage};
use kurbo::{Point, Vec2};
use log::{debug, info};

use crate::scene::{Scene, Shape, STROKE_WIDTH};
use crate::theme::Color;
use crate::viewport::ViewBox;

/// Maps diagram coordinates onto pixel coordinates.
struct PixelMap {
    origin: Point,
    scale: Vec2,
}

impl PixelMap {
    fn new(view_box: &ViewBox, width: u32, height: u32) -> Option<Self> {
        if view_box.width <= 0.0 || view_box.height <= 0.0 || width == 0 || height == 0 {
            return None;
        }
        Some(Self {
            origin: Point::new(view_box.x, view_box.y),
            scale: Vec2::new(
                f64::from(width) / view_box.width,
                f64::from(height) / view_box.height,
            ),
        })
    }

    fn to_pixel(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.origin.x) * self.scale.x,
            (p.y - self.origin.y) * self.scale.y,
        )
    }

    /// Scale applied to lengths (radii, stroke widths).
    fn length(&self, len: f64) -> f64 {
        len * self.scale.x.min(self.scale.y)
    }
}

/// Render `scene` as seen through `view_box` into a `width` x `height` image.
pub fn rasterize(scene: &Scene, view_box: &ViewBox, width: u32, height: u32) -> RgbaImage {
    let mut image = RgbaImage::new(width, height);
    let Some(map) = PixelMap::new(view_box, width, height) else {
        return image;
    };

    for shape in scene.shapes() {
        match shape {
            Shape::Edge { from, to, color } => {
                let half = map.length(STROKE_WIDTH / 2.0).max(0.5);
                draw_segment(&mut image, map.to_pixel(*from), map.to_pixel(*to), half, *color);
            }
            Shape::Node {
                center,
                radius,
                fill,
                stroke,
                ..
            } => {
                let stroke_width = map.length(STROKE_WIDTH).max(1.0);
                draw_disc(
                    &mut image,
                    map.to_pixel(*center),
                    map.length(*radius),
                    stroke_width,
                    *fill,
                    *stroke,
                );
            }
            Shape::Text { .. } => {}
        }
    }

    debug!("rasterized {} shapes at {width}x{height}", scene.shapes().len());
    image
}

/// Pixel range covering `[lo, hi]`, clipped to `0..limit`.
fn span(lo: f64, hi: f64, limit: u32) -> std::ops::Range<u32> {
    let start = lo.floor().max(0.0);
    let end = (hi.ceil() + 1.0).min(f64::from(limit));
    if end <= start {
        return 0..0;
    }
    start as u32..end as u32
}

fn pixel_center(x: u32, y: u32) -> Point {
    Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5)
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len2 = ab.hypot2();
    if len2 == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

fn draw_segment(image: &mut RgbaImage, a: Point, b: Point, half_width: f64, color: Color) {
    let (w, h) = image.dimensions();
    for y in span(a.y.min(b.y) - half_width, a.y.max(b.y) + half_width, h) {
        for x in span(a.x.min(b.x) - half_width, a.x.max(b.x) + half_width, w) {
            if distance_to_segment(pixel_center(x, y), a, b) <= half_width {
                image.put_pixel(x, y, color);
            }
        }
    }
}

fn draw_disc(
    image: &mut RgbaImage,
    center: Point,
    radius: f64,
    stroke_width: f64,
    fill: Color,
    stroke: Color,
) {
    let (w, h) = image.dimensions();
    let outer = radius + stroke_width / 2.0;
    let inner = radius - stroke_width / 2.0;
    for y in span(center.y - outer, center.y + outer, h) {
        for x in span(center.x - outer, center.x + outer, w) {
            let d = pixel_center(x, y).distance(center);
            if d <= inner {
                image.put_pixel(x, y, fill);
            } else if d <= outer {
                image.put_pixel(x, y, stroke);
            }
        }
    }
}

/// Encode an image as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, ImageFormat::Png)
        .context("Failed to encode PNG")?;
    Ok(bytes.into_inner())
}

/// Write an image to `path` as PNG.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("Failed to write PNG to {}", path.display()))?;
    info!("Saved {}x{} PNG to {}", image.width(), image.height(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LayoutOptions, TreeLayout};
    use crate::theme::{NodeHighlight, Palette};
    use bst_tree::Bst;

    fn scene_of(values: &[i64]) -> Scene {
        let layout = TreeLayout::compute(
            &Bst::from_values(values.iter().copied()),
            &LayoutOptions::default(),
        );
        Scene::build(&layout, &Palette::light(), |_| NodeHighlight::Unvisited)
    }

    #[test]
    fn test_root_is_painted_at_view_center() {
        // Default view box at 800x600 maps the diagram origin to pixel (400, 100)
        let view_box = ViewBox::new(-400.0, -100.0, 800.0, 600.0);
        let image = rasterize(&scene_of(&[5]), &view_box, 800, 600);

        let palette = Palette::light();
        assert_eq!(*image.get_pixel(400, 100), palette.unvisited_node);
        // Transparent far away from any shape
        assert_eq!(image.get_pixel(10, 590).0[3], 0);
    }

    #[test]
    fn test_edge_is_painted() {
        let view_box = ViewBox::default();
        let image = rasterize(&scene_of(&[5, 3]), &view_box, 800, 600);

        // Root at (0,0) -> (400,100); child at (-150,80) -> (250,180).
        // Midpoint of the edge lies outside both circles.
        assert_eq!(*image.get_pixel(325, 140), Palette::light().edge);
    }

    #[test]
    fn test_degenerate_view_box() {
        let image = rasterize(&scene_of(&[1]), &ViewBox::new(0.0, 0.0, 0.0, 10.0), 4, 4);
        assert!(image.pixels().all(|p| p.0[3] == 0));
    }

    #[test]
    fn test_encode_png_signature() {
        let image = rasterize(&scene_of(&[1, 2]), &ViewBox::default(), 80, 60);
        let bytes = encode_png(&image).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
