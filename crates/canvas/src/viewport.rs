//! Viewport state for the tree diagram.
//!
//! The viewport controls the window into diagram space, handling:
//! - Pan (drag) of the view rectangle
//! - Zoom level, clamped and applied around the view center
//! - Coordinate conversion between screen space and diagram space

use kurbo::{Point, Rect, Size, Vec2};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::options::ViewportOptions;

/// The visible rectangle of the diagram, in diagram coordinates.
///
/// This maps directly onto an SVG `viewBox`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewBox {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Visible width.
    pub width: f64,
    /// Visible height.
    pub height: f64,
}

impl Default for ViewBox {
    fn default() -> Self {
        Self {
            x: -400.0,
            y: -100.0,
            width: 800.0,
            height: 600.0,
        }
    }
}

impl ViewBox {
    /// Create a view box from its origin and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The view box as a rectangle.
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Center of the view box.
    pub fn center(&self) -> Point {
        self.to_rect().center()
    }

    /// Format as the value of an SVG `viewBox` attribute.
    pub fn to_svg_attr(&self) -> String {
        format!("{} {} {} {}", self.x, self.y, self.width, self.height)
    }

    /// Diagram units per screen pixel when rendered at `rendered` size.
    ///
    /// Returns `None` for a degenerate rendered size.
    pub fn units_per_pixel(&self, rendered: Size) -> Option<Vec2> {
        if rendered.width <= 0.0 || rendered.height <= 0.0 {
            return None;
        }
        Some(Vec2::new(
            self.width / rendered.width,
            self.height / rendered.height,
        ))
    }
}

/// Pan/zoom state over the diagram.
///
/// The zoom scalar is kept within the configured range. Zooming rescales the
/// view box around its center by the ratio of the new zoom to the old one,
/// so a zoom above 1.0 shows a larger area of the diagram.
#[derive(Clone, Debug)]
pub struct Viewport {
    view_box: ViewBox,
    zoom: f64,
    drag_origin: Option<Point>,
    options: ViewportOptions,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ViewportOptions::default())
    }
}

impl Viewport {
    /// Create a viewport showing the default view box at 100% zoom.
    pub fn new(options: ViewportOptions) -> Self {
        Self {
            view_box: options.default_view_box,
            zoom: 1.0,
            drag_origin: None,
            options,
        }
    }

    /// The current view box.
    pub fn view_box(&self) -> ViewBox {
        self.view_box
    }

    /// The current zoom level.
    pub fn zoom_level(&self) -> f64 {
        self.zoom
    }

    /// The options in effect.
    pub fn options(&self) -> &ViewportOptions {
        &self.options
    }

    /// Returns true while a drag gesture is active.
    pub fn is_dragging(&self) -> bool {
        self.drag_origin.is_some()
    }

    /// Translate the view by a pointer movement of `delta` screen pixels.
    ///
    /// The movement is scaled by the ratio of view box size to `rendered`
    /// size, so panning speed does not depend on the output resolution. The
    /// view moves opposite to the pointer, dragging the diagram along.
    pub fn pan(&mut self, delta: Vec2, rendered: Size) {
        if self.options.locked {
            return;
        }
        let Some(scale) = self.view_box.units_per_pixel(rendered) else {
            return;
        };
        self.view_box.x -= delta.x * scale.x;
        self.view_box.y -= delta.y * scale.y;
        trace!("pan by {delta:?} -> {:?}", self.view_box);
    }

    /// Start a drag gesture at a screen position.
    pub fn begin_drag(&mut self, screen: Point) {
        self.drag_origin = Some(screen);
    }

    /// Continue a drag gesture, panning by the movement since the last call.
    pub fn drag_to(&mut self, screen: Point, rendered: Size) {
        let Some(origin) = self.drag_origin else {
            return;
        };
        self.pan(screen - origin, rendered);
        self.drag_origin = Some(screen);
    }

    /// Finish a drag gesture.
    pub fn end_drag(&mut self) {
        self.drag_origin = None;
    }

    /// Multiply the zoom level by `factor`, keeping the view centered.
    ///
    /// The resulting zoom is clamped to the configured range. Successive
    /// zooms are not inverses of each other: 1.2 followed by 0.8 lands at
    /// 0.96, not 1.0.
    pub fn zoom(&mut self, factor: f64) {
        if self.options.locked || !factor.is_finite() || factor <= 0.0 {
            return;
        }

        let new_zoom = self.options.clamp_zoom(self.zoom * factor);
        if !new_zoom.is_finite() || new_zoom <= 0.0 {
            return;
        }
        let scale = new_zoom / self.zoom;

        let vb = self.view_box;
        self.view_box = ViewBox::new(
            vb.x + vb.width * (1.0 - scale) / 2.0,
            vb.y + vb.height * (1.0 - scale) / 2.0,
            vb.width * scale,
            vb.height * scale,
        );
        self.zoom = new_zoom;
        debug!("zoom {factor} -> {new_zoom}");
    }

    /// Zoom in by the configured step.
    pub fn zoom_in(&mut self) {
        self.zoom(self.options.zoom_in_factor);
    }

    /// Zoom out by the configured step.
    pub fn zoom_out(&mut self) {
        self.zoom(self.options.zoom_out_factor);
    }

    /// Restore the default view box and 100% zoom.
    pub fn reset_view(&mut self) {
        self.view_box = self.options.default_view_box;
        self.zoom = 1.0;
        self.drag_origin = None;
        debug!("view reset");
    }

    /// Convert a screen position into diagram coordinates.
    pub fn screen_to_diagram(&self, screen: Point, rendered: Size) -> Option<Point> {
        let scale = self.view_box.units_per_pixel(rendered)?;
        Some(Point::new(
            self.view_box.x + screen.x * scale.x,
            self.view_box.y + screen.y * scale.y,
        ))
    }

    /// Convert a diagram position into screen coordinates.
    pub fn diagram_to_screen(&self, diagram: Point, rendered: Size) -> Option<Point> {
        let scale = self.view_box.units_per_pixel(rendered)?;
        Some(Point::new(
            (diagram.x - self.view_box.x) / scale.x,
            (diagram.y - self.view_box.y) / scale.y,
        ))
    }
}
