//! Configuration options for the diagram viewport.
//!
//! This module provides the `ViewportOptions` struct which controls zoom
//! limits, the zoom step factors used by the zoom buttons and the view box
//! restored by a reset.

use serde::{Deserialize, Serialize};

use crate::viewport::ViewBox;

/// Configuration options for a [`Viewport`](crate::Viewport).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportOptions {
    /// Minimum allowed zoom level (0.5 = 50%).
    pub min_zoom: f64,

    /// Maximum allowed zoom level (2.0 = 200%).
    pub max_zoom: f64,

    /// Factor applied by a zoom-in action.
    pub zoom_in_factor: f64,

    /// Factor applied by a zoom-out action.
    pub zoom_out_factor: f64,

    /// View box restored by a reset.
    pub default_view_box: ViewBox,

    /// Whether the view is locked (prevents pan/zoom).
    pub locked: bool,
}

impl Default for ViewportOptions {
    fn default() -> Self {
        Self {
            min_zoom: 0.5,
            max_zoom: 2.0,
            zoom_in_factor: 1.2,
            zoom_out_factor: 0.8,
            default_view_box: ViewBox::default(),
            locked: false,
        }
    }
}

impl ViewportOptions {
    /// Create new viewport options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both min and max zoom levels.
    ///
    /// The bounds are swapped if given in the wrong order.
    pub fn zoom_range(mut self, min: f64, max: f64) -> Self {
        self.min_zoom = min.min(max);
        self.max_zoom = max.max(min);
        self
    }

    /// Set the zoom-in and zoom-out step factors.
    pub fn zoom_factors(mut self, zoom_in: f64, zoom_out: f64) -> Self {
        self.zoom_in_factor = zoom_in;
        self.zoom_out_factor = zoom_out;
        self
    }

    /// Set the view box restored by a reset.
    pub fn default_view_box(mut self, view_box: ViewBox) -> Self {
        self.default_view_box = view_box;
        self
    }

    /// Lock or unlock the view.
    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    /// Clamp a zoom level into the configured range.
    ///
    /// Bounds given in the wrong order are swapped; a NaN bound leaves that
    /// side open.
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        let (low, high) = if self.min_zoom > self.max_zoom {
            (self.max_zoom, self.min_zoom)
        } else {
            (self.min_zoom, self.max_zoom)
        };
        zoom.max(low).min(high)
    }
}
