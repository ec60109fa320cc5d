//! Fitting a local polygon into a pixel canvas

use bacheo_core::geometry::bounding_span;
use bacheo_core::models::{BoundingSpan, Vertex};
use serde::Serialize;

/// Margin kept free around the drawing, in pixels
pub const CANVAS_PADDING: f64 = 40.0;

/// Maps local meters onto canvas pixels, preserving aspect ratio and
/// centring the polygon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CanvasFit {
    pub width: f64,
    pub height: f64,
    span: BoundingSpan,
    /// Pixels per meter
    pub scale: f64,
    origin_x: f64,
    origin_y: f64,
}

impl CanvasFit {
    /// Fit `vertices` into a `width` by `height` canvas; `None` when there
    /// is nothing to draw.
    pub fn new(vertices: &[Vertex], width: f64, height: f64) -> Option<Self> {
        let span = bounding_span(vertices)?;
        let inner_w = (width - CANVAS_PADDING * 2.0).max(1.0);
        let inner_h = (height - CANVAS_PADDING * 2.0).max(1.0);
        let scale = (inner_w / span.width()).min(inner_h / span.height());

        let px_w = span.width() * scale;
        let px_h = span.height() * scale;

        Some(Self {
            width,
            height,
            span,
            scale,
            origin_x: (width - px_w) / 2.0,
            origin_y: (height - px_h) / 2.0,
        })
    }

    /// Canvas position of a local vertex
    pub fn to_canvas(&self, v: Vertex) -> (f64, f64) {
        (
            self.origin_x + (v.x - self.span.min_x) * self.scale,
            self.origin_y + (v.y - self.span.min_y) * self.scale,
        )
    }

    pub fn to_canvas_all(&self, vertices: &[Vertex]) -> Vec<(f64, f64)> {
        vertices.iter().map(|v| self.to_canvas(*v)).collect()
    }

    /// Top-left corner of the drawn polygon's bounding box
    pub fn origin(&self) -> (f64, f64) {
        (self.origin_x, self.origin_y)
    }

    /// Drawn size of the polygon's bounding box, in pixels
    pub fn pixel_size(&self) -> (f64, f64) {
        (self.span.width() * self.scale, self.span.height() * self.scale)
    }

    /// Extent in meters (clamped, never zero)
    pub fn span_meters(&self) -> (f64, f64) {
        (self.span.width(), self.span.height())
    }
}
