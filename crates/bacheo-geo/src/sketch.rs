//! SVG sketch of a bache polygon.
//!
//! Draws the polygon fitted into the canvas, the bounding-box dimension
//! lines, area and vertex count labels, the dashed curb edge with hatch
//! ticks, and the visual scale in the footer.

use std::fmt::Write;

use bacheo_core::models::{BacheShape, CurbSide};

use crate::canvas::CanvasFit;
use crate::curb::curb_edge;

/// Distance between curb hatch ticks, in pixels
const CURB_TICK_SPACING: f64 = 22.0;
const CURB_TICK_LENGTH: f64 = 6.0;
const DIMENSION_OFFSET: f64 = 20.0;

/// Sizes and colors for [`render_svg`]
#[derive(Debug, Clone)]
pub struct SketchOptions {
    pub width: f64,
    pub height: f64,
    pub stroke: String,
    pub fill: String,
    pub curb_color: String,
}

impl Default for SketchOptions {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 400.0,
            stroke: "#1a47ff".to_string(),
            fill: "rgba(26,71,255,0.15)".to_string(),
            curb_color: "#6b7280".to_string(),
        }
    }
}

/// Render `shape` as a standalone SVG document
pub fn render_svg(shape: &BacheShape, curb_side: Option<CurbSide>, options: &SketchOptions) -> String {
    let (w, h) = (options.width, options.height);
    let mut svg = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(
        svg,
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="Arial">"##
    );

    let Some(fit) = CanvasFit::new(shape.vertices(), w, h) else {
        let _ = writeln!(svg, r##"<text x="20" y="40" font-size="14">Figura no soportada</text>"##);
        svg.push_str("</svg>\n");
        return svg;
    };

    let pts = fit.to_canvas_all(shape.vertices());
    let points_attr = pts
        .iter()
        .map(|(x, y)| format!("{:.1},{:.1}", x, y))
        .collect::<Vec<_>>()
        .join(" ");
    let _ = writeln!(
        svg,
        r##"<polygon points="{}" fill="{}" stroke="{}" stroke-width="2"/>"##,
        points_attr, options.fill, options.stroke
    );

    let (start_x, start_y) = fit.origin();
    let (px_w, px_h) = fit.pixel_size();
    let (span_x, span_y) = fit.span_meters();

    dimension_line(
        &mut svg,
        (start_x, start_y + px_h + DIMENSION_OFFSET),
        (start_x + px_w, start_y + px_h + DIMENSION_OFFSET),
        &format!("Ancho máx: {:.2} m", span_x),
        &options.stroke,
    );
    dimension_line(
        &mut svg,
        (start_x - DIMENSION_OFFSET, start_y),
        (start_x - DIMENSION_OFFSET, start_y + px_h),
        &format!("Largo máx: {:.2} m", span_y),
        &options.stroke,
    );

    let _ = writeln!(
        svg,
        r##"<text x="{:.1}" y="{:.1}" font-size="13" fill="#111">Vértices: {}</text>"##,
        start_x,
        start_y - 24.0,
        shape.vertices().len()
    );
    let _ = writeln!(
        svg,
        r##"<text x="{:.1}" y="{:.1}" font-size="13" fill="#111">Área: {:.2} m²</text>"##,
        start_x,
        start_y - 8.0,
        shape.area()
    );

    if let Some((p1, p2)) = curb_side.and_then(|side| curb_edge(shape.forma(), &pts, side)) {
        curb_line(&mut svg, p1, p2, &options.curb_color);
    }

    let _ = writeln!(
        svg,
        r##"<text x="10" y="{:.1}" font-size="12" fill="#444">Escala visual: {:.1} px/m</text>"##,
        h - 10.0,
        fit.scale
    );
    svg.push_str("</svg>\n");
    svg
}

fn dimension_line(svg: &mut String, from: (f64, f64), to: (f64, f64), label: &str, color: &str) {
    let _ = writeln!(
        svg,
        r##"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="1"/>"##,
        from.0, from.1, to.0, to.1, color
    );
    let _ = writeln!(
        svg,
        r##"<text x="{:.1}" y="{:.1}" font-size="14" text-anchor="middle" fill="#111">{}</text>"##,
        (from.0 + to.0) / 2.0,
        (from.1 + to.1) / 2.0 - 4.0,
        label
    );
}

fn curb_line(svg: &mut String, p1: (f64, f64), p2: (f64, f64), color: &str) {
    let _ = writeln!(
        svg,
        r##"<line class="curb" x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="3" stroke-dasharray="8,5"/>"##,
        p1.0, p1.1, p2.0, p2.1, color
    );

    let (dx, dy) = (p2.0 - p1.0, p2.1 - p1.1);
    let len = dx.hypot(dy).max(1.0);
    let steps = ((len / CURB_TICK_SPACING).floor() as usize).max(2);
    let (nx, ny) = (-dy / len, dx / len);

    for i in 1..steps {
        let t = i as f64 / steps as f64;
        let (x, y) = (p1.0 + dx * t, p1.1 + dy * t);
        let _ = writeln!(
            svg,
            r##"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="1"/>"##,
            x - nx * CURB_TICK_LENGTH,
            y - ny * CURB_TICK_LENGTH,
            x + nx * CURB_TICK_LENGTH,
            y + ny * CURB_TICK_LENGTH,
            color
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_square() {
        let shape = BacheShape::from_text("4\n4\n4\n4").unwrap();
        let svg = render_svg(&shape, None, &SketchOptions::default());

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("<polygon"));
        assert!(svg.contains("Área: 16.00 m²"));
        assert!(svg.contains("Vértices: 4"));
        assert!(svg.contains("Ancho máx: 4.00 m"));
        assert!(!svg.contains("class=\"curb\""));
    }

    #[test]
    fn test_render_curb_edge() {
        let shape = BacheShape::from_text("3\n2\n2").unwrap();
        let svg = render_svg(&shape, Some(CurbSide::Base), &SketchOptions::default());
        assert!(svg.contains("class=\"curb\""));
        assert!(svg.contains("stroke-dasharray=\"8,5\""));
    }

    #[test]
    fn test_inapplicable_curb_is_omitted() {
        let shape = BacheShape::from_text("3\n2\n2").unwrap();
        let svg = render_svg(&shape, Some(CurbSide::Abajo), &SketchOptions::default());
        assert!(!svg.contains("class=\"curb\""));
        assert!(svg.contains("Área: 3.00 m²"));
    }
}
