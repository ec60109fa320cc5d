//! Preview command implementation

use crate::cli::PreviewArgs;
use crate::config_loader::load_config_with_overrides;
use crate::output::OutputWriter;
use crate::output_types::{PreviewOutput, VertexRow};
use anyhow::{Context, Result};
use bacheo_core::config::{parse_validity_mode, CliConfigOverrides};
use bacheo_core::geometry::{bounding_span, centroid};
use bacheo_geo::{render_svg, SketchOptions};
use bacheo_lifecycle::BacheManager;
use bacheo_store::MemoryBacheStore;
use std::path::Path;
use std::sync::Arc;

pub fn execute(args: PreviewArgs, config_path: Option<&Path>, output: &OutputWriter) -> Result<()> {
    let overrides = CliConfigOverrides {
        curb_validity: args.curb_validity.as_deref().map(parse_validity_mode).transpose()?,
        ..Default::default()
    };
    let config = load_config_with_overrides(config_path, overrides)?;

    // Nothing is stored; the manager resolves the curb side like an edit would
    let manager = BacheManager::from_config(Arc::new(MemoryBacheStore::new()), &config)?;

    let text = super::read_medidas(&args.medidas)?;
    let preview = manager.preview(&text, args.curb_side.as_deref())?;
    let shape = &preview.shape;

    if args.curb_side.as_deref().is_some_and(|s| !s.trim().is_empty()) && preview.curb_side.is_none() {
        output.warning(format!("Curb side dropped: a {} has no such edge", shape.forma()));
    }

    let svg_path = match &args.svg {
        Some(path) => {
            let svg = render_svg(shape, preview.curb_side, &SketchOptions::default());
            std::fs::write(path, svg)
                .with_context(|| format!("Failed to write SVG to {}", path.display()))?;
            Some(path.display().to_string())
        }
        None => None,
    };

    let span = bounding_span(shape.vertices());

    if output.is_json() {
        output.result(PreviewOutput {
            forma: shape.forma(),
            medidas: shape.medidas().to_vec(),
            vertices: shape.vertices().to_vec(),
            area: shape.area(),
            curb_side: preview.curb_side,
            curb_options: preview.curb_options.clone(),
            span,
            centroid: centroid(shape.vertices()),
            svg_path,
        })?;
        return Ok(());
    }

    output.section("Geometry");
    output.kv("Forma", shape.forma());
    output.kv("Medidas", shape.medidas_text().replace('\n', ", "));
    output.kv("Área", format!("{:.2} m²", shape.area()));
    if let Some(span) = span {
        output.kv("Extent", format!("{:.2} × {:.2} m", span.width(), span.height()));
    }
    output.kv(
        "Curb side",
        preview.curb_side.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string()),
    );
    output.kv(
        "Curb options",
        preview.curb_options.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(", "),
    );

    output.section("Vertices");
    output.table(VertexRow::from_vertices(shape.vertices()));

    if let Some(path) = svg_path {
        output.success(format!("SVG sketch written to {}", path));
    }

    Ok(())
}
