//! Project command implementation

use crate::cli::ProjectArgs;
use crate::config_loader::load_config_with_overrides;
use crate::output::OutputWriter;
use crate::output_types::{PointRow, ProjectOutput};
use anyhow::Result;
use bacheo_core::config::CliConfigOverrides;
use bacheo_core::models::{parse_curb_token, BacheShape, GeoPoint};
use bacheo_geo::{curb_edge, GeoBounds, GeoProjector};
use std::path::Path;

pub fn execute(args: ProjectArgs, config_path: Option<&Path>, output: &OutputWriter) -> Result<()> {
    let overrides = CliConfigOverrides { shrink_factor: args.shrink, ..Default::default() };
    let config = load_config_with_overrides(config_path, overrides)?;
    let projector = GeoProjector::new(config.shrink_factor.value)?;

    let text = super::read_medidas(&args.medidas)?;
    let shape = BacheShape::from_text(&text)?;
    let anchor = GeoPoint::new(args.lat, args.lng).validate()?;

    let points = projector.project(shape.vertices(), anchor);
    let bounds = GeoBounds::from_points(&points);

    let curb = match parse_curb_token(args.curb_side.as_deref())? {
        Some(side) => {
            let edge = curb_edge(shape.forma(), &points, side);
            if edge.is_none() {
                output.warning(format!("A {} has no '{}' edge", shape.forma(), side));
            }
            edge.map(|(a, b)| [a, b])
        }
        None => None,
    };

    tracing::debug!(forma = %shape.forma(), shrink = projector.shrink(), "Projected polygon");

    if output.is_json() {
        output.result(ProjectOutput {
            forma: shape.forma(),
            anchor,
            shrink: projector.shrink(),
            points,
            bounds,
            curb_edge: curb,
        })?;
        return Ok(());
    }

    output.section("Projection");
    output.kv("Forma", shape.forma());
    output.kv("Anchor", format!("{:.7}, {:.7}", anchor.lat, anchor.lng));
    output.kv("Shrink", format!("{} ({:?})", projector.shrink(), config.shrink_factor.source));
    if let Some(b) = bounds {
        output.kv("Bounds", format!("{:.7},{:.7} → {:.7},{:.7}", b.min_lat, b.min_lng, b.max_lat, b.max_lng));
    }
    if let Some([a, b]) = curb {
        output.kv("Curb edge", format!("{:.7},{:.7} → {:.7},{:.7}", a.lat, a.lng, b.lat, b.lng));
    }

    output.section("Points");
    output.table(PointRow::from_points(&points));

    Ok(())
}
