//! Calc command implementation

use crate::cli::CalcArgs;
use crate::config_loader::load_config_with_overrides;
use crate::output::OutputWriter;
use crate::output_types::CalcOutput;
use anyhow::Result;
use bacheo_core::config::CliConfigOverrides;
use bacheo_geo::{AsphaltInput, LengthUnit};
use std::path::Path;

pub fn execute(args: CalcArgs, config_path: Option<&Path>, output: &OutputWriter) -> Result<()> {
    let overrides = CliConfigOverrides { asphalt_density: args.densidad, ..Default::default() };
    let config = load_config_with_overrides(config_path, overrides)?;

    let unidad: LengthUnit = args.unidad.parse()?;
    let input = AsphaltInput {
        largo: args.largo,
        ancho: args.ancho,
        esp_asfalto: args.esp_asfalto,
        esp_escombro: args.esp_escombro,
        unidad,
        densidad: config.asphalt_density.value,
    };
    let estimate = input.estimate()?;

    if output.is_json() {
        output.result(CalcOutput { unidad, densidad: input.densidad, estimate })?;
        return Ok(());
    }

    output.section("Asphalt estimate");
    output.kv("Área", format!("{:.2} m²", estimate.area));
    output.kv("Espesor promedio", format!("{:.3} m", estimate.esp_prom));
    output.kv("Volumen", format!("{:.3} m³", estimate.volumen));
    output.kv("Densidad", format!("{} t/m³", input.densidad));
    output.kv("Toneladas", format!("{:.2} t", estimate.toneladas));

    Ok(())
}
