use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Bacheo - pothole measurement and repair tooling
#[derive(Parser, Debug)]
#[command(name = "bacheo")]
#[command(about = "Pothole polygon geometry, map projection and repair estimates", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./bacheo.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the polygon for a measurement text
    Preview(PreviewArgs),

    /// Place a measured polygon on the map around a GPS anchor
    Project(ProjectArgs),

    /// Estimate asphalt for a rectangular repair
    Calc(CalcArgs),

    /// Show the effective configuration and where each value came from
    Config,
}

#[derive(Parser, Debug)]
pub struct PreviewArgs {
    /// Measurements in meters, one per line (use "-" to read stdin)
    pub medidas: String,

    /// Polygon edge adjacent to the curb
    #[arg(long, value_name = "SIDE")]
    pub curb_side: Option<String>,

    /// Reject a curb side the shape does not have (strict or lenient)
    #[arg(long, value_name = "MODE")]
    pub curb_validity: Option<String>,

    /// Write an SVG sketch to this path
    #[arg(long, value_name = "PATH")]
    pub svg: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct ProjectArgs {
    /// Measurements in meters, one per line (use "-" to read stdin)
    pub medidas: String,

    /// Anchor latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Anchor longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lng: f64,

    /// Visual shrink factor in (0, 1]
    #[arg(long)]
    pub shrink: Option<f64>,

    /// Curb side whose projected edge should be reported
    #[arg(long, value_name = "SIDE")]
    pub curb_side: Option<String>,
}

#[derive(Parser, Debug)]
pub struct CalcArgs {
    /// Length
    #[arg(long)]
    pub largo: f64,

    /// Width
    #[arg(long)]
    pub ancho: f64,

    /// Asphalt layer thickness
    #[arg(long)]
    pub esp_asfalto: f64,

    /// Rubble layer thickness
    #[arg(long)]
    pub esp_escombro: f64,

    /// Unit of the four lengths above (m or cm)
    #[arg(long, default_value = "m")]
    pub unidad: String,

    /// Compacted density in t/m³ (defaults to the configured value)
    #[arg(long)]
    pub densidad: Option<f64>,
}
