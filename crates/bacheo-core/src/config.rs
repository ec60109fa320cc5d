use crate::error::{BacheoError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

pub const DEFAULT_SHRINK_FACTOR: f64 = 0.75;
pub const DEFAULT_ASPHALT_DENSITY: f64 = 2.4;
pub const DEFAULT_STREET_SEARCH_RADIUS_M: f64 = 50.0;
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// How a curb side that does not fit the shape is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValidityMode {
    /// Reject the edit with an error
    Strict,
    /// Clear the curb side and keep going
    #[default]
    Lenient,
}

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for Bacheo
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    /// Visual shrink applied when drawing polygons on the map
    pub shrink_factor: ConfigValue<f64>,
    pub curb_validity: ConfigValue<ValidityMode>,
    /// Compacted asphalt density in t/m³
    pub asphalt_density: ConfigValue<f64>,
    pub street_search_radius_m: ConfigValue<f64>,
    pub nominatim_url: ConfigValue<String>,
    pub overpass_url: ConfigValue<String>,
}

impl Default for LayeredConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            shrink_factor: ConfigValue::new(DEFAULT_SHRINK_FACTOR, ConfigSource::Default),
            curb_validity: ConfigValue::new(ValidityMode::Lenient, ConfigSource::Default),
            asphalt_density: ConfigValue::new(DEFAULT_ASPHALT_DENSITY, ConfigSource::Default),
            street_search_radius_m: ConfigValue::new(
                DEFAULT_STREET_SEARCH_RADIUS_M,
                ConfigSource::Default,
            ),
            nominatim_url: ConfigValue::new(
                DEFAULT_NOMINATIM_URL.to_string(),
                ConfigSource::Default,
            ),
            overpass_url: ConfigValue::new(DEFAULT_OVERPASS_URL.to_string(), ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                BacheoError::ConfigMissing { key: path.display().to_string() }
            }
            _ => BacheoError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            },
        })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| BacheoError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(shrink) = file_config.shrink_factor {
            self.shrink_factor.update(validate_shrink_factor(shrink)?, ConfigSource::File);
        }

        if let Some(validity) = file_config.curb_validity {
            self.curb_validity.update(validity, ConfigSource::File);
        }

        if let Some(density) = file_config.asphalt_density {
            let density = validate_positive("asphalt_density", density)?;
            self.asphalt_density.update(density, ConfigSource::File);
        }

        if let Some(radius) = file_config.street_search_radius_m {
            let radius = validate_positive("street_search_radius_m", radius)?;
            self.street_search_radius_m.update(radius, ConfigSource::File);
        }

        if let Some(url) = file_config.nominatim_url {
            self.nominatim_url.update(url, ConfigSource::File);
        }

        if let Some(url) = file_config.overpass_url {
            self.overpass_url.update(url, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // BACHEO_SHRINK_FACTOR
        if let Ok(raw) = env::var("BACHEO_SHRINK_FACTOR") {
            match raw.parse::<f64>().map_err(|e| e.to_string()).and_then(|v| {
                validate_shrink_factor(v).map_err(|e| e.to_string())
            }) {
                Ok(shrink) => self.shrink_factor.update(shrink, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid BACHEO_SHRINK_FACTOR value '{}': expected a number in (0, 1]",
                    raw
                ),
            }
        }

        // BACHEO_CURB_VALIDITY
        if let Ok(raw) = env::var("BACHEO_CURB_VALIDITY") {
            match parse_validity_mode(&raw) {
                Ok(validity) => self.curb_validity.update(validity, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid BACHEO_CURB_VALIDITY value '{}': expected strict or lenient",
                    raw
                ),
            }
        }

        // BACHEO_ASPHALT_DENSITY
        if let Ok(raw) = env::var("BACHEO_ASPHALT_DENSITY") {
            match raw.parse::<f64>().ok().filter(|v| v.is_finite() && *v > 0.0) {
                Some(density) => self.asphalt_density.update(density, ConfigSource::Environment),
                None => tracing::warn!(
                    "Invalid BACHEO_ASPHALT_DENSITY value '{}': expected a positive number",
                    raw
                ),
            }
        }

        // BACHEO_STREET_RADIUS
        if let Ok(raw) = env::var("BACHEO_STREET_RADIUS") {
            match raw.parse::<f64>().ok().filter(|v| v.is_finite() && *v > 0.0) {
                Some(radius) => {
                    self.street_search_radius_m.update(radius, ConfigSource::Environment)
                }
                None => tracing::warn!(
                    "Invalid BACHEO_STREET_RADIUS value '{}': expected meters as a positive number",
                    raw
                ),
            }
        }

        if let Ok(url) = env::var("BACHEO_NOMINATIM_URL") {
            self.nominatim_url.update(url, ConfigSource::Environment);
        }

        if let Ok(url) = env::var("BACHEO_OVERPASS_URL") {
            self.overpass_url.update(url, ConfigSource::Environment);
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(shrink) = overrides.shrink_factor {
            self.shrink_factor.update(shrink, ConfigSource::Cli);
        }

        if let Some(validity) = overrides.curb_validity {
            self.curb_validity.update(validity, ConfigSource::Cli);
        }

        if let Some(density) = overrides.asphalt_density {
            self.asphalt_density.update(density, ConfigSource::Cli);
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "shrink_factor".to_string(),
            (self.shrink_factor.value.to_string(), self.shrink_factor.source),
        );

        map.insert(
            "curb_validity".to_string(),
            (format!("{:?}", self.curb_validity.value), self.curb_validity.source),
        );

        map.insert(
            "asphalt_density".to_string(),
            (format!("{} t/m³", self.asphalt_density.value), self.asphalt_density.source),
        );

        map.insert(
            "street_search_radius_m".to_string(),
            (self.street_search_radius_m.value.to_string(), self.street_search_radius_m.source),
        );

        map.insert(
            "nominatim_url".to_string(),
            (self.nominatim_url.value.clone(), self.nominatim_url.source),
        );

        map.insert(
            "overpass_url".to_string(),
            (self.overpass_url.value.clone(), self.overpass_url.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    shrink_factor: Option<f64>,
    curb_validity: Option<ValidityMode>,
    asphalt_density: Option<f64>,
    street_search_radius_m: Option<f64>,
    nominatim_url: Option<String>,
    overpass_url: Option<String>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub shrink_factor: Option<f64>,
    pub curb_validity: Option<ValidityMode>,
    pub asphalt_density: Option<f64>,
}

/// Parse validity mode from string
pub fn parse_validity_mode(s: &str) -> Result<ValidityMode> {
    match s.to_lowercase().as_str() {
        "strict" => Ok(ValidityMode::Strict),
        "lenient" => Ok(ValidityMode::Lenient),
        _ => Err(BacheoError::ConfigInvalid {
            key: "curb_validity".to_string(),
            reason: format!("Invalid validity mode: {}. Use strict or lenient", s),
        }),
    }
}

/// Shrink factors outside (0, 1] would enlarge or flip the drawn polygon
pub fn validate_shrink_factor(value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(value)
    } else {
        Err(BacheoError::ConfigInvalid {
            key: "shrink_factor".to_string(),
            reason: format!("{} is outside (0, 1]", value),
        })
    }
}

fn validate_positive(key: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(BacheoError::ConfigInvalid {
            key: key.to_string(),
            reason: format!("{} must be a positive number", value),
        })
    }
}
