//! Integration tests for layered configuration
//!
//! Precedence: CLI arguments > Environment variables > Config file > Defaults

use bacheo_core::config::{CliConfigOverrides, ConfigSource, LayeredConfig, ValidityMode};
use serial_test::serial;
use std::env;
use std::io::Write;
use tempfile::NamedTempFile;

fn clear_env() {
    for key in [
        "BACHEO_SHRINK_FACTOR",
        "BACHEO_CURB_VALIDITY",
        "BACHEO_ASPHALT_DENSITY",
        "BACHEO_STREET_RADIUS",
        "BACHEO_NOMINATIM_URL",
        "BACHEO_OVERPASS_URL",
    ] {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    clear_env();
    env::set_var("BACHEO_SHRINK_FACTOR", "0.9");
    env::set_var("BACHEO_CURB_VALIDITY", "strict");

    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
shrink_factor = 0.5
curb_validity = "lenient"
street_search_radius_m = 80.0
"#
    )
    .unwrap();

    let config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();

    assert_eq!(config.shrink_factor.value, 0.9);
    assert_eq!(config.shrink_factor.source, ConfigSource::Environment);
    assert_eq!(config.curb_validity.value, ValidityMode::Strict);
    assert_eq!(config.street_search_radius_m.value, 80.0);
    assert_eq!(config.street_search_radius_m.source, ConfigSource::File);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_environment_values_are_ignored() {
    clear_env();
    env::set_var("BACHEO_SHRINK_FACTOR", "2.5");
    env::set_var("BACHEO_ASPHALT_DENSITY", "heavy");
    env::set_var("BACHEO_CURB_VALIDITY", "sometimes");

    let config = LayeredConfig::with_defaults().load_from_env();

    assert_eq!(config.shrink_factor.value, 0.75);
    assert_eq!(config.shrink_factor.source, ConfigSource::Default);
    assert_eq!(config.asphalt_density.source, ConfigSource::Default);
    assert_eq!(config.curb_validity.value, ValidityMode::Lenient);

    clear_env();
}

#[test]
#[serial]
fn test_cli_overrides_all() {
    clear_env();
    env::set_var("BACHEO_ASPHALT_DENSITY", "2.3");

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "asphalt_density = 2.1").unwrap();

    let mut config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();
    assert_eq!(config.asphalt_density.value, 2.3);

    config.update_from_cli(CliConfigOverrides {
        asphalt_density: Some(2.5),
        ..Default::default()
    });

    assert_eq!(config.asphalt_density.value, 2.5);
    assert_eq!(config.asphalt_density.source, ConfigSource::Cli);

    assert!(ConfigSource::Cli.precedence() > ConfigSource::Environment.precedence());
    assert!(ConfigSource::Environment.precedence() > ConfigSource::File.precedence());
    assert!(ConfigSource::File.precedence() > ConfigSource::Default.precedence());

    clear_env();
}

#[test]
fn test_missing_file_is_an_error() {
    let result = LayeredConfig::with_defaults().load_from_file("/nonexistent/bacheo.toml");
    assert!(result.is_err());
}
