//! Loading configuration files from disk.

use std::io::Write;

use carry_config::{CarryConfig, ConfigError};
use carry_core::InstrumentId;

fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_toml_file() {
    let file = write_temp(
        ".toml",
        r#"
        [corridor]
        upper_start = 1500.0
        upper_monthly_rate = 0.02

        [[instruments]]
        id = "TTD26"
        maturity = "2026-12-15"
        payoff = 161.144

        [[instruments]]
        id = "TTS26"
        maturity = "2026-09-15"
        payoff = 152.096
        "#,
    );

    let config = CarryConfig::from_file(file.path()).unwrap();
    assert_eq!(config.corridor.upper_start, 1500.0);
    assert_eq!(config.corridor.lower_start, 1000.0);

    let table = config.reference_table().unwrap();
    assert_eq!(table.len(), 2);
    assert!(table.contains(&InstrumentId::new("TTS26")));
}

#[test]
fn test_load_json_file() {
    let file = write_temp(".json", r#"{"spot": {"manual_rate": 1300.0, "use_manual": true}}"#);
    let config = CarryConfig::from_file(file.path()).unwrap();
    assert!(config.spot.use_manual);
    assert_eq!(config.spot.manual_rate, 1300.0);
}

#[test]
fn test_duplicate_instruments_rejected() {
    let file = write_temp(
        ".toml",
        r#"
        [[instruments]]
        id = "S31O5"
        maturity = "2025-10-31"
        payoff = 132.821

        [[instruments]]
        id = "S31O5"
        maturity = "2025-10-31"
        payoff = 132.821
        "#,
    );
    let err = CarryConfig::from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "instruments[1]"));
}

#[test]
fn test_missing_and_unsupported_files() {
    assert!(matches!(
        CarryConfig::from_file("/nonexistent/carry.toml"),
        Err(ConfigError::NotFound { .. })
    ));

    let file = write_temp(".yaml", "spot: {}");
    assert!(matches!(
        CarryConfig::from_file(file.path()),
        Err(ConfigError::UnsupportedFormat(ref ext)) if ext == "yaml"
    ));
}
