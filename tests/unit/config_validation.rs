//! Unit tests for configuration validation.

use cvt_actuator::config::{parse_config, validate_config, SystemConfig};
use cvt_actuator::error::{ConfigError, Error};

/// Test validation of a valid configuration.
#[test]
fn test_valid_config_passes_validation() {
    let toml_str = r#"
[actuator]
tick_period_ms = 1
max_velocity_steps_per_sec = 1.0
max_acceleration_steps_per_sec2 = 1.0
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert!(validate_config(&config).is_ok());
}

/// Test validation fails for a zero tick period.
#[test]
fn test_zero_tick_period() {
    let toml_str = r#"
[actuator]
tick_period_ms = 0
"#;

    let result = parse_config(toml_str);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidTickPeriod(0)))
    ));
}

/// Test validation fails for non-positive limits.
#[test]
fn test_non_positive_limits() {
    let toml_str = r#"
[actuator]
max_velocity_steps_per_sec = -5.0
"#;
    assert!(matches!(
        parse_config(toml_str),
        Err(Error::Config(ConfigError::InvalidMaxVelocity(_)))
    ));

    let toml_str = r#"
[actuator]
max_acceleration_steps_per_sec2 = 0.0
"#;
    assert!(matches!(
        parse_config(toml_str),
        Err(Error::Config(ConfigError::InvalidMaxAcceleration(_)))
    ));
}
