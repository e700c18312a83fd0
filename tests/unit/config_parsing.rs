//! Unit tests for TOML configuration parsing.

use cvt_actuator::config::{FaultPolicy, SystemConfig};

/// Test parsing a complete configuration.
#[test]
fn test_parse_actuator_and_driver_config() {
    let toml_str = r#"
[actuator]
name = "pulley"
tick_period_ms = 5
max_velocity_steps_per_sec = 8000.0
max_acceleration_steps_per_sec2 = 64000.0
invert_direction = true
fault_policy = "halt"

[driver]
idle_current_percent = 20
run_current_percent = 60
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.actuator.name.as_str(), "pulley");
    assert_eq!(config.actuator.tick_period_ms, 5);
    assert_eq!(config.actuator.max_velocity.0, 8000.0);
    assert_eq!(config.actuator.max_acceleration.0, 64000.0);
    assert!(config.actuator.invert_direction);
    assert_eq!(config.actuator.fault_policy, FaultPolicy::Halt);
    assert_eq!(config.driver.idle_current.register_value(), 51);
    assert_eq!(config.driver.run_current.register_value(), 153);
    assert_eq!(config.driver.wake_delay_us, 2000);
}

/// Test that omitted sections fall back to the power-up defaults.
#[test]
fn test_parse_defaults() {
    let config: SystemConfig = toml::from_str("").expect("Failed to parse TOML");

    assert_eq!(config.actuator.tick_period_ms, 10);
    assert_eq!(config.actuator.max_velocity.0, 10_000.0);
    assert_eq!(config.actuator.max_acceleration.0, 100_000.0);
    assert!(!config.actuator.invert_direction);
    assert_eq!(config.actuator.fault_probe_interval_ticks, 0);
    assert_eq!(config.driver.idle_current.value(), 10);
    assert_eq!(config.driver.run_current.value(), 10);
}

/// Test that current percentages above full scale are rejected while parsing.
#[test]
fn test_parse_rejects_invalid_current() {
    let toml_str = r#"
[driver]
idle_current_percent = 101
"#;

    let result: Result<SystemConfig, _> = toml::from_str(toml_str);
    assert!(result.is_err());
}

/// Test that the name is bounded.
#[test]
fn test_parse_rejects_long_name() {
    let toml_str = r#"
[actuator]
name = "a name that is far too long for the fixed capacity buffer"
"#;

    let result: Result<SystemConfig, _> = toml::from_str(toml_str);
    assert!(result.is_err());
}
