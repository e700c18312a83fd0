//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::{ActuatorConfig, SystemConfig};

/// Validate a system configuration.
///
/// Checks:
/// - The tick period is non-zero
/// - Velocity and acceleration limits are finite and positive
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    validate_actuator(&config.actuator)?;
    Ok(())
}

fn validate_actuator(config: &ActuatorConfig) -> Result<()> {
    if config.tick_period_ms == 0 {
        return Err(Error::Config(ConfigError::InvalidTickPeriod(
            config.tick_period_ms,
        )));
    }

    let v = config.max_velocity.value();
    if !v.is_finite() || v <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidMaxVelocity(v)));
    }

    let a = config.max_acceleration.value();
    if !a.is_finite() || a <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidMaxAcceleration(a)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::{StepsPerSec, StepsPerSecSquared};

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&SystemConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_tick_period() {
        let mut config = SystemConfig::default();
        config.actuator.tick_period_ms = 0;
        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidTickPeriod(0)))
        ));
    }

    #[test]
    fn test_invalid_limits() {
        let mut config = SystemConfig::default();
        config.actuator.max_velocity = StepsPerSec(0.0);
        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidMaxVelocity(_)))
        ));

        let mut config = SystemConfig::default();
        config.actuator.max_acceleration = StepsPerSecSquared(f32::NAN);
        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidMaxAcceleration(_)))
        ));
    }
}
