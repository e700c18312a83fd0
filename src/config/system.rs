//! System configuration - root configuration structure.

use serde::Deserialize;

use super::actuator::ActuatorConfig;
use super::driver::DriverConfig;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemConfig {
    /// Motion and supervision settings.
    #[serde(default)]
    pub actuator: ActuatorConfig,

    /// Driver IC register settings.
    #[serde(default)]
    pub driver: DriverConfig,
}
