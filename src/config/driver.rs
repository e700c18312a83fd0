//! Driver IC configuration from TOML.

use serde::Deserialize;

use super::units::CurrentPercent;

/// Register settings applied during power-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DriverConfig {
    /// Standstill current (CTRL10).
    #[serde(rename = "idle_current_percent", default)]
    pub idle_current: CurrentPercent,

    /// Running current (CTRL11).
    #[serde(rename = "run_current_percent", default)]
    pub run_current: CurrentPercent,

    /// Time held after releasing nSLEEP before the first SPI frame.
    #[serde(default = "default_wake_delay_us")]
    pub wake_delay_us: u32,
}

fn default_wake_delay_us() -> u32 {
    2000
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            idle_current: CurrentPercent::default(),
            run_current: CurrentPercent::default(),
            wake_delay_us: default_wake_delay_us(),
        }
    }
}
