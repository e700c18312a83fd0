//! Actuator configuration from TOML.

use heapless::String;
use serde::Deserialize;

use super::policy::FaultPolicy;
use super::units::{StepsPerSec, StepsPerSecSquared};
use crate::motion::MotionLimits;

/// Motion and supervision settings of the actuator.
#[derive(Debug, Clone, Deserialize)]
pub struct ActuatorConfig {
    /// Human-readable name (max 32 chars).
    #[serde(default = "default_name")]
    pub name: String<32>,

    /// Control tick period in milliseconds.
    #[serde(default = "default_tick_period_ms")]
    pub tick_period_ms: u32,

    /// Maximum velocity in steps per second.
    #[serde(rename = "max_velocity_steps_per_sec", default = "default_max_velocity")]
    pub max_velocity: StepsPerSec,

    /// Maximum acceleration in steps per second squared.
    #[serde(
        rename = "max_acceleration_steps_per_sec2",
        default = "default_max_acceleration"
    )]
    pub max_acceleration: StepsPerSecSquared,

    /// Invert direction pin logic.
    #[serde(default)]
    pub invert_direction: bool,

    /// Motion behavior after a driver fault.
    #[serde(default)]
    pub fault_policy: FaultPolicy,

    /// Read the FAULT register every N ticks (0 disables probing).
    #[serde(default)]
    pub fault_probe_interval_ticks: u32,
}

fn default_name() -> String<32> {
    String::try_from("cvt").unwrap_or_default()
}

fn default_tick_period_ms() -> u32 {
    10
}

fn default_max_velocity() -> StepsPerSec {
    StepsPerSec(10_000.0)
}

fn default_max_acceleration() -> StepsPerSecSquared {
    StepsPerSecSquared(100_000.0)
}

impl Default for ActuatorConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            tick_period_ms: default_tick_period_ms(),
            max_velocity: default_max_velocity(),
            max_acceleration: default_max_acceleration(),
            invert_direction: false,
            fault_policy: FaultPolicy::default(),
            fault_probe_interval_ticks: 0,
        }
    }
}

impl ActuatorConfig {
    /// Tick period in seconds.
    #[inline]
    pub fn tick_period_secs(&self) -> f32 {
        self.tick_period_ms as f32 / 1000.0
    }

    /// Tick period in microseconds.
    #[inline]
    pub fn tick_period_us(&self) -> u32 {
        self.tick_period_ms.saturating_mul(1000)
    }

    /// Motion limits for the profile generator.
    pub fn motion_limits(&self) -> MotionLimits {
        MotionLimits::new(
            self.max_velocity,
            self.max_acceleration,
            self.tick_period_secs(),
        )
    }
}
