//! Fault policy configuration.

use serde::Deserialize;

/// What the actuator does with motion after the driver reports a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum FaultPolicy {
    /// Stop issuing motion until the fault is cleared.
    #[default]
    Halt,
    /// Report the fault and keep issuing motion.
    Continue,
}

impl FaultPolicy {
    /// Whether a latched fault suppresses motion.
    #[inline]
    pub fn halts(self) -> bool {
        self == FaultPolicy::Halt
    }
}
