//! Pulse train generation.
//!
//! Converts a signed step count and a step rate into a burst of identical
//! pulses played back by a hardware timing peripheral, with the DIR line
//! set beforehand.

mod item;
mod peripheral;
mod train;

pub use item::{PulseItem, PulseTiming};
pub use peripheral::PulsePeripheral;
pub use train::{PulseCommand, PulseTrain, MAX_HALF_PERIOD_US, MAX_PULSES, MIN_HALF_PERIOD_US};
