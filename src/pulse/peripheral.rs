//! Hardware pulse peripheral abstraction.

use super::item::{PulseItem, PulseTiming};

/// A timing peripheral that plays back a buffer of [`PulseItem`]s on the
/// STEP line without CPU involvement (e.g. an RMT channel).
pub trait PulsePeripheral {
    /// Peripheral error type.
    type Error: core::fmt::Debug;

    /// Apply clocking and idle level. Called once before the first burst.
    fn configure(&mut self, timing: &PulseTiming) -> Result<(), Self::Error>;

    /// Start playing `items`. Must not block until the burst ends.
    fn transmit(&mut self, items: &[PulseItem]) -> Result<(), Self::Error>;

    /// Abort the burst in flight, if any.
    fn stop(&mut self) -> Result<(), Self::Error>;
}

impl<T: PulsePeripheral + ?Sized> PulsePeripheral for &mut T {
    type Error = T::Error;

    fn configure(&mut self, timing: &PulseTiming) -> Result<(), Self::Error> {
        T::configure(self, timing)
    }

    fn transmit(&mut self, items: &[PulseItem]) -> Result<(), Self::Error> {
        T::transmit(self, items)
    }

    fn stop(&mut self) -> Result<(), Self::Error> {
        T::stop(self)
    }
}
