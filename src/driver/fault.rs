//! Fault reporting hook.

use super::status::{Access, FaultRegister, FaultStatus};

/// What triggered a fault report.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultKind {
    /// Status byte did not start with `11`.
    InvalidFrame,
    /// One or more device fault bits were set in the status byte.
    Device,
    /// A configuration write did not read back.
    VerifyMismatch {
        /// Value written
        expected: u8,
        /// Value read back
        actual: u8,
    },
    /// The FAULT register read non-zero.
    FaultRegister(FaultRegister),
}

/// A single fault occurrence.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaultReport {
    /// Register involved.
    pub address: u8,
    /// Access that triggered the report.
    pub access: Access,
    /// Status byte of the triggering transaction.
    pub status: FaultStatus,
    /// What went wrong.
    pub kind: FaultKind,
}

/// Hook invoked once per faulted transaction or failed verification.
///
/// The protocol layer reports and carries on; deciding whether to halt
/// motion belongs to the caller.
pub trait FaultHandler {
    /// Called with the details of a fault.
    fn on_fault(&mut self, report: &FaultReport);
}

/// Default hook: logs every report at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFaults;

impl FaultHandler for LogFaults {
    fn on_fault(&mut self, report: &FaultReport) {
        error!(
            "driver fault: {:?} on {:?} of register {} (status {})",
            report.kind,
            report.access,
            report.address,
            report.status.raw()
        );
    }
}

impl<F> FaultHandler for F
where
    F: FnMut(&FaultReport),
{
    fn on_fault(&mut self, report: &FaultReport) {
        self(report)
    }
}
