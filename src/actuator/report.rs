//! Per-tick outcome.

use crate::error::PulseError;

/// What happened on a control tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickStatus {
    /// No whole step was due.
    Idle,
    /// A burst was issued in full.
    Moved,
    /// A burst was issued but shortened to the buffer capacity.
    Truncated,
    /// A driver fault is latched; no motion was issued.
    Halted,
    /// The pulse train rejected the burst.
    PulseFailed(PulseError),
}

/// Snapshot of one control tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Setpoint read at the start of the tick.
    pub setpoint: i32,
    /// Position after the tick.
    pub position: i32,
    /// Whole steps planned by the profile.
    pub steps_commanded: i32,
    /// Steps handed to the pulse peripheral.
    pub steps_emitted: i32,
    /// Velocity after the tick in steps/sec.
    pub velocity: f32,
    /// Acceleration applied in steps/sec².
    pub acceleration: f32,
    /// Outcome.
    pub status: TickStatus,
}

impl TickReport {
    /// Whether steps were emitted on this tick.
    #[inline]
    pub fn moved(&self) -> bool {
        self.steps_emitted != 0
    }
}
