//! Cross-context setpoint and position exchange.

use core::sync::atomic::{AtomicI32, Ordering};

/// Setpoint written by an outer controller, position published by the tick.
///
/// Both values are independent single words, so relaxed ordering is enough.
/// `new` is `const`, which allows placing the channel in a `static` shared
/// with an interrupt handler.
///
/// ```
/// use cvt_actuator::SetpointChannel;
///
/// static CHANNEL: SetpointChannel = SetpointChannel::new();
///
/// CHANNEL.set_setpoint(1200);
/// assert_eq!(CHANNEL.setpoint(), 1200);
/// ```
#[derive(Debug, Default)]
pub struct SetpointChannel {
    setpoint: AtomicI32,
    position: AtomicI32,
}

impl SetpointChannel {
    /// Create a channel with setpoint and position at 0.
    pub const fn new() -> Self {
        Self {
            setpoint: AtomicI32::new(0),
            position: AtomicI32::new(0),
        }
    }

    /// Request a new target position in steps. No clamping is applied.
    #[inline]
    pub fn set_setpoint(&self, steps: i32) {
        self.setpoint.store(steps, Ordering::Relaxed);
    }

    /// Latest requested target position.
    #[inline]
    pub fn setpoint(&self) -> i32 {
        self.setpoint.load(Ordering::Relaxed)
    }

    /// Position as of the last completed tick.
    #[inline]
    pub fn position(&self) -> i32 {
        self.position.load(Ordering::Relaxed)
    }

    /// Publish the tracked position. Called by the control tick.
    #[inline]
    pub fn publish_position(&self, steps: i32) {
        self.position.store(steps, Ordering::Relaxed);
    }
}
