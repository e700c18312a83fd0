//! Actuator type-state markers.
//!
//! Uses Rust's type system to enforce valid state transitions at compile time.

/// Driver asleep, peripherals unconfigured.
#[derive(Debug, Clone, Copy, Default)]
pub struct Asleep;

/// Driver awake and configured; ticks may run.
#[derive(Debug, Clone, Copy)]
pub struct Ready;

/// Trait for actuator states.
pub trait ActuatorState: private::Sealed {}

impl ActuatorState for Asleep {}
impl ActuatorState for Ready {}

mod private {
    pub trait Sealed {}
    impl Sealed for super::Asleep {}
    impl Sealed for super::Ready {}
}

/// State name for display/debugging.
pub trait StateName {
    /// Get the state name as a static string.
    fn name() -> &'static str;
}

impl StateName for Asleep {
    fn name() -> &'static str {
        "Asleep"
    }
}

impl StateName for Ready {
    fn name() -> &'static str {
        "Ready"
    }
}
