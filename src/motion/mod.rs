//! Motion module for cvt-actuator.
//!
//! Provides the tick-based profile generator and the setpoint channel it
//! reads from.

mod profile;
mod setpoint;

pub use profile::{Direction, MotionLimits, MotionState, ProfileGenerator, StepCommand};
pub use setpoint::SetpointChannel;
