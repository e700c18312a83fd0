//! Actuator module for cvt-actuator.
//!
//! Provides the stepper actuator facade with type-state safety, its builder
//! and the fixed-period tick scheduler.

mod builder;
mod report;
mod scheduler;
pub mod state;
mod stepper;

pub use builder::ActuatorBuilder;
pub use report::{TickReport, TickStatus};
pub use scheduler::{PeriodicTask, TickScheduler};
pub use state::{ActuatorState, Asleep, Ready, StateName};
pub use stepper::StepperActuator;
