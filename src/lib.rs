//! # cvt-actuator
//!
//! Stepper actuator core for a CVT pulley positioner, built on embedded-hal 1.0.
//!
//! ## Features
//!
//! - **DRV8462 register protocol**: bit-exact 16-bit SPI frames with status and
//!   fault decoding on every transaction
//! - **Pulse train generation**: equal-duty step bursts handed to a non-blocking
//!   pulse-timing peripheral (RMT-class)
//! - **Tick-based motion profile**: acceleration- and velocity-bounded servo with
//!   fractional-step accumulation
//! - **Explicit fault policy**: halt or continue motion after a driver fault
//! - **no_std compatible**: Core library works without standard library
//! - **Type-state safety**: the actuator cannot tick before it has been woken and
//!   configured
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cvt_actuator::driver::registers::{MAX_SPI_CLOCK_HZ, SPI_MODE};
//! use cvt_actuator::{load_config, ActuatorBuilder, SetpointChannel};
//!
//! static SETPOINT: SetpointChannel = SetpointChannel::new();
//!
//! let config = load_config("actuator.toml")?;
//!
//! // The bus must run in mode 1 at or below the device's clock limit.
//! let spi_device = hal_spi_device(SPI_MODE, MAX_SPI_CLOCK_HZ);
//!
//! let actuator = ActuatorBuilder::new()
//!     .from_config(&config)
//!     .spi(spi_device)
//!     .wake_pin(nsleep)
//!     .enable_pin(enable)
//!     .delay(delay)
//!     .pulse_peripheral(rmt_channel)
//!     .dir_pin(dir)
//!     .setpoint_channel(&SETPOINT)
//!     .build()?;
//!
//! let mut actuator = actuator.begin().map_err(|(_, e)| e)?;
//! actuator.enable()?;
//!
//! // From the controller context:
//! SETPOINT.set_setpoint(750);
//!
//! // From the periodic tick context:
//! let report = actuator.tick();
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets
//! - `log`: Enables logging through the `log` facade for hosted targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Must stay first so the logging macros are visible to the other modules.
mod fmt;

// Core modules
pub mod actuator;
pub mod config;
pub mod driver;
pub mod error;
pub mod motion;
pub mod pulse;

// Re-exports for ergonomic API
pub use actuator::{
    state, ActuatorBuilder, PeriodicTask, StepperActuator, TickReport, TickScheduler, TickStatus,
};
pub use config::{validate_config, ActuatorConfig, DriverConfig, FaultPolicy, SystemConfig};
pub use driver::{Drv8462, FaultHandler, FaultReport, FaultStatus, LogFaults};
pub use error::{Error, Result};
pub use motion::{Direction, MotionLimits, MotionState, ProfileGenerator, SetpointChannel, StepCommand};
pub use pulse::{PulseCommand, PulseItem, PulsePeripheral, PulseTiming, PulseTrain};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{CurrentPercent, StepsPerSec, StepsPerSecSquared};
