//! Configuration module for cvt-actuator.
//!
//! Provides types for loading and validating actuator and driver settings
//! from TOML files (with `std` feature) or built in code.

mod actuator;
mod driver;
mod policy;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use actuator::ActuatorConfig;
pub use driver::DriverConfig;
pub use policy::FaultPolicy;
pub use system::SystemConfig;
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

pub use units::{CurrentPercent, StepsPerSec, StepsPerSecSquared};
