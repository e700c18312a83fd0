//! Error types for cvt-actuator.
//!
//! Provides unified error handling across configuration, the driver register
//! protocol, pulse generation, and the actuator facade.

use core::fmt;

use crate::driver::{Access, FaultReport, FaultStatus, Response};

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all cvt-actuator operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Driver register protocol error
    Driver(DriverError),
    /// Pulse train generation error
    Pulse(PulseError),
    /// Actuator facade error
    Actuator(ActuatorError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// A required builder field was not provided
    MissingField(&'static str),
    /// Invalid tick period (must be > 0 ms)
    InvalidTickPeriod(u32),
    /// Invalid max velocity (must be > 0)
    InvalidMaxVelocity(f32),
    /// Invalid max acceleration (must be > 0)
    InvalidMaxAcceleration(f32),
    /// Invalid current percentage (must be 0-100)
    InvalidCurrentPercent(u8),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// A register transaction whose response failed validation.
///
/// The decoded response is kept so callers can still inspect the data byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransactionFault {
    /// Register address of the transaction.
    pub address: u8,
    /// Whether the transaction was a read or a write.
    pub access: Access,
    /// Decoded response frame.
    pub response: Response,
}

impl TransactionFault {
    /// Whether the status byte failed the `11` framing check.
    #[inline]
    pub fn is_invalid_frame(&self) -> bool {
        !self.response.status.is_valid_frame()
    }

    /// Decoded fault bits of the status byte.
    #[inline]
    pub fn status(&self) -> FaultStatus {
        self.response.status
    }
}

/// Driver register protocol errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError {
    /// SPI transfer failed
    Bus,
    /// Pin operation failed (nSLEEP or ENABLE)
    PinError,
    /// Response frame invalid or reporting a device fault
    Fault(TransactionFault),
}

/// Pulse train generation errors.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PulseError {
    /// DIR pin operation failed
    PinError,
    /// Pulse peripheral rejected the configuration or burst
    Peripheral,
    /// Step frequency must be finite and > 0 for a non-zero step count
    InvalidFrequency(f32),
}

/// Actuator facade errors.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActuatorError {
    /// Motion is halted because the driver reported a fault
    Halted(FaultReport),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Driver(e) => write!(f, "Driver error: {}", e),
            Error::Pulse(e) => write!(f, "Pulse error: {}", e),
            Error::Actuator(e) => write!(f, "Actuator error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::MissingField(name) => write!(f, "{} is required", name),
            ConfigError::InvalidTickPeriod(v) => write!(f, "Invalid tick period: {} ms. Must be > 0", v),
            ConfigError::InvalidMaxVelocity(v) => write!(f, "Invalid max velocity: {}. Must be > 0", v),
            ConfigError::InvalidMaxAcceleration(v) => write!(f, "Invalid max acceleration: {}. Must be > 0", v),
            ConfigError::InvalidCurrentPercent(v) => write!(f, "Invalid current percent: {}. Must be 0-100", v),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::Bus => write!(f, "SPI transfer failed"),
            DriverError::PinError => write!(f, "GPIO pin operation failed"),
            DriverError::Fault(fault) if fault.is_invalid_frame() => write!(
                f,
                "Invalid response frame on {:?} of register 0x{:02X} (status 0x{:02X})",
                fault.access,
                fault.address,
                fault.response.status.raw()
            ),
            DriverError::Fault(fault) => write!(
                f,
                "Device fault on {:?} of register 0x{:02X} (status 0x{:02X})",
                fault.access,
                fault.address,
                fault.response.status.raw()
            ),
        }
    }
}

impl fmt::Display for PulseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PulseError::PinError => write!(f, "GPIO pin operation failed"),
            PulseError::Peripheral => write!(f, "Pulse peripheral operation failed"),
            PulseError::InvalidFrequency(hz) => {
                write!(f, "Invalid step frequency {} Hz. Must be > 0", hz)
            }
        }
    }
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActuatorError::Halted(report) => write!(
                f,
                "Motion halted by driver fault on register 0x{:02X} (status 0x{:02X})",
                report.address,
                report.status.raw()
            ),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<DriverError> for Error {
    fn from(e: DriverError) -> Self {
        Error::Driver(e)
    }
}

impl From<PulseError> for Error {
    fn from(e: PulseError) -> Self {
        Error::Pulse(e)
    }
}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Error::Actuator(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for DriverError {}

#[cfg(feature = "std")]
impl std::error::Error for PulseError {}

#[cfg(feature = "std")]
impl std::error::Error for ActuatorError {}
