//! Unit types for physical quantities.
//!
//! Provides type-safe representations of step rates, step accelerations and
//! current scales to prevent unit confusion at compile time.

use serde::Deserialize;

use crate::error::ConfigError;

/// Step rate in steps per second.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct StepsPerSec(pub f32);

impl StepsPerSec {
    /// Create a new StepsPerSec value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}

/// Step acceleration in steps per second squared.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct StepsPerSecSquared(pub f32);

impl StepsPerSecSquared {
    /// Create a new StepsPerSecSquared value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}

/// Driver current as a percentage of full scale (0-100).
///
/// Validated at construction. The device takes the value as a byte on a
/// 0-255 scale, see [`register_value`](Self::register_value).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CurrentPercent(u8);

impl CurrentPercent {
    /// 10 % of full scale.
    pub const TEN: Self = Self(10);
    /// Full scale.
    pub const FULL: Self = Self(100);

    /// Create a new CurrentPercent value with validation.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidCurrentPercent` if the value exceeds 100.
    pub fn new(value: u8) -> Result<Self, ConfigError> {
        if value <= 100 {
            Ok(Self(value))
        } else {
            Err(ConfigError::InvalidCurrentPercent(value))
        }
    }

    /// Get the raw percentage.
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Byte written to the current-scale registers: `round(pct * 255 / 100)`.
    #[inline]
    pub fn register_value(self) -> u8 {
        libm::roundf(self.0 as f32 * 255.0 / 100.0) as u8
    }
}

impl Default for CurrentPercent {
    fn default() -> Self {
        Self::TEN
    }
}

impl TryFrom<u8> for CurrentPercent {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for CurrentPercent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use core::fmt::Write;
        let value = u8::deserialize(deserializer)?;
        CurrentPercent::new(value).map_err(|e| {
            let mut buf = heapless::String::<128>::new();
            let _ = write!(buf, "{}", e);
            serde::de::Error::custom(buf.as_str())
        })
    }
}
