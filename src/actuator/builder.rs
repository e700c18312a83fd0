//! Builder pattern for StepperActuator.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use crate::config::units::{StepsPerSec, StepsPerSecSquared};
use crate::config::{ActuatorConfig, DriverConfig, FaultPolicy, SystemConfig};
use crate::driver::{Drv8462, FaultHandler, LogFaults};
use crate::error::{ConfigError, Error, Result};
use crate::motion::SetpointChannel;
use crate::pulse::{PulsePeripheral, PulseTiming, PulseTrain};

use super::state::Asleep;
use super::stepper::StepperActuator;

/// Builder for creating StepperActuator instances.
pub struct ActuatorBuilder<'a, SPI, WAKE, EN, DELAY, P, DIR, H = LogFaults> {
    spi: Option<SPI>,
    wake_pin: Option<WAKE>,
    enable_pin: Option<EN>,
    delay: Option<DELAY>,
    peripheral: Option<P>,
    dir_pin: Option<DIR>,
    handler: H,
    channel: Option<&'a SetpointChannel>,
    timing: PulseTiming,
    actuator: ActuatorConfig,
    driver: DriverConfig,
}

impl<'a, SPI, WAKE, EN, DELAY, P, DIR> Default for ActuatorBuilder<'a, SPI, WAKE, EN, DELAY, P, DIR, LogFaults> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, SPI, WAKE, EN, DELAY, P, DIR> ActuatorBuilder<'a, SPI, WAKE, EN, DELAY, P, DIR, LogFaults> {
    /// Create a new builder that logs driver faults.
    pub fn new() -> Self {
        Self {
            spi: None,
            wake_pin: None,
            enable_pin: None,
            delay: None,
            peripheral: None,
            dir_pin: None,
            handler: LogFaults,
            channel: None,
            timing: PulseTiming::default(),
            actuator: ActuatorConfig::default(),
            driver: DriverConfig::default(),
        }
    }
}

impl<'a, SPI, WAKE, EN, DELAY, P, DIR, H> ActuatorBuilder<'a, SPI, WAKE, EN, DELAY, P, DIR, H> {
    /// Set the SPI device of the driver IC.
    pub fn spi(mut self, spi: SPI) -> Self {
        self.spi = Some(spi);
        self
    }

    /// Set the nSLEEP pin.
    pub fn wake_pin(mut self, pin: WAKE) -> Self {
        self.wake_pin = Some(pin);
        self
    }

    /// Set the ENABLE pin.
    pub fn enable_pin(mut self, pin: EN) -> Self {
        self.enable_pin = Some(pin);
        self
    }

    /// Set the delay provider used for the wake-up latency.
    pub fn delay(mut self, delay: DELAY) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the STEP pulse peripheral.
    pub fn pulse_peripheral(mut self, peripheral: P) -> Self {
        self.peripheral = Some(peripheral);
        self
    }

    /// Set the DIR pin.
    pub fn dir_pin(mut self, pin: DIR) -> Self {
        self.dir_pin = Some(pin);
        self
    }

    /// Set the channel the setpoint is read from.
    pub fn setpoint_channel(mut self, channel: &'a SetpointChannel) -> Self {
        self.channel = Some(channel);
        self
    }

    /// Replace the fault hook.
    pub fn fault_handler<H2>(self, handler: H2) -> ActuatorBuilder<'a, SPI, WAKE, EN, DELAY, P, DIR, H2> {
        ActuatorBuilder {
            spi: self.spi,
            wake_pin: self.wake_pin,
            enable_pin: self.enable_pin,
            delay: self.delay,
            peripheral: self.peripheral,
            dir_pin: self.dir_pin,
            handler,
            channel: self.channel,
            timing: self.timing,
            actuator: self.actuator,
            driver: self.driver,
        }
    }

    /// Set the actuator name.
    pub fn name(mut self, name: &str) -> Self {
        if let Ok(name) = heapless::String::try_from(name) {
            self.actuator.name = name;
        }
        self
    }

    /// Set the control tick period in milliseconds.
    pub fn tick_period_ms(mut self, period: u32) -> Self {
        self.actuator.tick_period_ms = period;
        self
    }

    /// Set maximum velocity in steps per second.
    pub fn max_velocity(mut self, velocity: StepsPerSec) -> Self {
        self.actuator.max_velocity = velocity;
        self
    }

    /// Set maximum acceleration in steps per second squared.
    pub fn max_acceleration(mut self, acceleration: StepsPerSecSquared) -> Self {
        self.actuator.max_acceleration = acceleration;
        self
    }

    /// Set direction inversion.
    pub fn invert_direction(mut self, invert: bool) -> Self {
        self.actuator.invert_direction = invert;
        self
    }

    /// Set the fault policy.
    pub fn fault_policy(mut self, policy: FaultPolicy) -> Self {
        self.actuator.fault_policy = policy;
        self
    }

    /// Set pulse peripheral timing.
    pub fn pulse_timing(mut self, timing: PulseTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Set driver register settings.
    pub fn driver_config(mut self, config: DriverConfig) -> Self {
        self.driver = config;
        self
    }

    /// Configure from an ActuatorConfig.
    pub fn from_actuator_config(mut self, config: &ActuatorConfig) -> Self {
        self.actuator = config.clone();
        self
    }

    /// Configure from SystemConfig.
    pub fn from_config(self, config: &SystemConfig) -> Self {
        self.from_actuator_config(&config.actuator)
            .driver_config(config.driver)
    }
}

impl<'a, SPI, WAKE, EN, DELAY, P, DIR, H> ActuatorBuilder<'a, SPI, WAKE, EN, DELAY, P, DIR, H>
where
    SPI: SpiDevice,
    WAKE: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
    P: PulsePeripheral,
    DIR: OutputPin,
    H: FaultHandler,
{
    /// Build the StepperActuator.
    ///
    /// # Errors
    ///
    /// Returns an error if a required part is missing or the settings are
    /// invalid.
    pub fn build(self) -> Result<StepperActuator<'a, SPI, WAKE, EN, DELAY, P, DIR, H, Asleep>> {
        let spi = self.spi.ok_or(Error::Config(ConfigError::MissingField("spi")))?;
        let wake_pin = self
            .wake_pin
            .ok_or(Error::Config(ConfigError::MissingField("wake_pin")))?;
        let enable_pin = self
            .enable_pin
            .ok_or(Error::Config(ConfigError::MissingField("enable_pin")))?;
        let delay = self.delay.ok_or(Error::Config(ConfigError::MissingField("delay")))?;
        let peripheral = self
            .peripheral
            .ok_or(Error::Config(ConfigError::MissingField("pulse_peripheral")))?;
        let dir_pin = self
            .dir_pin
            .ok_or(Error::Config(ConfigError::MissingField("dir_pin")))?;
        let channel = self
            .channel
            .ok_or(Error::Config(ConfigError::MissingField("setpoint_channel")))?;

        crate::config::validate_config(&SystemConfig {
            actuator: self.actuator.clone(),
            driver: self.driver,
        })?;

        let driver = Drv8462::new(spi, wake_pin, enable_pin, delay, self.handler);
        let pulses = PulseTrain::with_timing(peripheral, dir_pin, self.timing);

        Ok(StepperActuator::new(
            driver,
            pulses,
            channel,
            self.actuator,
            self.driver,
        ))
    }
}
