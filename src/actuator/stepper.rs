//! Stepper actuator.
//!
//! Ties the driver IC, the pulse train and the profile generator together
//! behind a type-state facade.

use core::marker::PhantomData;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use crate::config::{ActuatorConfig, DriverConfig};
use crate::driver::{Drv8462, FaultHandler, FaultRegister, FaultReport, LogFaults};
use crate::error::{ActuatorError, Error, Result};
use crate::motion::{ProfileGenerator, SetpointChannel};
use crate::pulse::{PulsePeripheral, PulseTrain};

use super::report::{TickReport, TickStatus};
use super::scheduler::PeriodicTask;
use super::state::{ActuatorState, Asleep, Ready, StateName};

/// Stepper actuator with type-state safety.
///
/// Generic over:
/// - `SPI`, `WAKE`, `EN`, `DELAY`, `H`: the [`Drv8462`] parts
/// - `P`, `DIR`: the [`PulseTrain`] parts
/// - `STATE`: Type-state marker (defaults to `Asleep`)
///
/// The setpoint is read from a [`SetpointChannel`] that may be shared with
/// other execution contexts.
pub struct StepperActuator<'a, SPI, WAKE, EN, DELAY, P, DIR, H = LogFaults, STATE = Asleep>
where
    SPI: SpiDevice,
    WAKE: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
    P: PulsePeripheral,
    DIR: OutputPin,
    H: FaultHandler,
    STATE: ActuatorState,
{
    driver: Drv8462<SPI, WAKE, EN, DELAY, H>,
    pulses: PulseTrain<P, DIR>,
    profile: ProfileGenerator,
    channel: &'a SetpointChannel,
    config: ActuatorConfig,
    driver_config: DriverConfig,

    /// Latch for which motion has already been stopped.
    halted_latch: Option<u32>,

    /// Ticks since `begin`, for fault probing.
    ticks: u32,

    _state: PhantomData<STATE>,
}

impl<'a, SPI, WAKE, EN, DELAY, P, DIR, H, STATE> StepperActuator<'a, SPI, WAKE, EN, DELAY, P, DIR, H, STATE>
where
    SPI: SpiDevice,
    WAKE: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
    P: PulsePeripheral,
    DIR: OutputPin,
    H: FaultHandler,
    STATE: ActuatorState + StateName,
{
    /// Get the actuator name.
    #[inline]
    pub fn name(&self) -> &str {
        self.config.name.as_str()
    }

    /// Get the current state name.
    #[inline]
    pub fn state_name(&self) -> &'static str {
        STATE::name()
    }

    /// Actuator settings.
    #[inline]
    pub fn config(&self) -> &ActuatorConfig {
        &self.config
    }

    /// Request a new target position in steps.
    #[inline]
    pub fn set_setpoint(&self, steps: i32) {
        self.channel.set_setpoint(steps);
    }

    /// Latest requested target position.
    #[inline]
    pub fn setpoint(&self) -> i32 {
        self.channel.setpoint()
    }

    /// Open-loop position in steps.
    #[inline]
    pub fn position(&self) -> i32 {
        self.profile.position()
    }

    /// Current velocity in steps/sec.
    #[inline]
    pub fn velocity(&self) -> f32 {
        self.profile.velocity()
    }

    /// First driver fault since the last successful clear.
    #[inline]
    pub fn latched_fault(&self) -> Option<FaultReport> {
        self.driver.latched_fault()
    }

    /// Access the driver IC.
    #[inline]
    pub fn driver_mut(&mut self) -> &mut Drv8462<SPI, WAKE, EN, DELAY, H> {
        &mut self.driver
    }

    /// Release the driver and pulse train.
    pub fn release(self) -> (Drv8462<SPI, WAKE, EN, DELAY, H>, PulseTrain<P, DIR>) {
        (self.driver, self.pulses)
    }

    fn into_state<S: ActuatorState>(self) -> StepperActuator<'a, SPI, WAKE, EN, DELAY, P, DIR, H, S> {
        StepperActuator {
            driver: self.driver,
            pulses: self.pulses,
            profile: self.profile,
            channel: self.channel,
            config: self.config,
            driver_config: self.driver_config,
            halted_latch: self.halted_latch,
            ticks: self.ticks,
            _state: PhantomData,
        }
    }
}

impl<'a, SPI, WAKE, EN, DELAY, P, DIR, H> StepperActuator<'a, SPI, WAKE, EN, DELAY, P, DIR, H, Asleep>
where
    SPI: SpiDevice,
    WAKE: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
    P: PulsePeripheral,
    DIR: OutputPin,
    H: FaultHandler,
{
    pub(crate) fn new(
        driver: Drv8462<SPI, WAKE, EN, DELAY, H>,
        mut pulses: PulseTrain<P, DIR>,
        channel: &'a SetpointChannel,
        config: ActuatorConfig,
        driver_config: DriverConfig,
    ) -> Self {
        pulses.set_invert_direction(config.invert_direction);
        let profile = ProfileGenerator::at(config.motion_limits(), channel.position());
        Self {
            driver,
            pulses,
            profile,
            channel,
            config,
            driver_config,
            halted_latch: None,
            ticks: 0,
            _state: PhantomData,
        }
    }

    /// Power-up sequence: wake the driver, configure the pulse peripheral,
    /// then configure the driver registers.
    ///
    /// Faults reported by the driver during configuration are latched but do
    /// not fail `begin`. Bus, pin and peripheral failures do.
    pub fn begin(
        mut self,
    ) -> core::result::Result<StepperActuator<'a, SPI, WAKE, EN, DELAY, P, DIR, H, Ready>, (Self, Error)>
    {
        if let Err(e) = self.driver.wake(self.driver_config.wake_delay_us) {
            return Err((self, e.into()));
        }
        if let Err(e) = self.pulses.configure() {
            return Err((self, e.into()));
        }
        let driver_config = self.driver_config;
        if let Err(e) = self.driver.configure(&driver_config) {
            return Err((self, e.into()));
        }

        if let Some(report) = self.driver.latched_fault() {
            warn!(
                "{} started with a latched driver fault on register {}",
                self.config.name.as_str(),
                report.address
            );
        } else {
            info!("{} ready", self.config.name.as_str());
        }

        self.channel.publish_position(self.profile.position());
        Ok(self.into_state())
    }
}

impl<'a, SPI, WAKE, EN, DELAY, P, DIR, H> StepperActuator<'a, SPI, WAKE, EN, DELAY, P, DIR, H, Ready>
where
    SPI: SpiDevice,
    WAKE: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
    P: PulsePeripheral,
    DIR: OutputPin,
    H: FaultHandler,
{
    /// Enable the driver output stage.
    ///
    /// # Errors
    ///
    /// Returns [`ActuatorError::Halted`] if a fault is latched and the fault
    /// policy halts motion.
    pub fn enable(&mut self) -> Result<()> {
        if let Some(report) = self.halting_fault() {
            return Err(Error::Actuator(ActuatorError::Halted(report)));
        }
        self.driver.enable()?;
        Ok(())
    }

    /// Stop pulses and disable the driver output stage.
    pub fn disable(&mut self) -> Result<()> {
        self.stop()?;
        self.driver.disable()?;
        Ok(())
    }

    /// Abort the burst in flight and drop velocity. Position is kept.
    pub fn stop(&mut self) -> Result<()> {
        self.profile.halt();
        self.pulses.stop()?;
        Ok(())
    }

    /// Clear driver faults. Returns `true` once the FAULT register reads clean.
    pub fn clear_faults(&mut self) -> Result<bool> {
        let fault = self.driver.clear_faults()?;
        Ok(fault.is_clear() && self.driver.latched_fault().is_none())
    }

    /// Read the FAULT register, reporting and latching anything set.
    pub fn probe_faults(&mut self) -> Result<FaultRegister> {
        Ok(self.driver.check_faults()?)
    }

    /// Run one control tick.
    ///
    /// Reads the setpoint, plans the step command, issues it to the pulse
    /// train and advances the position by what was emitted. Never fails;
    /// problems are logged and reflected in the returned report.
    pub fn tick(&mut self) -> TickReport {
        self.ticks = self.ticks.wrapping_add(1);
        self.probe_if_due();

        let setpoint = self.channel.setpoint();

        if let Some(report) = self.halting_fault() {
            // Keyed on the latch, so a clear made through `driver_mut`
            // still gets a fresh stop on the next fault.
            let latch = self.driver.latch_count();
            if self.halted_latch != Some(latch) {
                self.halted_latch = Some(latch);
                self.profile.halt();
                if self.pulses.stop().is_err() {
                    error!("{}: failed to stop pulse train", self.config.name.as_str());
                }
                warn!(
                    "{}: motion halted by driver fault on register {}",
                    self.config.name.as_str(),
                    report.address
                );
            }
            return TickReport {
                setpoint,
                position: self.profile.position(),
                steps_commanded: 0,
                steps_emitted: 0,
                velocity: 0.0,
                acceleration: 0.0,
                status: TickStatus::Halted,
            };
        }

        let command = self.profile.plan(setpoint);

        let (emitted, status) = match self.pulses.move_steps(command.steps, command.frequency_hz) {
            Ok(None) => (0, TickStatus::Idle),
            Ok(Some(burst)) if burst.is_truncated() => (burst.emitted_steps(), TickStatus::Truncated),
            Ok(Some(burst)) => (burst.emitted_steps(), TickStatus::Moved),
            Err(e) => {
                error!("{}: burst rejected: {:?}", self.config.name.as_str(), e);
                (0, TickStatus::PulseFailed(e))
            }
        };

        self.profile.commit(emitted);
        self.channel.publish_position(self.profile.position());

        TickReport {
            setpoint,
            position: self.profile.position(),
            steps_commanded: command.steps,
            steps_emitted: emitted,
            velocity: command.velocity,
            acceleration: command.acceleration,
            status,
        }
    }

    /// Stop motion, disable the output stage and return to `Asleep`.
    pub fn shutdown(mut self) -> Result<StepperActuator<'a, SPI, WAKE, EN, DELAY, P, DIR, H, Asleep>> {
        self.disable()?;
        Ok(self.into_state())
    }

    fn halting_fault(&self) -> Option<FaultReport> {
        if self.config.fault_policy.halts() {
            self.driver.latched_fault()
        } else {
            None
        }
    }

    fn probe_if_due(&mut self) {
        let interval = self.config.fault_probe_interval_ticks;
        if interval == 0 || self.ticks % interval != 0 {
            return;
        }
        if let Err(e) = self.driver.check_faults() {
            error!("{}: fault probe failed: {:?}", self.config.name.as_str(), e);
        }
    }
}

impl<'a, SPI, WAKE, EN, DELAY, P, DIR, H> PeriodicTask
    for StepperActuator<'a, SPI, WAKE, EN, DELAY, P, DIR, H, Ready>
where
    SPI: SpiDevice,
    WAKE: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
    P: PulsePeripheral,
    DIR: OutputPin,
    H: FaultHandler,
{
    fn period_us(&self) -> u32 {
        self.config.tick_period_us()
    }

    fn run(&mut self) {
        self.tick();
    }
}
