//! Step/direction pulse train generation.

use embedded_hal::digital::OutputPin;
use heapless::Vec;

use crate::error::PulseError;
use crate::motion::Direction;

use super::item::{PulseItem, PulseTiming};
use super::peripheral::PulsePeripheral;

/// Default burst capacity in steps.
pub const MAX_PULSES: usize = 1000;

/// Shortest half period in µs. A zero duration terminates an RMT burst.
pub const MIN_HALF_PERIOD_US: u16 = 1;
/// Longest half period in µs (15-bit duration field).
pub const MAX_HALF_PERIOD_US: u16 = PulseItem::MAX_DURATION;

/// One burst as issued to the peripheral.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseCommand {
    /// Steps actually emitted.
    pub step_count: u32,
    /// Steps requested before clamping to capacity.
    pub requested_steps: u32,
    /// Direction of travel.
    pub direction: Direction,
    /// High (and low) time of each step in µs.
    pub half_period_us: u16,
}

impl PulseCommand {
    /// Build the burst for a signed step count at `frequency_hz`.
    ///
    /// Returns `Ok(None)` for zero steps. The step count is clamped to
    /// `capacity` and the half period to
    /// [`MIN_HALF_PERIOD_US`]..=[`MAX_HALF_PERIOD_US`].
    pub fn plan(steps: i32, frequency_hz: f32, capacity: usize) -> Result<Option<Self>, PulseError> {
        if steps == 0 {
            return Ok(None);
        }
        if !frequency_hz.is_finite() || frequency_hz <= 0.0 {
            return Err(PulseError::InvalidFrequency(frequency_hz));
        }

        let requested_steps = steps.unsigned_abs();
        let step_count = requested_steps.min(capacity as u32);

        Ok(Some(Self {
            step_count,
            requested_steps,
            direction: Direction::from_steps(steps),
            half_period_us: half_period_us(frequency_hz),
        }))
    }

    /// Whether the burst was shortened to fit the buffer.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.step_count < self.requested_steps
    }

    /// Signed step count actually emitted.
    #[inline]
    pub fn emitted_steps(&self) -> i32 {
        self.step_count as i32 * self.direction.sign()
    }

    /// Full step period in µs.
    #[inline]
    pub fn period_us(&self) -> u32 {
        2 * self.half_period_us as u32
    }
}

/// `trunc(500000 / f)` clamped to the representable range.
fn half_period_us(frequency_hz: f32) -> u16 {
    let half = 500_000.0 / frequency_hz;
    if half >= MAX_HALF_PERIOD_US as f32 {
        debug!("{} Hz below the slowest step rate, clamped", frequency_hz);
        MAX_HALF_PERIOD_US
    } else if half < MIN_HALF_PERIOD_US as f32 {
        debug!("{} Hz above the fastest step rate, clamped", frequency_hz);
        MIN_HALF_PERIOD_US
    } else {
        half as u16
    }
}

/// Pulse train generator.
///
/// Owns the pulse peripheral, the DIR pin and a buffer of `N` items. Each
/// call to [`move_steps`](Self::move_steps) rebuilds the buffer and hands it
/// to the peripheral. There is no queue: a new burst supersedes the previous
/// one.
pub struct PulseTrain<P, DIR, const N: usize = MAX_PULSES> {
    peripheral: P,
    dir_pin: DIR,
    timing: PulseTiming,
    invert_direction: bool,
    buffer: Vec<PulseItem, N>,
    last: Option<PulseCommand>,
}

impl<P, DIR, const N: usize> PulseTrain<P, DIR, N>
where
    P: PulsePeripheral,
    DIR: OutputPin,
{
    /// Create a pulse train with the default 1 µs timing.
    pub fn new(peripheral: P, dir_pin: DIR) -> Self {
        Self::with_timing(peripheral, dir_pin, PulseTiming::default())
    }

    /// Create a pulse train with explicit timing.
    pub fn with_timing(peripheral: P, dir_pin: DIR, timing: PulseTiming) -> Self {
        Self {
            peripheral,
            dir_pin,
            timing,
            invert_direction: false,
            buffer: Vec::new(),
            last: None,
        }
    }

    /// Invert the DIR pin logic.
    pub fn set_invert_direction(&mut self, invert: bool) {
        self.invert_direction = invert;
    }

    /// Burst capacity in steps.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Peripheral timing.
    #[inline]
    pub fn timing(&self) -> &PulseTiming {
        &self.timing
    }

    /// Last burst issued.
    #[inline]
    pub fn last_command(&self) -> Option<PulseCommand> {
        self.last
    }

    /// Release the peripheral and DIR pin.
    pub fn release(self) -> (P, DIR) {
        (self.peripheral, self.dir_pin)
    }

    /// Apply timing to the peripheral.
    pub fn configure(&mut self) -> Result<(), PulseError> {
        self.peripheral
            .configure(&self.timing)
            .map_err(|_| PulseError::Peripheral)?;
        debug!(
            "pulse peripheral configured: {} Hz resolution",
            self.timing.resolution_hz()
        );
        Ok(())
    }

    /// Emit `steps` pulses at `frequency_hz`; the sign selects direction.
    ///
    /// Zero steps touches neither the DIR pin nor the peripheral.
    pub fn move_steps(
        &mut self,
        steps: i32,
        frequency_hz: f32,
    ) -> Result<Option<PulseCommand>, PulseError> {
        let command = match PulseCommand::plan(steps, frequency_hz, N)? {
            Some(command) => command,
            None => return Ok(None),
        };

        if command.is_truncated() {
            warn!(
                "burst of {} steps truncated to {}",
                command.requested_steps,
                command.step_count
            );
        }

        self.set_direction(command.direction)?;

        self.buffer.clear();
        self.buffer
            .resize(command.step_count as usize, PulseItem::step(command.half_period_us))
            .map_err(|_| PulseError::Peripheral)?;

        self.peripheral
            .transmit(&self.buffer)
            .map_err(|_| PulseError::Peripheral)?;

        trace!(
            "burst: {} steps, half period {} us",
            command.emitted_steps(),
            command.half_period_us
        );
        self.last = Some(command);
        Ok(Some(command))
    }

    /// Abort the burst in flight.
    pub fn stop(&mut self) -> Result<(), PulseError> {
        self.peripheral.stop().map_err(|_| PulseError::Peripheral)
    }

    fn set_direction(&mut self, direction: Direction) -> Result<(), PulseError> {
        let pin_direction = if self.invert_direction {
            direction.reversed()
        } else {
            direction
        };
        if pin_direction == Direction::Forward {
            self.dir_pin.set_high().map_err(|_| PulseError::PinError)
        } else {
            self.dir_pin.set_low().map_err(|_| PulseError::PinError)
        }
    }
}
