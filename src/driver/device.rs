//! DRV8462 SPI stepper driver.
//!
//! Handles SPI framing, status validation and the power-up configuration
//! sequence. Step pulses are not generated here; see [`crate::pulse`].

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use crate::config::DriverConfig;
use crate::error::{DriverError, TransactionFault};

use super::fault::{FaultHandler, FaultKind, FaultReport, LogFaults};
use super::registers::{self, reg};
use super::status::{Access, FaultRegister, FaultStatus, Response};

/// DRV8462 driver.
///
/// Owns the SPI device (chip select is handled by the `SpiDevice`
/// implementation), the nSLEEP and ENABLE lines, and a delay used for the
/// wake-up latency.
///
/// Every transaction is checked: an invalid frame or a set fault bit invokes
/// the fault hook exactly once and latches the report until
/// [`clear_faults`](Self::clear_faults) succeeds.
pub struct Drv8462<SPI, WAKE, EN, DELAY, H = LogFaults> {
    spi: SPI,
    wake_pin: WAKE,
    enable_pin: EN,
    delay: DELAY,
    handler: H,
    latched: Option<FaultReport>,
    latches: u32,
    enabled: bool,
}

impl<SPI, WAKE, EN, DELAY, H> Drv8462<SPI, WAKE, EN, DELAY, H>
where
    SPI: SpiDevice,
    WAKE: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
    H: FaultHandler,
{
    /// Create a driver. No bus or pin activity happens until [`wake`](Self::wake).
    pub fn new(spi: SPI, wake_pin: WAKE, enable_pin: EN, delay: DELAY, handler: H) -> Self {
        Self {
            spi,
            wake_pin,
            enable_pin,
            delay,
            handler,
            latched: None,
            latches: 0,
            enabled: false,
        }
    }

    /// Release the owned peripherals.
    pub fn release(self) -> (SPI, WAKE, EN, DELAY, H) {
        (self.spi, self.wake_pin, self.enable_pin, self.delay, self.handler)
    }

    /// First fault reported since the last successful clear, if any.
    #[inline]
    pub fn latched_fault(&self) -> Option<FaultReport> {
        self.latched
    }

    /// Number of times a fault has been latched since construction.
    ///
    /// Changes whenever a new report is latched, including one that follows
    /// a clear made directly on the driver.
    #[inline]
    pub fn latch_count(&self) -> u32 {
        self.latches
    }

    /// Whether the output stage was last enabled.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Drive nSLEEP high, wait out t_wake, then hold the output stage disabled.
    pub fn wake(&mut self, wake_delay_us: u32) -> Result<(), DriverError> {
        self.wake_pin.set_high().map_err(|_| DriverError::PinError)?;

        // No bus traffic is allowed before t_wake (1.5 ms) has elapsed.
        self.delay.delay_us(wake_delay_us);

        self.enable_pin.set_low().map_err(|_| DriverError::PinError)?;
        self.enabled = false;

        debug!("driver awake after {} us", wake_delay_us);
        Ok(())
    }

    /// Run the register configuration sequence.
    ///
    /// Faults and read-back mismatches are reported and latched; the sequence
    /// still runs to the end. Only bus and pin failures abort it.
    pub fn configure(&mut self, config: &DriverConfig) -> Result<(), DriverError> {
        self.check_faults()?;

        self.modify_lenient(reg::CTRL9, |v| v | registers::EN_OL_MASK)?;

        self.write_verified(reg::CTRL10, config.idle_current.register_value())?;
        self.write_verified(reg::CTRL11, config.run_current.register_value())?;

        self.modify_lenient(reg::CTRL13, |v| v | registers::VREF_INT_MASK)?;

        info!(
            "driver configured (idle {}%, run {}%)",
            config.idle_current.value(),
            config.run_current.value()
        );
        Ok(())
    }

    /// Set EN_OUT and drive ENABLE high.
    pub fn enable(&mut self) -> Result<(), DriverError> {
        self.modify_lenient(reg::CTRL1, |v| v | registers::EN_OUT_MASK)?;
        self.enable_pin.set_high().map_err(|_| DriverError::PinError)?;
        self.enabled = true;
        Ok(())
    }

    /// Clear EN_OUT and drive ENABLE low.
    pub fn disable(&mut self) -> Result<(), DriverError> {
        self.modify_lenient(reg::CTRL1, |v| v & !registers::EN_OUT_MASK)?;
        self.enable_pin.set_low().map_err(|_| DriverError::PinError)?;
        self.enabled = false;
        Ok(())
    }

    /// Pulse CLR_FLT and re-read the FAULT register.
    ///
    /// The latched report is dropped only if the FAULT register and the
    /// status byte of that read are both clean.
    pub fn clear_faults(&mut self) -> Result<FaultRegister, DriverError> {
        self.modify_lenient(reg::CTRL4, |v| v | registers::CLR_FLT_MASK)?;

        match self.read_fault_register() {
            Ok(fault) if fault.is_clear() => {
                if self.latched.take().is_some() {
                    info!("driver faults cleared");
                }
                Ok(fault)
            }
            Ok(fault) => {
                warn!("driver faults persist after clear: {}", fault.raw());
                Ok(fault)
            }
            Err(DriverError::Fault(f)) => Ok(FaultRegister::from_raw(f.response.data)),
            Err(e) => Err(e),
        }
    }

    /// Read the FAULT register and report it if any bit is set.
    ///
    /// A read whose own status byte is faulted has already been reported and
    /// is not reported twice. The decoded register is returned either way.
    pub fn check_faults(&mut self) -> Result<FaultRegister, DriverError> {
        let fault = match self.read_register(reg::FAULT) {
            Ok(raw) => FaultRegister::from_raw(raw),
            Err(DriverError::Fault(f)) => return Ok(FaultRegister::from_raw(f.response.data)),
            Err(e) => return Err(e),
        };
        if !fault.is_clear() {
            self.report(FaultReport {
                address: reg::FAULT,
                access: Access::Read,
                status: fault.as_status(),
                kind: FaultKind::FaultRegister(fault),
            });
        }
        Ok(fault)
    }

    /// Read the FAULT register.
    pub fn read_fault_register(&mut self) -> Result<FaultRegister, DriverError> {
        Ok(FaultRegister::from_raw(self.read_register(reg::FAULT)?))
    }

    /// Write a register.
    ///
    /// Returns the response of the same transaction. A malformed or faulted
    /// response is reported and returned as [`DriverError::Fault`].
    pub fn write_register(&mut self, address: u8, value: u8) -> Result<Response, DriverError> {
        self.transaction(Access::Write, address, value)
    }

    /// Read a register.
    ///
    /// On a faulted response the decoded data byte is still available in the
    /// returned [`TransactionFault`].
    pub fn read_register(&mut self, address: u8) -> Result<u8, DriverError> {
        self.transaction(Access::Read, address, 0x00)
            .map(|response| response.data)
    }

    fn transaction(&mut self, access: Access, address: u8, data: u8) -> Result<Response, DriverError> {
        let frame = registers::encode_frame(access == Access::Read, address, data);
        let response = self.transfer(frame)?;

        if response.is_ok() {
            return Ok(response);
        }

        let kind = if response.status.is_valid_frame() {
            FaultKind::Device
        } else {
            FaultKind::InvalidFrame
        };

        self.report(FaultReport {
            address,
            access,
            status: response.status,
            kind,
        });

        Err(DriverError::Fault(TransactionFault {
            address,
            access,
            response,
        }))
    }

    /// Send a 16-bit word and receive the status + data bytes.
    fn transfer(&mut self, frame: u16) -> Result<Response, DriverError> {
        let mut buf = [(frame >> 8) as u8, frame as u8];

        self.spi
            .transfer_in_place(&mut buf)
            .map_err(|_| DriverError::Bus)?;

        let response = Response::from_frame(u16::from_be_bytes(buf));
        trace!("spi {} -> {}", frame, u16::from_be_bytes(buf));
        Ok(response)
    }

    fn report(&mut self, report: FaultReport) {
        self.handler.on_fault(&report);
        if self.latched.is_none() {
            self.latched = Some(report);
            self.latches = self.latches.wrapping_add(1);
        }
    }

    // The lenient helpers below implement report-and-continue: a faulted
    // transaction has already reached the hook, so its decoded data is used.

    fn read_lenient(&mut self, address: u8) -> Result<u8, DriverError> {
        match self.read_register(address) {
            Err(DriverError::Fault(f)) => Ok(f.response.data),
            other => other,
        }
    }

    fn write_lenient(&mut self, address: u8, value: u8) -> Result<(), DriverError> {
        match self.write_register(address, value) {
            Ok(_) | Err(DriverError::Fault(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    fn modify_lenient<F>(&mut self, address: u8, f: F) -> Result<u8, DriverError>
    where
        F: FnOnce(u8) -> u8,
    {
        let value = f(self.read_lenient(address)?);
        self.write_lenient(address, value)?;
        Ok(value)
    }

    fn write_verified(&mut self, address: u8, value: u8) -> Result<(), DriverError> {
        self.write_lenient(address, value)?;
        let actual = self.read_lenient(address)?;

        if actual != value {
            self.report(FaultReport {
                address,
                access: Access::Read,
                status: FaultStatus::from_raw(FaultStatus::FRAME_MASK),
                kind: FaultKind::VerifyMismatch {
                    expected: value,
                    actual,
                },
            });
        }

        Ok(())
    }
}
