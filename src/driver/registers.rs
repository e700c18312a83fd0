//! DRV8462 register map and SPI frame layout.
//!
//! SDI frame (16 bits, MSB first, SPI mode 1):
//!
//! | B15 | B14 | B13..B8 | B7..B0 |
//! | --- | --- | ------- | ------ |
//! | 0   | R/W (1 = read) | address | data |
//!
//! SDO frame: status byte in the upper 8 bits, register data in the lower 8.

use embedded_hal::spi::{Mode, MODE_1};

/// SPI mode required by the device (CPOL = 0, CPHA = 1).
pub const SPI_MODE: Mode = MODE_1;

/// Maximum SCLK frequency accepted by the device.
pub const MAX_SPI_CLOCK_HZ: u32 = 10_000_000;

/// Bit position of the address field.
pub const ADDRESS_POS: u16 = 8;
/// Mask of the address field within the frame.
pub const ADDRESS_MASK: u16 = 0x3F00;
/// Bit position of the data field.
pub const DATA_POS: u16 = 0;
/// Mask of the data field within the frame.
pub const DATA_MASK: u16 = 0x00FF;
/// Read flag (set for reads, clear for writes).
pub const RW_BIT_MASK: u16 = 1 << 14;

/// Register addresses
pub mod reg {
    /// Fault status register.
    pub const FAULT: u8 = 0x00;
    /// Diagnostic status 1 (per-FET overcurrent).
    pub const DIAG1: u8 = 0x01;
    /// Diagnostic status 2 (thermal, stall, open load).
    pub const DIAG2: u8 = 0x02;
    /// Diagnostic status 3.
    pub const DIAG3: u8 = 0x03;
    /// Output enable, slew rate, decay mode.
    pub const CTRL1: u8 = 0x04;
    /// Off time and blanking.
    pub const CTRL2: u8 = 0x05;
    /// Direction/step inputs and microstep mode.
    pub const CTRL3: u8 = 0x06;
    /// Fault clear and protection modes.
    pub const CTRL4: u8 = 0x07;
    /// Stall detection.
    pub const CTRL5: u8 = 0x08;
    /// Stall threshold.
    pub const CTRL6: u8 = 0x09;
    /// Torque count.
    pub const CTRL7: u8 = 0x0A;
    /// Torque count (high bits).
    pub const CTRL8: u8 = 0x0B;
    /// Open-load detection and standstill power saving.
    pub const CTRL9: u8 = 0x0C;
    /// Standstill (idle) current scale.
    pub const CTRL10: u8 = 0x0D;
    /// Running current scale (TRQ_DAC).
    pub const CTRL11: u8 = 0x0E;
    /// Auto-torque configuration.
    pub const CTRL12: u8 = 0x0F;
    /// Voltage reference selection.
    pub const CTRL13: u8 = 0x10;
}

/// CTRL1: enable the output stage.
pub const EN_OUT_MASK: u8 = 1 << 7;
/// CTRL4: clear latched faults.
pub const CLR_FLT_MASK: u8 = 1 << 7;
/// CTRL9: enable open-load detection.
pub const EN_OL_MASK: u8 = 1 << 6;
/// CTRL13: use the internal voltage reference.
pub const VREF_INT_MASK: u8 = 1 << 4;

/// Build a 16-bit SDI frame.
#[inline]
pub fn encode_frame(is_read: bool, address: u8, data: u8) -> u16 {
    let mut frame: u16 = 0;

    frame |= ((address as u16) << ADDRESS_POS) & ADDRESS_MASK;
    frame |= ((data as u16) << DATA_POS) & DATA_MASK;

    if is_read {
        frame |= RW_BIT_MASK;
    }

    frame
}

/// Split an SDO frame into `(status, data)`.
#[inline]
pub fn split_response(frame: u16) -> (u8, u8) {
    let status = (frame >> 8) as u8;
    let data = ((frame & DATA_MASK) >> DATA_POS) as u8;
    (status, data)
}
