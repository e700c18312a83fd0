//! Decoded status and fault registers.

/// Status byte returned in the upper 8 bits of every SDO frame.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaultStatus {
    raw: u8,
}

impl FaultStatus {
    /// The two framing bits that must read `11`.
    pub const FRAME_MASK: u8 = 0xC0;
    /// Undervoltage lockout.
    pub const UVLO: u8 = 1 << 5;
    /// Charge-pump undervoltage.
    pub const CPUV: u8 = 1 << 4;
    /// Overcurrent.
    pub const OCP: u8 = 1 << 3;
    /// Motor stall.
    pub const STL: u8 = 1 << 2;
    /// Overtemperature.
    pub const OT: u8 = 1 << 1;
    /// Open load.
    pub const OL: u8 = 1 << 0;
    /// Bits that put the system into the Fault state.
    pub const FAULT_MASK: u8 = Self::UVLO | Self::CPUV | Self::OCP | Self::STL | Self::OT;

    /// Wrap a raw status byte.
    #[inline]
    pub const fn from_raw(raw: u8) -> Self {
        Self { raw }
    }

    /// Raw status byte.
    #[inline]
    pub fn raw(&self) -> u8 {
        self.raw
    }

    /// Whether the framing bits read `11`.
    #[inline]
    pub fn is_valid_frame(&self) -> bool {
        self.raw & Self::FRAME_MASK == Self::FRAME_MASK
    }

    /// Whether any fault bit is set.
    #[inline]
    pub fn is_fault(&self) -> bool {
        self.raw & Self::FAULT_MASK != 0
    }

    /// Undervoltage lockout.
    #[inline]
    pub fn uvlo(&self) -> bool {
        self.raw & Self::UVLO != 0
    }

    /// Charge-pump undervoltage fault condition.
    #[inline]
    pub fn cpuv(&self) -> bool {
        self.raw & Self::CPUV != 0
    }

    /// Overcurrent condition.
    #[inline]
    pub fn ocp(&self) -> bool {
        self.raw & Self::OCP != 0
    }

    /// Motor stall.
    #[inline]
    pub fn stall(&self) -> bool {
        self.raw & Self::STL != 0
    }

    /// Overtemperature.
    #[inline]
    pub fn over_temperature(&self) -> bool {
        self.raw & Self::OT != 0
    }

    /// Open-load detection. Informational only, not a fault.
    #[inline]
    pub fn open_load(&self) -> bool {
        self.raw & Self::OL != 0
    }
}

/// FAULT register contents.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaultRegister {
    raw: u8,
}

impl FaultRegister {
    /// Wrap a raw register value.
    #[inline]
    pub const fn from_raw(raw: u8) -> Self {
        Self { raw }
    }

    /// Raw register value.
    #[inline]
    pub fn raw(&self) -> u8 {
        self.raw
    }

    /// No bits set.
    #[inline]
    pub fn is_clear(&self) -> bool {
        self.raw == 0
    }

    /// Global fault flag. Complements the nFAULT pin.
    #[inline]
    pub fn fault(&self) -> bool {
        (self.raw & (1 << 7)) != 0
    }

    /// SPI protocol error seen by the device.
    #[inline]
    pub fn spi_error(&self) -> bool {
        (self.raw & (1 << 6)) != 0
    }

    /// Undervoltage lockout.
    #[inline]
    pub fn uvlo(&self) -> bool {
        (self.raw & (1 << 5)) != 0
    }

    /// Charge-pump undervoltage.
    #[inline]
    pub fn cpuv(&self) -> bool {
        (self.raw & (1 << 4)) != 0
    }

    /// Overcurrent.
    #[inline]
    pub fn ocp(&self) -> bool {
        (self.raw & (1 << 3)) != 0
    }

    /// Motor stall.
    #[inline]
    pub fn stall(&self) -> bool {
        (self.raw & (1 << 2)) != 0
    }

    /// Overtemperature.
    #[inline]
    pub fn over_temperature(&self) -> bool {
        (self.raw & (1 << 1)) != 0
    }

    /// Open load.
    #[inline]
    pub fn open_load(&self) -> bool {
        (self.raw & 1) != 0
    }

    /// Fault bits projected onto the status byte layout.
    #[inline]
    pub fn as_status(&self) -> FaultStatus {
        FaultStatus::from_raw(FaultStatus::FRAME_MASK | (self.raw & 0x3F))
    }
}

/// Kind of register access.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Access {
    /// Register read.
    Read,
    /// Register write.
    Write,
}

/// Response of a single SPI transaction:
/// - status byte (framing and fault flags)
/// - data byte (register contents)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Response {
    /// Status byte.
    pub status: FaultStatus,
    /// Data byte.
    pub data: u8,
}

impl Response {
    /// Decode a raw 16-bit SDO frame.
    #[inline]
    pub fn from_frame(frame: u16) -> Self {
        let (status, data) = super::registers::split_response(frame);
        Self {
            status: FaultStatus::from_raw(status),
            data,
        }
    }

    /// Valid framing and no fault bits.
    #[inline]
    pub fn is_ok(&self) -> bool {
        self.status.is_valid_frame() && !self.status.is_fault()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framing_bits() {
        assert!(FaultStatus::from_raw(0xC0).is_valid_frame());
        assert!(!FaultStatus::from_raw(0x80).is_valid_frame());
        assert!(!FaultStatus::from_raw(0x40).is_valid_frame());
        assert!(!FaultStatus::from_raw(0x00).is_valid_frame());
    }

    #[test]
    fn test_open_load_is_not_a_fault() {
        let status = FaultStatus::from_raw(0xC1);
        assert!(status.open_load());
        assert!(!status.is_fault());
    }

    #[test]
    fn test_each_fault_bit() {
        assert!(FaultStatus::from_raw(0xE0).uvlo());
        assert!(FaultStatus::from_raw(0xD0).cpuv());
        assert!(FaultStatus::from_raw(0xC8).ocp());
        assert!(FaultStatus::from_raw(0xC4).stall());
        assert!(FaultStatus::from_raw(0xC2).over_temperature());
        for bit in 1..6 {
            assert!(FaultStatus::from_raw(0xC0 | (1 << bit)).is_fault());
        }
    }

    #[test]
    fn test_fault_register_projection() {
        let reg = FaultRegister::from_raw(0x88); // FAULT | OCP
        assert!(reg.fault());
        assert!(reg.ocp());
        assert!(reg.as_status().ocp());
        assert!(reg.as_status().is_valid_frame());
    }

    #[test]
    fn test_response_decoding() {
        let response = Response::from_frame(0xC41A);
        assert_eq!(response.data, 0x1A);
        assert!(response.status.stall());
        assert!(!response.is_ok());
    }
}
