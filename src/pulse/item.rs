//! Pulse descriptors and peripheral timing.

/// One high/low pair of the pulse peripheral, in ticks of its resolution.
///
/// Raw layout matches the RMT item word:
///
/// | bits   | field     |
/// | ------ | --------- |
/// | 14..0  | duration0 |
/// | 15     | level0    |
/// | 30..16 | duration1 |
/// | 31     | level1    |
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseItem {
    /// Level of the first half.
    pub level0: bool,
    /// Length of the first half in ticks.
    pub duration0: u16,
    /// Level of the second half.
    pub level1: bool,
    /// Length of the second half in ticks.
    pub duration1: u16,
}

impl PulseItem {
    /// Largest duration representable in 15 bits.
    pub const MAX_DURATION: u16 = 0x7FFF;

    /// One step: high for `half_period`, then low for `half_period`.
    #[inline]
    pub const fn step(half_period: u16) -> Self {
        Self {
            level0: true,
            duration0: half_period,
            level1: false,
            duration1: half_period,
        }
    }

    /// Encode to the 32-bit raw word.
    #[inline]
    pub fn to_raw(&self) -> u32 {
        let mut raw = (self.duration0 & Self::MAX_DURATION) as u32;
        raw |= (self.level0 as u32) << 15;
        raw |= ((self.duration1 & Self::MAX_DURATION) as u32) << 16;
        raw |= (self.level1 as u32) << 31;
        raw
    }

    /// Full period in ticks.
    #[inline]
    pub fn period(&self) -> u32 {
        self.duration0 as u32 + self.duration1 as u32
    }
}

/// Clocking of the pulse peripheral.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseTiming {
    /// Source clock feeding the peripheral.
    pub source_clock_hz: u32,
    /// Integer divider applied to the source clock.
    pub clock_divider: u8,
    /// Output level between bursts.
    pub idle_level: bool,
}

impl PulseTiming {
    /// Tick rate after division.
    #[inline]
    pub fn resolution_hz(&self) -> u32 {
        self.source_clock_hz / self.clock_divider.max(1) as u32
    }
}

impl Default for PulseTiming {
    /// 80 MHz / 80 = 1 µs ticks, idle low.
    fn default() -> Self {
        Self {
            source_clock_hz: 80_000_000,
            clock_divider: 80,
            idle_level: false,
        }
    }
}
