//! 7-bit device addressing

use core::fmt;

/// Highest valid 7-bit address
pub const MAX_ADDRESS: u8 = 0x7F;

/// A 7-bit I2C device address
///
/// Bus APIs disagree on whether an address is passed as the raw 7-bit
/// value or pre-shifted into the 8-bit header byte. This type stores the
/// raw value and offers both forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceAddress(u8);

/// Address does not fit in 7 bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidAddress(pub u8);

impl DeviceAddress {
    /// Validate and wrap a 7-bit address
    pub const fn new(address: u8) -> Result<Self, InvalidAddress> {
        if address > MAX_ADDRESS {
            Err(InvalidAddress(address))
        } else {
            Ok(Self(address))
        }
    }

    /// Raw 7-bit value
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Header byte for a write phase (R/W bit clear)
    pub const fn write_header(self) -> u8 {
        self.0 << 1
    }

    /// Header byte for a read phase (R/W bit set)
    pub const fn read_header(self) -> u8 {
        (self.0 << 1) | 1
    }
}

impl TryFrom<u8> for DeviceAddress {
    type Error = InvalidAddress;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DeviceAddress> for u8 {
    fn from(address: DeviceAddress) -> Self {
        address.0
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}

impl fmt::Display for InvalidAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "address {:#04x} does not fit in 7 bits", self.0)
    }
}
