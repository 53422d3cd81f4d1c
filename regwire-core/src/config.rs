//! Device configuration
//!
//! Construction-time settings for a register device. The scratch capacity
//! is a const generic on [`RegisterDevice`](crate::RegisterDevice) and is
//! not part of this struct.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use regwire_codec::Endianness;
use regwire_hal::DeviceAddress;

use crate::error::ConfigError;

/// Settings for one device on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceConfig {
    /// 7-bit bus address
    pub address: u8,
    /// Register byte order
    #[cfg_attr(feature = "serde", serde(default))]
    pub endianness: Endianness,
}

impl DeviceConfig {
    /// Create a config
    pub const fn new(address: u8, endianness: Endianness) -> Self {
        Self {
            address,
            endianness,
        }
    }

    /// Validated bus address
    pub fn device_address(&self) -> Result<DeviceAddress, ConfigError> {
        DeviceAddress::new(self.address).map_err(|e| ConfigError::InvalidAddress(e.0))
    }
}
