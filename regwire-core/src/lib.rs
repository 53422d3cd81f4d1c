//! Typed register access for devices on a two-wire bus
//!
//! This crate layers register semantics on top of a
//! [`BusTransport`](regwire_hal::BusTransport):
//!
//! - [`RegisterDevice`] - write, read and sequential-read/decode of
//!   fixed-width integers at register addresses
//! - [`Cursor`] - bookkeeping for decoding one bus read as several values
//! - [`DeviceConfig`] - construction-time settings (address, byte order)
//! - [`Error`], [`ContractViolation`], [`ConfigError`] - failure taxonomy
//!
//! ```ignore
//! let mut imu: RegisterDevice<_> =
//!     RegisterDevice::new(&mut bus, address, Endianness::MostSignificantFirst)?;
//!
//! imu.write(PWR_MGMT_1, 0x00u8)?;
//!
//! imu.begin_sequential_read(ACCEL_XOUT_H, 6)?;
//! let x: i16 = imu.decode()?;
//! let y: i16 = imu.decode()?;
//! let z: i16 = imu.decode()?;
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod cursor;
pub mod device;
pub mod error;

pub use config::DeviceConfig;
pub use cursor::Cursor;
pub use device::{RegisterDevice, DEFAULT_SCRATCH_CAPACITY, MIN_SCRATCH_CAPACITY};
pub use error::{ConfigError, ContractViolation, Error};

// Re-export the types needed to build and drive a device
pub use regwire_codec::{Endianness, RegisterValue, ValueKind, Word};
pub use regwire_hal::{BusTransport, DeviceAddress};
