//! Regwire bus transport layer
//!
//! This crate defines the transaction-level contract that register access
//! code drives, plus the pieces needed to plug a real bus into it. Chip
//! HALs expose `embedded_hal::i2c::I2c`; [`BufferedTransport`] turns that
//! into the byte-at-a-time [`BusTransport`] shape.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Register access (regwire-core)         │
//! └─────────────────────────────────────────┘
//!                     │  BusTransport
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  regwire-hal (this crate)               │
//! │  BufferedTransport / SharedTransport    │
//! └─────────────────────────────────────────┘
//!                     │  embedded_hal::i2c::I2c
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  Chip HAL (embassy-rp, stm32, linux...) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`transport::BusTransport`] - begin/write/end/request/read contract
//! - [`address::DeviceAddress`] - validated 7-bit bus address
//! - [`i2c::BufferedTransport`] - adapter over `embedded_hal::i2c::I2c`
//! - [`shared::SharedTransport`] - one bus, many device handles
//! - `mock::MockTransport` - scripted fake (feature `mock`)

#![no_std]
#![deny(unsafe_code)]

#[cfg(any(test, feature = "mock"))]
extern crate std;

pub mod address;
pub mod error;
pub mod i2c;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod shared;
pub mod transport;

// Re-export key types at crate root for convenience
pub use address::{DeviceAddress, InvalidAddress};
pub use error::{BusErrorKind, NackSource, TransportError};
pub use i2c::BufferedTransport;
pub use shared::SharedTransport;
pub use transport::BusTransport;
