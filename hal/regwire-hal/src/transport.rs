//! Bus transport contract
//!
//! The register layer talks to the bus in the shape most two-wire APIs
//! share: open a write transaction, push bytes, close it with or without a
//! STOP, then ask the device for a number of bytes and pull them out one
//! at a time.

use crate::address::DeviceAddress;

/// Transaction-level I2C controller
///
/// Implementations block until each step completes. A transport that is
/// shared between several devices must not be re-entered while one of its
/// methods is running.
pub trait BusTransport {
    /// Error type for transport operations
    type Error;

    /// Start a write transaction to `address`
    ///
    /// # Arguments
    /// * `address` - 7-bit device address
    fn begin_transaction(&mut self, address: DeviceAddress) -> Result<(), Self::Error>;

    /// Queue or send one byte within the active transaction
    ///
    /// # Arguments
    /// * `byte` - Next byte of the write (register address or payload)
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Finish the active write transaction
    ///
    /// With `send_stop == false` the bus is kept so a following
    /// [`request_bytes`](Self::request_bytes) issues a repeated START.
    ///
    /// # Arguments
    /// * `send_stop` - Release the bus with a STOP condition
    fn end_transaction(&mut self, send_stop: bool) -> Result<(), Self::Error>;

    /// Read `count` bytes from `address`
    ///
    /// Returns how many bytes are available to [`read_byte`](Self::read_byte).
    /// Fewer than `count` means the device stopped early.
    ///
    /// # Arguments
    /// * `address` - 7-bit device address
    /// * `count` - Number of bytes wanted
    /// * `send_stop` - Release the bus with a STOP after the read
    fn request_bytes(
        &mut self,
        address: DeviceAddress,
        count: usize,
        send_stop: bool,
    ) -> Result<usize, Self::Error>;

    /// Take the next byte from the most recent request
    fn read_byte(&mut self) -> Result<u8, Self::Error>;

    /// Write a run of bytes within the active transaction
    ///
    /// # Arguments
    /// * `data` - Bytes to write, in wire order
    fn write_bytes(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        for &byte in data {
            self.write_byte(byte)?;
        }
        Ok(())
    }
}

impl<T: BusTransport + ?Sized> BusTransport for &mut T {
    type Error = T::Error;

    fn begin_transaction(&mut self, address: DeviceAddress) -> Result<(), Self::Error> {
        T::begin_transaction(self, address)
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        T::write_byte(self, byte)
    }

    fn end_transaction(&mut self, send_stop: bool) -> Result<(), Self::Error> {
        T::end_transaction(self, send_stop)
    }

    fn request_bytes(
        &mut self,
        address: DeviceAddress,
        count: usize,
        send_stop: bool,
    ) -> Result<usize, Self::Error> {
        T::request_bytes(self, address, count, send_stop)
    }

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        T::read_byte(self)
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        T::write_bytes(self, data)
    }
}
