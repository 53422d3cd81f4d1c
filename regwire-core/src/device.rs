//! Register access facade
//!
//! A [`RegisterDevice`] drives one peer on the bus. Every public operation
//! runs its whole bus transaction before returning:
//!
//! ```text
//! write(reg, v)    START addr+W  reg  v[0..n]                       STOP
//! read(reg)        START addr+W  reg  RESTART addr+R  v[0..n]       STOP
//! sequential read  START addr+W  reg  RESTART addr+R  b[0..len]     STOP
//!                  then decode() any number of times, no bus traffic
//! ```
//!
//! The scratch buffer is `N` bytes. Writes place the register address at
//! offset 0 and the payload after it, so the longest sequential read is
//! `N - 1` bytes.

use regwire_codec::{codec, Endianness, RegisterValue, ValueKind, Word, MAX_VALUE_SIZE};
use regwire_hal::{BusTransport, DeviceAddress};

use crate::config::DeviceConfig;
use crate::cursor::Cursor;
use crate::error::{ConfigError, ContractViolation, Error};

/// Smallest usable scratch buffer: register address plus the widest value
pub const MIN_SCRATCH_CAPACITY: usize = 1 + MAX_VALUE_SIZE;

/// Scratch capacity used when none is given
pub const DEFAULT_SCRATCH_CAPACITY: usize = 32;

/// Handle for one device on the bus
///
/// The transport is usually `&mut T` or a
/// [`SharedTransport`](regwire_hal::SharedTransport). The handle is neither
/// `Clone` nor `Copy`: its scratch buffer and cursor belong to it alone.
pub struct RegisterDevice<T, const N: usize = DEFAULT_SCRATCH_CAPACITY> {
    transport: T,
    address: DeviceAddress,
    endianness: Endianness,
    scratch: [u8; N],
    cursor: Cursor,
}

impl<T, const N: usize> RegisterDevice<T, N>
where
    T: BusTransport,
{
    /// Longest sequential read this handle accepts
    pub const READ_CAPACITY: usize = N.saturating_sub(1);

    /// Create a device handle
    ///
    /// Fails if `N` is below [`MIN_SCRATCH_CAPACITY`].
    pub fn new(
        transport: T,
        address: DeviceAddress,
        endianness: Endianness,
    ) -> Result<Self, ConfigError> {
        if N < MIN_SCRATCH_CAPACITY {
            return Err(ConfigError::CapacityTooSmall {
                capacity: N,
                minimum: MIN_SCRATCH_CAPACITY,
            });
        }

        Ok(Self {
            transport,
            address,
            endianness,
            scratch: [0; N],
            cursor: Cursor::default(),
        })
    }

    /// Create a device handle from a [`DeviceConfig`]
    pub fn from_config(transport: T, config: &DeviceConfig) -> Result<Self, ConfigError> {
        let address = config.device_address()?;
        Self::new(transport, address, config.endianness)
    }

    /// Bus address of the device
    pub fn address(&self) -> DeviceAddress {
        self.address
    }

    /// Register byte order
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Current read window
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Bytes left in the read window before the cursor wraps
    pub fn remaining(&self) -> usize {
        self.cursor.remaining()
    }

    /// Borrow the transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutably borrow the transport
    ///
    /// Bus traffic issued through this borrow does not touch the read
    /// window.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Give the transport back
    pub fn release(self) -> T {
        self.transport
    }

    /// Write `value` to register `reg`
    ///
    /// Sends `reg` followed by the encoded value in one transaction ending
    /// with STOP. The scratch buffer is reused, so any buffered read window
    /// is dropped.
    pub fn write<V: RegisterValue>(&mut self, reg: u8, value: V) -> Result<(), Error<T::Error>> {
        self.cursor.clear();
        self.scratch[0] = reg;
        let len = codec::encode_into(value, self.endianness, &mut self.scratch[1..])?;
        self.transmit(1 + len)
    }

    /// Write a tagged value to register `reg`
    pub fn write_word(&mut self, reg: u8, word: Word) -> Result<(), Error<T::Error>> {
        self.cursor.clear();
        self.scratch[0] = reg;
        let len = codec::encode_word(word, self.endianness, &mut self.scratch[1..])?;
        self.transmit(1 + len)
    }

    /// Read one value from register `reg`
    ///
    /// Same as [`begin_sequential_read`](Self::begin_sequential_read) for
    /// `V::SIZE` bytes followed by one [`decode`](Self::decode).
    pub fn read<V: RegisterValue>(&mut self, reg: u8) -> Result<V, Error<T::Error>> {
        self.begin_sequential_read(reg, V::SIZE)?;
        self.decode()
    }

    /// Read one value of runtime-selected type from register `reg`
    pub fn read_kind(&mut self, reg: u8, kind: ValueKind) -> Result<Word, Error<T::Error>> {
        self.begin_sequential_read(reg, kind.size())?;
        self.decode_kind(kind)
    }

    /// Read `num_bytes` consecutive bytes starting at register `reg`
    ///
    /// The bytes stay in the scratch buffer for [`decode`](Self::decode).
    /// On failure the read window is empty.
    pub fn begin_sequential_read(
        &mut self,
        reg: u8,
        num_bytes: usize,
    ) -> Result<(), Error<T::Error>> {
        if num_bytes > Self::READ_CAPACITY {
            return Err(ContractViolation::ReadTooLong {
                requested: num_bytes,
                capacity: Self::READ_CAPACITY,
            }
            .into());
        }

        self.cursor.clear();
        match self.fetch(reg, num_bytes) {
            Ok(()) => {
                self.cursor = Cursor::window(num_bytes);
                #[cfg(feature = "defmt")]
                defmt::trace!(
                    "i2c {}: read {} bytes from reg 0x{:02x}",
                    self.address,
                    num_bytes,
                    reg
                );
                Ok(())
            }
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::debug!(
                    "i2c {}: read from reg 0x{:02x} failed",
                    self.address,
                    reg
                );
                Err(e)
            }
        }
    }

    /// Decode the next value from the read window
    ///
    /// Consumes `V::SIZE` bytes. A decode that ends exactly at the end of
    /// the window moves the cursor back to its start.
    pub fn decode<V: RegisterValue>(&mut self) -> Result<V, Error<T::Error>> {
        let range = self.cursor.take(V::SIZE)?;
        Ok(codec::decode_from(&self.scratch[range], self.endianness)?)
    }

    /// Decode the next value of runtime-selected type from the read window
    pub fn decode_kind(&mut self, kind: ValueKind) -> Result<Word, Error<T::Error>> {
        let range = self.cursor.take(kind.size())?;
        Ok(codec::decode_kind(kind, &self.scratch[range], self.endianness)?)
    }

    /// Send the first `len` scratch bytes as one stopped write
    fn transmit(&mut self, len: usize) -> Result<(), Error<T::Error>> {
        match self.send(len) {
            Ok(()) => {
                #[cfg(feature = "defmt")]
                defmt::trace!(
                    "i2c {}: wrote {} bytes to reg 0x{:02x}",
                    self.address,
                    len - 1,
                    self.scratch[0]
                );
                Ok(())
            }
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::debug!(
                    "i2c {}: write to reg 0x{:02x} failed",
                    self.address,
                    self.scratch[0]
                );
                Err(Error::Transport(e))
            }
        }
    }

    fn send(&mut self, len: usize) -> Result<(), T::Error> {
        self.transport.begin_transaction(self.address)?;
        self.transport.write_bytes(&self.scratch[..len])?;
        self.transport.end_transaction(true)
    }

    /// Address phase, then pull `num_bytes` into the scratch buffer
    fn fetch(&mut self, reg: u8, num_bytes: usize) -> Result<(), Error<T::Error>> {
        self.select(reg).map_err(Error::Transport)?;

        let received = self
            .transport
            .request_bytes(self.address, num_bytes, true)
            .map_err(Error::Transport)?;
        if received < num_bytes {
            return Err(Error::ShortRead {
                requested: num_bytes,
                received,
            });
        }

        for slot in &mut self.scratch[..num_bytes] {
            *slot = self.transport.read_byte().map_err(Error::Transport)?;
        }
        Ok(())
    }

    /// Write the register address, keeping the bus for a repeated START
    fn select(&mut self, reg: u8) -> Result<(), T::Error> {
        self.transport.begin_transaction(self.address)?;
        self.transport.write_byte(reg)?;
        self.transport.end_transaction(false)
    }
}
