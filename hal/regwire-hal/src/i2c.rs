//! `embedded-hal` I2C adapter
//!
//! Chip HALs hand out buffered I2C masters (`write`, `read`, `write_read`).
//! [`BufferedTransport`] queues the byte-at-a-time calls of
//! [`BusTransport`] and replays them as those buffered operations:
//!
//! ```text
//! begin(a) write(r) end(stop)           -> i2c.write(a, [r, ..])
//! begin(a) write(r) end(no stop) req(n) -> i2c.write_read(a, [r], n)
//! req(n)                                -> i2c.read(a, n)
//! ```

use embedded_hal::i2c::{Error as _, I2c};
use heapless::Vec;

use crate::address::DeviceAddress;
use crate::error::TransportError;
use crate::transport::BusTransport;

/// Default queue size for each direction
pub const DEFAULT_QUEUE_SIZE: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// No transaction in progress
    Idle,
    /// Collecting bytes for a write
    Writing(DeviceAddress),
    /// Write ended without STOP, waiting for the read half
    Held(DeviceAddress),
}

/// [`BusTransport`] over any `embedded_hal::i2c::I2c`
///
/// `N` bounds both the write queue and a single read request.
pub struct BufferedTransport<I2C, const N: usize = DEFAULT_QUEUE_SIZE> {
    i2c: I2C,
    phase: Phase,
    tx: Vec<u8, N>,
    rx: Vec<u8, N>,
    rx_pos: usize,
}

impl<I2C, const N: usize> BufferedTransport<I2C, N>
where
    I2C: I2c,
{
    /// Wrap an I2C master
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            phase: Phase::Idle,
            tx: Vec::new(),
            rx: Vec::new(),
            rx_pos: 0,
        }
    }

    /// Borrow the wrapped I2C master
    pub fn inner(&self) -> &I2C {
        &self.i2c
    }

    /// Mutably borrow the wrapped I2C master
    pub fn inner_mut(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    /// Unwrap, discarding any queued bytes
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.tx.clear();
        self.rx.clear();
        self.rx_pos = 0;
    }

    fn bus_result<T>(&mut self, result: Result<T, I2C::Error>) -> Result<T, TransportError> {
        result.map_err(|e| {
            self.reset();
            TransportError::Bus(e.kind().into())
        })
    }

    /// Send a held write on its own (it was never followed by a read)
    fn flush_held(&mut self) -> Result<(), TransportError> {
        if let Phase::Held(address) = self.phase {
            let result = self.i2c.write(address.get(), &self.tx);
            self.bus_result(result)?;
            self.tx.clear();
            self.phase = Phase::Idle;
        }
        Ok(())
    }
}

impl<I2C, const N: usize> BusTransport for BufferedTransport<I2C, N>
where
    I2C: I2c,
{
    type Error = TransportError;

    fn begin_transaction(&mut self, address: DeviceAddress) -> Result<(), Self::Error> {
        self.flush_held()?;
        self.tx.clear();
        self.phase = Phase::Writing(address);
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        if !matches!(self.phase, Phase::Writing(_)) {
            return Err(TransportError::NoTransaction);
        }
        self.tx.push(byte).map_err(|_| TransportError::TxOverflow)
    }

    fn end_transaction(&mut self, send_stop: bool) -> Result<(), Self::Error> {
        let Phase::Writing(address) = self.phase else {
            return Err(TransportError::NoTransaction);
        };

        if send_stop {
            let result = self.i2c.write(address.get(), &self.tx);
            self.bus_result(result)?;
            self.tx.clear();
            self.phase = Phase::Idle;
        } else {
            self.phase = Phase::Held(address);
        }
        Ok(())
    }

    // embedded-hal always terminates a read with STOP, so `send_stop` only
    // matters to transports that can leave the bus open.
    fn request_bytes(
        &mut self,
        address: DeviceAddress,
        count: usize,
        _send_stop: bool,
    ) -> Result<usize, Self::Error> {
        if count > N {
            self.reset();
            return Err(TransportError::RequestTooLarge);
        }
        // Queued bytes of an unfinished write would never reach the wire
        if let Phase::Writing(_) = self.phase {
            self.reset();
            return Err(TransportError::NoTransaction);
        }

        self.rx.clear();
        self.rx_pos = 0;
        // Cannot fail: count <= N
        let _ = self.rx.resize(count, 0);

        let phase = self.phase;
        let result = match phase {
            Phase::Held(held) if held == address => {
                self.i2c.write_read(address.get(), &self.tx, &mut self.rx)
            }
            _ => {
                self.flush_held()?;
                self.i2c.read(address.get(), &mut self.rx)
            }
        };
        self.bus_result(result)?;

        self.tx.clear();
        self.phase = Phase::Idle;
        Ok(count)
    }

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let byte = *self.rx.get(self.rx_pos).ok_or(TransportError::NoData)?;
        self.rx_pos += 1;
        Ok(byte)
    }
}
