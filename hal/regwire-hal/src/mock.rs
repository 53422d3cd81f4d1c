//! Scripted fake transport for testing
//!
//! Records every successful transport call and serves read data from a
//! queue filled by the test.

use std::collections::VecDeque;
use std::vec::Vec;

use crate::address::DeviceAddress;
use crate::transport::BusTransport;

/// Transport call, as recorded by [`MockTransport`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusEvent {
    /// `begin_transaction`
    Begin(DeviceAddress),
    /// `write_byte`
    Write(u8),
    /// `end_transaction`
    End { send_stop: bool },
    /// `request_bytes`
    Request {
        address: DeviceAddress,
        count: usize,
        send_stop: bool,
    },
    /// `read_byte`, with the byte handed out
    Read(u8),
}

/// Error produced by [`MockTransport`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    /// Failure armed with [`MockTransport::fail_at_call`]
    Injected,
    /// Write or end without a transaction
    NoTransaction,
    /// `read_byte` with nothing left from the last request
    NoData,
}

/// Fake bus for host tests
#[derive(Debug, Default)]
pub struct MockTransport {
    events: Vec<BusEvent>,
    responses: VecDeque<u8>,
    received: VecDeque<u8>,
    in_transaction: bool,
    fail_countdown: Option<usize>,
}

impl MockTransport {
    /// Create an empty mock
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes the device will answer with
    pub fn queue_response(&mut self, data: &[u8]) {
        self.responses.extend(data.iter().copied());
    }

    /// Make the `n`th transport call from now fail (0 = the next call)
    pub fn fail_at_call(&mut self, n: usize) {
        self.fail_countdown = Some(n);
    }

    /// Recorded calls
    pub fn events(&self) -> &[BusEvent] {
        &self.events
    }

    /// Clear the recorded calls
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Bytes written in the recorded calls, in order
    pub fn written(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|event| match event {
                BusEvent::Write(byte) => Some(*byte),
                _ => None,
            })
            .collect()
    }

    fn step(&mut self) -> Result<(), MockError> {
        match self.fail_countdown {
            Some(0) => {
                self.fail_countdown = None;
                self.in_transaction = false;
                self.received.clear();
                Err(MockError::Injected)
            }
            Some(n) => {
                self.fail_countdown = Some(n - 1);
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl BusTransport for MockTransport {
    type Error = MockError;

    fn begin_transaction(&mut self, address: DeviceAddress) -> Result<(), Self::Error> {
        self.step()?;
        self.in_transaction = true;
        self.events.push(BusEvent::Begin(address));
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.step()?;
        if !self.in_transaction {
            return Err(MockError::NoTransaction);
        }
        self.events.push(BusEvent::Write(byte));
        Ok(())
    }

    fn end_transaction(&mut self, send_stop: bool) -> Result<(), Self::Error> {
        self.step()?;
        if !self.in_transaction {
            return Err(MockError::NoTransaction);
        }
        self.in_transaction = false;
        self.events.push(BusEvent::End { send_stop });
        Ok(())
    }

    fn request_bytes(
        &mut self,
        address: DeviceAddress,
        count: usize,
        send_stop: bool,
    ) -> Result<usize, Self::Error> {
        self.step()?;
        let available = count.min(self.responses.len());
        self.received.clear();
        self.received.extend(self.responses.drain(..available));
        self.events.push(BusEvent::Request {
            address,
            count,
            send_stop,
        });
        Ok(available)
    }

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        self.step()?;
        let byte = self.received.pop_front().ok_or(MockError::NoData)?;
        self.events.push(BusEvent::Read(byte));
        Ok(byte)
    }
}
