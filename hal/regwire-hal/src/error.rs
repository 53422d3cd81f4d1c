//! Transport error types

use core::fmt;

use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

/// Which phase of the transfer was not acknowledged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NackSource {
    /// Device did not acknowledge its address
    Address,
    /// Device did not acknowledge a data byte
    Data,
    /// Controller could not tell
    Unknown,
}

/// Bus-level failure reported by the underlying I2C peripheral
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusErrorKind {
    /// Bus error (misplaced START/STOP)
    Bus,
    /// Arbitration lost to another controller
    ArbitrationLost,
    /// NACK received
    Nack(NackSource),
    /// Receive overrun
    Overrun,
    /// Anything the peripheral could not classify, including timeouts
    Other,
}

impl From<NoAcknowledgeSource> for NackSource {
    fn from(source: NoAcknowledgeSource) -> Self {
        match source {
            NoAcknowledgeSource::Address => NackSource::Address,
            NoAcknowledgeSource::Data => NackSource::Data,
            NoAcknowledgeSource::Unknown => NackSource::Unknown,
        }
    }
}

impl From<ErrorKind> for BusErrorKind {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Bus => BusErrorKind::Bus,
            ErrorKind::ArbitrationLoss => BusErrorKind::ArbitrationLost,
            ErrorKind::NoAcknowledge(source) => BusErrorKind::Nack(source.into()),
            ErrorKind::Overrun => BusErrorKind::Overrun,
            _ => BusErrorKind::Other,
        }
    }
}

/// Error from [`BufferedTransport`](crate::BufferedTransport)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// The peripheral reported a failure
    Bus(BusErrorKind),
    /// Byte written or transaction ended outside `begin_transaction`
    NoTransaction,
    /// More bytes queued than the write queue holds
    TxOverflow,
    /// Requested more bytes than the receive queue holds
    RequestTooLarge,
    /// `read_byte` called with nothing left from the last request
    NoData,
}

impl fmt::Display for BusErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusErrorKind::Bus => write!(f, "bus error"),
            BusErrorKind::ArbitrationLost => write!(f, "arbitration lost"),
            BusErrorKind::Nack(source) => write!(f, "NACK ({:?})", source),
            BusErrorKind::Overrun => write!(f, "overrun"),
            BusErrorKind::Other => write!(f, "unclassified bus error"),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Bus(kind) => write!(f, "I2C error: {}", kind),
            TransportError::NoTransaction => write!(f, "no transaction in progress"),
            TransportError::TxOverflow => write!(f, "write queue full"),
            TransportError::RequestTooLarge => write!(f, "read request exceeds receive queue"),
            TransportError::NoData => write!(f, "no received bytes left"),
        }
    }
}
