//! Register access errors
//!
//! Three kinds of failure reach the caller:
//!
//! - the transport failed ([`Error::Transport`], [`Error::ShortRead`])
//! - the caller broke an operation's contract ([`ContractViolation`])
//! - the device handle was misconfigured ([`ConfigError`], constructors only)

use core::fmt;

use regwire_codec::CodecError;

/// Caller asked for something the handle cannot do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ContractViolation {
    /// Sequential read longer than the scratch buffer holds
    ReadTooLong { requested: usize, capacity: usize },
    /// Decode past the end of the buffered read
    DecodeOverrun { requested: usize, remaining: usize },
}

/// Device handle rejected at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Scratch buffer cannot hold an address byte plus the widest value
    CapacityTooSmall { capacity: usize, minimum: usize },
    /// Device address does not fit in 7 bits
    InvalidAddress(u8),
}

/// Error from a register operation, generic over the transport error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The bus transport reported a failure
    Transport(E),
    /// The transport delivered fewer bytes than were requested
    ShortRead { requested: usize, received: usize },
    /// Contract violation by the caller
    Contract(ContractViolation),
    /// Tagged value did not fit the supplied buffer
    Codec(CodecError),
}

impl<E> Error<E> {
    /// Whether the bus, rather than the caller, caused the failure
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::ShortRead { .. })
    }
}

impl<E> From<ContractViolation> for Error<E> {
    fn from(violation: ContractViolation) -> Self {
        Error::Contract(violation)
    }
}

impl<E> From<CodecError> for Error<E> {
    fn from(e: CodecError) -> Self {
        Error::Codec(e)
    }
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractViolation::ReadTooLong {
                requested,
                capacity,
            } => write!(
                f,
                "sequential read of {} bytes exceeds capacity of {}",
                requested, capacity
            ),
            ContractViolation::DecodeOverrun {
                requested,
                remaining,
            } => write!(
                f,
                "decode of {} bytes with only {} buffered",
                requested, remaining
            ),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::CapacityTooSmall { capacity, minimum } => write!(
                f,
                "scratch capacity {} is below the minimum of {}",
                capacity, minimum
            ),
            ConfigError::InvalidAddress(address) => {
                write!(f, "address {:#04x} does not fit in 7 bits", address)
            }
        }
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(e) => write!(f, "transport error: {:?}", e),
            Error::ShortRead {
                requested,
                received,
            } => write!(
                f,
                "short read: requested {} bytes, received {}",
                requested, received
            ),
            Error::Contract(violation) => write!(f, "contract violation: {}", violation),
            Error::Codec(e) => write!(f, "codec error: {}", e),
        }
    }
}
