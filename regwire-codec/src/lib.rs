//! Byte-order codec for register values
//!
//! Converts fixed-width integers to and from the byte sequences a device
//! register holds. Two orderings are supported:
//!
//! ```text
//! value 0x0A0B0C0D (u32)
//! ┌──────┬──────┬──────┬──────┐
//! │ 0x0A │ 0x0B │ 0x0C │ 0x0D │  MostSignificantFirst
//! ├──────┼──────┼──────┼──────┤
//! │ 0x0D │ 0x0C │ 0x0B │ 0x0A │  LeastSignificantFirst
//! └──────┴──────┴──────┴──────┘
//! ```
//!
//! Encoding and decoding are pure shift/mask functions; the same
//! routines serve immediate writes and decoding out of a scratch buffer.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod codec;
pub mod endian;
pub mod value;

pub use codec::{decode, decode_from, decode_kind, encode, encode_into, encode_word, CodecError};
pub use endian::Endianness;
pub use value::{RegisterValue, ValueKind, Word, MAX_VALUE_SIZE};
