//! Fixed-width register value types
//!
//! [`RegisterValue`] is implemented for the eight integer types a register
//! can hold. [`ValueKind`] names one of them at runtime and [`Word`] carries
//! a value tagged with its kind, for callers that pick the width from data
//! (a register map) rather than from a type parameter.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Width in bytes of the largest supported value
pub const MAX_VALUE_SIZE: usize = 8;

mod sealed {
    pub trait Sealed {}
}

/// Integer type that can be stored in a device register
///
/// Sealed: implemented for `u8`, `i8`, `u16`, `i16`, `u32`, `i32`, `u64`
/// and `i64` only.
pub trait RegisterValue: Copy + sealed::Sealed {
    /// Encoded width in bytes
    const SIZE: usize;

    /// Runtime tag for this type
    const KIND: ValueKind;

    /// Fixed-size byte array holding one encoded value
    type Bytes: AsRef<[u8]> + AsMut<[u8]> + Default + Copy;

    /// Bit pattern, zero-extended to 64 bits
    fn to_bits(self) -> u64;

    /// Rebuild from the low `SIZE * 8` bits of `bits`
    fn from_bits(bits: u64) -> Self;

    /// Wrap in a [`Word`]
    fn into_word(self) -> Word;
}

/// Runtime tag for a register value type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ValueKind {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
}

impl ValueKind {
    /// Encoded width in bytes
    pub const fn size(self) -> usize {
        match self {
            ValueKind::U8 | ValueKind::I8 => 1,
            ValueKind::U16 | ValueKind::I16 => 2,
            ValueKind::U32 | ValueKind::I32 => 4,
            ValueKind::U64 | ValueKind::I64 => 8,
        }
    }

    /// Whether the bit pattern is interpreted as two's complement
    pub const fn is_signed(self) -> bool {
        matches!(
            self,
            ValueKind::I8 | ValueKind::I16 | ValueKind::I32 | ValueKind::I64
        )
    }
}

/// Register value tagged with its type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Word {
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
}

impl Word {
    /// Type tag of the carried value
    pub const fn kind(self) -> ValueKind {
        match self {
            Word::U8(_) => ValueKind::U8,
            Word::I8(_) => ValueKind::I8,
            Word::U16(_) => ValueKind::U16,
            Word::I16(_) => ValueKind::I16,
            Word::U32(_) => ValueKind::U32,
            Word::I32(_) => ValueKind::I32,
            Word::U64(_) => ValueKind::U64,
            Word::I64(_) => ValueKind::I64,
        }
    }

    /// Encoded width in bytes
    pub const fn size(self) -> usize {
        self.kind().size()
    }

    /// Value as `i128`, sign preserved
    pub const fn widen(self) -> i128 {
        match self {
            Word::U8(v) => v as i128,
            Word::I8(v) => v as i128,
            Word::U16(v) => v as i128,
            Word::I16(v) => v as i128,
            Word::U32(v) => v as i128,
            Word::I32(v) => v as i128,
            Word::U64(v) => v as i128,
            Word::I64(v) => v as i128,
        }
    }
}

macro_rules! register_value {
    ($($ty:ty => $unsigned:ty, $kind:ident;)*) => {
        $(
            impl sealed::Sealed for $ty {}

            impl RegisterValue for $ty {
                const SIZE: usize = core::mem::size_of::<$ty>();
                const KIND: ValueKind = ValueKind::$kind;
                type Bytes = [u8; core::mem::size_of::<$ty>()];

                #[inline]
                fn to_bits(self) -> u64 {
                    self as $unsigned as u64
                }

                #[inline]
                fn from_bits(bits: u64) -> Self {
                    bits as $unsigned as $ty
                }

                #[inline]
                fn into_word(self) -> Word {
                    Word::$kind(self)
                }
            }

            impl From<$ty> for Word {
                fn from(value: $ty) -> Self {
                    Word::$kind(value)
                }
            }
        )*
    };
}

register_value! {
    u8 => u8, U8;
    i8 => u8, I8;
    u16 => u16, U16;
    i16 => u16, I16;
    u32 => u32, U32;
    i32 => u32, I32;
    u64 => u64, U64;
    i64 => u64, I64;
}
