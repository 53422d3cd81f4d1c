//! Encoding and decoding of register values
//!
//! Byte `i` of an encoded value holds bits `8*i..8*i+8` of the value when
//! least significant first, or bits `8*(N-1-i)..` when most significant
//! first. `decode` is the exact inverse of `encode` for every value and
//! ordering.

use core::fmt;

use crate::endian::Endianness;
use crate::value::{RegisterValue, ValueKind, Word};

/// Errors from the slice-based codec functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CodecError {
    /// Slice shorter than the value width
    BufferTooSmall { needed: usize, available: usize },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::BufferTooSmall { needed, available } => {
                write!(f, "buffer too small: need {} bytes, have {}", needed, available)
            }
        }
    }
}

/// Spread `bits` over `out`, one byte per slot
///
/// `out.len()` must not exceed 8.
fn write_bits(bits: u64, endianness: Endianness, out: &mut [u8]) {
    let width = out.len();
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = (bits >> endianness.shift(i, width)) as u8;
    }
}

/// Gather up to 8 bytes back into a bit pattern
fn read_bits(bytes: &[u8], endianness: Endianness) -> u64 {
    let width = bytes.len();
    bytes.iter().enumerate().fold(0u64, |bits, (i, &byte)| {
        bits | (u64::from(byte) << endianness.shift(i, width))
    })
}

/// Encode a value into its fixed-size byte array
pub fn encode<V: RegisterValue>(value: V, endianness: Endianness) -> V::Bytes {
    let mut bytes = V::Bytes::default();
    write_bits(value.to_bits(), endianness, bytes.as_mut());
    bytes
}

/// Decode a value from its fixed-size byte array
pub fn decode<V: RegisterValue>(bytes: &V::Bytes, endianness: Endianness) -> V {
    V::from_bits(read_bits(bytes.as_ref(), endianness))
}

/// Encode a value into the front of `out`
///
/// Returns the number of bytes written (`V::SIZE`).
pub fn encode_into<V: RegisterValue>(
    value: V,
    endianness: Endianness,
    out: &mut [u8],
) -> Result<usize, CodecError> {
    let available = out.len();
    let slot = out.get_mut(..V::SIZE).ok_or(CodecError::BufferTooSmall {
        needed: V::SIZE,
        available,
    })?;
    write_bits(value.to_bits(), endianness, slot);
    Ok(V::SIZE)
}

/// Decode a value from the front of `bytes`
pub fn decode_from<V: RegisterValue>(bytes: &[u8], endianness: Endianness) -> Result<V, CodecError> {
    let slot = bytes.get(..V::SIZE).ok_or(CodecError::BufferTooSmall {
        needed: V::SIZE,
        available: bytes.len(),
    })?;
    Ok(V::from_bits(read_bits(slot, endianness)))
}

/// Decode a value whose type is only known at runtime
pub fn decode_kind(
    kind: ValueKind,
    bytes: &[u8],
    endianness: Endianness,
) -> Result<Word, CodecError> {
    Ok(match kind {
        ValueKind::U8 => Word::U8(decode_from(bytes, endianness)?),
        ValueKind::I8 => Word::I8(decode_from(bytes, endianness)?),
        ValueKind::U16 => Word::U16(decode_from(bytes, endianness)?),
        ValueKind::I16 => Word::I16(decode_from(bytes, endianness)?),
        ValueKind::U32 => Word::U32(decode_from(bytes, endianness)?),
        ValueKind::I32 => Word::I32(decode_from(bytes, endianness)?),
        ValueKind::U64 => Word::U64(decode_from(bytes, endianness)?),
        ValueKind::I64 => Word::I64(decode_from(bytes, endianness)?),
    })
}

/// Encode a tagged value into the front of `out`
pub fn encode_word(word: Word, endianness: Endianness, out: &mut [u8]) -> Result<usize, CodecError> {
    match word {
        Word::U8(v) => encode_into(v, endianness, out),
        Word::I8(v) => encode_into(v, endianness, out),
        Word::U16(v) => encode_into(v, endianness, out),
        Word::I16(v) => encode_into(v, endianness, out),
        Word::U32(v) => encode_into(v, endianness, out),
        Word::I32(v) => encode_into(v, endianness, out),
        Word::U64(v) => encode_into(v, endianness, out),
        Word::I64(v) => encode_into(v, endianness, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const MSB: Endianness = Endianness::MostSignificantFirst;
    const LSB: Endianness = Endianness::LeastSignificantFirst;

    #[test]
    fn test_encode_u16_both_orders() {
        assert_eq!(encode(0x0102u16, MSB), [0x01, 0x02]);
        assert_eq!(encode(0x0102u16, LSB), [0x02, 0x01]);
    }

    #[test]
    fn test_encode_u32_msb_first() {
        assert_eq!(encode(0x0A0B_0C0Du32, MSB), [0x0A, 0x0B, 0x0C, 0x0D]);
        assert_eq!(encode(0x0A0B_0C0Du32, LSB), [0x0D, 0x0C, 0x0B, 0x0A]);
    }

    #[test]
    fn test_single_byte_ignores_order() {
        assert_eq!(encode(0x5Au8, MSB), encode(0x5Au8, LSB));
        assert_eq!(encode(-1i8, MSB), [0xFF]);
    }

    #[test]
    fn test_decode_signed_without_extension_tricks() {
        assert_eq!(decode::<i16>(&[0xFF, 0xFE], MSB), -2);
        assert_eq!(decode::<i16>(&[0xFE, 0xFF], LSB), -2);
        assert_eq!(decode::<i32>(&[0x80, 0x00, 0x00, 0x00], MSB), i32::MIN);
        assert_eq!(decode::<u32>(&[0x80, 0x00, 0x00, 0x00], MSB), 0x8000_0000);
    }

    #[test]
    fn test_decode_i64_little_endian() {
        let bytes = [0x88, 0x77, 0x66, 0x55, 0x44, 0x33, 0x22, 0x11];
        assert_eq!(decode::<u64>(&bytes, LSB), 0x1122_3344_5566_7788);
        assert_eq!(decode::<i64>(&bytes, LSB), 0x1122_3344_5566_7788);
    }

    #[test]
    fn test_slice_forms_check_length() {
        let mut out = [0u8; 3];
        assert_eq!(
            encode_into(1u32, MSB, &mut out),
            Err(CodecError::BufferTooSmall {
                needed: 4,
                available: 3
            })
        );
        assert_eq!(encode_into(0xBEEFu16, MSB, &mut out), Ok(2));
        assert_eq!(out, [0xBE, 0xEF, 0x00]);

        assert_eq!(decode_from::<u16>(&out, MSB), Ok(0xBEEF));
        assert_eq!(
            decode_from::<u64>(&out, MSB),
            Err(CodecError::BufferTooSmall {
                needed: 8,
                available: 3
            })
        );
    }

    #[test]
    fn test_tagged_decode_and_encode() {
        let bytes = [0xFF, 0x38];
        assert_eq!(decode_kind(ValueKind::I16, &bytes, MSB), Ok(Word::I16(-200)));
        assert_eq!(decode_kind(ValueKind::U16, &bytes, MSB), Ok(Word::U16(0xFF38)));
        assert_eq!(decode_kind(ValueKind::U8, &bytes, MSB), Ok(Word::U8(0xFF)));

        let mut out = [0u8; 8];
        assert_eq!(encode_word(Word::I16(-200), LSB, &mut out), Ok(2));
        assert_eq!(&out[..2], &[0x38, 0xFF]);
    }

    macro_rules! roundtrip_props {
        ($($name:ident: $ty:ty;)*) => {
            proptest! {
                $(
                    #[test]
                    fn $name(value in any::<$ty>(), msb_first in any::<bool>()) {
                        let endianness = if msb_first { MSB } else { LSB };
                        let bytes = encode(value, endianness);
                        prop_assert_eq!(decode::<$ty>(&bytes, endianness), value);
                    }
                )*
            }
        };
    }

    roundtrip_props! {
        prop_roundtrip_u8: u8;
        prop_roundtrip_i8: i8;
        prop_roundtrip_u16: u16;
        prop_roundtrip_i16: i16;
        prop_roundtrip_u32: u32;
        prop_roundtrip_i32: i32;
        prop_roundtrip_u64: u64;
        prop_roundtrip_i64: i64;
    }

    proptest! {
        #[test]
        fn prop_orders_are_mirror_images(value in any::<u64>()) {
            let mut msb = encode(value, MSB);
            msb.reverse();
            prop_assert_eq!(msb, encode(value, LSB));
        }
    }
}
