//! Register byte order

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Order in which a multi-byte register value is laid out on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Endianness {
    /// Big-endian: most significant byte at the lowest register address
    MostSignificantFirst,
    /// Little-endian: least significant byte at the lowest register address
    #[default]
    LeastSignificantFirst,
}

impl Endianness {
    /// Bit shift of the byte at `index` in a `width`-byte value
    pub(crate) const fn shift(self, index: usize, width: usize) -> usize {
        match self {
            Endianness::LeastSignificantFirst => index * 8,
            Endianness::MostSignificantFirst => (width - 1 - index) * 8,
        }
    }
}
