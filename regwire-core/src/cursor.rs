//! Read-window bookkeeping for the scratch buffer
//!
//! After a sequential read the first `length` scratch bytes hold device
//! data. Each decode consumes the next bytes of that window. A decode that
//! ends exactly on `length` sends the index back to 0, so the same window
//! can be decoded again from its start without another bus transaction.

use core::ops::Range;

use crate::error::ContractViolation;

/// `(index, length)` into the scratch buffer
///
/// Invariant: `index <= length`, and `index < length` unless the window is
/// empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cursor {
    index: usize,
    length: usize,
}

impl Cursor {
    /// Cursor at the start of a fresh `length`-byte window
    pub const fn window(length: usize) -> Self {
        Self { index: 0, length }
    }

    /// Position of the next byte to decode
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Number of bytes in the buffered window
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Whether nothing is buffered
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Bytes left before the index wraps
    pub const fn remaining(&self) -> usize {
        self.length - self.index
    }

    /// Drop the window
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Claim the next `width` bytes and advance
    ///
    /// The cursor is unchanged on error.
    pub fn take(&mut self, width: usize) -> Result<Range<usize>, ContractViolation> {
        let start = self.index;
        let end = start
            .checked_add(width)
            .filter(|&end| end <= self.length)
            .ok_or(ContractViolation::DecodeOverrun {
                requested: width,
                remaining: self.remaining(),
            })?;

        self.index = if end < self.length { end } else { 0 };
        Ok(start..end)
    }
}
