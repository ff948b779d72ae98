//! Bounds-checked, forward-only reads over a borrowed byte buffer.
//!
//! Every multi-byte value in a replay is little-endian with no padding, so
//! values are assembled from bytes explicitly rather than by reinterpreting
//! memory.

use crate::errors::{ReplayError, Result};

/// A scalar with a fixed on-disk width.
pub trait FixedWidth: Sized + Copy {
    /// Number of bytes the value occupies in the file.
    const WIDTH: usize;

    /// Decodes a little-endian value. `bytes` is always exactly `WIDTH` long.
    fn from_le_slice(bytes: &[u8]) -> Self;
}

macro_rules! impl_fixed_width {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FixedWidth for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();

                fn from_le_slice(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(bytes);
                    <$ty>::from_le_bytes(raw)
                }
            }
        )*
    };
}

impl_fixed_width!(u8, i8, u16, i16, u32, i32, u64, i64);

/// Reader over an immutable buffer. The offset only ever moves forward, and a
/// failed read leaves it where it was.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    /// Number of bytes consumed so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.offset
    }

    /// Borrows the next `len` bytes and advances past them.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let out_of_bounds = ReplayError::OutOfBounds {
            offset: self.offset,
            requested: len,
            len: self.buffer.len(),
        };

        let end = self
            .offset
            .checked_add(len)
            .filter(|end| *end <= self.buffer.len())
            .ok_or(out_of_bounds)?;

        let bytes = &self.buffer[self.offset..end];
        self.offset = end;

        Ok(bytes)
    }

    /// Reads a fixed-length byte array, e.g. an identifier.
    pub fn read_byte_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);

        Ok(out)
    }

    pub fn read<T: FixedWidth>(&mut self) -> Result<T> {
        self.read_bytes(T::WIDTH).map(T::from_le_slice)
    }

    /// Reads `count` consecutive values. The whole span is bounds checked up
    /// front, so on failure nothing is consumed.
    pub fn read_array<T: FixedWidth>(&mut self, count: usize) -> Result<Vec<T>> {
        let requested = count.checked_mul(T::WIDTH).ok_or(ReplayError::OutOfBounds {
            offset: self.offset,
            requested: usize::MAX,
            len: self.buffer.len(),
        })?;

        let bytes = self.read_bytes(requested)?;

        Ok(bytes.chunks_exact(T::WIDTH).map(T::from_le_slice).collect())
    }

    /// Reads a value and compares it against `expected`. The bytes are
    /// consumed whether or not they match.
    pub fn expect<T: FixedWidth + PartialEq>(&mut self, expected: T) -> Result<bool> {
        Ok(self.read::<T>()? == expected)
    }

    /// Reads `expected.len()` values and compares them element-wise.
    pub fn expect_all<T: FixedWidth + PartialEq>(&mut self, expected: &[T]) -> Result<bool> {
        Ok(self.read_array::<T>(expected.len())? == expected)
    }
}
