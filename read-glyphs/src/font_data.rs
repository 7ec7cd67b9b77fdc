//! raw font bytes

use std::ops::{Range, RangeBounds};

use bytemuck::AnyBitPattern;
use types::{FixedSize, ReadScalar};

use crate::read::ReadError;

/// A reference to raw binary font data.
///
/// This is a wrapper around a byte slice, that provides convenience methods
/// for parsing and validating that data.
#[derive(Debug, Default, Clone, Copy)]
pub struct FontData<'a> {
    bytes: &'a [u8],
}

/// A position-tracking reader over [`FontData`].
///
/// Every operation that moves the position is validated when it happens:
/// [`seek`](Cursor::seek) and [`skip`](Cursor::skip) fail with
/// [`ReadError::OutOfRange`] instead of deferring the check to a later
/// read, and a failed read leaves the position where it was.
#[derive(Clone)]
pub struct Cursor<'a> {
    pos: usize,
    data: FontData<'a>,
}

impl<'a> FontData<'a> {
    /// Create a new `FontData` with these bytes.
    ///
    /// You generally don't need to do this? It is handled for you when loading
    /// data from disk, but may be useful in tests.
    pub const fn new(bytes: &'a [u8]) -> Self {
        FontData { bytes }
    }

    /// The length of the data, in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `true` if the data has a length of zero bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Return the data from `pos` to the end, or `None` if `pos` is past
    /// the end.
    pub fn split_off(&self, pos: usize) -> Option<FontData<'a>> {
        self.bytes.get(pos..).map(|bytes| FontData { bytes })
    }

    /// Return a subrange of the data, or `None` if the range is out of
    /// bounds.
    pub fn slice(&self, range: impl RangeBounds<usize>) -> Option<FontData<'a>> {
        let bounds = (range.start_bound().cloned(), range.end_bound().cloned());
        self.bytes.get(bounds).map(|bytes| FontData { bytes })
    }

    /// Read a big-endian scalar at the provided byte offset.
    pub fn read_at<T: ReadScalar>(&self, offset: usize) -> Result<T, ReadError> {
        self.bytes
            .get(offset..)
            .and_then(T::read)
            .ok_or(ReadError::UnexpectedEndOfData)
    }

    /// Interpret the bytes in `range` as a slice of `T`.
    ///
    /// `T` must have an alignment of 1. The range must contain a whole
    /// number of elements; a remainder fails with
    /// [`ReadError::InvalidArrayLen`].
    pub fn read_array<T: AnyBitPattern + FixedSize>(
        &self,
        range: Range<usize>,
    ) -> Result<&'a [T], ReadError> {
        let bytes = self
            .bytes
            .get(range)
            .ok_or(ReadError::UnexpectedEndOfData)?;
        if bytes.len() % std::mem::size_of::<T>() != 0 {
            return Err(ReadError::InvalidArrayLen);
        }
        Ok(bytemuck::cast_slice(bytes))
    }

    /// Return a [`Cursor`] positioned at the start of this data.
    pub fn cursor(&self) -> Cursor<'a> {
        Cursor {
            pos: 0,
            data: *self,
        }
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

impl<'a> Cursor<'a> {
    /// The current byte offset from the start of the data.
    ///
    /// Always in bounds: repositioning is validated, so the position can
    /// never pass the end of the data.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Advance the position by `n_bytes`.
    ///
    /// The end of the data is a legal position; anything past it fails with
    /// [`ReadError::OutOfRange`] and the position is unchanged.
    pub fn skip(&mut self, n_bytes: usize) -> Result<(), ReadError> {
        let new_pos = self.pos.checked_add(n_bytes).ok_or(ReadError::OutOfRange)?;
        self.seek(new_pos)
    }

    /// Set the position to an absolute byte offset.
    ///
    /// The end of the data is a legal position; anything past it fails with
    /// [`ReadError::OutOfRange`] and the position is unchanged.
    pub fn seek(&mut self, pos: usize) -> Result<(), ReadError> {
        if pos > self.data.len() {
            return Err(ReadError::OutOfRange);
        }
        self.pos = pos;
        Ok(())
    }

    /// Read a big-endian scalar at the current position and advance past it.
    ///
    /// A failed read leaves the position unchanged.
    pub fn read<T: ReadScalar>(&mut self) -> Result<T, ReadError> {
        let temp = self.data.read_at(self.pos)?;
        self.pos += T::RAW_BYTE_LEN;
        Ok(temp)
    }

    /// Read `len` elements of `T` at the current position and advance past
    /// them.
    ///
    /// A failed read leaves the position unchanged.
    pub fn read_array<T: AnyBitPattern + FixedSize>(
        &mut self,
        len: usize,
    ) -> Result<&'a [T], ReadError> {
        let len_bytes = len
            .checked_mul(T::RAW_BYTE_LEN)
            .ok_or(ReadError::InvalidArrayLen)?;
        let end = self
            .pos
            .checked_add(len_bytes)
            .ok_or(ReadError::UnexpectedEndOfData)?;
        let temp = self.data.read_array(self.pos..end)?;
        self.pos = end;
        Ok(temp)
    }
}

impl AsRef<[u8]> for FontData<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}
