//! small utilities used in tests

use std::collections::HashMap;

use types::Scalar;

use crate::FontData;

/// A convenience type for generating a buffer of big-endian bytes.
#[derive(Debug, Clone, Default)]
pub struct BeBuffer {
    data: Vec<u8>,
    tagged_locations: HashMap<String, usize>,
}

impl BeBuffer {
    pub fn new() -> Self {
        Default::default()
    }

    /// The current length of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the buffer contains zero bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Return a reference to the contents of the buffer
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Write any scalar to this buffer.
    pub fn push(mut self, item: impl Scalar) -> Self {
        self.data.extend(item.to_raw().as_ref());
        self
    }

    /// Write a scalar, remembering its position under the given tag.
    pub fn push_with_tag(mut self, item: impl Scalar, tag: &str) -> Self {
        self.tagged_locations
            .insert(tag.to_string(), self.data.len());
        self.data.extend(item.to_raw().as_ref());
        self
    }

    /// Write multiple scalars into the buffer
    pub fn extend<T: Scalar>(mut self, iter: impl IntoIterator<Item = T>) -> Self {
        for item in iter {
            self.data.extend(item.to_raw().as_ref());
        }
        self
    }

    pub fn offset_for(&self, tag: &str) -> usize {
        // panic on unrecognized tags
        self.tagged_locations.get(tag).copied().unwrap()
    }

    fn data_for(&mut self, tag: &str) -> &mut [u8] {
        let offset = self.offset_for(tag);
        &mut self.data[offset..]
    }

    /// Overwrite the scalar at the position remembered under `tag`.
    pub fn write_at(&mut self, tag: &str, item: impl Scalar) {
        let data = self.data_for(tag);
        let raw = item.to_raw();
        let new_data: &[u8] = raw.as_ref();

        if data.len() < new_data.len() {
            panic!("not enough room left in buffer for the requested write.");
        }

        for (left, right) in data.iter_mut().zip(new_data) {
            *left = *right
        }
    }

    pub fn font_data(&self) -> FontData {
        FontData::new(&self.data)
    }
}

impl std::ops::Deref for BeBuffer {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

/// Build a [`BeBuffer`], pushing each item in order.
///
/// Each item is one of:
///
/// - a scalar literal, pushed as its big-endian bytes
/// - a parenthesized scalar expression, likewise
/// - `[a, b, c]`, pushing each element in turn
/// - `{item: "tag"}`, pushing `item` and remembering its position
///   under `"tag"` for later use with
///   [`offset_for`](crate::test_helpers::BeBuffer::offset_for) or
///   [`write_at`](crate::test_helpers::BeBuffer::write_at)
#[macro_export]
macro_rules! be_buffer {
    ($($item:tt),* $(,)?) => {{
        let buffer = $crate::test_helpers::BeBuffer::new();
        $(let buffer = $crate::be_buffer_add!(buffer, $item);)*
        buffer
    }};
}

/// Push one [`be_buffer!`] item onto an existing buffer.
#[macro_export]
macro_rules! be_buffer_add {
    ($buffer:expr, {$value:literal : $tag:literal}) => {
        $buffer.push_with_tag($value, $tag)
    };
    ($buffer:expr, {($value:expr) : $tag:literal}) => {
        $buffer.push_with_tag($value, $tag)
    };
    ($buffer:expr, [$($value:expr),* $(,)?]) => {
        $buffer.extend([$($value),*])
    };
    ($buffer:expr, ($value:expr)) => {
        $buffer.push($value)
    };
    ($buffer:expr, $value:expr) => {
        $buffer.push($value)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_extend() {
        let buf = BeBuffer::new().push(1u16).extend([2u16, 3]).push(4u8);
        assert_eq!(buf.as_slice(), &[0, 1, 0, 2, 0, 3, 4]);
    }

    #[test]
    fn tagged_writes() {
        let mut buf = be_buffer! {
            0xAAu8,
            {0u16: "patch_me"},
            [1u8, 2, 3]
        };
        assert_eq!(buf.offset_for("patch_me"), 1);
        buf.write_at("patch_me", 0x0102u16);
        assert_eq!(&*buf, &[0xAA, 0x01, 0x02, 1, 2, 3]);
    }
}
