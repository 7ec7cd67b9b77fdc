//! types for working with raw big-endian bytes

pub(crate) mod sealed {
    use std::hash::Hash;

    /// A trait for the byte arrays that back scalar types.
    ///
    /// This is only implemented for `[u8; N]`, which lets the unsafe
    /// bytemuck impls in this module reason about the layout of
    /// [`BigEndian`](super::BigEndian).
    pub trait BeByteArray: Copy + PartialEq + Eq + Hash + AsRef<[u8]> {
        /// Attempt to construct a new raw value from this slice.
        ///
        /// This will fail if `slice.len() != N`.
        fn from_slice(slice: &[u8]) -> Option<Self>;
    }

    impl<const N: usize> BeByteArray for [u8; N] {
        fn from_slice(slice: &[u8]) -> Option<Self> {
            slice.try_into().ok()
        }
    }
}

/// A trait for font scalars.
///
/// This is an internal trait for encoding and decoding big-endian bytes.
///
/// You do not need to implement this trait directly; it is an implementation
/// detail of the [`BigEndian`] wrapper.
pub trait Scalar: Sized {
    /// The raw byte representation of this type.
    type Raw: sealed::BeByteArray;

    /// Create an instance of this type from raw big-endian bytes
    fn from_raw(raw: Self::Raw) -> Self;

    /// Encode this type as raw big-endian bytes
    fn to_raw(self) -> Self::Raw;
}

/// A trait for types with a known, constant size in raw bytes.
pub trait FixedSize: Sized {
    /// The raw size of this type, in bytes.
    const RAW_BYTE_LEN: usize;
}

/// A trait for types that can be read from a prefix of raw bytes.
///
/// This is a generalization that gives a fallible read method to all our
/// scalar types; it is the bound used by the typed reads in `read-glyphs`.
pub trait ReadScalar: FixedSize {
    /// Interpret the first `RAW_BYTE_LEN` bytes of `bytes` as this type.
    ///
    /// Returns `None` if `bytes` is too short.
    fn read(bytes: &[u8]) -> Option<Self>;
}

impl<T: Scalar + FixedSize> ReadScalar for T {
    #[inline]
    fn read(bytes: &[u8]) -> Option<Self> {
        bytes
            .get(..T::RAW_BYTE_LEN)
            .and_then(sealed::BeByteArray::from_slice)
            .map(T::from_raw)
    }
}

/// A wrapper around raw big-endian bytes for some type.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct BigEndian<T: Scalar>(pub(crate) T::Raw);

// # SAFETY:
//
// `BigEndian<T>` has the bound `T: Scalar`, and contains only a single value,
// `<T as Scalar>::Raw`, which is only ever a byte array.
#[cfg(feature = "bytemuck")]
unsafe impl<T> bytemuck::Zeroable for BigEndian<T> where T: Scalar + Copy {}
#[cfg(feature = "bytemuck")]
unsafe impl<T> bytemuck::AnyBitPattern for BigEndian<T> where T: Scalar + Copy + 'static {}

impl<T: Scalar> BigEndian<T> {
    /// construct a new `BigEndian<T>` from raw bytes
    pub fn new(raw: T::Raw) -> BigEndian<T> {
        BigEndian(raw)
    }

    /// Read a copy of this type from the raw bytes.
    #[inline(always)]
    pub fn get(self) -> T {
        T::from_raw(self.0)
    }

    /// Set the value, overwriting the bytes.
    pub fn set(&mut self, value: T) {
        self.0 = value.to_raw();
    }

    /// Get the raw big-endian bytes.
    pub fn be_bytes(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl<T: Scalar> From<T> for BigEndian<T> {
    #[inline]
    fn from(val: T) -> Self {
        BigEndian(val.to_raw())
    }
}

impl<T: Scalar + Default> Default for BigEndian<T> {
    fn default() -> Self {
        Self::from(T::default())
    }
}

impl<T: Scalar> FixedSize for BigEndian<T> {
    const RAW_BYTE_LEN: usize = std::mem::size_of::<T::Raw>();
}

// NOTE: due to the orphan rules, we cannot impl the inverse of this, e.g.
// impl<T> PartialEq<BigEndian<T>> for T (<https://doc.rust-lang.org/error_codes/E0210.html>)
impl<T: Scalar + Copy + PartialEq> PartialEq<T> for BigEndian<T> {
    fn eq(&self, other: &T) -> bool {
        self.get() == *other
    }
}

impl<T: std::fmt::Debug + Scalar + Copy> std::fmt::Debug for BigEndian<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.get().fmt(f)
    }
}

impl<T: std::fmt::Display + Scalar + Copy> std::fmt::Display for BigEndian<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.get().fmt(f)
    }
}

macro_rules! int_scalar {
    ($ty:ty, $raw:ty) => {
        impl crate::raw::Scalar for $ty {
            type Raw = $raw;

            #[inline(always)]
            fn to_raw(self) -> $raw {
                self.to_be_bytes()
            }

            #[inline(always)]
            fn from_raw(raw: $raw) -> $ty {
                Self::from_be_bytes(raw)
            }
        }

        impl crate::raw::FixedSize for $ty {
            const RAW_BYTE_LEN: usize = std::mem::size_of::<$raw>();
        }
    };
}

int_scalar!(u8, [u8; 1]);
int_scalar!(i8, [u8; 1]);
int_scalar!(u16, [u8; 2]);
int_scalar!(i16, [u8; 2]);
int_scalar!(u32, [u8; 4]);
int_scalar!(i32, [u8; 4]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn be_round_trips() {
        assert_eq!(u16::to_raw(0x0102), [0x01, 0x02]);
        assert_eq!(u32::to_raw(0xDEADBEEF), [0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(i16::from_raw([0xFF, 0xFE]), -2);
        assert_eq!(u16::from_raw(u16::to_raw(0xABCD)), 0xABCD);
    }

    #[test]
    fn read_prefix() {
        let bytes = [0xDE, 0xAD, 0xBE, 0xEF, 0x01];
        assert_eq!(u32::read(&bytes), Some(0xDEADBEEF));
        assert_eq!(u16::read(&bytes), Some(0xDEAD));
        assert_eq!(u32::read(&bytes[2..]), None);
    }

    #[test]
    fn get_set() {
        let mut be = BigEndian::from(516u16);
        assert_eq!(be.be_bytes(), [2, 4]);
        be.set(0xFFFF);
        assert_eq!(be.get(), 0xFFFF);
        assert!(be == 0xFFFF);
    }
}
