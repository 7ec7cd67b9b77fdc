//! Traits for parsing raw font data

use types::Tag;

use crate::font_data::FontData;

/// A trait for types that can be parsed from raw font data.
///
/// Reading validates structure eagerly: counts declared in the data are
/// checked against the bytes that are actually present before the value is
/// returned.
pub trait FontRead<'a>: Sized {
    /// Read an instance of `Self` from the provided data, starting at offset 0.
    fn read(data: FontData<'a>) -> Result<Self, ReadError>;
}

/// An error that occurs when reading font data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// A read extended past the end of the data.
    UnexpectedEndOfData,
    /// A seek, skip, or table offset landed past the end of the data.
    OutOfRange,
    /// The table with this tag is not present in the directory.
    MissingTable(Tag),
    /// The glyph is not stored as a simple outline.
    ///
    /// Carries the contour count that was read; negative counts mark
    /// composite glyphs, which are not supported.
    UnsupportedGlyphFormat(i16),
    /// A flag run would expand past the glyph's point count, or the flag
    /// data ended before every point had a flag.
    MalformedFlagRun,
    /// A byte range that is not a whole number of array elements.
    InvalidArrayLen,
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ReadError::UnexpectedEndOfData => write!(f, "A read was past the end of the data"),
            ReadError::OutOfRange => write!(f, "A position was out of range"),
            ReadError::MissingTable(tag) => write!(f, "the {tag} table is missing"),
            ReadError::UnsupportedGlyphFormat(count) => {
                write!(f, "Unsupported glyph format (numberOfContours {count})")
            }
            ReadError::MalformedFlagRun => {
                write!(f, "A flag run did not match the glyph's point count")
            }
            ReadError::InvalidArrayLen => {
                write!(f, "Specified array length not a multiple of item size")
            }
        }
    }
}

impl std::error::Error for ReadError {}
