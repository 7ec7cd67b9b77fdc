//! Common [scalar data types][data types] used in font files
//!
//! [data types]: https://docs.microsoft.com/en-us/typography/opentype/spec/otff#data-types

#![cfg_attr(not(feature = "bytemuck"), forbid(unsafe_code))]
#![deny(rustdoc::broken_intra_doc_links)]

mod bbox;
mod point;
mod raw;
mod tag;

pub use bbox::BoundingBox;
pub use point::Point;
pub use raw::{BigEndian, FixedSize, ReadScalar, Scalar};
pub use tag::{InvalidTag, Tag};

/// The SFNT version for fonts containing TrueType outlines.
pub const TT_SFNT_VERSION: u32 = 0x00010000;
