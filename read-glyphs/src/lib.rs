//! Reading TrueType glyph outlines
//!
//! This crate provides memory safe parsing of binary font data, focused
//! on the tables needed to extract a glyph outline. It attempts to
//! provide raw access to the underlying data as it is described in the
//! [OpenType specification][spec], parsing zero-copy where the format
//! allows it; decoding an outline's variable-length flag and coordinate
//! data allocates.
//!
//! The entry point is [`FontRef`], which parses the [table
//! directory][table-directory] at the start of a font file and serves
//! the data for individual tables.
//!
//! # Example
//!
//! ```no_run
//! # let path_to_my_font_file = std::path::Path::new("");
//! use read_glyphs::{FontRef, TableProvider};
//! let font_bytes = std::fs::read(path_to_my_font_file).unwrap();
//! let font = FontRef::new(&font_bytes).expect("failed to read font data");
//! let glyf = font.glyf().expect("missing 'glyf' table");
//! let outline = glyf.glyph_at(0).and_then(|glyph| glyph.outline()).unwrap();
//!
//! println!("decoded {} points", outline.num_points());
//! ```
//!
//! [spec]: https://learn.microsoft.com/en-us/typography/opentype/spec/
//! [table-directory]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod font_data;
mod read;
mod table_directory;
mod table_provider;
pub mod tables;

#[cfg(any(test, feature = "test_helpers"))]
pub mod test_helpers;

pub use font_data::{Cursor, FontData};
pub use read::{FontRead, ReadError};
pub use table_directory::{TableDirectory, TableRecord};
pub use table_provider::{TableProvider, TopLevelTable};

/// Public re-export of the glyph-types crate.
pub extern crate glyph_types as types;

use types::Tag;

/// Reference to an in-memory font.
///
/// This is a simple implementation of the [`TableProvider`] trait backed
/// by a borrowed slice containing font data.
#[derive(Clone)]
pub struct FontRef<'a> {
    data: FontData<'a>,
    pub table_directory: TableDirectory<'a>,
}

impl<'a> FontRef<'a> {
    /// Creates a new reference to an in-memory font backed by the given data.
    ///
    /// The data must begin with a [table directory] to be considered valid.
    ///
    /// [table directory]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory
    pub fn new(data: &'a [u8]) -> Result<Self, ReadError> {
        let data = FontData::new(data);
        Ok(FontRef {
            data,
            table_directory: TableDirectory::read(data)?,
        })
    }

    /// Returns the underlying font data.
    pub fn data(&self) -> FontData<'a> {
        self.data
    }

    /// Returns the associated table directory.
    pub fn table_directory(&self) -> &TableDirectory<'a> {
        &self.table_directory
    }

    /// Returns the data for the table with the specified tag.
    ///
    /// The returned data runs from the record's offset to the end of the
    /// font; the record's length field is not used to bound it.
    fn table_data(&self, tag: Tag) -> Result<FontData<'a>, ReadError> {
        let record = self
            .table_directory
            .find_record(tag)
            .ok_or(ReadError::MissingTable(tag))?;
        self.data
            .split_off(record.offset() as usize)
            .ok_or(ReadError::OutOfRange)
    }
}

impl<'a> TableProvider<'a> for FontRef<'a> {
    fn data_for_tag(&self, tag: Tag) -> Result<FontData<'a>, ReadError> {
        self.table_data(tag)
    }
}

#[cfg(test)]
mod tests {
    use glyph_test_data as test_data;

    use crate::{FontRef, ReadError, TableProvider};
    use types::{Point, Tag};

    #[test]
    fn single_glyph_font() {
        let font = FontRef::new(test_data::SIMPLE_GLYF).unwrap();
        assert_eq!(font.table_directory.num_tables(), 1);

        let glyf = font.glyf().unwrap();
        let glyph = glyf.glyph_at(0).unwrap();
        assert_eq!(glyph.number_of_contours(), 1);

        let outline = glyph.outline().unwrap();
        assert_eq!(
            outline.points(),
            [Point::new(5, 0), Point::new(3, 3), Point::new(4, 2)]
        );
        assert!((0..3).all(|ix| outline.on_curve(ix)));
    }

    #[test]
    fn missing_glyf_table() {
        let font_data = test_data::no_glyf_font();
        let font = FontRef::new(&font_data).unwrap();
        assert!(matches!(
            font.glyf(),
            Err(ReadError::MissingTable(tag)) if tag == Tag::new(b"glyf")
        ));
        // the table that is present resolves
        assert!(font.data_for_tag(Tag::new(b"head")).is_ok());
    }

    #[test]
    fn duplicate_glyf_last_record_wins() {
        let font_data = test_data::duplicate_glyf_font();
        let font = FontRef::new(&font_data).unwrap();
        // the first record describes an empty glyph; the second has three
        // points and must win
        let glyph = font.glyf().unwrap().glyph_at(0).unwrap();
        assert_eq!(glyph.num_points(), 3);
    }

    #[test]
    fn table_offset_past_end_of_data() {
        let font_data = test_data::bad_offset_font();
        let font = FontRef::new(&font_data).unwrap();
        assert!(matches!(font.glyf(), Err(ReadError::OutOfRange)));
    }

    #[test]
    fn composite_glyph_rejected() {
        let font_data = test_data::composite_glyph_font();
        let font = FontRef::new(&font_data).unwrap();
        assert!(matches!(
            font.glyf().unwrap().glyph_at(0),
            Err(ReadError::UnsupportedGlyphFormat(-1))
        ));
    }

    #[test]
    fn not_a_font() {
        assert!(matches!(
            FontRef::new(&[0, 1, 2]),
            Err(ReadError::UnexpectedEndOfData)
        ));
    }
}
