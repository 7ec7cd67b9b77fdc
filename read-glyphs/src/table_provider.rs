//! a trait for things that can serve font tables

use types::Tag;

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};
use crate::tables::glyf;

/// A table that has an associated tag.
pub trait TopLevelTable {
    /// The table's tag.
    const TAG: Tag;
}

/// An interface for accessing tables from a font (or font-like object)
pub trait TableProvider<'a> {
    /// Return the data for the table with the given tag.
    ///
    /// Fails with [`ReadError::MissingTable`] if the directory has no
    /// record for the tag, and [`ReadError::OutOfRange`] if the record's
    /// offset is past the end of the font data.
    fn data_for_tag(&self, tag: Tag) -> Result<FontData<'a>, ReadError>;

    fn expect_table<T: TopLevelTable + FontRead<'a>>(&self) -> Result<T, ReadError> {
        self.data_for_tag(T::TAG).and_then(FontRead::read)
    }

    fn glyf(&self) -> Result<glyf::Glyf<'a>, ReadError> {
        self.expect_table()
    }
}
