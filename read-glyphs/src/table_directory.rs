//! The [table directory][directory] at the start of a font file
//!
//! [directory]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory

use types::{BigEndian, FixedSize, Tag};

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};

/// The directory of the tables in a font file.
#[derive(Debug, Clone)]
pub struct TableDirectory<'a> {
    sfnt_version: u32,
    num_tables: u16,
    search_range: u16,
    entry_selector: u16,
    range_shift: u16,
    table_records: &'a [TableRecord],
}

impl<'a> FontRead<'a> for TableDirectory<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let sfnt_version: u32 = cursor.read()?;
        let num_tables: u16 = cursor.read()?;
        let search_range: u16 = cursor.read()?;
        let entry_selector: u16 = cursor.read()?;
        let range_shift: u16 = cursor.read()?;
        let table_records = cursor.read_array(num_tables as usize)?;
        Ok(TableDirectory {
            sfnt_version,
            num_tables,
            search_range,
            entry_selector,
            range_shift,
            table_records,
        })
    }
}

impl<'a> TableDirectory<'a> {
    /// 0x00010000 for fonts with TrueType outlines.
    pub fn sfnt_version(&self) -> u32 {
        self.sfnt_version
    }

    /// Number of tables.
    pub fn num_tables(&self) -> u16 {
        self.num_tables
    }

    pub fn search_range(&self) -> u16 {
        self.search_range
    }

    pub fn entry_selector(&self) -> u16 {
        self.entry_selector
    }

    pub fn range_shift(&self) -> u16 {
        self.range_shift
    }

    /// The records for the tables in the font, in file order.
    pub fn table_records(&self) -> &'a [TableRecord] {
        self.table_records
    }

    /// Return the record for the table with the given tag, if present.
    ///
    /// If a tag occurs in more than one record, the last record is
    /// returned.
    pub fn find_record(&self, tag: Tag) -> Option<&'a TableRecord> {
        self.table_records
            .iter()
            .rev()
            .find(|record| record.tag.get() == tag)
    }
}

/// Record for a table in the directory.
#[derive(Copy, Clone, Debug, bytemuck::AnyBitPattern)]
#[repr(C, packed)]
pub struct TableRecord {
    /// Table identifier.
    pub tag: BigEndian<Tag>,
    /// Checksum for the table.
    pub checksum: BigEndian<u32>,
    /// Offset from the beginning of the font data.
    pub offset: BigEndian<u32>,
    /// Length of the table.
    pub length: BigEndian<u32>,
}

/// Note: this requires `TableRecord` to be `repr(packed)`.
impl FixedSize for TableRecord {
    const RAW_BYTE_LEN: usize = std::mem::size_of::<Self>();
}

impl TableRecord {
    pub fn tag(&self) -> Tag {
        self.tag.get()
    }

    pub fn checksum(&self) -> u32 {
        self.checksum.get()
    }

    pub fn offset(&self) -> u32 {
        self.offset.get()
    }

    pub fn length(&self) -> u32 {
        self.length.get()
    }
}

#[cfg(test)]
mod tests {
    use types::TT_SFNT_VERSION;

    use crate::test_helpers::BeBuffer;

    use super::*;

    fn directory_header(num_tables: u16) -> BeBuffer {
        BeBuffer::new()
            .push(TT_SFNT_VERSION)
            .push(num_tables)
            .push(16u16) // search_range
            .push(0u16) // entry_selector
            .push(0u16) // range_shift
    }

    fn push_record(buf: BeBuffer, tag: &[u8; 4], offset: u32, length: u32) -> BeBuffer {
        buf.push(Tag::new(tag))
            .push(0xdeadbeef_u32)
            .push(offset)
            .push(length)
    }

    #[test]
    fn parse_directory() {
        let buf = directory_header(2);
        let buf = push_record(buf, b"glyf", 0x20, 0x100);
        let buf = push_record(buf, b"loca", 0x120, 0x10);

        let directory = TableDirectory::read(buf.font_data()).unwrap();
        assert_eq!(directory.sfnt_version(), TT_SFNT_VERSION);
        assert_eq!(directory.num_tables(), 2);
        assert_eq!(directory.table_records().len(), 2);

        let glyf = directory.find_record(Tag::new(b"glyf")).unwrap();
        assert_eq!(glyf.tag(), Tag::new(b"glyf"));
        assert_eq!(glyf.checksum(), 0xdeadbeef);
        assert_eq!(glyf.offset(), 0x20);
        assert_eq!(glyf.length(), 0x100);

        assert_eq!(directory.find_record(Tag::new(b"loca")).unwrap().offset(), 0x120);
        assert!(directory.find_record(Tag::new(b"cmap")).is_none());
    }

    #[test]
    fn duplicate_tags_last_record_wins() {
        let buf = directory_header(3);
        let buf = push_record(buf, b"glyf", 0x20, 4);
        let buf = push_record(buf, b"loca", 0x30, 4);
        let buf = push_record(buf, b"glyf", 0x40, 4);

        let directory = TableDirectory::read(buf.font_data()).unwrap();
        let record = directory.find_record(Tag::new(b"glyf")).unwrap();
        assert_eq!(record.offset(), 0x40);
    }

    #[test]
    fn record_count_past_end_of_data() {
        // claims three records but contains one
        let buf = directory_header(3);
        let buf = push_record(buf, b"glyf", 0x20, 4);
        assert!(matches!(
            TableDirectory::read(buf.font_data()),
            Err(ReadError::UnexpectedEndOfData)
        ));
    }

    #[test]
    fn empty_directory() {
        let buf = directory_header(0);
        let directory = TableDirectory::read(buf.font_data()).unwrap();
        assert!(directory.table_records().is_empty());
        assert!(directory.find_record(Tag::new(b"glyf")).is_none());
    }
}
