//! test data shared between the glyph parsing crates.

use read_glyphs::types::Tag;
use read_glyphs::{be_buffer, test_helpers::BeBuffer};

/// A font with a single `glyf` table holding one simple glyph.
///
/// The glyph has one contour of three on-curve points at (5, 0),
/// (3, 3) and (4, 2), stored as two-byte deltas.
#[rustfmt::skip]
pub static SIMPLE_GLYF: &[u8] = &[
    0x00, 0x01, 0x00, 0x00, // sfnt version 1.0
    0x00, 0x01,             // numTables 1
    0x00, 0x10,             // searchRange 16
    0x00, 0x00,             // entrySelector 0
    0x00, 0x00,             // rangeShift 0
                            // table record:
    0x67, 0x6c, 0x79, 0x66, // 'glyf'
    0x00, 0x00, 0x00, 0x00, // checksum
    0x00, 0x00, 0x00, 0x1C, // offset 28
    0x00, 0x00, 0x00, 0x1D, // length 29
                            // glyph:
    0x00, 0x01,             // numberOfContours 1
    0x00, 0x03,             // xMin 3
    0x00, 0x00,             // yMin 0
    0x00, 0x05,             // xMax 5
    0x00, 0x03,             // yMax 3
    0x00, 0x02,             // endPtsOfContours[0] 2
    0x00, 0x00,             // instructionLength 0
    0x01, 0x01, 0x01,       // flags: three on-curve points
    0x00, 0x05,             // x delta 5
    0xFF, 0xFE,             // x delta -2
    0x00, 0x01,             // x delta 1
    0x00, 0x00,             // y delta 0
    0x00, 0x03,             // y delta 3
    0xFF, 0xFF,             // y delta -1
];

/// A font with two `glyf` records.
///
/// The first record points at an empty glyph, the second at a glyph
/// with three points. A lookup for `glyf` must resolve to the second.
pub fn duplicate_glyf_font() -> BeBuffer {
    let mut buffer = be_buffer! {
        0x00010000u32,          // sfnt version
        2u16,                   // numTables
        32u16,                  // searchRange
        1u16,                   // entrySelector
        0u16,                   // rangeShift

        (Tag::new(b"glyf")),
        0u32,                   // checksum
        {0u32: "first_offset"},
        12u32,                  // length

        (Tag::new(b"glyf")),
        0u32,                   // checksum
        {0u32: "second_offset"},
        29u32,                  // length

        /* ### First glyph: no contours ### */
        {0i16: "first_glyph"},
        [0i16, 0, 0, 0],        // bounding box
        0u16,                   // instructionLength

        /* ### Second glyph: one contour, three points ### */
        {1i16: "second_glyph"},
        [3i16, 0, 5, 3],        // bounding box
        2u16,                   // endPtsOfContours[0]
        0u16,                   // instructionLength
        [1u8, 1, 1],            // flags: on curve
        [5i16, -2, 1],          // x deltas
        [0i16, 3, -1]           // y deltas
    };

    for (offset_tag, glyph_tag) in [
        ("first_offset", "first_glyph"),
        ("second_offset", "second_glyph"),
    ] {
        let offset = buffer.offset_for(glyph_tag) as u32;
        buffer.write_at(offset_tag, offset);
    }
    buffer
}

/// A font whose single glyph is a composite (negative contour count).
pub fn composite_glyph_font() -> BeBuffer {
    let mut buffer = be_buffer! {
        0x00010000u32,          // sfnt version
        1u16,                   // numTables
        16u16,                  // searchRange
        0u16,                   // entrySelector
        0u16,                   // rangeShift

        (Tag::new(b"glyf")),
        0u32,                   // checksum
        {0u32: "offset"},
        10u32,                  // length

        {(-1i16): "glyph"},     // numberOfContours
        [0i16, 0, 0, 0]         // bounding box
    };

    let offset = buffer.offset_for("glyph") as u32;
    buffer.write_at("offset", offset);
    buffer
}

/// A font whose `glyf` record points past the end of the data.
pub fn bad_offset_font() -> BeBuffer {
    be_buffer! {
        0x00010000u32,          // sfnt version
        1u16,                   // numTables
        16u16,                  // searchRange
        0u16,                   // entrySelector
        0u16,                   // rangeShift

        (Tag::new(b"glyf")),
        0u32,                   // checksum
        0xFFFFu32,              // offset, far past the end
        4u32                    // length
    }
}

/// A font whose only table is `head`; lookups for `glyf` must fail.
pub fn no_glyf_font() -> BeBuffer {
    let mut buffer = be_buffer! {
        0x00010000u32,          // sfnt version
        1u16,                   // numTables
        16u16,                  // searchRange
        0u16,                   // entrySelector
        0u16,                   // rangeShift

        (Tag::new(b"head")),
        0u32,                   // checksum
        {0u32: "offset"},
        4u32,                   // length

        {0xdeadbeefu32: "head"} // table data
    };

    let offset = buffer.offset_for("head") as u32;
    buffer.write_at("offset", offset);
    buffer
}
