//! The [glyf (Glyph Data)](https://docs.microsoft.com/en-us/typography/opentype/spec/glyf) table

use types::{BigEndian, BoundingBox, FixedSize, Point, Scalar, Tag};

use crate::font_data::{Cursor, FontData};
use crate::read::{FontRead, ReadError};
use crate::table_provider::TopLevelTable;

/// The [glyf (Glyph Data)](https://docs.microsoft.com/en-us/typography/opentype/spec/glyf) table
#[derive(Debug, Clone)]
pub struct Glyf<'a> {
    data: FontData<'a>,
}

impl TopLevelTable for Glyf<'_> {
    /// `glyf`
    const TAG: Tag = Tag::new(b"glyf");
}

impl<'a> FontRead<'a> for Glyf<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        Ok(Glyf { data })
    }
}

impl<'a> Glyf<'a> {
    /// Read the glyph description starting at the given byte offset in
    /// the table.
    ///
    /// Mapping a glyph id to its offset is the job of the loca table,
    /// which is not handled here. In a font whose glyf table holds a
    /// single glyph the description is at offset zero.
    pub fn glyph_at(&self, offset: usize) -> Result<SimpleGlyph<'a>, ReadError> {
        let data = self.data.split_off(offset).ok_or(ReadError::OutOfRange)?;
        SimpleGlyph::read(data)
    }

    /// The raw data for the table.
    pub fn data(&self) -> FontData<'a> {
        self.data
    }
}

/// The [Glyph Header](https://docs.microsoft.com/en-us/typography/opentype/spec/glyf#glyph-headers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphHeader {
    number_of_contours: i16,
    bounds: BoundingBox<i16>,
}

impl FontRead<'_> for GlyphHeader {
    fn read(data: FontData<'_>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let number_of_contours: i16 = cursor.read()?;
        let x_min: i16 = cursor.read()?;
        let y_min: i16 = cursor.read()?;
        let x_max: i16 = cursor.read()?;
        let y_max: i16 = cursor.read()?;
        Ok(GlyphHeader {
            number_of_contours,
            bounds: BoundingBox {
                x_min,
                y_min,
                x_max,
                y_max,
            },
        })
    }
}

impl FixedSize for GlyphHeader {
    const RAW_BYTE_LEN: usize = 5 * i16::RAW_BYTE_LEN;
}

impl GlyphHeader {
    /// If the number of contours is greater than or equal to zero,
    /// this is a simple glyph. If negative, this is a composite glyph
    /// — the value -1 should be used for composite glyphs.
    pub fn number_of_contours(&self) -> i16 {
        self.number_of_contours
    }

    /// Minimum x for coordinate data.
    pub fn x_min(&self) -> i16 {
        self.bounds.x_min
    }

    /// Minimum y for coordinate data.
    pub fn y_min(&self) -> i16 {
        self.bounds.y_min
    }

    /// Maximum x for coordinate data.
    pub fn x_max(&self) -> i16 {
        self.bounds.x_max
    }

    /// Maximum y for coordinate data.
    pub fn y_max(&self) -> i16 {
        self.bounds.y_max
    }

    /// The bounding box for the glyph's coordinate data.
    pub fn bounds(&self) -> BoundingBox<i16> {
        self.bounds
    }
}

/// A simple (non-composite) [glyph description](https://docs.microsoft.com/en-us/typography/opentype/spec/glyf#glyph-headers)
#[derive(Debug, Clone)]
pub struct SimpleGlyph<'a> {
    header: GlyphHeader,
    end_pts_of_contours: &'a [BigEndian<u16>],
    instructions: &'a [u8],
    glyph_data: FontData<'a>,
}

impl<'a> FontRead<'a> for SimpleGlyph<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let header = GlyphHeader::read(data)?;
        let number_of_contours = header.number_of_contours();
        if number_of_contours < 0 {
            return Err(ReadError::UnsupportedGlyphFormat(number_of_contours));
        }
        let mut cursor = data.cursor();
        cursor.skip(GlyphHeader::RAW_BYTE_LEN)?;
        let end_pts_of_contours = cursor.read_array(number_of_contours as usize)?;
        let instruction_length: u16 = cursor.read()?;
        let instructions = cursor.read_array(instruction_length as usize)?;
        let glyph_data = data.split_off(cursor.position()).unwrap_or_default();
        Ok(SimpleGlyph {
            header,
            end_pts_of_contours,
            instructions,
            glyph_data,
        })
    }
}

impl<'a> SimpleGlyph<'a> {
    /// The glyph header.
    pub fn header(&self) -> GlyphHeader {
        self.header
    }

    /// Number of contours in the glyph. Zero is legal, and describes a
    /// glyph with no outline (such as a space).
    pub fn number_of_contours(&self) -> i16 {
        self.header.number_of_contours()
    }

    /// Array of point indices for the last point of each contour,
    /// in increasing numeric order
    pub fn end_pts_of_contours(&self) -> &'a [BigEndian<u16>] {
        self.end_pts_of_contours
    }

    /// Array of instruction byte code for the glyph.
    pub fn instructions(&self) -> &'a [u8] {
        self.instructions
    }

    /// The raw data for the flags and x/y coordinates.
    pub fn glyph_data(&self) -> FontData<'a> {
        self.glyph_data
    }

    /// Returns the total number of points.
    pub fn num_points(&self) -> usize {
        self.end_pts_of_contours
            .last()
            .map(|last| last.get() as usize + 1)
            .unwrap_or(0)
    }

    /// Decode the flag and coordinate data into an owned outline.
    ///
    /// A flag run that would produce more flags than the glyph has
    /// points fails with [`ReadError::MalformedFlagRun`], as does flag
    /// data that ends before every point has a flag. Coordinate data
    /// that ends early fails with [`ReadError::UnexpectedEndOfData`].
    pub fn outline(&self) -> Result<GlyphOutline, ReadError> {
        let n_points = self.num_points();
        let mut cursor = self.glyph_data.cursor();
        let mut flags = Vec::with_capacity(n_points);
        while flags.len() < n_points {
            let flag: SimpleGlyphFlags =
                cursor.read().map_err(|_| ReadError::MalformedFlagRun)?;
            if flag.contains(SimpleGlyphFlags::REPEAT_FLAG) {
                let count = cursor
                    .read::<u8>()
                    .map_err(|_| ReadError::MalformedFlagRun)? as usize
                    + 1;
                if count > n_points - flags.len() {
                    return Err(ReadError::MalformedFlagRun);
                }
                flags.resize(flags.len() + count, flag);
            } else {
                flags.push(flag);
            }
        }
        let x_coordinates = read_coordinates(
            &mut cursor,
            &flags,
            SimpleGlyphFlags::X_SHORT_VECTOR,
            SimpleGlyphFlags::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR,
        )?;
        let y_coordinates = read_coordinates(
            &mut cursor,
            &flags,
            SimpleGlyphFlags::Y_SHORT_VECTOR,
            SimpleGlyphFlags::Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR,
        )?;
        Ok(GlyphOutline {
            end_pts_of_contours: self
                .end_pts_of_contours
                .iter()
                .map(|end| end.get())
                .collect(),
            instructions: self.instructions.to_vec(),
            flags,
            x_coordinates,
            y_coordinates,
        })
    }
}

/// Decode one delta-encoded coordinate array, accumulating the deltas
/// into absolute values.
///
/// The same routine serves x and y coordinates; only the flag bits
/// differ.
fn read_coordinates(
    cursor: &mut Cursor,
    flags: &[SimpleGlyphFlags],
    short_vector: SimpleGlyphFlags,
    same_or_positive: SimpleGlyphFlags,
) -> Result<Vec<i32>, ReadError> {
    let mut coords = Vec::with_capacity(flags.len());
    let mut value = 0i32;
    for flag in flags {
        let mut delta = 0i32;
        if flag.contains(short_vector) {
            delta = cursor.read::<u8>()? as i32;
            if !flag.contains(same_or_positive) {
                delta = -delta;
            }
        } else if !flag.contains(same_or_positive) {
            delta = cursor.read::<i16>()? as i32;
        }
        value = value.wrapping_add(delta);
        coords.push(value);
    }
    Ok(coords)
}

/// Flags used in [`SimpleGlyph`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct SimpleGlyphFlags {
    bits: u8,
}

impl SimpleGlyphFlags {
    /// Bit 0: If set, the point is on the curve; otherwise, it is off
    /// the curve.
    pub const ON_CURVE_POINT: Self = Self { bits: 0x01 };

    /// Bit 1: If set, the corresponding x-coordinate is 1 byte long,
    /// and the sign is determined by the
    /// X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR flag.
    pub const X_SHORT_VECTOR: Self = Self { bits: 0x02 };

    /// Bit 2: If set, the corresponding y-coordinate is 1 byte long,
    /// and the sign is determined by the
    /// Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR flag.
    pub const Y_SHORT_VECTOR: Self = Self { bits: 0x04 };

    /// Bit 3: If set, the next byte (read as unsigned) specifies the
    /// number of additional times this flag byte is to be repeated in
    /// the logical flags array.
    pub const REPEAT_FLAG: Self = Self { bits: 0x08 };

    /// Bit 4: This flag has two meanings, depending on how the
    /// X_SHORT_VECTOR flag is set. If X_SHORT_VECTOR is set, this bit
    /// describes the sign of the value, with 1 equalling positive and
    /// 0 negative. If X_SHORT_VECTOR is not set and this bit is set,
    /// then the current x-coordinate is the same as the previous
    /// x-coordinate. If X_SHORT_VECTOR is not set and this bit is also
    /// not set, the current x-coordinate is a signed 16-bit delta
    /// vector.
    pub const X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR: Self = Self { bits: 0x10 };

    /// Bit 5: This flag has two meanings, depending on how the
    /// Y_SHORT_VECTOR flag is set. If Y_SHORT_VECTOR is set, this bit
    /// describes the sign of the value, with 1 equalling positive and
    /// 0 negative. If Y_SHORT_VECTOR is not set and this bit is set,
    /// then the current y-coordinate is the same as the previous
    /// y-coordinate. If Y_SHORT_VECTOR is not set and this bit is also
    /// not set, the current y-coordinate is a signed 16-bit delta
    /// vector.
    pub const Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR: Self = Self { bits: 0x20 };

    /// Bit 6: If set, contours in the glyph description may overlap.
    pub const OVERLAP_SIMPLE: Self = Self { bits: 0x40 };

    /// Returns an empty set of flags.
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Returns the set containing all flags.
    pub const fn all() -> Self {
        Self {
            bits: Self::ON_CURVE_POINT.bits
                | Self::X_SHORT_VECTOR.bits
                | Self::Y_SHORT_VECTOR.bits
                | Self::REPEAT_FLAG.bits
                | Self::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR.bits
                | Self::Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR.bits
                | Self::OVERLAP_SIMPLE.bits,
        }
    }

    /// Returns the raw value of the flags currently stored.
    pub const fn bits(self) -> u8 {
        self.bits
    }

    /// Convert from underlying bit representation, dropping any bits
    /// that do not correspond to flags.
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self {
            bits: bits & Self::all().bits,
        }
    }

    /// Returns `true` if all of the flags in `other` are contained
    /// within `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.bits & other.bits == other.bits
    }

    /// Returns `true` if there are flags common to both `self` and
    /// `other`.
    pub const fn intersects(self, other: Self) -> bool {
        self.bits & other.bits != 0
    }
}

impl std::ops::BitOr for SimpleGlyphFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            bits: self.bits | rhs.bits,
        }
    }
}

impl std::ops::BitAnd for SimpleGlyphFlags {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self {
            bits: self.bits & rhs.bits,
        }
    }
}

impl Scalar for SimpleGlyphFlags {
    type Raw = <u8 as Scalar>::Raw;

    fn to_raw(self) -> Self::Raw {
        self.bits().to_raw()
    }

    fn from_raw(raw: Self::Raw) -> Self {
        let t = <u8>::from_raw(raw);
        Self::from_bits_truncate(t)
    }
}

impl FixedSize for SimpleGlyphFlags {
    const RAW_BYTE_LEN: usize = u8::RAW_BYTE_LEN;
}

/// The decoded outline of a simple glyph, with all deltas applied.
///
/// The flag and coordinate vectors all have one entry per point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphOutline {
    end_pts_of_contours: Vec<u16>,
    instructions: Vec<u8>,
    flags: Vec<SimpleGlyphFlags>,
    x_coordinates: Vec<i32>,
    y_coordinates: Vec<i32>,
}

impl GlyphOutline {
    /// Point indices for the last point of each contour.
    pub fn end_pts_of_contours(&self) -> &[u16] {
        &self.end_pts_of_contours
    }

    /// Instruction byte code for the glyph.
    pub fn instructions(&self) -> &[u8] {
        &self.instructions
    }

    /// The flags for each point, with any repeat runs expanded.
    pub fn flags(&self) -> &[SimpleGlyphFlags] {
        &self.flags
    }

    /// The absolute x coordinate for each point.
    pub fn x_coordinates(&self) -> &[i32] {
        &self.x_coordinates
    }

    /// The absolute y coordinate for each point.
    pub fn y_coordinates(&self) -> &[i32] {
        &self.y_coordinates
    }

    /// The total number of points.
    pub fn num_points(&self) -> usize {
        self.flags.len()
    }

    /// The points of the outline, in absolute coordinates.
    pub fn points(&self) -> Vec<Point<i32>> {
        self.x_coordinates
            .iter()
            .zip(self.y_coordinates.iter())
            .map(|(&x, &y)| Point::new(x, y))
            .collect()
    }

    /// `true` if the point at `index` is on the curve.
    pub fn on_curve(&self, index: usize) -> bool {
        self.flags
            .get(index)
            .map(|flag| flag.contains(SimpleGlyphFlags::ON_CURVE_POINT))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helpers::BeBuffer;

    use super::*;

    fn glyph_header(number_of_contours: i16) -> BeBuffer {
        BeBuffer::new()
            .push(number_of_contours)
            .push(1i16) // x_min
            .push(0i16) // y_min
            .push(5i16) // x_max
            .push(3i16) // y_max
    }

    #[test]
    fn simple_glyph() {
        // one contour of three points, no instructions, long x and y
        // deltas of (5, 0), (-2, 3), (1, -1)
        let buf = glyph_header(1)
            .push(2u16) // end_pts_of_contours
            .push(0u16) // instruction_length
            .extend([SimpleGlyphFlags::ON_CURVE_POINT; 3])
            .extend([5i16, -2, 1])
            .extend([0i16, 3, -1]);

        let glyph = SimpleGlyph::read(buf.font_data()).unwrap();
        assert_eq!(glyph.number_of_contours(), 1);
        assert_eq!(glyph.header().bounds().x_max, 5);
        assert_eq!(glyph.num_points(), 3);
        assert!(glyph.instructions().is_empty());

        let outline = glyph.outline().unwrap();
        assert_eq!(outline.end_pts_of_contours(), [2]);
        assert_eq!(outline.x_coordinates(), [5, 3, 4]);
        assert_eq!(outline.y_coordinates(), [0, 3, 2]);
        assert_eq!(
            outline.points(),
            [Point::new(5, 0), Point::new(3, 3), Point::new(4, 2)]
        );
        assert!((0..3).all(|ix| outline.on_curve(ix)));
    }

    #[test]
    fn two_contour_glyph() {
        // point count comes from the last entry in end_pts_of_contours,
        // and deltas keep accumulating across the contour boundary
        let flag = SimpleGlyphFlags::ON_CURVE_POINT
            | SimpleGlyphFlags::X_SHORT_VECTOR
            | SimpleGlyphFlags::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR
            | SimpleGlyphFlags::Y_SHORT_VECTOR
            | SimpleGlyphFlags::Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR;
        let buf = glyph_header(2)
            .push(2u16) // end_pts_of_contours
            .push(4u16)
            .push(0u16) // instruction_length
            .extend([flag; 5])
            .extend([1u8, 1, 1, 1, 1]) // x deltas
            .extend([2u8, 2, 2, 2, 2]); // y deltas

        let glyph = SimpleGlyph::read(buf.font_data()).unwrap();
        assert_eq!(glyph.number_of_contours(), 2);
        assert_eq!(glyph.num_points(), 5);

        let outline = glyph.outline().unwrap();
        assert_eq!(outline.end_pts_of_contours(), [2, 4]);
        assert_eq!(outline.x_coordinates(), [1, 2, 3, 4, 5]);
        assert_eq!(outline.y_coordinates(), [2, 4, 6, 8, 10]);
    }

    #[test]
    fn repeat_flag_expands() {
        // two flag bytes describe all three points
        let flag = SimpleGlyphFlags::ON_CURVE_POINT
            | SimpleGlyphFlags::X_SHORT_VECTOR
            | SimpleGlyphFlags::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR
            | SimpleGlyphFlags::Y_SHORT_VECTOR
            | SimpleGlyphFlags::Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR
            | SimpleGlyphFlags::REPEAT_FLAG;
        let buf = glyph_header(1)
            .push(2u16)
            .push(0u16)
            .push(flag)
            .push(2u8) // two additional copies
            .extend([1u8, 2, 3]) // x deltas
            .extend([4u8, 5, 6]); // y deltas

        let outline = SimpleGlyph::read(buf.font_data())
            .unwrap()
            .outline()
            .unwrap();
        assert_eq!(outline.num_points(), 3);
        assert_eq!(outline.flags().len(), 3);
        assert_eq!(outline.x_coordinates(), [1, 3, 6]);
        assert_eq!(outline.y_coordinates(), [4, 9, 15]);
    }

    #[test]
    fn short_vector_signs() {
        // x: short positive, short negative; y: same twice
        let positive = SimpleGlyphFlags::X_SHORT_VECTOR
            | SimpleGlyphFlags::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR
            | SimpleGlyphFlags::Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR;
        let negative = SimpleGlyphFlags::X_SHORT_VECTOR
            | SimpleGlyphFlags::Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR;
        let buf = glyph_header(1)
            .push(1u16)
            .push(0u16)
            .push(positive)
            .push(negative)
            .extend([10u8, 3]); // no y data at all

        let outline = SimpleGlyph::read(buf.font_data())
            .unwrap()
            .outline()
            .unwrap();
        assert_eq!(outline.x_coordinates(), [10, 7]);
        assert_eq!(outline.y_coordinates(), [0, 0]);
    }

    #[test]
    fn repeat_count_past_point_count() {
        let flag = SimpleGlyphFlags::ON_CURVE_POINT | SimpleGlyphFlags::REPEAT_FLAG;
        let buf = glyph_header(1)
            .push(2u16) // three points
            .push(0u16)
            .push(flag)
            .push(200u8); // 201 flags for a three point glyph

        let glyph = SimpleGlyph::read(buf.font_data()).unwrap();
        assert!(matches!(glyph.outline(), Err(ReadError::MalformedFlagRun)));
    }

    #[test]
    fn flag_data_ends_early() {
        let buf = glyph_header(1)
            .push(2u16) // three points
            .push(0u16)
            .push(SimpleGlyphFlags::ON_CURVE_POINT); // one flag, then nothing

        let glyph = SimpleGlyph::read(buf.font_data()).unwrap();
        assert!(matches!(glyph.outline(), Err(ReadError::MalformedFlagRun)));
    }

    #[test]
    fn repeat_count_byte_missing() {
        let flag = SimpleGlyphFlags::ON_CURVE_POINT | SimpleGlyphFlags::REPEAT_FLAG;
        let buf = glyph_header(1)
            .push(2u16)
            .push(0u16)
            .push(flag); // repeat flag set but no count byte follows

        let glyph = SimpleGlyph::read(buf.font_data()).unwrap();
        assert!(matches!(glyph.outline(), Err(ReadError::MalformedFlagRun)));
    }

    #[test]
    fn coordinate_data_ends_early() {
        let buf = glyph_header(1)
            .push(1u16) // two points
            .push(0u16)
            .extend([SimpleGlyphFlags::ON_CURVE_POINT; 2])
            .push(9i16); // one long x delta, the second is missing

        let glyph = SimpleGlyph::read(buf.font_data()).unwrap();
        assert!(matches!(
            glyph.outline(),
            Err(ReadError::UnexpectedEndOfData)
        ));
    }

    #[test]
    fn composite_glyph_is_unsupported() {
        let buf = glyph_header(-1);
        assert!(matches!(
            SimpleGlyph::read(buf.font_data()),
            Err(ReadError::UnsupportedGlyphFormat(-1))
        ));
    }

    #[test]
    fn empty_glyph() {
        let buf = glyph_header(0).push(0u16);
        let glyph = SimpleGlyph::read(buf.font_data()).unwrap();
        assert_eq!(glyph.num_points(), 0);
        let outline = glyph.outline().unwrap();
        assert_eq!(outline.num_points(), 0);
        assert!(outline.points().is_empty());
    }

    #[test]
    fn endpoints_past_end_of_data() {
        // header claims two contours but the data ends after one endpoint
        let buf = glyph_header(2).push(2u16);
        assert!(matches!(
            SimpleGlyph::read(buf.font_data()),
            Err(ReadError::UnexpectedEndOfData)
        ));
    }

    #[test]
    fn instructions_split_from_glyph_data() {
        let flag = SimpleGlyphFlags::ON_CURVE_POINT
            | SimpleGlyphFlags::X_SHORT_VECTOR
            | SimpleGlyphFlags::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR
            | SimpleGlyphFlags::Y_SHORT_VECTOR
            | SimpleGlyphFlags::Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR;
        let buf = glyph_header(1)
            .push(0u16) // one point
            .push(2u16) // instruction_length
            .extend([0xB0u8, 0x01]) // PUSHB[0] 1
            .push(flag)
            .extend([7u8, 7]); // short positive x and y

        let glyph = SimpleGlyph::read(buf.font_data()).unwrap();
        assert_eq!(glyph.instructions(), [0xB0, 0x01]);

        let outline = glyph.outline().unwrap();
        assert_eq!(outline.instructions(), [0xB0, 0x01]);
        assert_eq!(outline.flags(), [flag]);
        assert_eq!(outline.points(), [Point::new(7, 7)]);
    }

    #[test]
    fn truncated_header() {
        let buf = BeBuffer::new().push(1i16).push(0i16);
        assert!(matches!(
            SimpleGlyph::read(buf.font_data()),
            Err(ReadError::UnexpectedEndOfData)
        ));
    }
}
