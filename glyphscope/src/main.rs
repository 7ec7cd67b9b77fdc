//! Print the contents of a font file.
//!
//! Lists the table directory, and decodes the glyph description at a
//! given offset in the glyf table.

use std::path::PathBuf;

use clap::Parser;
use glyph_types::Tag;
use read_glyphs::tables::glyf::{GlyphOutline, SimpleGlyph};
use read_glyphs::{FontRef, ReadError, TableProvider};
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The input font file.
    input: PathBuf,

    /// List the font's tables instead of decoding a glyph.
    #[arg(short, long)]
    list: bool,

    /// With --list, only show the table with this tag.
    #[arg(short, long)]
    tag: Option<Tag>,

    /// Byte offset of the glyph description in the glyf table.
    #[arg(short, long, default_value_t = 0)]
    offset: usize,
}

#[derive(Debug, Error)]
enum Error {
    #[error("Could not read '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Error reading font data: {0}")]
    Font(#[from] ReadError),
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let args = Args::parse();
    let bytes = std::fs::read(&args.input).map_err(|source| Error::Io {
        path: args.input.clone(),
        source,
    })?;
    let font = FontRef::new(&bytes)?;
    log::debug!(
        "read {} bytes, {} table records",
        bytes.len(),
        font.table_directory.num_tables()
    );

    if args.list {
        list_tables(&font, args.tag);
        return Ok(());
    }

    let glyph = font.glyf()?.glyph_at(args.offset)?;
    let outline = glyph.outline()?;
    print_glyph(&glyph, &outline);
    Ok(())
}

fn list_tables(font: &FontRef, filter: Option<Tag>) {
    println!("Tag  Offset  Length  Checksum");
    println!("-------------------------------");

    let offset_pad = get_offset_width(font);

    for record in font
        .table_directory
        .table_records()
        .iter()
        .filter(|rec| filter.is_none_or(|tag| rec.tag() == tag))
    {
        println!(
            "{0} 0x{1:02$X} {3:8} 0x{4:08X} ",
            record.tag(),
            record.offset(),
            offset_pad,
            record.length(),
            record.checksum()
        );
    }
}

fn get_offset_width(font: &FontRef) -> usize {
    // pick how much padding we use for offsets based on the max offset in directory
    let max_off = font
        .table_directory
        .table_records()
        .iter()
        .map(|rec| rec.offset())
        .max()
        .unwrap_or_default();
    hex_width(max_off)
}

fn hex_width(val: u32) -> usize {
    match val {
        0..=0xffff => 4usize,
        0x10000..=0xffff_ff => 6,
        0x1000000.. => 8,
    }
}

fn print_glyph(glyph: &SimpleGlyph, outline: &GlyphOutline) {
    let header = glyph.header();
    println!(
        "{}: {} contour(s), {} point(s)",
        Tag::new(b"glyf"),
        glyph.number_of_contours(),
        outline.num_points()
    );
    println!(
        "bbox: ({}, {}) to ({}, {})",
        header.x_min(),
        header.y_min(),
        header.x_max(),
        header.y_max()
    );
    if !outline.instructions().is_empty() {
        println!("{} byte(s) of instructions", outline.instructions().len());
    }

    for (i, point) in outline.points().iter().enumerate() {
        let on_curve = if outline.on_curve(i) { "on" } else { "off" };
        let contour_end = if outline.end_pts_of_contours().contains(&(i as u16)) {
            "  <contour end>"
        } else {
            ""
        };
        println!("{i:4}: ({:6}, {:6}) {on_curve}{contour_end}", point.x, point.y);
    }
}
