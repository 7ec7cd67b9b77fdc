use criterion::{criterion_group, criterion_main, Criterion};
use read_glyphs::{FontRef, TableProvider};

pub fn parse_font_ref(c: &mut Criterion) {
    c.bench_function("font_ref", |b| {
        b.iter(|| {
            FontRef::new(glyph_test_data::SIMPLE_GLYF)
                .unwrap()
                .table_directory
                .num_tables()
        })
    });
}

pub fn decode_outline(c: &mut Criterion) {
    let font = FontRef::new(glyph_test_data::SIMPLE_GLYF).unwrap();
    let glyf = font.glyf().unwrap();

    c.bench_function("outline", |b| {
        b.iter(|| {
            let glyph = glyf.glyph_at(0).unwrap();
            glyph.outline().unwrap().num_points()
        })
    });
}

criterion_group!(benches, parse_font_ref, decode_outline);
criterion_main!(benches);
