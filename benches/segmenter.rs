use criterion::{criterion_group, criterion_main, Criterion};
use glyphsheet::prelude::*;
use glyphsheet::spritesheet::segment;
use std::hint::black_box;

/// 16 rows of 16 glyphs, 8x12 pixels each, separated by one pixel of background
fn ascii_sheet() -> PixelGrid {
    let mut grid = PixelGrid::new(16 * 9 + 1, 16 * 13 + 1, Color::WHITE);
    for row in 0..16 {
        for col in 0..16 {
            grid.fill_rect(Rect::new(1 + col * 9, 1 + row * 13, 8, 12), Color::BLACK);
        }
    }
    grid
}

fn segment_sheet(c: &mut Criterion) {
    let mut group = c.benchmark_group("Segmenter");
    group.significance_level(0.1).sample_size(200);

    let grid = ascii_sheet();
    group.bench_function("in-memory grid", |b| b.iter(|| segment(black_box(&grid))));

    let surface = ImageSurface::new(grid.to_image());
    group.bench_function("image surface", |b| {
        b.iter(|| {
            let pixels = surface.lock();
            segment(black_box(&pixels))
        })
    });

    group.finish();
}

fn measure_text(c: &mut Criterion) {
    let font = SpriteSheetFont::from_surface(std::sync::Arc::new(ascii_sheet()));
    let text = "The quick brown fox jumps over the lazy dog. ".repeat(20);

    c.bench_function("text width", |b| b.iter(|| font.text_length(black_box(&text))));
}

criterion_group!(benches, segment_sheet, measure_text);
criterion_main!(benches);
