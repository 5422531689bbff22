//! Splits a sprite sheet into glyph rectangles.
//!
//! The pixel at (0, 0) is the key (background) color. Glyphs are laid out left to right and wrap
//! top to bottom. The scan cursor walks a single pixel row; when it runs off the right edge it
//! drops down by the height of the last glyph it found on that row (or by one pixel when the row
//! was empty). A glyph's box is the run of non-key pixels to the right of its top-left pixel,
//! and independently the run of non-key pixels below it.
//!
//! A glyph whose top-left pixel is [`MARKER_COLOR`] keeps its slot but is reported as an empty
//! rectangle.

use crate::GlyphRect;
use glyphsheet_interface::surface::PixelSource;
use glyphsheet_shared::types::{Color, Rect};
use log::{debug, trace};
use std::iter::FusedIterator;

pub const LOG_TARGET: &str = "sprite-sheet";

/// Top-left pixel color of a glyph cell that must not be drawn
pub const MARKER_COLOR: Color = Color::RED;

/// Iterator over the glyph slots of a sheet, in scan order.
///
/// Every item is one code point slot: either the measured glyph rect or an empty rect for a
/// reserved glyph.
pub struct Segmenter<'a, P: PixelSource + ?Sized> {
    pixels: &'a P,
    width: u32,
    height: u32,
    key_color: Color,
    /// Scan cursor. `height` carries the height of the last glyph on the current row.
    bounds: GlyphRect,
    done: bool,
}

impl<'a, P: PixelSource + ?Sized> Segmenter<'a, P> {
    pub fn new(pixels: &'a P) -> Self {
        let width = pixels.width();
        let height = pixels.height();
        let done = width == 0 || height == 0;

        let key_color = if done { Color::TRANSPARENT } else { pixels.pixel_at(0, 0) };

        Self {
            pixels,
            width,
            height,
            key_color,
            bounds: Rect::new(0, 0, 1, 1),
            done,
        }
    }

    pub fn key_color(&self) -> Color {
        self.key_color
    }

    fn is_key(&self, x: u32, y: u32) -> bool {
        self.pixels.pixel_at(x, y) == self.key_color
    }

    /// Moves the cursor to the top-left pixel of the next glyph. Returns false when the sheet is
    /// exhausted.
    fn find_glyph_start(&mut self) -> bool {
        loop {
            if self.bounds.x >= self.width {
                self.bounds.x = 0;
                self.bounds.y = self.bounds.y.saturating_add(self.bounds.height);
                self.bounds.height = 1;
                if self.bounds.y >= self.height {
                    return false;
                }
                continue;
            }

            if !self.is_key(self.bounds.x, self.bounds.y) {
                return true;
            }
            self.bounds.x += 1;
        }
    }

    fn measure(&mut self) {
        let (x, y) = (self.bounds.x, self.bounds.y);

        self.bounds.width = 0;
        while x + self.bounds.width < self.width && !self.is_key(x + self.bounds.width, y) {
            self.bounds.width += 1;
        }

        self.bounds.height = 0;
        while y + self.bounds.height < self.height && !self.is_key(x, y + self.bounds.height) {
            self.bounds.height += 1;
        }
    }
}

impl<P: PixelSource + ?Sized> Iterator for Segmenter<'_, P> {
    type Item = GlyphRect;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if !self.find_glyph_start() {
            self.done = true;
            return None;
        }

        let first_pixel = self.pixels.pixel_at(self.bounds.x, self.bounds.y);
        self.measure();

        if self.bounds.is_empty() {
            self.done = true;
            return None;
        }

        let glyph = if first_pixel == MARKER_COLOR {
            trace!(target: LOG_TARGET, "reserved glyph at {},{}", self.bounds.x, self.bounds.y);
            Rect::ZERO
        } else {
            trace!(target: LOG_TARGET, "glyph at {:?}", self.bounds);
            self.bounds
        };

        self.bounds.x += self.bounds.width;

        Some(glyph)
    }
}

impl<P: PixelSource + ?Sized> FusedIterator for Segmenter<'_, P> {}

/// Scans the whole sheet once and returns all glyph slots in scan order
pub fn segment<P: PixelSource + ?Sized>(pixels: &P) -> Vec<GlyphRect> {
    let glyphs: Vec<GlyphRect> = Segmenter::new(pixels).collect();

    debug!(
        target: LOG_TARGET,
        "segmented {}x{} sheet into {} glyph slots ({} reserved)",
        pixels.width(),
        pixels.height(),
        glyphs.len(),
        glyphs.iter().filter(|g| g.is_empty()).count()
    );

    glyphs
}
