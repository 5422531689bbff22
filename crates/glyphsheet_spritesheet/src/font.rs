use crate::segmenter::LOG_TARGET;
use crate::table::GlyphTable;
use crate::GlyphRect;
use glyphsheet_interface::font::{Font, FontMetrics, FontType, GlyphID};
use glyphsheet_interface::surface::Surface;
use glyphsheet_shared::types::Rect;
use log::trace;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// A font whose glyphs are regions of a single sheet image.
///
/// The sheet is kept alive for renderers, the glyph table is built once when the font is created
/// and never changes afterwards. Sprite-sheet fonts only exist at the native resolution of the
/// sheet, so size and antialiasing settings are ignored.
pub struct SpriteSheetFont<S: Surface> {
    sheet: Arc<S>,
    table: GlyphTable,
}

impl<S: Surface> SpriteSheetFont<S> {
    /// Segments the sheet while holding a single lock on it
    pub fn from_surface(sheet: Arc<S>) -> Self {
        let table = {
            let pixels = sheet.lock();
            GlyphTable::build(&pixels)
        };

        Self { sheet, table }
    }

    pub fn sheet(&self) -> &Arc<S> {
        &self.sheet
    }

    pub fn table(&self) -> &GlyphTable {
        &self.table
    }

    /// Bounds of the glyph for a code point, in sheet pixels
    pub fn char_bounds(&self, code_point: u32) -> GlyphRect {
        self.table.bounds(code_point)
    }
}

impl<S: Surface> Debug for SpriteSheetFont<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpriteSheetFont")
            .field("glyphs", &self.table.len())
            .field("height", &self.height())
            .finish()
    }
}

impl<S: Surface> Font for SpriteSheetFont<S> {
    fn font_type(&self) -> FontType {
        FontType::SpriteSheet
    }

    fn height(&self) -> u32 {
        self.table.line_height()
    }

    fn metrics(&self) -> FontMetrics {
        let height = self.height() as f32;

        let (count, total, max) = self
            .table
            .as_slice()
            .iter()
            .filter(|g| !g.is_empty())
            .fold((0u32, 0u64, 0u32), |(count, total, max), g| {
                (count + 1, total + u64::from(g.width), max.max(g.width))
            });

        FontMetrics {
            line_height: height,
            ascent: height,
            descent: 0.0,
            leading: 0.0,
            avg_char_width: if count == 0 { 0.0 } else { total as f32 / count as f32 },
            max_char_width: max as f32,
        }
    }

    fn text_length(&self, text: &str) -> u32 {
        self.table.text_width(text)
    }

    fn is_scalable(&self) -> bool {
        false
    }

    fn set_size(&mut self, size: f32) {
        trace!(target: LOG_TARGET, "ignoring font size {size} for sprite-sheet font");
    }

    fn set_antialias(&mut self, antialias: bool) {
        trace!(target: LOG_TARGET, "ignoring antialias={antialias} for sprite-sheet font");
    }

    fn has_code_point(&self, code_point: u32) -> bool {
        self.table.has_code_point(code_point)
    }

    fn glyph_bounds(&self, glyph: GlyphID) -> Rect<f32> {
        self.table.glyph_bounds(glyph).f32()
    }
}
