use crate::segmenter::{segment, LOG_TARGET};
use crate::GlyphRect;
use glyphsheet_interface::font::GlyphID;
use glyphsheet_interface::surface::PixelSource;
use glyphsheet_shared::types::Rect;
use log::debug;

/// Code point of the first slot in a sheet
pub const SPACE: u32 = ' ' as u32;

/// Slot (relative to [`SPACE`]) of the glyph drawn for code points the sheet doesn't have
pub const FALLBACK_INDEX: u32 = 128;

pub const FALLBACK_CODE_POINT: u32 = SPACE + FALLBACK_INDEX;

/// Maps code points to glyph rectangles of a sprite sheet.
///
/// Slot `i` holds the glyph for code point `SPACE + i`. Empty slots are reserved glyphs. The
/// table never changes after it is built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlyphTable {
    glyphs: Vec<GlyphRect>,
}

impl GlyphTable {
    /// Segments the pixel source and builds a table from the slots found
    pub fn build<P: PixelSource + ?Sized>(pixels: &P) -> Self {
        let table = Self::from_rects(segment(pixels));

        if table.fallback().is_some() {
            debug!(target: LOG_TARGET, "fallback glyph present");
        } else {
            debug!(target: LOG_TARGET, "fallback glyph missing, unknown code points draw nothing");
        }

        table
    }

    /// Builds a table from slots in code point order, starting at [`SPACE`]
    pub fn from_rects(glyphs: Vec<GlyphRect>) -> Self {
        Self { glyphs }
    }

    /// Number of slots, reserved ones included
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    fn slot(&self, code_point: u32) -> Option<GlyphRect> {
        let idx = usize::try_from(code_point.checked_sub(SPACE)?).ok()?;
        self.glyphs.get(idx).copied().filter(|g| !g.is_empty())
    }

    pub fn has_code_point(&self, code_point: u32) -> bool {
        self.slot(code_point).is_some()
    }

    /// The glyph drawn for missing code points, if the sheet has one
    pub fn fallback(&self) -> Option<GlyphRect> {
        self.slot(FALLBACK_CODE_POINT)
    }

    /// Bounds of the glyph for the code point. Missing and reserved code points resolve to the
    /// fallback glyph, and to an empty rect when there is no fallback glyph either.
    pub fn bounds(&self, code_point: u32) -> GlyphRect {
        if let Some(glyph) = self.slot(code_point) {
            return glyph;
        }

        if code_point == FALLBACK_CODE_POINT {
            return Rect::ZERO;
        }

        self.fallback().unwrap_or(Rect::ZERO)
    }

    /// Glyph indices count from [`SPACE`]
    pub fn glyph_bounds(&self, glyph: GlyphID) -> GlyphRect {
        self.bounds(SPACE + u32::from(glyph))
    }

    /// Sum of the glyph widths of all characters in the text
    pub fn text_width(&self, text: &str) -> u32 {
        text.chars().fold(0, |width, ch| width.saturating_add(self.bounds(ch as u32).width))
    }

    /// Height of the space glyph, which all glyphs share as their line height
    pub fn line_height(&self) -> u32 {
        self.bounds(SPACE).height
    }

    /// All slots with their code points, in scan order. Reserved slots are included.
    pub fn iter(&self) -> impl Iterator<Item = (u32, GlyphRect)> + '_ {
        (SPACE..).zip(self.glyphs.iter().copied())
    }

    pub fn as_slice(&self) -> &[GlyphRect] {
        &self.glyphs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    /// Table with `count` glyphs. Glyph i is at (i * 10, 0) with a width of i + 1.
    fn table_with(count: u32) -> GlyphTable {
        GlyphTable::from_rects((0..count).map(|i| Rect::new(i * 10, 0, i + 1, 12)).collect())
    }

    #[test]
    fn code_points_start_at_space() {
        let table = table_with(3);
        assert!(table.has_code_point(' ' as u32));
        assert!(table.has_code_point('"' as u32));
        assert!(!table.has_code_point('#' as u32));
        assert!(!table.has_code_point(0));
        assert!(!table.has_code_point(SPACE - 1));
        assert_eq!(table.bounds('!' as u32), Rect::new(10, 0, 2, 12));
    }

    #[test_case(0 ; "control character")]
    #[test_case(31 ; "just below space")]
    #[test_case(200 ; "past the sheet")]
    #[test_case(0x10FFFF ; "last code point")]
    #[test_case(u32::MAX ; "not a code point")]
    fn missing_code_points_use_fallback(code_point: u32) {
        let table = table_with(FALLBACK_INDEX + 1);
        let fallback = table.bounds(FALLBACK_CODE_POINT);
        assert!(!fallback.is_empty());
        assert_eq!(table.fallback(), Some(fallback));
        assert_eq!(table.bounds(code_point), fallback);
    }

    #[test_case(0 ; "control character")]
    #[test_case(200 ; "past the sheet")]
    #[test_case(FALLBACK_CODE_POINT ; "fallback itself")]
    fn missing_fallback_is_empty(code_point: u32) {
        let table = table_with(95);
        assert_eq!(table.fallback(), None);
        assert_eq!(table.bounds(code_point), Rect::ZERO);
    }

    #[test]
    fn reserved_slot_uses_fallback() {
        let mut glyphs: Vec<GlyphRect> = table_with(FALLBACK_INDEX + 1).as_slice().to_vec();
        glyphs[5] = Rect::ZERO;
        let table = GlyphTable::from_rects(glyphs);

        assert!(!table.has_code_point(SPACE + 5));
        assert_eq!(table.bounds(SPACE + 5), table.bounds(FALLBACK_CODE_POINT));
        assert!(table.has_code_point(SPACE + 6));
    }

    #[test]
    fn reserved_slot_without_fallback() {
        let mut glyphs: Vec<GlyphRect> = table_with(10).as_slice().to_vec();
        glyphs[5] = Rect::ZERO;
        let table = GlyphTable::from_rects(glyphs);

        assert!(!table.has_code_point(SPACE + 5));
        assert_eq!(table.bounds(SPACE + 5), Rect::ZERO);
    }

    #[test]
    fn reserved_fallback_slot() {
        let mut glyphs: Vec<GlyphRect> = table_with(FALLBACK_INDEX + 1).as_slice().to_vec();
        glyphs[FALLBACK_INDEX as usize] = Rect::ZERO;
        let table = GlyphTable::from_rects(glyphs);

        assert_eq!(table.fallback(), None);
        assert_eq!(table.bounds(FALLBACK_CODE_POINT), Rect::ZERO);
        assert_eq!(table.bounds(500), Rect::ZERO);
    }

    #[test]
    fn empty_table() {
        let table = GlyphTable::default();
        assert!(table.is_empty());
        assert!(!table.has_code_point(SPACE));
        assert_eq!(table.bounds(SPACE), Rect::ZERO);
        assert_eq!(table.line_height(), 0);
        assert_eq!(table.text_width("hello"), 0);
    }

    #[test]
    fn glyph_ids_are_relative_to_space() {
        let table = table_with(5);
        assert_eq!(table.glyph_bounds(0), table.bounds(SPACE));
        assert_eq!(table.glyph_bounds(4), Rect::new(40, 0, 5, 12));
        assert_eq!(table.glyph_bounds(u16::MAX), Rect::ZERO);
    }

    #[test]
    fn text_width_sums_glyph_widths() {
        let table = table_with(FALLBACK_INDEX + 1);
        assert_eq!(table.text_width(""), 0);
        // ' ' = 1, '!' = 2, '"' = 3
        assert_eq!(table.text_width(" !\""), 6);

        let fallback_width = table.bounds(FALLBACK_CODE_POINT).width;
        assert_eq!(table.text_width("\u{1F600}\u{1F600}"), 2 * fallback_width);
        assert_eq!(table.text_width("\0"), fallback_width);
    }

    #[test]
    fn build_logs_summary() {
        testing_logger::setup();

        let mut grid = crate::surface::PixelGrid::new(6, 4, glyphsheet_shared::types::Color::WHITE);
        grid.fill_rect(Rect::new(1, 1, 2, 2), glyphsheet_shared::types::Color::BLACK);
        let table = GlyphTable::build(&grid);
        assert_eq!(table.len(), 1);

        testing_logger::validate(|captured_logs| {
            let debug: Vec<_> = captured_logs.iter().filter(|log| log.level == log::Level::Debug).collect();
            assert_eq!(debug.len(), 2);
            assert!(debug[0].body.contains("into 1 glyph slots"));
            assert!(debug[1].body.contains("fallback glyph missing"));
        });
    }

    #[test]
    fn line_height_is_space_height() {
        let table = GlyphTable::from_rects(vec![Rect::new(0, 0, 4, 9), Rect::new(5, 0, 4, 7)]);
        assert_eq!(table.line_height(), 9);
    }

    #[test]
    fn iter_pairs_code_points_with_slots() {
        let table = GlyphTable::from_rects(vec![Rect::new(0, 0, 4, 9), Rect::ZERO]);
        let slots: Vec<_> = table.iter().collect();
        assert_eq!(slots, vec![(SPACE, Rect::new(0, 0, 4, 9)), (SPACE + 1, Rect::ZERO)]);
    }
}
