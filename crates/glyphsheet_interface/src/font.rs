use derive_more::Display;
use glyphsheet_shared::types::Rect;
use std::fmt::Debug;

/// Glyph indices are relative to the first code point a font covers.
pub type GlyphID = u16;

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum FontType {
    /// Glyphs are regions of a single pre-rasterized image
    SpriteSheet,
    /// Glyphs come from a platform typeface
    Native,
}

/// Vertical and horizontal font metrics in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FontMetrics {
    /// Distance between two baselines
    pub line_height: f32,
    /// Distance from the top of the line to the baseline
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the line
    pub descent: f32,
    /// Extra spacing between lines
    pub leading: f32,
    pub avg_char_width: f32,
    pub max_char_width: f32,
}

/// Query surface shared by every kind of font.
///
/// Configuration calls (`set_size`, `set_antialias`) must always be accepted. Fonts that cannot
/// honour them (see [`Font::is_scalable`]) ignore them silently so generic callers never need to
/// know which kind of font they hold.
pub trait Font: Debug + Send + Sync {
    fn font_type(&self) -> FontType;

    /// Nominal line height in pixels
    fn height(&self) -> u32;

    fn metrics(&self) -> FontMetrics;

    /// Horizontal advance of the whole string in pixels
    fn text_length(&self, text: &str) -> u32;

    fn is_scalable(&self) -> bool;

    fn set_size(&mut self, size: f32);

    fn set_antialias(&mut self, antialias: bool);

    fn has_code_point(&self, code_point: u32) -> bool;

    /// Bounds of the given glyph. An empty rect means "draw nothing, advance by zero".
    fn glyph_bounds(&self, glyph: GlyphID) -> Rect<f32>;
}
