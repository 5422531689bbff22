//! Sprite-sheet fonts
//!
//! A sprite-sheet font is a single image with all glyphs drawn next to each other on a background
//! color. The sheet is segmented once into a [`GlyphTable`] which maps code points (starting at
//! the space character) to rectangles in the image. [`SpriteSheetFont`] wraps the table and the
//! image behind the generic [`glyphsheet_interface::font::Font`] interface.

use glyphsheet_shared::types::Rect;

pub mod cache;
pub mod font;
pub mod loader;
pub mod segmenter;
pub mod surface;
pub mod table;

/// Glyph rectangle in sheet pixels. An empty rect means there is no glyph.
pub type GlyphRect = Rect<u32>;

pub use cache::{load_cached, FontCache};
pub use font::SpriteSheetFont;
pub use loader::{load_sheet, load_sheet_from_memory, SheetError, SheetFont};
pub use segmenter::{segment, Segmenter, MARKER_COLOR};
pub use surface::{ImageSurface, PixelGrid};
pub use table::{GlyphTable, FALLBACK_CODE_POINT, FALLBACK_INDEX, SPACE};
