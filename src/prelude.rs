pub use glyphsheet_interface::font::{Font, FontMetrics, FontType, GlyphID};
pub use glyphsheet_interface::surface::{PixelSource, Surface};

pub use glyphsheet_shared::types::{Color, Point, Rect, Size};

pub use glyphsheet_spritesheet::{
    load_cached, load_sheet, load_sheet_from_memory, GlyphRect, GlyphTable, ImageSurface, PixelGrid, SheetError,
    SheetFont, SpriteSheetFont, FALLBACK_CODE_POINT, MARKER_COLOR, SPACE,
};
