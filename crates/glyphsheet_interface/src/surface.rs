use glyphsheet_shared::types::{Color, Size};

/// Read-only, random access pixel lookup.
///
/// Reads must be side-effect free and return the same value for the same coordinate for as long
/// as the source is alive. Coordinates are always within `0..width()` and `0..height()`.
pub trait PixelSource {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn pixel_at(&self, x: u32, y: u32) -> Color;

    fn size(&self) -> Size<u32> {
        Size::new(self.width(), self.height())
    }
}

impl<P: PixelSource + ?Sized> PixelSource for &P {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn pixel_at(&self, x: u32, y: u32) -> Color {
        (**self).pixel_at(x, y)
    }
}

/// An owned pixel store that can be pinned for reading.
///
/// The returned guard keeps the pixels stable until it is dropped, so a whole scan over the
/// surface should happen while holding a single lock.
pub trait Surface: Send + Sync {
    type Pixels<'a>: PixelSource
    where
        Self: 'a;

    fn lock(&self) -> Self::Pixels<'_>;
}
