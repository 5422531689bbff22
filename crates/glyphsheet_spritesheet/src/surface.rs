use crate::GlyphRect;
use glyphsheet_interface::surface::{PixelSource, Surface};
use glyphsheet_shared::types::{Color, Size};
use image::{DynamicImage, RgbaImage};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::fmt::{Debug, Formatter};

/// A decoded sheet image. Reading goes through [`Surface::lock`], which holds a read lock so the
/// pixels cannot change while a scan is running.
pub struct ImageSurface {
    image: RwLock<RgbaImage>,
}

impl ImageSurface {
    pub fn new(image: RgbaImage) -> Self {
        Self {
            image: RwLock::new(image),
        }
    }

    pub fn size(&self) -> Size<u32> {
        let image = self.image.read();
        Size::new(image.width(), image.height())
    }

    /// Exclusive access to the pixels, or None while the surface is locked for reading
    pub fn try_write(&self) -> Option<RwLockWriteGuard<'_, RgbaImage>> {
        self.image.try_write()
    }
}

impl From<DynamicImage> for ImageSurface {
    fn from(image: DynamicImage) -> Self {
        Self::new(image.to_rgba8())
    }
}

impl Debug for ImageSurface {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let size = self.size();
        f.debug_struct("ImageSurface")
            .field("width", &size.width)
            .field("height", &size.height)
            .finish()
    }
}

/// Pinned view on an [`ImageSurface`]
pub struct ImagePixels<'a> {
    image: RwLockReadGuard<'a, RgbaImage>,
}

impl PixelSource for ImagePixels<'_> {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn pixel_at(&self, x: u32, y: u32) -> Color {
        (*self.image.get_pixel(x, y)).into()
    }
}

impl Surface for ImageSurface {
    type Pixels<'a> = ImagePixels<'a>;

    fn lock(&self) -> ImagePixels<'_> {
        ImagePixels {
            image: self.image.read(),
        }
    }
}

/// In-memory grid of colors, stored row by row.
///
/// Useful for building synthetic sheets without going through an image decoder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl PixelGrid {
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Sets a single pixel. Coordinates outside the grid are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = color;
        }
    }

    /// Fills the rect, clipped to the grid
    pub fn fill_rect(&mut self, rect: GlyphRect, color: Color) {
        for y in rect.y..rect.bottom().min(self.height) {
            for x in rect.x..rect.right().min(self.width) {
                self.set_pixel(x, y, color);
            }
        }
    }

    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| self.pixel_at(x, y).into())
    }
}

impl PixelSource for PixelGrid {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel_at(&self, x: u32, y: u32) -> Color {
        self.index(x, y).map_or(Color::TRANSPARENT, |idx| self.pixels[idx])
    }
}

impl Surface for PixelGrid {
    type Pixels<'a> = &'a PixelGrid;

    fn lock(&self) -> &PixelGrid {
        self
    }
}
