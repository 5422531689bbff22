use crate::font::SpriteSheetFont;
use crate::segmenter::LOG_TARGET;
use crate::surface::ImageSurface;
use log::debug;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Sprite-sheet font backed by a decoded image
pub type SheetFont = SpriteSheetFont<ImageSurface>;

/// Loading a sheet can only fail while reading or decoding the image. Segmentation itself never
/// fails.
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("cannot read sheet {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode sheet: {0}")]
    Decode(#[from] image::ImageError),
}

/// Reads and decodes a sheet image from disk. The format is detected from the file contents.
pub fn load_sheet(path: impl AsRef<Path>) -> Result<SheetFont, SheetError> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|source| SheetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(target: LOG_TARGET, "loading sheet {} ({} bytes)", path.display(), data.len());
    load_sheet_from_memory(&data)
}

/// Decodes an encoded sheet image (png, bmp, gif, ...)
pub fn load_sheet_from_memory(data: &[u8]) -> Result<SheetFont, SheetError> {
    let image = image::load_from_memory(data)?;
    let surface = Arc::new(ImageSurface::from(image));

    Ok(SpriteSheetFont::from_surface(surface))
}
