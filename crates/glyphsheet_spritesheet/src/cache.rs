use crate::loader::{load_sheet, SheetError, SheetFont};
use crate::segmenter::LOG_TARGET;
use glyphsheet_config::config;
use lazy_static::lazy_static;
use log::debug;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Arc;

lazy_static! {
    pub static ref FONT_CACHE: Mutex<FontCache> = Mutex::new(FontCache::new());
}

/// Sprite-sheet fonts by canonical sheet path. Fonts are shared, so every user of the same sheet
/// sees the same glyph table and the same image.
#[derive(Default)]
pub struct FontCache {
    fonts: HashMap<PathBuf, Arc<SheetFont>>,
    /// Insertion order, oldest first
    order: VecDeque<PathBuf>,
}

impl FontCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &Path) -> Option<Arc<SheetFont>> {
        self.fonts.get(path).cloned()
    }

    /// Adds a font, evicting the oldest entries when the cache would grow beyond `max_entries`.
    /// Nothing is stored when `max_entries` is zero.
    pub fn insert(&mut self, path: PathBuf, font: Arc<SheetFont>, max_entries: usize) {
        if max_entries == 0 {
            return;
        }

        if self.fonts.insert(path.clone(), font).is_some() {
            self.order.retain(|p| p != &path);
        }
        self.order.push_back(path);

        while self.order.len() > max_entries {
            if let Some(oldest) = self.order.pop_front() {
                debug!(target: LOG_TARGET, "evicting {} from font cache", oldest.display());
                self.fonts.remove(&oldest);
            }
        }
    }

    /// Returns the font already cached for the path, or caches and returns the given one
    pub fn get_or_insert(&mut self, path: PathBuf, font: Arc<SheetFont>, max_entries: usize) -> Arc<SheetFont> {
        if let Some(existing) = self.get(&path) {
            return existing;
        }

        self.insert(path, font.clone(), max_entries);
        font
    }

    pub fn remove(&mut self, path: &Path) -> Option<Arc<SheetFont>> {
        self.order.retain(|p| p != path);
        self.fonts.remove(path)
    }

    pub fn clear(&mut self) {
        self.fonts.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

/// Loads a sheet through the global font cache. When caching is disabled in the configuration
/// the sheet is decoded on every call.
pub fn load_cached(path: impl AsRef<Path>) -> Result<Arc<SheetFont>, SheetError> {
    let path = path.as_ref();

    if !config!(bool "loader.cache.enabled") {
        return load_sheet(path).map(Arc::new);
    }

    let key = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());

    if let Some(font) = FONT_CACHE.lock().get(&key) {
        debug!(target: LOG_TARGET, "font cache hit for {}", key.display());
        return Ok(font);
    }

    debug!(target: LOG_TARGET, "font cache miss for {}", key.display());
    let font = Arc::new(load_sheet(&key)?);
    let max_entries = config!(uint "loader.cache.max_entries");

    // Another thread may have loaded the same sheet while this one was decoding
    Ok(FONT_CACHE.lock().get_or_insert(key, font, max_entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_sheet_from_memory;
    use crate::surface::PixelGrid;
    use glyphsheet_shared::types::{Color, Rect};
    use std::io::Cursor;

    fn png_sheet() -> Vec<u8> {
        let mut grid = PixelGrid::new(6, 4, Color::WHITE);
        grid.fill_rect(Rect::new(1, 1, 2, 2), Color::BLACK);

        let mut data = Vec::new();
        grid.to_image()
            .write_to(&mut Cursor::new(&mut data), image::ImageFormat::Png)
            .unwrap();
        data
    }

    fn sheet_font() -> Arc<SheetFont> {
        Arc::new(load_sheet_from_memory(&png_sheet()).unwrap())
    }

    #[test]
    fn evicts_oldest() {
        let mut cache = FontCache::new();
        cache.insert("a.png".into(), sheet_font(), 2);
        cache.insert("b.png".into(), sheet_font(), 2);
        cache.insert("c.png".into(), sheet_font(), 2);

        assert_eq!(cache.len(), 2);
        assert!(cache.get(Path::new("a.png")).is_none());
        assert!(cache.get(Path::new("b.png")).is_some());
        assert!(cache.get(Path::new("c.png")).is_some());
    }

    #[test]
    fn reinsert_refreshes_entry() {
        let mut cache = FontCache::new();
        cache.insert("a.png".into(), sheet_font(), 2);
        cache.insert("b.png".into(), sheet_font(), 2);
        cache.insert("a.png".into(), sheet_font(), 2);
        cache.insert("c.png".into(), sheet_font(), 2);

        assert!(cache.get(Path::new("a.png")).is_some());
        assert!(cache.get(Path::new("b.png")).is_none());
    }

    #[test]
    fn get_or_insert_keeps_first_font() {
        let mut cache = FontCache::new();
        let first = sheet_font();

        let stored = cache.get_or_insert("a.png".into(), first.clone(), 4);
        assert!(Arc::ptr_eq(&stored, &first));

        let stored = cache.get_or_insert("a.png".into(), sheet_font(), 4);
        assert!(Arc::ptr_eq(&stored, &first));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn load_cached_from_many_threads_shares_one_font() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared.png");
        std::fs::write(&path, png_sheet()).unwrap();

        let fonts: Vec<Arc<SheetFont>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8).map(|_| scope.spawn(|| load_cached(&path).unwrap())).collect();
            handles.into_iter().map(|handle| handle.join().unwrap()).collect()
        });

        assert!(fonts.iter().all(|font| Arc::ptr_eq(font, &fonts[0])));
    }

    #[test]
    fn zero_capacity_stores_nothing() {
        let mut cache = FontCache::new();
        cache.insert("a.png".into(), sheet_font(), 0);
        assert!(cache.is_empty());
    }

    #[test]
    fn remove_and_clear() {
        let mut cache = FontCache::new();
        cache.insert("a.png".into(), sheet_font(), 4);
        cache.insert("b.png".into(), sheet_font(), 4);

        assert!(cache.remove(Path::new("a.png")).is_some());
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn load_cached_shares_fonts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.png");
        std::fs::write(&path, png_sheet()).unwrap();

        let first = load_cached(&path).unwrap();
        let second = load_cached(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.table().len(), 1);
    }
}
