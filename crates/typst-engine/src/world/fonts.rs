//! Embedded font cache
//!
//! Only the fonts bundled with `typst-assets` are loaded so that the same
//! report renders identically on every host.

use std::sync::OnceLock;

use typst::foundations::Bytes;
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;

static FONT_CACHE: OnceLock<FontCache> = OnceLock::new();

/// Get the process-wide font cache, loading it on first use
pub fn global_font_cache() -> &'static FontCache {
    FONT_CACHE.get_or_init(FontCache::new)
}

/// Fonts available to the compiler
pub struct FontCache {
    book: LazyHash<FontBook>,
    fonts: Vec<Font>,
}

impl FontCache {
    pub fn new() -> Self {
        let mut book = FontBook::new();
        let mut fonts = Vec::new();

        for data in typst_assets::fonts() {
            for font in Font::iter(Bytes::from_static(data)) {
                book.push(font.info().clone());
                fonts.push(font);
            }
        }

        tracing::info!("Font cache initialized with {} fonts", fonts.len());

        Self {
            book: LazyHash::new(book),
            fonts,
        }
    }

    pub fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    pub fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }
}

impl Default for FontCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_fonts_loaded() {
        let cache = global_font_cache();
        assert!(cache.font(0).is_some());
        assert!(cache.font(cache.fonts.len()).is_none());
    }

    #[test]
    fn test_book_has_default_text_font() {
        let book = global_font_cache().book();
        assert!(book
            .families()
            .any(|(name, _)| name.eq_ignore_ascii_case("Libertinus Serif")));
    }

    #[test]
    fn test_global_cache_singleton() {
        assert!(std::ptr::eq(global_font_cache(), global_font_cache()));
    }
}
