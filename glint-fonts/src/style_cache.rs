//! Per-style face sets.
//!
//! Building a face set parses theme fonts and may consult the system index,
//! so the result is kept per [`TextStyle`] until the theme changes. The map
//! lives behind an `ArcSwap`: clearing publishes a fresh map and anyone still
//! holding entries from the old one keeps using them undisturbed.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use glint_config::{FontSlot, FontTheme, LocaleProvider, TextStyle};
use parking_lot::{Mutex, MutexGuard, RwLock};

use crate::face::{EmptyFace, Face, load_face};
use crate::face_set::{DynamicFaceSet, ResolveFace};
use crate::system_index::{Aspect, FamilyTag, FontFallback};

type BoxedFaces = Box<dyn ResolveFace + Send>;

/// A cached face set.
///
/// The set grows when fallback faces are discovered, so callers take the
/// entry's lock for the duration of a measure or draw.
pub struct FontCacheItem {
    faces: Mutex<BoxedFaces>,
}

impl FontCacheItem {
    pub fn new(faces: impl ResolveFace + Send + 'static) -> Self {
        Self {
            faces: Mutex::new(Box::new(faces)),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, BoxedFaces> {
        self.faces.lock()
    }

    /// Resolve a single character under the entry lock.
    pub fn resolve_face(&self, ch: char) -> Face {
        self.faces.lock().resolve_face(ch)
    }
}

impl std::fmt::Debug for FontCacheItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontCacheItem").finish_non_exhaustive()
    }
}

type StyleMap = RwLock<HashMap<TextStyle, Arc<FontCacheItem>>>;

/// Face sets keyed by text style.
pub struct StyleCache {
    entries: ArcSwap<StyleMap>,
    theme: ArcSwap<Arc<dyn FontTheme>>,
    locale: Arc<dyn LocaleProvider>,
    fallback: Arc<dyn FontFallback>,
}

impl StyleCache {
    pub fn new(
        theme: Arc<dyn FontTheme>,
        locale: Arc<dyn LocaleProvider>,
        fallback: Arc<dyn FontFallback>,
    ) -> Self {
        Self {
            entries: ArcSwap::from_pointee(RwLock::new(HashMap::new())),
            theme: ArcSwap::from_pointee(theme),
            locale,
            fallback,
        }
    }

    /// Face set for `style`, built on first request.
    ///
    /// Concurrent misses may both build a set; the first one stored wins and
    /// every caller gets that one.
    pub fn get_faces(&self, style: &TextStyle) -> Arc<FontCacheItem> {
        let entries = self.entries.load_full();
        if let Some(item) = entries.read().get(style) {
            return Arc::clone(item);
        }

        let built = Arc::new(FontCacheItem::new(self.build_faces(style)));
        Arc::clone(entries.write().entry(*style).or_insert(built))
    }

    /// Drop every cached set.
    pub fn clear(&self) {
        self.entries.store(Arc::new(RwLock::new(HashMap::new())));
    }

    /// Swap the theme and drop every set built from the old one.
    pub fn set_theme(&self, theme: Arc<dyn FontTheme>) {
        self.theme.store(Arc::new(theme));
        self.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.load().read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn fallback(&self) -> &Arc<dyn FontFallback> {
        &self.fallback
    }

    fn build_faces(&self, style: &TextStyle) -> DynamicFaceSet {
        let theme = self.theme.load_full();
        let slot = slot_for(style);
        let family = if style.monospace {
            FamilyTag::Monospace
        } else {
            FamilyTag::SansSerif
        };
        let aspect = Aspect::from(style);

        let mut seeds = seed_faces(&**theme, slot).into_iter();
        let primary = seeds.next().unwrap_or_else(EmptyFace::shared);
        let mut faces = DynamicFaceSet::new(primary, family, aspect, Arc::clone(&self.fallback));
        for face in seeds {
            faces.add_face(face);
        }

        if !style.symbol {
            let language = self.locale.language();
            if let Some(face) =
                self.fallback
                    .resolve_for_language(faces.family(), aspect, &language)
            {
                faces.add_face(face);
            }
            if let Some(face) = theme
                .default_font(FontSlot::Emoji)
                .as_ref()
                .and_then(load_face)
            {
                faces.add_face(face);
            }
        }

        log::debug!("Built {} face set: {:?}", slot, faces);
        faces
    }
}

/// Theme slot for a style; monospace wins over weight and slant, and symbol
/// only applies to otherwise plain text.
pub fn slot_for(style: &TextStyle) -> FontSlot {
    if style.monospace {
        FontSlot::Monospace
    } else if style.bold && style.italic {
        FontSlot::BoldItalic
    } else if style.bold {
        FontSlot::Bold
    } else if style.italic {
        FontSlot::Italic
    } else if style.symbol {
        FontSlot::Symbol
    } else {
        FontSlot::Regular
    }
}

/// The theme face for `slot` followed by the toolkit default when it is a
/// different resource. If neither parses the result is a lone empty face.
fn seed_faces(theme: &dyn FontTheme, slot: FontSlot) -> Vec<Face> {
    let themed = theme.font(slot);
    let default = theme.default_font(slot);

    let mut seeds: Vec<Face> = Vec::with_capacity(2);
    if let Some(face) = themed.as_ref().and_then(load_face) {
        seeds.push(face);
    }
    if let Some(resource) = default.as_ref()
        && themed.as_ref() != Some(resource)
        && let Some(face) = load_face(resource)
    {
        seeds.push(face);
    }

    if seeds.is_empty() {
        log::warn!("No usable {} font, text will render as missing glyphs", slot);
        seeds.push(EmptyFace::shared());
    }
    seeds
}
