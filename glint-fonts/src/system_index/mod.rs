//! Lazily built index of installed system fonts.
//!
//! The index is scanned at most once, on first use. Every query serializes
//! on one mutex; font discovery happens when a face set meets a rune it
//! cannot draw, which is rare once the caches are warm.
//!
//! Initialization can fail (no font directories, nothing parseable, or
//! fallback disabled in configuration). A failed index stays failed and
//! answers every query with `None`; the toolkit keeps working with its theme
//! fonts only.

mod aspect;
mod families;
mod language;
mod loader;

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU8, Ordering};

use fontdb::{Database, ID};
use parking_lot::Mutex;

use crate::error::{FontError, Result};
use crate::face::Face;

pub use aspect::{Aspect, Slant, Weight};
pub use families::{FamilyTag, MONOSPACE_FAMILIES, SANS_SERIF_FAMILIES};
pub use language::exemplars;
pub use loader::load_system_fonts;

/// Source of fallback faces for runes the configured fonts cannot draw.
pub trait FontFallback: Send + Sync {
    /// Best face of `family` close to `aspect` that supports `language`.
    fn resolve_for_language(&self, family: &FamilyTag, aspect: Aspect, language: &str)
    -> Option<Face>;

    /// A face with a glyph for `ch`, preferring `family` and `aspect`.
    fn resolve_for_rune(&self, family: &FamilyTag, aspect: Aspect, ch: char) -> Option<Face>;
}

/// Fallback source that never finds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFallback;

impl FontFallback for NoFallback {
    fn resolve_for_language(&self, _: &FamilyTag, _: Aspect, _: &str) -> Option<Face> {
        None
    }

    fn resolve_for_rune(&self, _: &FamilyTag, _: Aspect, _: char) -> Option<Face> {
        None
    }
}

/// Lifecycle of a [`SystemFontIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexState {
    Uninitialized,
    Ready,
    Failed,
}

const UNINITIALIZED: u8 = 0;
const READY: u8 = 1;
const FAILED: u8 = 2;

type Loader = Box<dyn FnOnce(&mut Database) -> Result<()> + Send>;

/// Installed fonts, scanned on first use.
pub struct SystemFontIndex {
    state: AtomicU8,
    inner: Mutex<IndexInner>,
}

struct IndexInner {
    loader: Option<Loader>,
    map: Option<FontMap>,
}

impl SystemFontIndex {
    /// Index over the platform font directories.
    pub fn new() -> Self {
        Self::with_font_dirs(Vec::new())
    }

    /// Index over the platform font directories plus `extra_dirs`.
    pub fn with_font_dirs(extra_dirs: Vec<PathBuf>) -> Self {
        Self::with_loader(move |db| load_system_fonts(db, &extra_dirs))
    }

    /// Index that is failed from the start; used when fallback is disabled.
    pub fn disabled() -> Self {
        Self::with_loader(|_| Err(FontError::SystemFontsDisabled))
    }

    /// Index populated by a custom scan. The loader runs at most once.
    pub fn with_loader<F>(loader: F) -> Self
    where
        F: FnOnce(&mut Database) -> Result<()> + Send + 'static,
    {
        Self {
            state: AtomicU8::new(UNINITIALIZED),
            inner: Mutex::new(IndexInner {
                loader: Some(Box::new(loader)),
                map: None,
            }),
        }
    }

    /// Run the scan if it has not run yet. Returns whether the index is usable.
    pub fn initialize(&self) -> bool {
        match self.state.load(Ordering::Acquire) {
            READY => true,
            FAILED => false,
            _ => {
                let mut inner = self.inner.lock();
                self.ensure_loaded(&mut inner)
            }
        }
    }

    pub fn state(&self) -> IndexState {
        match self.state.load(Ordering::Acquire) {
            READY => IndexState::Ready,
            FAILED => IndexState::Failed,
            _ => IndexState::Uninitialized,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state() == IndexState::Ready
    }

    /// Number of indexed faces, initializing if needed.
    pub fn face_count(&self) -> usize {
        let mut inner = self.inner.lock();
        if !self.ensure_loaded(&mut inner) {
            return 0;
        }
        inner.map.as_ref().map_or(0, |map| map.db.len())
    }

    /// Must be called with the lock held; re-checks the state under it.
    fn ensure_loaded(&self, inner: &mut IndexInner) -> bool {
        if let Some(loader) = inner.loader.take() {
            let mut db = Database::new();
            match loader(&mut db) {
                Ok(()) if !db.is_empty() => {
                    log::info!("Loaded {} system fonts", db.len());
                    inner.map = Some(FontMap::new(db));
                    self.state.store(READY, Ordering::Release);
                }
                Ok(()) => {
                    log::warn!(
                        "System font fallback unavailable: {}",
                        FontError::NoSystemFonts
                    );
                    self.state.store(FAILED, Ordering::Release);
                }
                Err(e) => {
                    log::warn!("System font fallback unavailable: {e}");
                    self.state.store(FAILED, Ordering::Release);
                }
            }
        }
        inner.map.is_some()
    }

    fn with_map<T>(&self, query: impl FnOnce(&mut FontMap) -> Option<T>) -> Option<T> {
        if self.state.load(Ordering::Acquire) == FAILED {
            return None;
        }
        let mut inner = self.inner.lock();
        if !self.ensure_loaded(&mut inner) {
            return None;
        }
        inner.map.as_mut().and_then(query)
    }
}

impl Default for SystemFontIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl FontFallback for SystemFontIndex {
    fn resolve_for_language(
        &self,
        family: &FamilyTag,
        aspect: Aspect,
        language: &str,
    ) -> Option<Face> {
        self.with_map(|map| map.resolve_for_language(family, aspect, language))
    }

    fn resolve_for_rune(&self, family: &FamilyTag, aspect: Aspect, ch: char) -> Option<Face> {
        self.with_map(|map| map.resolve_for_rune(family, aspect, ch))
    }
}

/// The scanned database plus query memoization.
struct FontMap {
    db: Database,
    /// Faces handed out so far; `None` marks entries that failed to parse.
    loaded: HashMap<ID, Option<Face>>,
    /// Runes no installed face covers.
    uncovered: HashSet<char>,
}

impl FontMap {
    fn new(db: Database) -> Self {
        Self {
            db,
            loaded: HashMap::new(),
            uncovered: HashSet::new(),
        }
    }

    /// Faces of `family` ordered by family rank, then aspect distance.
    fn family_candidates(&self, family: &FamilyTag, aspect: Aspect) -> Vec<ID> {
        let mut ranked: Vec<(usize, u32, ID)> = self
            .db
            .faces()
            .filter_map(|info| {
                family
                    .rank(info)
                    .map(|rank| (rank, aspect.distance(info.weight, info.style), info.id))
            })
            .collect();
        ranked.sort_by_key(|&(rank, distance, _)| (rank, distance));
        ranked.into_iter().map(|(_, _, id)| id).collect()
    }

    /// Every face outside `family`, ordered by aspect distance.
    fn other_candidates(&self, family: &FamilyTag, aspect: Aspect) -> Vec<ID> {
        let mut ranked: Vec<(u32, ID)> = self
            .db
            .faces()
            .filter(|info| family.rank(info).is_none())
            .map(|info| (aspect.distance(info.weight, info.style), info.id))
            .collect();
        ranked.sort_by_key(|&(distance, _)| distance);
        ranked.into_iter().map(|(_, id)| id).collect()
    }

    fn face(&mut self, id: ID) -> Option<Face> {
        if let Some(face) = self.loaded.get(&id) {
            return face.clone();
        }
        let face = loader::load_face_from_db(&self.db, id);
        self.loaded.insert(id, face.clone());
        face
    }

    fn covers(&self, id: ID, ch: char) -> bool {
        match self.loaded.get(&id) {
            Some(Some(face)) => face.has_glyph(ch),
            Some(None) => false,
            None => loader::face_covers(&self.db, id, ch),
        }
    }

    fn resolve_for_language(
        &mut self,
        family: &FamilyTag,
        aspect: Aspect,
        language: &str,
    ) -> Option<Face> {
        let samples = exemplars(language);
        let id = self
            .family_candidates(family, aspect)
            .into_iter()
            .find(|&id| samples.iter().all(|&ch| self.covers(id, ch)))?;

        let face = self.face(id)?;
        log::debug!(
            "Resolved {} face for language '{}': {}",
            family,
            language,
            face.name()
        );
        Some(face)
    }

    fn resolve_for_rune(&mut self, family: &FamilyTag, aspect: Aspect, ch: char) -> Option<Face> {
        if self.uncovered.contains(&ch) {
            return None;
        }

        let mut candidates = self.family_candidates(family, aspect);
        candidates.extend(self.other_candidates(family, aspect));

        for id in candidates {
            if self.covers(id, ch)
                && let Some(face) = self.face(id)
            {
                log::debug!(
                    "Character '{}' (U+{:04X}) found in system font {}",
                    ch,
                    ch as u32,
                    face.name()
                );
                return Some(face);
            }
        }

        log::debug!(
            "Character '{}' (U+{:04X}) not found in any of {} system fonts",
            ch,
            ch as u32,
            self.db.len()
        );
        self.uncovered.insert(ch);
        None
    }
}
