//! Font face abstraction.
//!
//! A [`Face`] is a shared, immutable handle to parsed font data. Everything
//! above this module (face sets, shaping, rendering) only talks to faces
//! through the [`FontFace`] trait, so synthetic faces can stand in for real
//! fonts.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use glint_config::FontResource;
use swash::{CacheKey, FontRef};

use crate::error::{FontError, Result};

/// Shared handle to a font face.
pub type Face = Arc<dyn FontFace>;

/// Process-unique identity of a face, assigned at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceId(u64);

impl FaceId {
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        FaceId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

/// Vertical metrics in font units.
///
/// `descent` is the positive distance below the baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceMetrics {
    pub units_per_em: u16,
    pub ascent: f32,
    pub descent: f32,
    pub line_gap: f32,
}

impl FaceMetrics {
    /// Pixels per font unit at `size`.
    pub fn scale(&self, size: f32) -> f32 {
        size / self.units_per_em.max(1) as f32
    }

    pub fn line_bounds(&self, size: f32) -> LineBounds {
        let scale = self.scale(size);
        LineBounds {
            ascent: self.ascent * scale,
            descent: self.descent * scale,
            gap: self.line_gap * scale,
        }
    }
}

/// Vertical extent of a line in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LineBounds {
    pub ascent: f32,
    pub descent: f32,
    pub gap: f32,
}

impl LineBounds {
    /// Total line height: ascent, descent and gap.
    pub fn line_thickness(&self) -> f32 {
        self.ascent + self.descent + self.gap
    }
}

/// What the fallback and shaping code needs from a font.
pub trait FontFace: Send + Sync + fmt::Debug {
    fn id(&self) -> FaceId;

    fn name(&self) -> &str;

    /// Nominal glyph for `ch`, `None` when the cmap has no entry.
    fn glyph_id(&self, ch: char) -> Option<u16>;

    fn has_glyph(&self, ch: char) -> bool {
        self.glyph_id(ch).is_some()
    }

    /// Horizontal advance of `glyph_id` in font units.
    fn advance(&self, glyph_id: u16) -> f32;

    fn metrics(&self) -> FaceMetrics;

    /// Raw font bytes and collection index, for shapers and rasterizers.
    /// Synthetic faces return `None`.
    fn font_data(&self) -> Option<(&[u8], u32)> {
        None
    }
}

/// A TTF/OTF/TTC face parsed with swash.
///
/// Owns the font bytes and rebuilds the borrowed `FontRef` on demand, so no
/// self-referential lifetimes are involved.
pub struct FontData {
    id: FaceId,
    name: String,
    data: Arc<[u8]>,
    index: u32,
    offset: u32,
    key: CacheKey,
    metrics: FaceMetrics,
}

impl fmt::Debug for FontData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontData")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("index", &self.index)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl FontData {
    /// Parse face 0 of `data`.
    pub fn new(name: impl Into<String>, data: impl Into<Arc<[u8]>>) -> Result<Self> {
        Self::new_with_index(name, data, 0)
    }

    /// Parse a specific face of a TrueType Collection.
    pub fn new_with_index(
        name: impl Into<String>,
        data: impl Into<Arc<[u8]>>,
        index: u32,
    ) -> Result<Self> {
        let name = name.into();
        let data = data.into();

        let (offset, key, metrics) = {
            let font = FontRef::from_index(&data, index as usize)
                .ok_or_else(|| FontError::InvalidFontData { name: name.clone() })?;
            let m = font.metrics(&[]);
            if m.units_per_em == 0 {
                return Err(FontError::InvalidFontData { name });
            }
            let metrics = FaceMetrics {
                units_per_em: m.units_per_em,
                ascent: m.ascent,
                descent: m.descent.abs(),
                line_gap: m.leading,
            };
            (font.offset, font.key, metrics)
        };

        Ok(FontData {
            id: FaceId::next(),
            name,
            data,
            index,
            offset,
            key,
            metrics,
        })
    }

    pub fn from_resource(resource: &FontResource) -> Result<Self> {
        Self::new(resource.name(), resource.shared_content())
    }

    pub fn font_ref(&self) -> FontRef<'_> {
        FontRef {
            data: &self.data[..],
            offset: self.offset,
            key: self.key,
        }
    }

    pub fn index(&self) -> u32 {
        self.index
    }
}

impl FontFace for FontData {
    fn id(&self) -> FaceId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn glyph_id(&self, ch: char) -> Option<u16> {
        match self.font_ref().charmap().map(ch) {
            0 => None,
            glyph => Some(glyph),
        }
    }

    fn advance(&self, glyph_id: u16) -> f32 {
        self.font_ref().glyph_metrics(&[]).advance_width(glyph_id)
    }

    fn metrics(&self) -> FaceMetrics {
        self.metrics
    }

    fn font_data(&self) -> Option<(&[u8], u32)> {
        Some((&self.data[..], self.index))
    }
}

/// A face with no glyphs.
///
/// Stands in when a theme font cannot be parsed so that every face set has a
/// seed face; everything it shapes comes out as missing glyphs.
#[derive(Debug)]
pub struct EmptyFace {
    id: FaceId,
}

impl EmptyFace {
    pub fn new() -> Self {
        Self { id: FaceId::next() }
    }

    pub fn shared() -> Face {
        Arc::new(Self::new())
    }
}

impl Default for EmptyFace {
    fn default() -> Self {
        Self::new()
    }
}

impl FontFace for EmptyFace {
    fn id(&self) -> FaceId {
        self.id
    }

    fn name(&self) -> &str {
        "empty"
    }

    fn glyph_id(&self, _ch: char) -> Option<u16> {
        None
    }

    fn advance(&self, _glyph_id: u16) -> f32 {
        0.0
    }

    fn metrics(&self) -> FaceMetrics {
        FaceMetrics {
            units_per_em: 1000,
            ascent: 800.0,
            descent: 200.0,
            line_gap: 0.0,
        }
    }
}

/// Parse a theme resource, logging instead of failing.
pub fn load_face(resource: &FontResource) -> Option<Face> {
    match FontData::from_resource(resource) {
        Ok(font) => Some(Arc::new(font)),
        Err(e) => {
            log::error!("font load error: {e}");
            None
        }
    }
}

/// Identity comparison of two face handles.
pub fn same_face(a: &Face, b: &Face) -> bool {
    a.id() == b.id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_data_invalid_bytes() {
        let result = FontData::new("zeros", vec![0u8; 100]);
        assert!(matches!(result, Err(FontError::InvalidFontData { .. })));
    }

    #[test]
    fn test_font_data_empty_bytes() {
        assert!(FontData::new("empty", Vec::<u8>::new()).is_err());
    }

    #[test]
    fn test_load_face_logs_and_returns_none() {
        let resource = FontResource::new("broken.ttf", vec![1u8, 2, 3]);
        assert!(load_face(&resource).is_none());
    }

    #[test]
    fn test_empty_face_has_no_glyphs() {
        let face = EmptyFace::shared();
        assert!(!face.has_glyph('A'));
        assert!(face.font_data().is_none());
        let thickness = face.metrics().line_bounds(10.0).line_thickness();
        assert!((thickness - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_face_ids_are_unique() {
        let a = EmptyFace::shared();
        let b = EmptyFace::shared();
        assert!(!same_face(&a, &b));
        assert!(same_face(&a, &a.clone()));
    }

    #[test]
    fn test_line_bounds_scale() {
        let metrics = FaceMetrics {
            units_per_em: 2048,
            ascent: 1024.0,
            descent: 512.0,
            line_gap: 0.0,
        };
        let bounds = metrics.line_bounds(16.0);
        assert_eq!(bounds.ascent, 8.0);
        assert_eq!(bounds.descent, 4.0);
        assert_eq!(bounds.line_thickness(), 12.0);
    }
}
