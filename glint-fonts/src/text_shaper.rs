//! Text shaping.
//!
//! A [`Shaper`] turns a string and a single face into positioned glyphs.
//! [`HarfbuzzShaper`] runs rustybuzz over the face's font data and keeps an
//! LRU cache of results; [`NominalShaper`] maps characters straight through
//! the cmap and is what synthetic faces (which carry no font data) get.
//!
//! All positions in a [`ShapedRun`] are pixels at the requested font size.
//! Text is shaped left to right; no bidi reordering happens here.

use std::num::NonZeroUsize;
use std::str::FromStr;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;
use rustybuzz::{Direction, Feature, GlyphBuffer, UnicodeBuffer};

use crate::face::{Face, FaceId, LineBounds};

/// Glyph id every font reserves for "no glyph".
pub const NOTDEF: u16 = 0;

/// A single shaped glyph with positioning information
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapedGlyph {
    pub glyph_id: u16,

    /// Byte offset of the first character this glyph represents
    pub cluster: u32,

    pub x_advance: f32,
    pub y_advance: f32,
    pub x_offset: f32,

    /// Vertical offset from the baseline
    pub y_offset: f32,
}

impl ShapedGlyph {
    pub fn is_notdef(&self) -> bool {
        self.glyph_id == NOTDEF
    }
}

/// OpenType feature switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapingOptions {
    /// Standard and contextual ligatures (liga, clig)
    pub ligatures: bool,
    pub kerning: bool,
}

impl Default for ShapingOptions {
    fn default() -> Self {
        Self {
            ligatures: true,
            kerning: true,
        }
    }
}

impl ShapingOptions {
    fn features(&self) -> Vec<Feature> {
        let mut tags = vec!["ccmp", "locl"];
        if self.ligatures {
            tags.extend(["liga", "clig", "calt"]);
        } else {
            tags.extend(["-liga", "-clig", "-calt"]);
        }
        tags.push(if self.kerning { "kern" } else { "-kern" });

        tags.into_iter()
            .filter_map(|tag| Feature::from_str(tag).ok())
            .collect()
    }
}

/// What to shape
#[derive(Debug, Clone, Copy)]
pub struct ShapeInput<'a> {
    pub text: &'a str,
    pub face: &'a Face,
    /// Font size in pixels
    pub size: f32,
}

/// Result of shaping one string with one face
#[derive(Debug, Clone)]
pub struct ShapedRun {
    pub glyphs: Vec<ShapedGlyph>,
    pub face: Face,
    pub size: f32,
    pub line_bounds: LineBounds,
}

impl ShapedRun {
    pub fn new(glyphs: Vec<ShapedGlyph>, face: Face, size: f32) -> Self {
        let line_bounds = face.metrics().line_bounds(size);
        Self {
            glyphs,
            face,
            size,
            line_bounds,
        }
    }

    /// Total horizontal advance in pixels
    pub fn advance(&self) -> f32 {
        self.glyphs.iter().map(|g| g.x_advance).sum()
    }

    pub fn as_glyph_run(&self) -> GlyphRun<'_> {
        self.slice(0, self.glyphs.len())
    }

    /// Borrowed view over `glyphs[start..end]`
    pub fn slice(&self, start: usize, end: usize) -> GlyphRun<'_> {
        GlyphRun {
            glyphs: &self.glyphs[start..end],
            face: &self.face,
            size: self.size,
            line_bounds: self.line_bounds,
        }
    }
}

/// A contiguous slice of a shaped run, as handed to layout visitors and
/// renderers.
#[derive(Debug, Clone, Copy)]
pub struct GlyphRun<'a> {
    pub glyphs: &'a [ShapedGlyph],
    pub face: &'a Face,
    pub size: f32,
    pub line_bounds: LineBounds,
}

impl GlyphRun<'_> {
    pub fn advance(&self) -> f32 {
        self.glyphs.iter().map(|g| g.x_advance).sum()
    }

    /// A lone missing glyph.
    pub fn is_notdef(&self) -> bool {
        matches!(self.glyphs, [glyph] if glyph.is_notdef())
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// Turns text into positioned glyphs.
pub trait Shaper: Send + Sync {
    fn shape(&self, input: &ShapeInput<'_>) -> Arc<ShapedRun>;
}

/// One glyph per character, straight from the cmap. No kerning or
/// substitution.
#[derive(Debug, Clone, Copy, Default)]
pub struct NominalShaper;

impl NominalShaper {
    fn shape_run(input: &ShapeInput<'_>) -> ShapedRun {
        let face = input.face;
        let scale = face.metrics().scale(input.size);
        let glyphs = input
            .text
            .char_indices()
            .map(|(offset, ch)| {
                let glyph_id = face.glyph_id(ch).unwrap_or(NOTDEF);
                ShapedGlyph {
                    glyph_id,
                    cluster: offset as u32,
                    x_advance: face.advance(glyph_id) * scale,
                    y_advance: 0.0,
                    x_offset: 0.0,
                    y_offset: 0.0,
                }
            })
            .collect();
        ShapedRun::new(glyphs, Arc::clone(face), input.size)
    }
}

impl Shaper for NominalShaper {
    fn shape(&self, input: &ShapeInput<'_>) -> Arc<ShapedRun> {
        Arc::new(Self::shape_run(input))
    }
}

/// Cache key for shaped text runs
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ShapeCacheKey {
    text: String,
    face: FaceId,
    size_bits: u32,
    options: ShapingOptions,
}

/// HarfBuzz shaping via rustybuzz, with an LRU cache of results.
pub struct HarfbuzzShaper {
    options: ShapingOptions,
    features: Vec<Feature>,
    cache: Mutex<LruCache<ShapeCacheKey, Arc<ShapedRun>>>,
}

impl HarfbuzzShaper {
    pub fn new() -> Self {
        Self::with_options(ShapingOptions::default(), 1000)
    }

    pub fn with_options(options: ShapingOptions, cache_size: usize) -> Self {
        let capacity = NonZeroUsize::new(cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            options,
            features: options.features(),
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn options(&self) -> ShapingOptions {
        self.options
    }

    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.lock().len()
    }

    fn shape_uncached(&self, input: &ShapeInput<'_>) -> ShapedRun {
        let Some((data, index)) = input.face.font_data() else {
            return NominalShaper::shape_run(input);
        };
        let Some(rb_face) = rustybuzz::Face::from_slice(data, index) else {
            log::warn!(
                "rustybuzz could not parse {}, shaping nominally",
                input.face.name()
            );
            return NominalShaper::shape_run(input);
        };

        let mut buffer = UnicodeBuffer::new();
        buffer.push_str(input.text);
        buffer.set_direction(Direction::LeftToRight);
        buffer.guess_segment_properties();

        let output = rustybuzz::shape(&rb_face, &self.features, buffer);
        let scale = input.face.metrics().scale(input.size);
        ShapedRun::new(
            extract_shaped_glyphs(&output, scale),
            Arc::clone(input.face),
            input.size,
        )
    }
}

impl Default for HarfbuzzShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl Shaper for HarfbuzzShaper {
    fn shape(&self, input: &ShapeInput<'_>) -> Arc<ShapedRun> {
        let key = ShapeCacheKey {
            text: input.text.to_string(),
            face: input.face.id(),
            size_bits: input.size.to_bits(),
            options: self.options,
        };

        if let Some(cached) = self.cache.lock().get(&key) {
            return Arc::clone(cached);
        }

        let run = Arc::new(self.shape_uncached(input));
        self.cache.lock().put(key, Arc::clone(&run));
        run
    }
}

/// Glyph buffer positions are in font units; convert to pixels.
fn extract_shaped_glyphs(buffer: &GlyphBuffer, scale: f32) -> Vec<ShapedGlyph> {
    buffer
        .glyph_infos()
        .iter()
        .zip(buffer.glyph_positions())
        .map(|(info, pos)| ShapedGlyph {
            glyph_id: u16::try_from(info.glyph_id).unwrap_or(NOTDEF),
            cluster: info.cluster,
            x_advance: pos.x_advance as f32 * scale,
            y_advance: pos.y_advance as f32 * scale,
            x_offset: pos.x_offset as f32 * scale,
            y_offset: pos.y_offset as f32 * scale,
        })
        .collect()
}
