//! Font faces, fallback and text shaping for the glint text subsystem.
//!
//! This crate provides:
//! - Font faces parsed with swash, plus a trait for synthetic faces
//! - A lazily scanned system font index used for fallback lookups
//! - Per-style face sets that grow as fallback faces are discovered
//! - HarfBuzz-based text shaping via rustybuzz with LRU caching
//! - Single-line layout with tab stops and missing-glyph splitting
//!
//! # Architecture
//!
//! The `StyleCache` builds one `DynamicFaceSet` per `TextStyle` from the font
//! theme. Each set resolves characters to faces in priority order:
//! 1. Theme font for the style, then the toolkit default
//! 2. A system face matching the user's language
//! 3. The default emoji font
//! 4. Any system face with a glyph for the character
//!
//! `walk_string` splits text by resolved face and feeds each run through a
//! `Shaper`; measuring and drawing are both visitors over that walk.

pub mod error;
pub mod face;
pub mod face_set;
pub mod metrics_cache;
pub mod style_cache;
pub mod system_index;
pub mod text_shaper;
pub mod walker;

// Re-export main types for convenience
pub use error::{FontError, Result};
pub use face::{EmptyFace, Face, FaceId, FaceMetrics, FontData, FontFace, LineBounds, load_face};
pub use face_set::{DynamicFaceSet, ResolveFace, SingleFace};
pub use metrics_cache::MetricsCache;
pub use style_cache::{FontCacheItem, StyleCache};
pub use system_index::{
    Aspect, FamilyTag, FontFallback, IndexState, NoFallback, Slant, SystemFontIndex, Weight,
};
pub use text_shaper::{
    GlyphRun, HarfbuzzShaper, NominalShaper, ShapeInput, ShapedGlyph, ShapedRun, Shaper,
    ShapingOptions,
};
pub use walker::{tab_stop, walk_string};
