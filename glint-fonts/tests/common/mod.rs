//! Synthetic faces and fallback sources shared by the integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use glint_fonts::{Aspect, Face, FaceId, FaceMetrics, FamilyTag, FontFace, FontFallback};

/// Face covering a fixed character set. Every glyph is `advance` units wide
/// on a 1000-unit em, with an 800/200 ascent/descent split.
#[derive(Debug)]
pub struct TestFace {
    id: FaceId,
    name: String,
    chars: Vec<char>,
    advance: f32,
}

impl TestFace {
    pub fn new(name: &str, chars: &str, advance: f32) -> Face {
        Arc::new(TestFace {
            id: FaceId::next(),
            name: name.to_string(),
            chars: chars.chars().collect(),
            advance,
        })
    }
}

impl FontFace for TestFace {
    fn id(&self) -> FaceId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn glyph_id(&self, ch: char) -> Option<u16> {
        self.chars
            .iter()
            .position(|&c| c == ch)
            .map(|i| i as u16 + 1)
    }

    fn advance(&self, _glyph_id: u16) -> f32 {
        self.advance
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

/// Fallback source with one face for rune queries and one for language
/// queries, counting how often each is asked.
pub struct CountingFallback {
    pub rune_face: Option<Face>,
    pub language_face: Option<Face>,
    pub rune_queries: AtomicUsize,
    pub language_queries: AtomicUsize,
}

impl CountingFallback {
    pub fn new(rune_face: Option<Face>, language_face: Option<Face>) -> Arc<Self> {
        Arc::new(Self {
            rune_face,
            language_face,
            rune_queries: AtomicUsize::new(0),
            language_queries: AtomicUsize::new(0),
        })
    }

    pub fn rune_queries(&self) -> usize {
        self.rune_queries.load(Ordering::SeqCst)
    }

    pub fn language_queries(&self) -> usize {
        self.language_queries.load(Ordering::SeqCst)
    }
}

impl FontFallback for CountingFallback {
    fn resolve_for_language(&self, _: &FamilyTag, _: Aspect, _: &str) -> Option<Face> {
        self.language_queries.fetch_add(1, Ordering::SeqCst);
        self.language_face.clone()
    }

    fn resolve_for_rune(&self, _: &FamilyTag, _: Aspect, ch: char) -> Option<Face> {
        self.rune_queries.fetch_add(1, Ordering::SeqCst);
        self.rune_face.clone().filter(|face| face.has_glyph(ch))
    }
}
