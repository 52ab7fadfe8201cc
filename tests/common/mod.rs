//! Shared integration test helpers for glint.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{TestFace, RecordingRenderer};
//! ```

#![allow(dead_code)]

use std::sync::Arc;

use glint::fonts::{Aspect, Face, FaceId, FaceMetrics, FamilyTag, FontFace, FontFallback, GlyphRun};
use glint::{Color, GlyphRenderer};

/// Face covering a fixed character set; every glyph is `advance` units wide
/// on a 1000-unit em with an 800/200 ascent/descent split.
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

/// Fallback that answers every language query with one face.
pub struct LanguageFace(pub Face);

impl FontFallback for LanguageFace {
    fn resolve_for_language(&self, _: &FamilyTag, _: Aspect, _: &str) -> Option<Face> {
        Some(Arc::clone(&self.0))
    }

    fn resolve_for_rune(&self, _: &FamilyTag, _: Aspect, _: char) -> Option<Face> {
        None
    }
}

/// One recorded `draw_run` call.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub face: String,
    pub glyphs: Vec<u16>,
    pub x: f32,
    pub y: i32,
}

/// Renderer that records what it is asked to draw.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<DrawCall>,
}

impl GlyphRenderer for RecordingRenderer {
    fn draw_run(&mut self, run: &GlyphRun<'_>, x: f32, y: i32, _color: Color, _scale: f32) {
        self.calls.push(DrawCall {
            face: run.face.name().to_string(),
            glyphs: run.glyphs.iter().map(|g| g.glyph_id).collect(),
            x,
            y,
        });
    }
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}
