//! Integration tests for glint-fonts crate.

mod common;

use std::sync::Arc;

use common::{CountingFallback, TestFace};
use glint_config::{FixedLocale, TextStyle, ThemeFonts};
use glint_fonts::face::same_face;
use glint_fonts::{
    Aspect, DynamicFaceSet, FamilyTag, FontError, HarfbuzzShaper, IndexState, NoFallback,
    ResolveFace, ShapingOptions, StyleCache, SystemFontIndex, tab_stop, walk_string,
};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

fn style_cache(fallback: Arc<CountingFallback>) -> StyleCache {
    StyleCache::new(
        Arc::new(ThemeFonts::without_bundled_fonts()),
        Arc::new(FixedLocale::new("ru_RU.UTF-8")),
        fallback,
    )
}

#[test]
fn test_fallback_face_discovered_once() {
    let latin = TestFace::new("Latin", " abc", 500.0);
    let runes = TestFace::new("Runic", "ᚠᚢ", 700.0);
    let fallback = CountingFallback::new(Some(Arc::clone(&runes)), None);
    let mut faces = DynamicFaceSet::new(
        latin,
        FamilyTag::SansSerif,
        Aspect::default(),
        fallback.clone(),
    );

    let first = faces.resolve_face('ᚠ');
    let second = faces.resolve_face('ᚠ');
    assert!(same_face(&first, &runes));
    assert!(same_face(&second, &runes));
    assert_eq!(fallback.rune_queries(), 1);
}

#[test]
fn test_failed_index_degrades_to_first_seed() {
    let latin = TestFace::new("Latin", " abc", 500.0);
    let index = Arc::new(SystemFontIndex::with_loader(|_| {
        Err(FontError::NoSystemFonts)
    }));
    let mut faces = DynamicFaceSet::new(
        Arc::clone(&latin),
        FamilyTag::SansSerif,
        Aspect::default(),
        index.clone(),
    );

    assert!(same_face(&faces.resolve_face('ᚠ'), &latin));
    assert_eq!(index.state(), IndexState::Failed);
    assert_eq!(faces.faces().len(), 1);
}

#[test]
fn test_style_cache_adds_language_face() {
    let cyrillic = TestFace::new("Cyrillic", "жя", 500.0);
    let fallback = CountingFallback::new(None, Some(Arc::clone(&cyrillic)));
    let cache = style_cache(fallback.clone());

    let item = cache.get_faces(&TextStyle::regular());
    assert!(same_face(&item.resolve_face('ж'), &cyrillic));
    assert_eq!(fallback.language_queries(), 1);
    assert_eq!(fallback.rune_queries(), 0);

    cache.get_faces(&TextStyle::regular());
    assert_eq!(fallback.language_queries(), 1);
}

#[test]
fn test_symbol_style_skips_language_lookup() {
    let cyrillic = TestFace::new("Cyrillic", "жя", 500.0);
    let fallback = CountingFallback::new(None, Some(cyrillic));
    let cache = style_cache(fallback.clone());
    let symbol = TextStyle {
        symbol: true,
        ..TextStyle::default()
    };

    let item = cache.get_faces(&symbol);
    assert_eq!(item.resolve_face('ж').name(), "empty");
    assert_eq!(fallback.language_queries(), 0);
    assert_eq!(fallback.rune_queries(), 1);
}

#[test]
fn test_reset_replaces_cached_items() {
    let cache = style_cache(CountingFallback::new(None, None));
    let style = TextStyle::regular().bold(true);

    let a = cache.get_faces(&style);
    let b = cache.get_faces(&style);
    assert!(Arc::ptr_eq(&a, &b));

    cache.set_theme(Arc::new(ThemeFonts::without_bundled_fonts()));
    let c = cache.get_faces(&style);
    assert!(!Arc::ptr_eq(&a, &c));
}

#[test]
fn test_concurrent_get_faces_agree() {
    let cache = Arc::new(style_cache(CountingFallback::new(None, None)));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            std::thread::spawn(move || cache.get_faces(&TextStyle::monospace()))
        })
        .collect();

    let items: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for item in &items[1..] {
        assert!(Arc::ptr_eq(&items[0], item));
    }
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_walk_with_harfbuzz_shaper_on_synthetic_face() {
    let latin = TestFace::new("Latin", " AB", 600.0);
    let mut faces = DynamicFaceSet::new(
        latin,
        FamilyTag::SansSerif,
        Aspect::default(),
        Arc::new(NoFallback),
    );
    let shaper = HarfbuzzShaper::with_options(ShapingOptions::default(), 16);
    let mut positions = Vec::new();

    let (size, _) = walk_string(
        &mut faces,
        &shaper,
        "A\tB",
        12.0,
        &TextStyle::regular(),
        1.0,
        |_, x| positions.push(x),
    );

    let expected_b = tab_stop(10.0, 7.2, 4);
    assert_eq!(positions.len(), 2);
    assert!(approx(positions[0], 0.0));
    assert!(approx(positions[1], expected_b));
    assert!(approx(size.width, expected_b + 7.2));
}

#[test]
fn test_monospace_tab_stops() {
    let mono = TestFace::new("Mono", " x", 500.0);
    let mut faces = DynamicFaceSet::new(
        mono,
        FamilyTag::Monospace,
        Aspect::default(),
        Arc::new(NoFallback),
    );
    let shaper = HarfbuzzShaper::new();
    let mut positions = Vec::new();

    // space is 5px at size 10
    walk_string(
        &mut faces,
        &shaper,
        "\t\tx",
        10.0,
        &TextStyle::monospace(),
        1.0,
        |_, x| positions.push(x),
    );
    assert_eq!(positions.len(), 1);
    assert!(approx(positions[0], 40.0));
}

#[test]
fn test_disabled_index_never_scans() {
    let index = SystemFontIndex::disabled();
    assert!(!index.initialize());
    assert_eq!(index.face_count(), 0);
}
