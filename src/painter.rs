//! Text measurement and drawing.
//!
//! [`TextPainter`] owns the per-style face cache, the measurement cache and
//! the shaper. It replaces process-wide font state: each painter has its own
//! caches, so tests and independent windows never share them.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use glint_config::{Color, FontTheme, LocaleProvider, Size, TextConfig, TextStyle};
use glint_fonts::walker::shape_single;
use glint_fonts::{
    FontCacheItem, FontFallback, HarfbuzzShaper, MetricsCache, ResolveFace, Shaper,
    ShapingOptions, StyleCache, SystemFontIndex, walk_string,
};

use crate::render::{GlyphRenderer, PixelBuffer, SwashRenderer};

/// Drawn in place of characters no face can render.
const REPLACEMENT: &str = "\u{FFFD}";

/// Measures and draws single lines of styled text.
pub struct TextPainter {
    style_cache: StyleCache,
    metrics: MetricsCache,
    shaper: Arc<dyn Shaper>,
}

impl TextPainter {
    pub fn new(
        theme: Arc<dyn FontTheme>,
        locale: Arc<dyn LocaleProvider>,
        fallback: Arc<dyn FontFallback>,
        shaper: Arc<dyn Shaper>,
    ) -> Self {
        Self {
            style_cache: StyleCache::new(theme, locale, fallback),
            metrics: MetricsCache::new(),
            shaper,
        }
    }

    /// Build a painter from configuration: theme fonts are read from disk
    /// (relative paths against `base_dir`), the system index honours
    /// `system_fallback` and `font_dirs`, and the shaper gets the configured
    /// features and cache size.
    pub fn from_config(config: &TextConfig, base_dir: Option<&Path>) -> Result<Self> {
        let theme = config.theme_fonts(base_dir)?;

        let fallback: Arc<dyn FontFallback> = if config.system_fallback {
            Arc::new(SystemFontIndex::with_font_dirs(config.font_dirs.clone()))
        } else {
            log::info!("System font fallback disabled by configuration");
            Arc::new(SystemFontIndex::disabled())
        };

        let options = ShapingOptions {
            ligatures: config.ligatures,
            kerning: config.kerning,
        };
        let shaper = HarfbuzzShaper::with_options(options, config.shape_cache_size);

        Ok(Self::new(
            Arc::new(theme),
            config.locale(),
            fallback,
            Arc::new(shaper),
        ))
    }

    /// Size and baseline of `text`, cached per (text, size, style).
    pub fn measure(&self, text: &str, font_size: f32, style: &TextStyle) -> (Size, f32) {
        if let Some(hit) = self.metrics.get(text, font_size, style) {
            return hit;
        }

        let item = self.style_cache.get_faces(style);
        let (size, baseline) = {
            let mut faces = item.lock();
            self.measure_string(&mut **faces, text, font_size, style)
        };
        self.metrics.set(text, font_size, style, size, baseline);
        (size, baseline)
    }

    /// Uncached measurement against an explicit face set.
    pub fn measure_string(
        &self,
        faces: &mut dyn ResolveFace,
        text: &str,
        font_size: f32,
        style: &TextStyle,
    ) -> (Size, f32) {
        walk_string(faces, &*self.shaper, text, font_size, style, 1.0, |_, _| {})
    }

    /// Draw `text` on one line starting at the left edge of the renderer.
    ///
    /// Every run shares one baseline, taken from the first run's ascent.
    /// Missing glyphs are replaced by U+FFFD from whichever face covers it.
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &self,
        renderer: &mut dyn GlyphRenderer,
        text: &str,
        color: Color,
        faces: &mut dyn ResolveFace,
        font_size: f32,
        scale: f32,
        style: &TextStyle,
    ) {
        let mut baseline: Option<i32> = None;
        let mut missing: Vec<f32> = Vec::new();

        walk_string(faces, &*self.shaper, text, font_size, style, scale, |run, x| {
            let y = *baseline
                .get_or_insert_with(|| (run.line_bounds.ascent * scale).ceil() as i32);
            if run.is_notdef() {
                missing.push(x);
            } else {
                renderer.draw_run(run, x, y, color, scale);
            }
        });

        if missing.is_empty() {
            return;
        }
        let Some(replacement) = shape_single(faces, &*self.shaper, REPLACEMENT, font_size) else {
            return;
        };
        let y = baseline
            .unwrap_or_else(|| (replacement.line_bounds.ascent * scale).ceil() as i32);
        for x in missing {
            renderer.draw_run(&replacement.as_glyph_run(), x, y, color, scale);
        }
    }

    /// Draw into `buffer` with the swash rasterizer, using the cached face
    /// set for `style`.
    pub fn draw_into(
        &self,
        buffer: &mut PixelBuffer,
        text: &str,
        color: Color,
        font_size: f32,
        scale: f32,
        style: &TextStyle,
    ) {
        let item = self.style_cache.get_faces(style);
        let mut faces = item.lock();
        let mut renderer = SwashRenderer::new(buffer);
        self.draw(&mut renderer, text, color, &mut **faces, font_size, scale, style);
    }

    /// The cached face set for `style`, built on first use.
    pub fn cached_font_face(&self, style: &TextStyle) -> Arc<FontCacheItem> {
        self.style_cache.get_faces(style)
    }

    /// Forget every face set; the next lookup rebuilds it. Cached
    /// measurements are kept.
    pub fn reset_font_cache(&self) {
        self.style_cache.clear();
    }

    /// Swap the font theme, dropping everything derived from the old one.
    pub fn set_theme(&self, theme: Arc<dyn FontTheme>) {
        self.style_cache.set_theme(theme);
        self.metrics.clear();
    }

    pub fn style_cache(&self) -> &StyleCache {
        &self.style_cache
    }

    pub fn metrics_cache(&self) -> &MetricsCache {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_config::{FixedLocale, ThemeFonts};
    use glint_fonts::{NoFallback, NominalShaper};

    fn painter() -> TextPainter {
        TextPainter::new(
            Arc::new(ThemeFonts::new()),
            Arc::new(FixedLocale::new("en")),
            Arc::new(NoFallback),
            Arc::new(NominalShaper),
        )
    }

    #[test]
    fn test_measure_populates_cache() {
        let painter = painter();
        let style = TextStyle::regular();
        let first = painter.measure("abc", 14.0, &style);
        assert_eq!(painter.metrics_cache().len(), 1);
        assert_eq!(painter.measure("abc", 14.0, &style), first);
    }

    #[test]
    fn test_reset_rebuilds_face_sets() {
        let painter = painter();
        let style = TextStyle::monospace();
        let before = painter.cached_font_face(&style);
        painter.measure("x", 10.0, &style);

        painter.reset_font_cache();
        assert_eq!(painter.metrics_cache().len(), 1);
        assert!(!Arc::ptr_eq(&before, &painter.cached_font_face(&style)));
    }

    #[test]
    fn test_set_theme_drops_measurements() {
        let painter = painter();
        painter.measure("x", 10.0, &TextStyle::regular());
        painter.set_theme(Arc::new(ThemeFonts::new()));
        assert!(painter.metrics_cache().is_empty());
        assert!(painter.style_cache().is_empty());
    }

    #[test]
    fn test_from_config_without_fallback() {
        let config = TextConfig {
            system_fallback: false,
            ..TextConfig::default()
        };
        let painter = TextPainter::from_config(&config, None).unwrap();
        let (size, _) = painter.measure("", 12.0, &TextStyle::regular());
        assert_eq!(size.width, 0.0);
    }
}
