//! Glyph rasterization into RGBA pixel buffers.
//!
//! [`GlyphRenderer`] is the seam between layout and pixels. The bundled
//! [`SwashRenderer`] rasterizes with swash, trying colour sources first so
//! emoji fonts render as coloured bitmaps, and alpha-blends the result into a
//! [`PixelBuffer`].

use glint_config::Color;
use glint_fonts::GlyphRun;
use swash::FontRef;
use swash::scale::image::{Content, Image};
use swash::scale::{Render, ScaleContext, Source, StrikeWith};
use swash::zeno::Format;

/// Draws shaped glyph runs.
pub trait GlyphRenderer {
    /// Draw `run` with its pen origin at `x` and its baseline at `y`, both in
    /// device pixels. Glyph positions in the run are multiplied by `scale`.
    fn draw_run(&mut self, run: &GlyphRun<'_>, x: f32, y: i32, color: Color, scale: f32);
}

/// Straight (non-premultiplied) RGBA8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Fully transparent buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let i = self.offset(x as i32, y as i32)?;
        let mut px = [0; 4];
        px.copy_from_slice(&self.pixels[i..i + 4]);
        Some(px)
    }

    /// Whether every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.pixels.chunks_exact(4).all(|px| px[3] == 0)
    }

    /// Source-over blend of `rgba` onto the pixel at (`x`, `y`). Writes
    /// outside the buffer are dropped.
    pub fn blend(&mut self, x: i32, y: i32, rgba: [u8; 4]) {
        let Some(i) = self.offset(x, y) else {
            return;
        };
        let src_a = rgba[3] as f32 / 255.0;
        if src_a <= 0.0 {
            return;
        }
        let dst = &mut self.pixels[i..i + 4];
        let dst_a = dst[3] as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);

        for c in 0..3 {
            let src_c = rgba[c] as f32;
            let dst_c = dst[c] as f32;
            let out_c = (src_c * src_a + dst_c * dst_a * (1.0 - src_a)) / out_a;
            dst[c] = out_c.round().clamp(0.0, 255.0) as u8;
        }
        dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 4)
    }
}

/// Colour sources first so emoji render as coloured bitmaps; text fonts fall
/// through to the outline.
const SOURCES: &[Source] = &[
    Source::ColorBitmap(StrikeWith::BestFit),
    Source::ColorOutline(0),
    Source::Outline,
];

/// Rasterizes runs with swash into a [`PixelBuffer`].
///
/// Faces without font data (synthetic faces) draw nothing.
pub struct SwashRenderer<'a> {
    target: &'a mut PixelBuffer,
    context: ScaleContext,
    hinting: bool,
}

impl<'a> SwashRenderer<'a> {
    pub fn new(target: &'a mut PixelBuffer) -> Self {
        Self {
            target,
            context: ScaleContext::new(),
            hinting: true,
        }
    }

    pub fn with_hinting(mut self, hinting: bool) -> Self {
        self.hinting = hinting;
        self
    }
}

impl GlyphRenderer for SwashRenderer<'_> {
    fn draw_run(&mut self, run: &GlyphRun<'_>, x: f32, y: i32, color: Color, scale: f32) {
        let Some((data, index)) = run.face.font_data() else {
            return;
        };
        let Some(font) = FontRef::from_index(data, index as usize) else {
            log::warn!("Cannot rasterize {}: invalid font data", run.face.name());
            return;
        };

        let mut scaler = self
            .context
            .builder(font)
            .size(run.size * scale)
            .hint(self.hinting)
            .build();
        let mut render = Render::new(SOURCES);
        render.format(Format::Alpha);

        let mut pen = x;
        for glyph in run.glyphs {
            let gx = (pen + glyph.x_offset * scale).round() as i32;
            let gy = y - (glyph.y_offset * scale).round() as i32;
            pen += glyph.x_advance * scale;

            if let Some(image) = render.render(&mut scaler, glyph.glyph_id) {
                blit(self.target, &image, gx, gy, color);
            }
        }
    }
}

/// Composite a rasterized glyph whose origin sits at (`x`, `baseline`).
fn blit(target: &mut PixelBuffer, image: &Image, x: i32, baseline: i32, color: Color) {
    let width = image.placement.width as usize;
    let height = image.placement.height as usize;
    if width == 0 || height == 0 {
        return;
    }
    let left = x + image.placement.left;
    let top = baseline - image.placement.top;

    match image.content {
        Content::Mask => {
            for (i, &coverage) in image.data.iter().enumerate().take(width * height) {
                let alpha = (coverage as u32 * color.a as u32 / 255) as u8;
                let (col, row) = ((i % width) as i32, (i / width) as i32);
                target.blend(left + col, top + row, [color.r, color.g, color.b, alpha]);
            }
        }
        Content::Color => {
            for (i, px) in image.data.chunks_exact(4).enumerate().take(width * height) {
                let alpha = (px[3] as u32 * color.a as u32 / 255) as u8;
                let (col, row) = ((i % width) as i32, (i / width) as i32);
                target.blend(left + col, top + row, [px[0], px[1], px[2], alpha]);
            }
        }
        Content::SubpixelMask => {
            let channels = image.data.len() / (width * height);
            if channels < 3 {
                return;
            }
            for (i, px) in image.data.chunks_exact(channels).enumerate().take(width * height) {
                let coverage = (px[0] as u32 + px[1] as u32 + px[2] as u32) / 3;
                let alpha = (coverage * color.a as u32 / 255) as u8;
                let (col, row) = ((i % width) as i32, (i / width) as i32);
                target.blend(left + col, top + row, [color.r, color.g, color.b, alpha]);
            }
        }
    }
}
