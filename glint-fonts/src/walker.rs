//! Single-line text layout.
//!
//! [`walk_string`] splits a string into runs that share a face, expands tabs
//! to tab stops, shapes each run and reports every resulting glyph run with
//! its pen position. Measuring and drawing are both built on it: measuring
//! only keeps the returned extent, drawing renders each run in the visitor.

use std::borrow::Cow;
use std::ops::Range;
use std::sync::Arc;

use glint_config::{DEFAULT_TAB_WIDTH, Size, TextStyle};
use unicode_segmentation::UnicodeSegmentation;

use crate::face::{Face, same_face};
use crate::face_set::ResolveFace;
use crate::text_shaper::{GlyphRun, ShapeInput, ShapedRun, Shaper};

/// Width of one tab-width unit for proportional text, before scaling.
pub const TAB_SPACE_SIZE: f32 = 10.0;

/// Next tab stop strictly to the right of `x`.
///
/// `spacew` is the width of one tab unit and `tab_width` the number of units
/// per stop; non-positive widths select the default of 4.
pub fn tab_stop(spacew: f32, x: f32, tab_width: i32) -> f32 {
    let tab_width = if tab_width <= 0 {
        DEFAULT_TAB_WIDTH
    } else {
        tab_width
    };
    let tabw = spacew * tab_width as f32;
    if tabw <= 0.0 {
        return x;
    }
    tabw * ((x + tabw) / tabw).floor()
}

/// Lay out `text` on one line.
///
/// Glyph advances come from shaping at `size`; the pen and tab stops are in
/// `size * scale` space. `visitor` receives each glyph run with the pen x it
/// starts at. Missing glyphs are reported as runs of their own.
///
/// Returns the line size, whose height is the line thickness of a space in
/// the face that draws spaces, and that space's ascent as the baseline.
pub fn walk_string<F>(
    faces: &mut dyn ResolveFace,
    shaper: &dyn Shaper,
    text: &str,
    size: f32,
    style: &TextStyle,
    scale: f32,
    mut visitor: F,
) -> (Size, f32)
where
    F: FnMut(&GlyphRun<'_>, f32),
{
    let text: Cow<'_, str> = if text.contains('\r') {
        Cow::Owned(text.replace('\r', ""))
    } else {
        Cow::Borrowed(text)
    };

    let space_face = faces.resolve_face(' ');
    let space = shaper.shape(&ShapeInput {
        text: " ",
        face: &space_face,
        size,
    });
    let spacew = if style.monospace {
        scale * space.advance()
    } else {
        scale * TAB_SPACE_SIZE
    };
    let tab_width = style.effective_tab_width();

    let mut x = 0.0;
    for (face, range) in split_by_face(faces, &space_face, &text) {
        let run = &text[range];
        let mut pending = 0;
        for (offset, ch) in run.char_indices() {
            if ch != '\t' {
                continue;
            }
            if pending < offset {
                let pending_text = &run[pending..offset];
                x = shape_and_emit(shaper, pending_text, &face, size, scale, x, &mut visitor);
            }
            x = tab_stop(spacew, x, tab_width);
            pending = offset + ch.len_utf8();
        }
        if pending < run.len() {
            let rest = &run[pending..];
            x = shape_and_emit(shaper, rest, &face, size, scale, x, &mut visitor);
        }
    }

    let bounds = space.line_bounds;
    (Size::new(x, bounds.line_thickness()), bounds.ascent)
}

/// Maximal runs of `text` sharing one face, in logical order.
///
/// Grapheme clusters are resolved by their first character and never split.
/// Control characters, and whitespace the current face has a glyph for,
/// extend the current run without a lookup; leading control characters use
/// `space_face`.
pub fn split_by_face(
    faces: &mut dyn ResolveFace,
    space_face: &Face,
    text: &str,
) -> Vec<(Face, Range<usize>)> {
    let mut runs: Vec<(Face, Range<usize>)> = Vec::new();

    for (start, grapheme) in text.grapheme_indices(true) {
        let end = start + grapheme.len();
        let Some(first) = grapheme.chars().next() else {
            continue;
        };

        if let Some((face, range)) = runs.last_mut()
            && (first.is_control() || (first.is_whitespace() && face.has_glyph(first)))
        {
            range.end = end;
            continue;
        }

        let face = if first.is_control() {
            space_face.clone()
        } else {
            faces.resolve_face(first)
        };

        match runs.last_mut() {
            Some((current, range)) if same_face(current, &face) => range.end = end,
            _ => runs.push((face, start..end)),
        }
    }

    runs
}

/// Shape `text` and emit it, splitting out each missing glyph. Returns the
/// new pen position.
fn shape_and_emit<F>(
    shaper: &dyn Shaper,
    text: &str,
    face: &Face,
    size: f32,
    scale: f32,
    mut x: f32,
    visitor: &mut F,
) -> f32
where
    F: FnMut(&GlyphRun<'_>, f32),
{
    let shaped = shaper.shape(&ShapeInput { text, face, size });
    let mut emit = |run: GlyphRun<'_>, x: &mut f32| {
        visitor(&run, *x);
        *x += run.advance() * scale;
    };

    let mut start = 0;
    for (i, glyph) in shaped.glyphs.iter().enumerate() {
        if glyph.is_notdef() {
            if start < i {
                emit(shaped.slice(start, i), &mut x);
            }
            emit(shaped.slice(i, i + 1), &mut x);
            start = i + 1;
        }
    }
    if start < shaped.glyphs.len() {
        emit(shaped.slice(start, shaped.glyphs.len()), &mut x);
    }
    x
}

/// Shape `text` as a single run with the face resolved for its first
/// character.
pub fn shape_single(
    faces: &mut dyn ResolveFace,
    shaper: &dyn Shaper,
    text: &str,
    size: f32,
) -> Option<Arc<ShapedRun>> {
    let first = text.chars().next()?;
    let face = faces.resolve_face(first);
    Some(shaper.shape(&ShapeInput {
        text,
        face: &face,
        size,
    }))
}
