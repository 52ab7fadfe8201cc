//! Default values for text and font settings.

/// Tab width in space-widths used when a style does not override it.
pub const DEFAULT_TAB_WIDTH: i32 = 4;

pub fn system_fallback() -> bool {
    true // System font discovery enabled unless explicitly turned off
}

pub fn bundled_fonts() -> bool {
    true
}

pub fn shape_cache_size() -> usize {
    1000
}

pub fn ligatures() -> bool {
    true
}

pub fn kerning() -> bool {
    true
}
