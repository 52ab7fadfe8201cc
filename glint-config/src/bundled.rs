//! Fonts compiled into the library.
//!
//! DejaVu Sans and DejaVu Sans Mono are the toolkit defaults for every slot
//! except emoji, so text measures and renders (including the U+FFFD
//! placeholder) with no configured fonts and no system fonts.

use std::sync::LazyLock;

use crate::theme::{FontResource, FontSlot};

/// Embedded DejaVu Sans.
pub const DEJAVU_SANS: &[u8] = include_bytes!("../fonts/DejaVuSans.ttf");

/// Embedded DejaVu Sans Mono.
pub const DEJAVU_SANS_MONO: &[u8] = include_bytes!("../fonts/DejaVuSansMono.ttf");

static SANS: LazyLock<FontResource> =
    LazyLock::new(|| FontResource::new("DejaVuSans.ttf", DEJAVU_SANS));

static MONO: LazyLock<FontResource> =
    LazyLock::new(|| FontResource::new("DejaVuSansMono.ttf", DEJAVU_SANS_MONO));

/// The embedded font for `slot`; `None` for emoji.
///
/// Every call for the same font shares one copy of the bytes.
pub fn bundled_font(slot: FontSlot) -> Option<FontResource> {
    match slot {
        FontSlot::Emoji => None,
        FontSlot::Monospace => Some(MONO.clone()),
        _ => Some(SANS.clone()),
    }
}
