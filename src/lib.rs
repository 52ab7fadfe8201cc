// Text measurement and rendering with per-character font fallback.
//
// # Locking
//
// All locks are `parking_lot` and no call holds two at once, except that a
// face set's entry lock may be held while the system font index lock is
// taken during fallback discovery. The index never calls back into a face
// set, so that order cannot invert.
//
//   - Style and metrics caches: `RwLock` inside an `ArcSwap`; clearing
//     publishes a fresh map instead of mutating the old one.
//   - Face set entries (`FontCacheItem`): `Mutex`, held for one whole
//     measure or draw so a set only grows under a single writer.
//   - System font index: `Mutex` around the font database, initialized once.
//   - Shaper LRU: `Mutex`, held only for lookup and insert.

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod painter;
pub mod render;

pub use glint_config as config;
pub use glint_fonts as fonts;

pub use glint_config::{Color, FontSlot, FontTheme, Size, TextConfig, TextStyle, ThemeFonts};
pub use glint_fonts::{FontCacheItem, ResolveFace, Shaper};
pub use painter::TextPainter;
pub use render::{GlyphRenderer, PixelBuffer, SwashRenderer};
