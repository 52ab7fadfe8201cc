//! Style, theme and configuration types for the glint text subsystem.
//!
//! This crate provides:
//!
//! - `TextStyle` (the style cache key) and the `Size` measurement type
//! - Font theme resources (`FontSlot`, `FontResource`, `ThemeFonts`)
//! - Embedded DejaVu fonts used as the toolkit defaults
//! - Locale discovery for language-aware font selection
//! - YAML configuration loading with typed errors

pub mod bundled;
pub mod config;
pub mod defaults;
pub mod error;
pub mod locale;
pub mod style;
pub mod theme;

// Re-export main types for convenience
pub use bundled::{DEJAVU_SANS, DEJAVU_SANS_MONO, bundled_font};
pub use config::{FontPaths, TextConfig};
pub use defaults::DEFAULT_TAB_WIDTH;
pub use error::ConfigError;
pub use locale::{FixedLocale, LocaleProvider, SystemLocale, language_subtag};
pub use style::{Size, TextStyle};
pub use theme::{Color, FontResource, FontSlot, FontTheme, ThemeFonts};
