//! Font theme definitions: named font resources and text colour.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::bundled::bundled_font;

/// A color in RGBA format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn as_array(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// The named font roles a theme provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontSlot {
    Regular,
    Bold,
    Italic,
    BoldItalic,
    Monospace,
    Symbol,
    Emoji,
}

impl FontSlot {
    pub fn all() -> &'static [FontSlot] {
        &[
            FontSlot::Regular,
            FontSlot::Bold,
            FontSlot::Italic,
            FontSlot::BoldItalic,
            FontSlot::Monospace,
            FontSlot::Symbol,
            FontSlot::Emoji,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            FontSlot::Regular => "regular",
            FontSlot::Bold => "bold",
            FontSlot::Italic => "italic",
            FontSlot::BoldItalic => "bold italic",
            FontSlot::Monospace => "monospace",
            FontSlot::Symbol => "symbol",
            FontSlot::Emoji => "emoji",
        }
    }
}

impl fmt::Display for FontSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw font bytes plus a name, as handed out by a theme.
///
/// Cloning is cheap; the bytes are shared.
#[derive(Clone)]
pub struct FontResource {
    name: String,
    content: Arc<[u8]>,
}

impl FontResource {
    pub fn new(name: impl Into<String>, content: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Read a font file, naming the resource after the file name.
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, content))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Shared handle to the bytes, for consumers that keep them alive.
    pub fn shared_content(&self) -> Arc<[u8]> {
        Arc::clone(&self.content)
    }
}

impl PartialEq for FontResource {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && (Arc::ptr_eq(&self.content, &other.content) || self.content == other.content)
    }
}

impl Eq for FontResource {}

impl fmt::Debug for FontResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontResource")
            .field("name", &self.name)
            .field("data_len", &self.content.len())
            .finish()
    }
}

/// Source of the fonts used to render text.
///
/// `font` is what the active theme asks for; `default_font` is the font the
/// toolkit ships for the same role. The two may be the same resource.
pub trait FontTheme: Send + Sync {
    fn font(&self, slot: FontSlot) -> Option<FontResource>;

    fn default_font(&self, slot: FontSlot) -> Option<FontResource>;
}

/// Theme built from explicit resources, usually loaded from [`crate::TextConfig`].
///
/// Missing theme fonts fall back to the default for the slot. Missing
/// defaults fall back to the regular default and then to the bundled DejaVu
/// fonts; monospace prefers bundled DejaVu Sans Mono over a proportional
/// regular default. Emoji has no substitute.
#[derive(Debug, Clone)]
pub struct ThemeFonts {
    theme: HashMap<FontSlot, FontResource>,
    defaults: HashMap<FontSlot, FontResource>,
    bundled: bool,
}

impl Default for ThemeFonts {
    fn default() -> Self {
        Self {
            theme: HashMap::new(),
            defaults: HashMap::new(),
            bundled: true,
        }
    }
}

impl ThemeFonts {
    pub fn new() -> Self {
        Self::default()
    }

    /// A theme that only ever hands out fonts set on it explicitly.
    pub fn without_bundled_fonts() -> Self {
        Self {
            bundled: false,
            ..Self::default()
        }
    }

    pub fn with_font(mut self, slot: FontSlot, font: FontResource) -> Self {
        self.set_font(slot, font);
        self
    }

    pub fn with_default_font(mut self, slot: FontSlot, font: FontResource) -> Self {
        self.set_default_font(slot, font);
        self
    }

    pub fn set_font(&mut self, slot: FontSlot, font: FontResource) {
        self.theme.insert(slot, font);
    }

    pub fn set_default_font(&mut self, slot: FontSlot, font: FontResource) {
        self.defaults.insert(slot, font);
    }

    /// Whether no font was set explicitly. Bundled fonts do not count.
    pub fn is_empty(&self) -> bool {
        self.theme.is_empty() && self.defaults.is_empty()
    }

    pub fn uses_bundled_fonts(&self) -> bool {
        self.bundled
    }

    fn bundled(&self, slot: FontSlot) -> Option<FontResource> {
        if self.bundled { bundled_font(slot) } else { None }
    }

    fn regular_default(&self) -> Option<FontResource> {
        self.defaults.get(&FontSlot::Regular).cloned()
    }
}

impl FontTheme for ThemeFonts {
    fn font(&self, slot: FontSlot) -> Option<FontResource> {
        self.theme
            .get(&slot)
            .cloned()
            .or_else(|| self.default_font(slot))
    }

    fn default_font(&self, slot: FontSlot) -> Option<FontResource> {
        let own = self.defaults.get(&slot).cloned();
        match slot {
            FontSlot::Emoji => own,
            FontSlot::Monospace => own
                .or_else(|| self.bundled(slot))
                .or_else(|| self.regular_default()),
            _ => own
                .or_else(|| self.regular_default())
                .or_else(|| self.bundled(slot)),
        }
    }
}
