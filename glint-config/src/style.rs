//! Text style and measurement value types.

use serde::{Deserialize, Serialize};

use crate::defaults::DEFAULT_TAB_WIDTH;

/// How a run of text should be styled.
///
/// This is a plain value type: two styles with the same flags are the same
/// cache key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub monospace: bool,
    /// Use the theme's symbol font. Symbol text never falls back to emoji.
    pub symbol: bool,
    /// Tab width in space-widths. Zero or negative selects the default of 4.
    pub tab_width: i32,
}

impl TextStyle {
    pub const fn regular() -> Self {
        Self {
            bold: false,
            italic: false,
            monospace: false,
            symbol: false,
            tab_width: 0,
        }
    }

    pub const fn monospace() -> Self {
        Self {
            monospace: true,
            ..Self::regular()
        }
    }

    pub const fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub const fn italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    pub const fn with_tab_width(mut self, tab_width: i32) -> Self {
        self.tab_width = tab_width;
        self
    }

    /// The tab width to apply, substituting the default for non-positive values.
    pub fn effective_tab_width(&self) -> i32 {
        if self.tab_width <= 0 {
            DEFAULT_TAB_WIDTH
        } else {
            self.tab_width
        }
    }
}

/// Width and height of a measured piece of text, in device-independent pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}
