//! Weight and slant descriptors used to pick among faces of a family.

use glint_config::TextStyle;

/// Font weight on the usual 100–900 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Weight(pub u16);

impl Weight {
    pub const NORMAL: Weight = Weight(400);
    pub const BOLD: Weight = Weight(700);
}

impl Default for Weight {
    fn default() -> Self {
        Weight::NORMAL
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Slant {
    #[default]
    Normal,
    Italic,
}

/// Weight + slant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Aspect {
    pub weight: Weight,
    pub slant: Slant,
}

impl Aspect {
    pub const fn new(weight: Weight, slant: Slant) -> Self {
        Self { weight, slant }
    }

    /// How far an installed face is from this aspect. Lower is better; a
    /// slant mismatch always outweighs any weight difference.
    pub(crate) fn distance(&self, weight: fontdb::Weight, style: fontdb::Style) -> u32 {
        let slant_penalty = match (self.slant, style) {
            (Slant::Normal, fontdb::Style::Normal) | (Slant::Italic, fontdb::Style::Italic) => 0,
            (Slant::Italic, fontdb::Style::Oblique) => 1000,
            _ => 2000,
        };
        slant_penalty + (self.weight.0 as i32 - weight.0 as i32).unsigned_abs()
    }
}

impl From<&TextStyle> for Aspect {
    fn from(style: &TextStyle) -> Self {
        Aspect {
            weight: if style.bold {
                Weight::BOLD
            } else {
                Weight::NORMAL
            },
            slant: if style.italic {
                Slant::Italic
            } else {
                Slant::Normal
            },
        }
    }
}
