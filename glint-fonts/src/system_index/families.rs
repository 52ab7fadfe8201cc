//! Family tags and their substitute chains.
//!
//! The two families text styles ask for expand to well-known installed
//! family names in priority order, so a query for "monospace" finds DejaVu
//! Sans Mono on Linux, Menlo on macOS and Consolas on Windows.

use std::fmt;

/// A requested font family.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FamilyTag {
    SansSerif,
    Monospace,
}

/// Sans-serif substitutes, Latin first, then wide-coverage CJK families.
pub const SANS_SERIF_FAMILIES: &[&str] = &[
    "DejaVu Sans",
    "Noto Sans",
    "Liberation Sans",
    "Helvetica Neue",
    "Helvetica",
    "Arial",
    "Segoe UI",
    "Roboto",
    "Ubuntu",
    "Cantarell",
    "Noto Sans CJK JP",
    "Noto Sans CJK SC",
    "Noto Sans CJK TC",
    "Noto Sans CJK KR",
    "Microsoft YaHei",
    "Malgun Gothic",
    "Arial Unicode MS",
];

pub const MONOSPACE_FAMILIES: &[&str] = &[
    "DejaVu Sans Mono",
    "Noto Sans Mono",
    "Liberation Mono",
    "JetBrains Mono",
    "Fira Code",
    "Consolas",
    "Menlo",
    "Monaco",
    "Courier New",
    "Noto Sans Mono CJK JP",
    "MS Gothic",
];

impl FamilyTag {
    pub fn substitutes(&self) -> &'static [&'static str] {
        match self {
            FamilyTag::SansSerif => SANS_SERIF_FAMILIES,
            FamilyTag::Monospace => MONOSPACE_FAMILIES,
        }
    }

    /// Rank of an installed face within this family, `None` if it is not
    /// part of it. Lower ranks are preferred.
    pub(crate) fn rank(&self, face: &fontdb::FaceInfo) -> Option<usize> {
        let names = || face.families.iter().map(|(name, _)| name.as_str());

        let substitutes = self.substitutes();
        let listed = names()
            .filter_map(|name| {
                substitutes
                    .iter()
                    .position(|candidate| candidate.eq_ignore_ascii_case(name))
            })
            .min();
        if listed.is_some() {
            return listed;
        }

        // Unlisted faces that still clearly belong to the generic family
        let generic = match self {
            FamilyTag::Monospace => {
                face.monospaced || names().any(|n| n.contains("Mono") || n.contains("Code"))
            }
            FamilyTag::SansSerif => !face.monospaced && names().any(|n| n.contains("Sans")),
        };
        generic.then_some(substitutes.len())
    }
}

impl fmt::Display for FamilyTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FamilyTag::SansSerif => f.write_str("sans-serif"),
            FamilyTag::Monospace => f.write_str("monospace"),
        }
    }
}
