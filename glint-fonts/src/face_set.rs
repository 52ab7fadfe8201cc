//! Ordered face lists that grow on demand.
//!
//! A [`DynamicFaceSet`] starts with the theme fonts for one style. When a
//! character turns up that none of them can draw, the system fallback is
//! asked for a face covering it; a hit is appended so the next lookup of
//! that character is answered by the linear scan.

use std::sync::Arc;

use crate::face::Face;
use crate::system_index::{Aspect, FamilyTag, FontFallback};

/// Picks the face that should draw a character.
pub trait ResolveFace {
    fn resolve_face(&mut self, ch: char) -> Face;
}

/// A single face with no fallback.
#[derive(Debug, Clone)]
pub struct SingleFace(pub Face);

impl ResolveFace for SingleFace {
    fn resolve_face(&mut self, _ch: char) -> Face {
        Arc::clone(&self.0)
    }
}

/// Seed faces plus faces discovered through the fallback.
///
/// Never empty: the first seed is the answer of last resort.
pub struct DynamicFaceSet {
    faces: Vec<Face>,
    family: FamilyTag,
    aspect: Aspect,
    fallback: Arc<dyn FontFallback>,
}

impl DynamicFaceSet {
    pub fn new(
        primary: Face,
        family: FamilyTag,
        aspect: Aspect,
        fallback: Arc<dyn FontFallback>,
    ) -> Self {
        Self {
            faces: vec![primary],
            family,
            aspect,
            fallback,
        }
    }

    /// Append a face to the end of the search order. Duplicates are kept.
    pub fn add_face(&mut self, face: Face) {
        self.faces.push(face);
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn family(&self) -> &FamilyTag {
        &self.family
    }

    pub fn aspect(&self) -> Aspect {
        self.aspect
    }

    pub fn primary(&self) -> &Face {
        &self.faces[0]
    }
}

impl std::fmt::Debug for DynamicFaceSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.faces.iter().map(|face| face.name()).collect();
        f.debug_struct("DynamicFaceSet")
            .field("faces", &names)
            .field("family", &self.family)
            .field("aspect", &self.aspect)
            .finish()
    }
}

impl ResolveFace for DynamicFaceSet {
    fn resolve_face(&mut self, ch: char) -> Face {
        if let Some(face) = self.faces.iter().find(|face| face.has_glyph(ch)) {
            return Arc::clone(face);
        }

        match self
            .fallback
            .resolve_for_rune(&self.family, self.aspect, ch)
        {
            Some(face) => {
                self.faces.push(Arc::clone(&face));
                face
            }
            None => Arc::clone(&self.faces[0]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::{EmptyFace, FaceId, FaceMetrics, FontFace, same_face};
    use crate::system_index::{Slant, Weight};
    use parking_lot::Mutex;

    #[derive(Debug)]
    struct CharsFace {
        id: FaceId,
        chars: &'static str,
    }

    impl CharsFace {
        fn shared(chars: &'static str) -> Face {
            Arc::new(CharsFace {
                id: FaceId::next(),
                chars,
            })
        }
    }

    impl FontFace for CharsFace {
        fn id(&self) -> FaceId {
            self.id
        }

        fn name(&self) -> &str {
            self.chars
        }

        fn glyph_id(&self, ch: char) -> Option<u16> {
            self.chars.chars().position(|c| c == ch).map(|i| i as u16 + 1)
        }

        fn advance(&self, _glyph_id: u16) -> f32 {
            500.0
        }

        fn metrics(&self) -> FaceMetrics {
            EmptyFace::new().metrics()
        }
    }

    /// Answers rune queries from a fixed face and records them.
    struct RecordingFallback {
        face: Option<Face>,
        queries: Mutex<Vec<char>>,
        aspects: Mutex<Vec<Aspect>>,
    }

    impl RecordingFallback {
        fn new(face: Option<Face>) -> Arc<Self> {
            Arc::new(Self {
                face,
                queries: Mutex::new(Vec::new()),
                aspects: Mutex::new(Vec::new()),
            })
        }
    }

    impl FontFallback for RecordingFallback {
        fn resolve_for_language(&self, _: &FamilyTag, _: Aspect, _: &str) -> Option<Face> {
            None
        }

        fn resolve_for_rune(&self, _: &FamilyTag, aspect: Aspect, ch: char) -> Option<Face> {
            self.queries.lock().push(ch);
            self.aspects.lock().push(aspect);
            self.face.clone().filter(|face| face.has_glyph(ch))
        }
    }

    #[test]
    fn test_seed_faces_searched_in_order() {
        let latin = CharsFace::shared("abc");
        let greek = CharsFace::shared("αβγa");
        let fallback = RecordingFallback::new(None);
        let mut set = DynamicFaceSet::new(
            Arc::clone(&latin),
            FamilyTag::SansSerif,
            Aspect::default(),
            fallback.clone(),
        );
        set.add_face(Arc::clone(&greek));

        assert!(same_face(&set.resolve_face('a'), &latin));
        assert!(same_face(&set.resolve_face('β'), &greek));
        assert!(fallback.queries.lock().is_empty());
    }

    #[test]
    fn test_fallback_face_is_appended_once() {
        let seed = CharsFace::shared("abc");
        let cjk = CharsFace::shared("日本");
        let fallback = RecordingFallback::new(Some(Arc::clone(&cjk)));
        let mut set = DynamicFaceSet::new(
            seed,
            FamilyTag::SansSerif,
            Aspect::default(),
            fallback.clone(),
        );

        assert!(same_face(&set.resolve_face('日'), &cjk));
        assert!(same_face(&set.resolve_face('日'), &cjk));
        assert!(same_face(&set.resolve_face('本'), &cjk));
        assert_eq!(*fallback.queries.lock(), vec!['日']);
        assert_eq!(set.faces().len(), 2);
    }

    #[test]
    fn test_unresolvable_rune_returns_first_seed() {
        let seed = CharsFace::shared("abc");
        let fallback = RecordingFallback::new(None);
        let mut set = DynamicFaceSet::new(
            Arc::clone(&seed),
            FamilyTag::Monospace,
            Aspect::default(),
            fallback,
        );

        assert!(same_face(&set.resolve_face('☃'), &seed));
        assert_eq!(set.faces().len(), 1);
    }

    #[test]
    fn test_rune_query_carries_style_aspect() {
        let bold_italic = Aspect::new(Weight::BOLD, Slant::Italic);
        let fallback = RecordingFallback::new(None);
        let mut set = DynamicFaceSet::new(
            CharsFace::shared("a"),
            FamilyTag::Monospace,
            bold_italic,
            fallback.clone(),
        );

        set.resolve_face('ж');
        assert_eq!(*fallback.aspects.lock(), vec![bold_italic]);
    }

    #[test]
    fn test_add_face_keeps_duplicates() {
        let seed = CharsFace::shared("a");
        let mut set = DynamicFaceSet::new(
            Arc::clone(&seed),
            FamilyTag::SansSerif,
            Aspect::default(),
            RecordingFallback::new(None),
        );
        set.add_face(Arc::clone(&seed));
        assert_eq!(set.faces().len(), 2);
    }

    #[test]
    fn test_single_face_ignores_rune() {
        let face = CharsFace::shared("a");
        let mut single = SingleFace(Arc::clone(&face));
        assert!(same_face(&single.resolve_face('z'), &face));
    }
}
