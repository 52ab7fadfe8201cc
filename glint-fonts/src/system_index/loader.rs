//! Loading the font database and turning its entries into faces.

use std::path::PathBuf;
use std::sync::Arc;

use fontdb::{Database, ID};

use crate::error::{FontError, Result};
use crate::face::{Face, FontData};

/// Scan the platform font directories plus `extra_dirs`.
///
/// # Errors
/// Returns `NoSystemFonts` when nothing usable was found, and `FontLoad`
/// when an extra directory cannot be read.
pub fn load_system_fonts(db: &mut Database, extra_dirs: &[PathBuf]) -> Result<()> {
    db.load_system_fonts();

    for dir in extra_dirs {
        if let Err(source) = std::fs::read_dir(dir) {
            return Err(FontError::FontLoad {
                path: dir.clone(),
                source,
            });
        }
        log::debug!("Scanning extra font directory {:?}", dir);
        db.load_fonts_dir(dir);
    }

    if db.is_empty() {
        return Err(FontError::NoSystemFonts);
    }
    Ok(())
}

/// Load one face from the database.
///
/// Uses `with_face_data`, which copies the bytes out of the (possibly memory
/// mapped) source, so the face stays valid independent of the database.
pub fn load_face_from_db(db: &Database, id: ID) -> Option<Face> {
    let name = db
        .face(id)
        .and_then(|info| info.families.first().map(|(name, _)| name.clone()))
        .unwrap_or_else(|| "system font".to_string());

    let result = db.with_face_data(id, |data, index| {
        FontData::new_with_index(name.clone(), data.to_vec(), index)
    })?;

    match result {
        Ok(font) => Some(Arc::new(font)),
        Err(e) => {
            log::warn!("Skipping unreadable system font: {e}");
            None
        }
    }
}

/// Whether the face `id` has a glyph for `ch`, without keeping it loaded.
pub fn face_covers(db: &Database, id: ID, ch: char) -> bool {
    db.with_face_data(id, |data, index| {
        swash::FontRef::from_index(data, index as usize)
            .map(|font| font.charmap().map(ch) != 0)
            .unwrap_or(false)
    })
    .unwrap_or(false)
}
