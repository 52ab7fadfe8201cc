//! Typed errors for font loading and system font discovery.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FontError {
    /// The bytes are not a TTF/OTF/TTC font, or the face index is out of range.
    #[error("Invalid font data for '{name}'")]
    InvalidFontData {
        /// Resource or file name of the rejected font.
        name: String,
    },

    /// A font directory or file could not be read.
    #[error("Failed to read fonts from '{}': {source}", path.display())]
    FontLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Scanning the system font directories found nothing usable.
    #[error("No system fonts found")]
    NoSystemFonts,

    /// System font fallback was turned off in configuration.
    #[error("System font fallback is disabled")]
    SystemFontsDisabled,
}

pub type Result<T> = std::result::Result<T, FontError>;
