//! Text subsystem configuration.
//!
//! Loaded from a YAML file; every field has a serde default so an empty
//! file is a valid configuration.
//!
//! ```yaml
//! fonts:
//!   regular: /usr/share/fonts/custom/Inter-Regular.ttf
//! default_fonts:
//!   regular: assets/fonts/NotoSans-Regular.ttf
//!   monospace: assets/fonts/DejaVuSansMono.ttf
//!   emoji: assets/fonts/NotoEmoji-Regular.ttf
//! bundled_fonts: true
//! system_fallback: true
//! font_dirs: [/opt/fonts]
//! language: ja
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::ConfigError;
use crate::locale::{FixedLocale, LocaleProvider, SystemLocale};
use crate::theme::{FontResource, FontSlot, FontTheme, ThemeFonts};

/// Font file paths per theme slot.
pub type FontPaths = HashMap<FontSlot, PathBuf>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Fonts chosen by the active theme.
    pub fonts: FontPaths,

    /// Fonts shipped with the application, used when the theme has none
    /// and as the second seed face of every style.
    pub default_fonts: FontPaths,

    /// Fall back to the embedded DejaVu fonts for slots with no configured
    /// font.
    #[serde(default = "defaults::bundled_fonts")]
    pub bundled_fonts: bool,

    /// Consult installed system fonts for glyphs the theme fonts lack.
    #[serde(default = "defaults::system_fallback")]
    pub system_fallback: bool,

    /// Extra directories scanned alongside the system font directories.
    pub font_dirs: Vec<PathBuf>,

    /// Language used for locale-aware font selection instead of the
    /// environment's locale.
    pub language: Option<String>,

    /// Maximum number of shaped runs kept by the shaper.
    #[serde(default = "defaults::shape_cache_size")]
    pub shape_cache_size: usize,

    #[serde(default = "defaults::ligatures")]
    pub ligatures: bool,

    #[serde(default = "defaults::kerning")]
    pub kerning: bool,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            fonts: FontPaths::new(),
            default_fonts: FontPaths::new(),
            bundled_fonts: defaults::bundled_fonts(),
            system_fallback: defaults::system_fallback(),
            font_dirs: Vec::new(),
            language: None,
            shape_cache_size: defaults::shape_cache_size(),
            ligatures: defaults::ligatures(),
            kerning: defaults::kerning(),
        }
    }
}

impl TextConfig {
    /// Default location: `<config dir>/glint/text.yaml`.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("glint").join("text.yaml"))
    }

    /// Load from the default location, or defaults when no file exists.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                log::info!("No text config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        log::info!("Loading text config from {:?}", path);
        let contents = std::fs::read_to_string(path).map_err(ConfigError::from)?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        let config: TextConfig = serde_yaml_ng::from_str(contents).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.shape_cache_size == 0 {
            return Err(ConfigError::Validation(
                "shape_cache_size must be at least 1".to_string(),
            ));
        }
        if let Some(lang) = &self.language
            && lang.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "language must not be empty when set".to_string(),
            ));
        }
        Ok(())
    }

    /// Read every configured font file into a theme.
    ///
    /// Relative paths are resolved against `base_dir` when given.
    pub fn theme_fonts(&self, base_dir: Option<&Path>) -> Result<ThemeFonts, ConfigError> {
        let mut fonts = if self.bundled_fonts {
            ThemeFonts::new()
        } else {
            ThemeFonts::without_bundled_fonts()
        };
        for (slot, path) in &self.fonts {
            fonts.set_font(*slot, read_font(*slot, path, base_dir)?);
        }
        for (slot, path) in &self.default_fonts {
            fonts.set_default_font(*slot, read_font(*slot, path, base_dir)?);
        }
        if fonts.default_font(FontSlot::Regular).is_none() {
            log::warn!("No default regular font configured; unstyled text relies on theme fonts");
        } else if !self.default_fonts.contains_key(&FontSlot::Regular) && self.bundled_fonts {
            log::debug!("No default regular font configured, using bundled DejaVu Sans");
        }
        Ok(fonts)
    }

    /// The configured language override, or the environment's locale.
    pub fn locale(&self) -> Arc<dyn LocaleProvider> {
        match &self.language {
            Some(lang) => Arc::new(FixedLocale::new(lang)),
            None => Arc::new(SystemLocale),
        }
    }
}

fn read_font(
    slot: FontSlot,
    path: &Path,
    base_dir: Option<&Path>,
) -> Result<FontResource, ConfigError> {
    let resolved = match base_dir {
        Some(base) if path.is_relative() => base.join(path),
        _ => path.to_path_buf(),
    };
    FontResource::from_path(&resolved).map_err(|source| ConfigError::FontFile {
        slot,
        path: resolved,
        source,
    })
}
