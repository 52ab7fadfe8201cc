//! Typed error variants for the glint-config crate.
//!
//! Config loading returns `anyhow::Result` at the outer boundary; the
//! variants here can be recovered with `downcast_ref::<ConfigError>()` by
//! callers that want to match on a specific failure.
//!
//! # Example
//!
//! ```rust,no_run
//! use glint_config::ConfigError;
//!
//! fn check_load_err(e: &anyhow::Error) {
//!     if let Some(cfg_err) = e.downcast_ref::<ConfigError>() {
//!         match cfg_err {
//!             ConfigError::Io(io) => eprintln!("I/O error: {io}"),
//!             ConfigError::Parse(p) => eprintln!("YAML parse error: {p}"),
//!             ConfigError::FontFile { slot, .. } => eprintln!("bad {slot} font"),
//!             ConfigError::Validation(msg) => eprintln!("Validation: {msg}"),
//!         }
//!     }
//! }
//! ```

use std::path::PathBuf;

use thiserror::Error;

use crate::theme::FontSlot;

/// Errors that can occur when loading text configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading the config file.
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file contained invalid YAML.
    #[error("YAML parse error in config: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// A font file named by the config could not be read.
    #[error("Failed to read {slot} font from '{}': {source}", path.display())]
    FontFile {
        /// Theme slot the font was configured for.
        slot: FontSlot,
        /// Path that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A field value failed semantic validation.
    ///
    /// The inner string describes which field is invalid and why.
    #[error("Config validation error: {0}")]
    Validation(String),
}
