//! Integration tests for loading text configuration from disk.

use std::fs;

use glint_config::{ConfigError, FontSlot, FontTheme, TextConfig};
use tempfile::TempDir;

#[test]
fn test_load_from_file_and_read_fonts() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("regular.ttf"), b"regular-bytes").unwrap();
    fs::write(tmp.path().join("mono.ttf"), b"mono-bytes").unwrap();

    let config_path = tmp.path().join("text.yaml");
    fs::write(
        &config_path,
        "default_fonts:\n  regular: regular.ttf\n  monospace: mono.ttf\nsystem_fallback: false\n",
    )
    .unwrap();

    let config = TextConfig::load_from(&config_path).unwrap();
    assert!(!config.system_fallback);

    let fonts = config.theme_fonts(Some(tmp.path())).unwrap();
    let mono = fonts.font(FontSlot::Monospace).unwrap();
    assert_eq!(mono.name(), "mono.ttf");
    assert_eq!(mono.content(), b"mono-bytes");

    // Bold has no entry of its own and resolves to the regular default
    assert_eq!(fonts.font(FontSlot::Bold).unwrap().content(), b"regular-bytes");
}

#[test]
fn test_missing_font_file_reports_slot() {
    let tmp = TempDir::new().unwrap();
    let config = TextConfig::from_yaml("fonts:\n  symbol: missing.ttf\n").unwrap();

    let err = config.theme_fonts(Some(tmp.path())).unwrap_err();
    match err {
        ConfigError::FontFile { slot, path, .. } => {
            assert_eq!(slot, FontSlot::Symbol);
            assert!(path.ends_with("missing.ttf"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_invalid_yaml_is_parse_error() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("text.yaml");
    fs::write(&config_path, "system_fallback: [not, a, bool]").unwrap();

    let err = TextConfig::load_from(&config_path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::Parse(_))
    ));
}

#[test]
fn test_missing_config_file_is_io_error() {
    let tmp = TempDir::new().unwrap();
    let err = TextConfig::load_from(&tmp.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::Io(_))
    ));
}
