//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use crate::schema::{ColorMerge, DEFAULT_OVERLAY_TIMEOUT_MS};
use std::path::Path;
use webterm_common::ConfigError;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_webterm_config.toml"));
    assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r##"
[overlay]
timeout_ms = 500

[terminal.initial_preferences]
foreground-color = "#ff0000"
"##,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.overlay.timeout_ms, 500);
    assert_eq!(
        config.terminal.initial_preferences["foreground-color"],
        "#ff0000"
    );
    // Defaults preserved
    assert_eq!(config.overlay.class_name, "xterm-overlay");
    assert_eq!(config.preferences.color_merge, ColorMerge::Replace);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let result = load_from_path(&path);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn load_config_with_invalid_values_falls_back_to_default() {
    let config = load_from_str(
        r#"
[overlay]
timeout_ms = 100000
"#,
    )
    .unwrap();
    assert_eq!(config.overlay.timeout_ms, DEFAULT_OVERLAY_TIMEOUT_MS);
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("webterm").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.overlay.timeout_ms, DEFAULT_OVERLAY_TIMEOUT_MS);
    assert!(config.terminal.initial_preferences.is_empty());
}

#[test]
fn default_config_toml_is_valid() {
    use super::template::default_config_toml;
    use crate::schema::WebtermConfig;

    let config: WebtermConfig = toml::from_str(default_config_toml()).unwrap();
    assert!(config.terminal.web_links);
}

#[test]
fn default_config_path_is_reasonable() {
    if let Ok(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("webterm"));
        assert!(path_str.ends_with("config.toml"));
    }
}
