//! Loading configuration from files on disk.

use choirconf::{ChoirConfig, ConfigError};
use std::fs;

#[test]
fn test_cli_path_is_loaded_and_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("choir.toml");
    fs::write(
        &path,
        r#"
[backend]
model = "from-cli-file"

[defaults]
tempo = 66
"#,
    )
    .unwrap();

    let (config, sources) = ChoirConfig::load_with_sources_from(Some(&path)).unwrap();

    assert_eq!(config.backend.model, "from-cli-file");
    assert_eq!(config.defaults.tempo, 66);
    assert_eq!(config.defaults.style, "traditional");
    assert!(sources.files.contains(&path));
}

#[test]
fn test_broken_file_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[defaults]\ntempo = \"fast\"\n").unwrap();

    let err = ChoirConfig::load_from(Some(&path)).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "got {err:?}");
}

#[test]
fn test_missing_cli_path_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.toml");

    let (_config, sources) = ChoirConfig::load_with_sources_from(Some(&path)).unwrap();
    assert!(!sources.files.contains(&path));
}
