//! Tests for loading the TOML config.

use noughts::Config;
use noughts_core::Mode;
use std::path::PathBuf;
use std::time::Duration;

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = Config::load_or_default(dir.path().join("absent.toml")).expect("defaults");
    assert_eq!(config, Config::default());
}

#[test]
fn test_file_overrides() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("noughts.toml");
    std::fs::write(
        &path,
        r#"
save_path = "games/session.json"
default_mode = "AI"
ai_delay_ms = 0
"#,
    )
    .expect("write succeeds");

    let config = Config::from_file(&path).expect("config parses");
    assert_eq!(config.save_path(), &PathBuf::from("games/session.json"));
    assert_eq!(*config.default_mode(), Mode::HumanVsAi);
    assert_eq!(config.ai_delay(), Duration::ZERO);
    assert_eq!(*config.auto_reset_ms(), 2500);
}

#[test]
fn test_bad_toml_is_error() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("noughts.toml");
    std::fs::write(&path, "ai_delay_ms = \"soon\"").expect("write succeeds");

    let err = Config::from_file(&path).expect_err("type mismatch");
    assert!(err.message.contains("Failed to parse config"));
}
