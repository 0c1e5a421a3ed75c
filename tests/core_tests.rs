//! Integration tests for settings persistence
//!
//! Exercises the JSON settings file against a real filesystem, in a scratch
//! directory under the system temp dir.

use boardside::core::settings_persistence::{load_settings_from, save_settings_to, SettingsSource};
use boardside::core::GameSettings;
use boardside::game::ai::AIDifficulty;
use std::fs;
use std::path::PathBuf;

/// Fresh scratch directory for one test
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("boardside-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn test_settings_round_trip() {
    //! Saved settings load back unchanged, and saving creates the directory

    let dir = scratch_dir("round-trip");
    let path = dir.join("nested").join("settings.json");
    let settings = GameSettings {
        engine_path: PathBuf::from("/opt/engines/stockfish"),
        skill_level: 7,
        difficulty: 2,
        think_delay_ms: 0,
        log_filter: "debug".to_string(),
    };

    save_settings_to(&path, &settings).unwrap();
    let loaded = load_settings_from(&path);

    assert_eq!(loaded.source, SettingsSource::File(path.clone()));
    assert!(!loaded.source.is_fallback());
    let loaded = loaded.settings;
    assert_eq!(loaded, settings);
    assert_eq!(loaded.difficulty(), AIDifficulty::Medium);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = scratch_dir("missing");

    let path = dir.join("settings.json");
    let loaded = load_settings_from(&path);

    assert_eq!(loaded.settings, GameSettings::default());
    assert_eq!(loaded.source, SettingsSource::Missing(path));
    assert!(!loaded.source.is_fallback());
}

#[test]
fn test_malformed_file_uses_defaults() {
    //! A corrupt file must never stop the game from starting

    let dir = scratch_dir("malformed");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("settings.json");
    fs::write(&path, "{ not json").unwrap();

    let loaded = load_settings_from(&path);

    assert_eq!(loaded.settings, GameSettings::default());
    assert!(
        matches!(&loaded.source, SettingsSource::Malformed { path: p, .. } if *p == path),
        "unexpected source {:?}",
        loaded.source
    );
    // This is the line logged at warn level once logging is up
    assert!(loaded.source.is_fallback());
    let warning = loaded.source.to_string();
    assert!(warning.starts_with("Failed to parse settings file"));
    assert!(warning.ends_with("Using defaults."));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_loaded_skill_level_is_clamped() {
    let dir = scratch_dir("clamp");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("settings.json");
    fs::write(&path, r#"{ "skill_level": 99 }"#).unwrap();

    let loaded = load_settings_from(&path);

    assert_eq!(loaded.settings.skill_level, 20);
    let _ = fs::remove_dir_all(&dir);
}
