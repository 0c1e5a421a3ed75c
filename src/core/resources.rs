//! Core resources for session-wide configuration
//!
//! [`GameSettings`] is persisted as JSON (see
//! [`crate::core::settings_persistence`]) and can be overridden from the
//! command line before the session starts.

use crate::game::ai::AIDifficulty;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Highest value the UCI `Skill Level` option accepts
pub const MAX_SKILL_LEVEL: u8 = 20;

/// User preferences for a game session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// UCI engine binary, looked up on `PATH` when not absolute
    pub engine_path: PathBuf,

    /// Engine `Skill Level` option (0 to 20)
    pub skill_level: u8,

    /// Difficulty selector level (1 easy, 2 medium, anything else hard)
    pub difficulty: i64,

    /// Pause between an accepted human move and the search request
    pub think_delay_ms: u64,

    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            engine_path: PathBuf::from("stockfish"),
            skill_level: MAX_SKILL_LEVEL,
            difficulty: AIDifficulty::Hard.level(),
            think_delay_ms: 250,
            log_filter: "info".to_string(),
        }
    }
}

impl GameSettings {
    /// Clamp values the engine would reject
    pub fn sanitized(mut self) -> Self {
        self.skill_level = self.skill_level.min(MAX_SKILL_LEVEL);
        self
    }

    pub fn difficulty(&self) -> AIDifficulty {
        AIDifficulty::from_level(self.difficulty)
    }

    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.think_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = GameSettings::default();
        assert_eq!(settings.skill_level, 20);
        assert_eq!(settings.difficulty(), AIDifficulty::Hard);
        assert_eq!(settings.think_delay(), Duration::from_millis(250));
    }

    #[test]
    fn test_sanitized_clamps_skill_level() {
        let settings = GameSettings {
            skill_level: 42,
            ..GameSettings::default()
        }
        .sanitized();
        assert_eq!(settings.skill_level, MAX_SKILL_LEVEL);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        //! Missing fields fall back to their defaults
        let settings: GameSettings = serde_json::from_str(r#"{ "difficulty": 1 }"#).unwrap();
        assert_eq!(settings.difficulty(), AIDifficulty::Easy);
        assert_eq!(settings.engine_path, PathBuf::from("stockfish"));
    }
}
