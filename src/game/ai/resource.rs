//! AI difficulty settings
//!
//! Maps the externally configured difficulty level onto the search depth the
//! engine is asked for. The mapping is a fixed monotonic table:
//!
//! | Level | Difficulty | Search depth |
//! |-------|------------|--------------|
//! | 1     | Easy       | 5 ply        |
//! | 2     | Medium     | 10 ply       |
//! | other | Hard       | 15 ply       |
//!
//! Unknown or out-of-range levels fall back to the deepest tier, as does a
//! level string that does not parse as an integer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// AI difficulty levels corresponding to search depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AIDifficulty {
    /// Level 1, depth 5
    Easy,
    /// Level 2, depth 10
    Medium,
    /// Level 3 (and anything unrecognised), depth 15
    #[default]
    Hard,
}

impl AIDifficulty {
    /// Map an integer level from the difficulty selector
    pub fn from_level(level: i64) -> Self {
        match level {
            1 => AIDifficulty::Easy,
            2 => AIDifficulty::Medium,
            _ => AIDifficulty::Hard,
        }
    }

    /// Map raw selector text; anything unparseable is the deepest tier
    pub fn from_input(text: &str) -> Self {
        text.trim()
            .parse::<i64>()
            .map(Self::from_level)
            .unwrap_or(AIDifficulty::Hard)
    }

    /// Selector level for this difficulty
    pub fn level(self) -> i64 {
        match self {
            AIDifficulty::Easy => 1,
            AIDifficulty::Medium => 2,
            AIDifficulty::Hard => 3,
        }
    }

    /// Depth passed to `go depth <n>`
    pub fn search_depth(self) -> u8 {
        match self {
            AIDifficulty::Easy => 5,
            AIDifficulty::Medium => 10,
            AIDifficulty::Hard => 15,
        }
    }
}

impl fmt::Display for AIDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AIDifficulty::Easy => "easy",
            AIDifficulty::Medium => "medium",
            AIDifficulty::Hard => "hard",
        };
        write!(f, "{name} (depth {})", self.search_depth())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_level_mapping() {
        assert_eq!(AIDifficulty::from_level(1).search_depth(), 5);
        assert_eq!(AIDifficulty::from_level(2).search_depth(), 10);
        assert_eq!(AIDifficulty::from_level(3).search_depth(), 15);
    }

    #[test]
    fn test_unknown_levels_fall_back_to_deepest() {
        //! Out-of-range levels and junk input search deepest
        for level in [0, -1, 4, 99] {
            assert_eq!(AIDifficulty::from_level(level), AIDifficulty::Hard);
        }
        assert_eq!(AIDifficulty::from_input("abc"), AIDifficulty::Hard);
        assert_eq!(AIDifficulty::from_input(" 2 "), AIDifficulty::Medium);
    }

    #[test]
    fn test_depth_increases_with_difficulty() {
        let easy = AIDifficulty::Easy.search_depth();
        let medium = AIDifficulty::Medium.search_depth();
        let hard = AIDifficulty::Hard.search_depth();

        assert!(easy < medium);
        assert!(medium < hard);
    }

    #[test]
    fn test_level_round_trip() {
        for difficulty in [AIDifficulty::Easy, AIDifficulty::Medium, AIDifficulty::Hard] {
            assert_eq!(AIDifficulty::from_level(difficulty.level()), difficulty);
        }
    }
}
