//! Status derivation for the status readout
//!
//! Turns the current position into the one line of text the user sees under
//! the board. The status is never stored: it is recomputed from the rules
//! engine after every transition, so it cannot drift from the position.
//!
//! # Messages
//!
//! | Position                 | Text                                      |
//! |--------------------------|-------------------------------------------|
//! | Checkmate                | `Game over, black wins by checkmate`      |
//! | Draw                     | `Game over, drawn position`               |
//! | Check                    | `White to move, White is in check`        |
//! | Otherwise                | `White to move`                           |
//!
//! The winner on checkmate is the side NOT to move.

use crate::game::rules::RulesEngine;
use crate::game::types::{Side, Termination};
use std::fmt;

/// Shown while a computer turn is scheduled or searching
pub const THINKING_STATUS: &str = "AI is thinking...";

/// Status derived from a position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Game continues; `in_check` adds the check clause
    ToMove { side: Side, in_check: bool },
    /// The side to move is mated
    Checkmate { winner: Side },
    /// Stalemate, insufficient material, fifty-move rule or repetition
    Draw,
}

impl GameStatus {
    /// Derive the status of the rules engine's current position
    pub fn from_rules<R: RulesEngine + ?Sized>(rules: &R) -> Self {
        let side = rules.side_to_move();
        match rules.termination() {
            Termination::Checkmate => GameStatus::Checkmate {
                winner: side.opposite(),
            },
            Termination::Draw => GameStatus::Draw,
            Termination::Check => GameStatus::ToMove {
                side,
                in_check: true,
            },
            Termination::InProgress => GameStatus::ToMove {
                side,
                in_check: false,
            },
        }
    }

    /// Whether the game has ended
    pub fn is_game_over(&self) -> bool {
        !matches!(self, GameStatus::ToMove { .. })
    }

    /// Winner, for checkmates only
    pub fn winner(&self) -> Option<Side> {
        match self {
            GameStatus::Checkmate { winner } => Some(*winner),
            _ => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Checkmate { winner } => {
                write!(f, "Game over, {} wins by checkmate", winner.lowercase_name())
            }
            GameStatus::Draw => f.write_str("Game over, drawn position"),
            GameStatus::ToMove { side, in_check } => {
                write!(f, "{side} to move")?;
                if *in_check {
                    write!(f, ", {side} is in check")?;
                }
                Ok(())
            }
        }
    }
}

/// Status text for the current position
pub fn derive_status<R: RulesEngine + ?Sized>(rules: &R) -> String {
    GameStatus::from_rules(rules).to_string()
}
