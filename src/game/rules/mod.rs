//! Chess rules module - the rules-engine seam
//!
//! The controller never decides move legality itself. It talks to a
//! [`RulesEngine`], which owns the authoritative position, validates and
//! applies moves, reports termination conditions, supports undo and reset,
//! and serializes the position to FEN for the display widget and the search
//! engine.
//!
//! # Module Structure
//!
//! - `board_state` - [`ShakmatyRules`], the `shakmaty`-backed implementation
//!
//! # Ownership
//!
//! The position is owned exclusively by the rules engine. The controller only
//! mutates it through [`RulesEngine::apply_move`], [`RulesEngine::reset`],
//! [`RulesEngine::clear_board`] and [`RulesEngine::undo_last_move`].

pub mod board_state;

#[cfg(test)]
mod tests;

use crate::game::types::{MoveRequest, PieceCode, Side, Termination};
use shakmaty::Square;

pub use board_state::{ShakmatyRules, EMPTY_FEN, STARTING_FEN};

/// Why the rules engine refused a request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    /// Not a legal move for the side to move
    #[error("move {0} is not legal in the current position")]
    Illegal(String),

    /// The board was cleared; nothing can move
    #[error("no pieces on the board")]
    EmptyBoard,

    /// A position string that could not be loaded
    #[error("invalid position: {0}")]
    InvalidPosition(String),
}

/// A move the rules engine accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMove {
    /// Side that made the move
    pub side: Side,
    /// The move as played, promotion resolved
    pub request: MoveRequest,
    /// Standard algebraic notation, for logs
    pub san: String,
}

/// Interface consumed by the controller
///
/// Everything except the mutators is a pure query of the current position.
pub trait RulesEngine {
    /// Apply a move for the side to move
    ///
    /// The promotion role is ignored for moves that do not promote. Returns
    /// [`RulesError::Illegal`] (and leaves the position untouched) when the
    /// move is not legal.
    fn apply_move(&mut self, request: &MoveRequest) -> Result<AppliedMove, RulesError>;

    fn side_to_move(&self) -> Side;

    /// Piece standing on a square, if any
    fn piece_at(&self, square: Square) -> Option<PieceCode>;

    fn is_checkmate(&self) -> bool;

    /// Stalemate, insufficient material, fifty-move rule or threefold repetition
    fn is_draw(&self) -> bool;

    fn is_check(&self) -> bool;

    fn is_game_over(&self) -> bool {
        self.is_checkmate() || self.is_draw()
    }

    /// Serialize the position to FEN
    fn to_position_string(&self) -> String;

    /// Back to the standard starting arrangement, history cleared
    fn reset(&mut self);

    /// Remove every piece, history cleared
    fn clear_board(&mut self);

    /// Revert the most recent move; `false` when there is no history
    fn undo_last_move(&mut self) -> bool;

    /// Number of moves that can still be undone
    fn history_len(&self) -> usize;

    /// Derived termination status
    fn termination(&self) -> Termination {
        if self.is_checkmate() {
            Termination::Checkmate
        } else if self.is_draw() {
            Termination::Draw
        } else if self.is_check() {
            Termination::Check
        } else {
            Termination::InProgress
        }
    }
}
