//! `shakmaty`-backed rules engine
//!
//! [`ShakmatyRules`] keeps the current position plus a stack of every earlier
//! position in the game. The stack gives undo for free (pop and restore) and
//! doubles as the record for threefold-repetition detection.
//!
//! # Empty board
//!
//! `shakmaty` refuses positions without kings, so a cleared board is tracked
//! as its own state. It serializes to [`EMPTY_FEN`], reports the game as in
//! progress with no check, and rejects every move.

use super::{AppliedMove, RulesEngine, RulesError};
use crate::game::types::{MoveRequest, PieceCode, Side};
use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, EnPassantMode, Move, Position, Square};

/// Standard starting arrangement
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Board with no pieces, white to move
pub const EMPTY_FEN: &str = "8/8/8/8/8/8/8/8 w - - 0 1";

/// Half-move clock value at which the fifty-move rule draws the game
const FIFTY_MOVE_HALFMOVES: u32 = 100;

/// Occurrences of one position that make a threefold repetition
const REPETITION_LIMIT: usize = 3;

#[derive(Debug, Clone)]
enum BoardState {
    Standard(Chess),
    Empty,
}

/// Rules engine over `shakmaty::Chess`
#[derive(Debug, Clone)]
pub struct ShakmatyRules {
    board: BoardState,
    /// Positions before each applied move, oldest first
    history: Vec<Chess>,
}

impl Default for ShakmatyRules {
    fn default() -> Self {
        Self::new()
    }
}

impl ShakmatyRules {
    /// Rules engine at the standard starting position
    pub fn new() -> Self {
        Self {
            board: BoardState::Standard(Chess::default()),
            history: Vec::new(),
        }
    }

    /// Rules engine at an arbitrary position, with no history
    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        if fen.trim() == EMPTY_FEN {
            return Ok(Self {
                board: BoardState::Empty,
                history: Vec::new(),
            });
        }

        let parsed: Fen = fen
            .trim()
            .parse()
            .map_err(|e| RulesError::InvalidPosition(format!("{fen}: {e}")))?;
        let position: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| RulesError::InvalidPosition(format!("{fen}: {e}")))?;

        Ok(Self {
            board: BoardState::Standard(position),
            history: Vec::new(),
        })
    }

    fn position(&self) -> Option<&Chess> {
        match &self.board {
            BoardState::Standard(position) => Some(position),
            BoardState::Empty => None,
        }
    }

    fn is_threefold_repetition(&self) -> bool {
        let Some(current) = self.position() else {
            return false;
        };
        let key = repetition_key(current);
        let earlier = self
            .history
            .iter()
            .filter(|position| repetition_key(position) == key)
            .count();
        earlier + 1 >= REPETITION_LIMIT
    }
}

/// Serialize a position the way the widget and search engine expect
fn fen_of(position: &Chess) -> String {
    Fen::from_position(position.clone(), EnPassantMode::Legal).to_string()
}

/// Placement, side to move, castling rights and en-passant square
fn repetition_key(position: &Chess) -> String {
    fen_of(position)
        .split_whitespace()
        .take(4)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Find the legal move matching a request
///
/// Tries the plain move first so a promotion designator on an ordinary move
/// is ignored, then retries with the designator for pawn promotions.
/// Castling is accepted as the king's two-square move (`e1g1`).
fn resolve_move(position: &Chess, request: &MoveRequest) -> Option<Move> {
    let plain = UciMove::Normal {
        from: request.origin,
        to: request.destination,
        promotion: None,
    };
    if let Ok(chosen) = plain.to_move(position) {
        return Some(chosen);
    }

    let promotion = request.promotion?;
    UciMove::Normal {
        from: request.origin,
        to: request.destination,
        promotion: Some(promotion),
    }
    .to_move(position)
    .ok()
}

impl RulesEngine for ShakmatyRules {
    fn apply_move(&mut self, request: &MoveRequest) -> Result<AppliedMove, RulesError> {
        let position = match &self.board {
            BoardState::Standard(position) => position,
            BoardState::Empty => return Err(RulesError::EmptyBoard),
        };

        let chosen = resolve_move(position, request)
            .ok_or_else(|| RulesError::Illegal(request.to_string()))?;

        let applied = AppliedMove {
            side: position.turn().into(),
            request: MoveRequest {
                origin: request.origin,
                destination: request.destination,
                promotion: chosen.promotion(),
            },
            san: San::from_move(position, &chosen).to_string(),
        };

        let previous = position.clone();
        let mut next = previous.clone();
        next.play_unchecked(&chosen);

        self.history.push(previous);
        self.board = BoardState::Standard(next);
        Ok(applied)
    }

    fn side_to_move(&self) -> Side {
        self.position()
            .map(|position| position.turn().into())
            .unwrap_or(Side::White)
    }

    fn piece_at(&self, square: Square) -> Option<PieceCode> {
        self.position()?.board().piece_at(square).map(PieceCode::from)
    }

    fn is_checkmate(&self) -> bool {
        self.position().is_some_and(|position| position.is_checkmate())
    }

    fn is_draw(&self) -> bool {
        let Some(position) = self.position() else {
            return false;
        };
        position.is_stalemate()
            || position.is_insufficient_material()
            || position.halfmoves() >= FIFTY_MOVE_HALFMOVES
            || self.is_threefold_repetition()
    }

    fn is_check(&self) -> bool {
        self.position().is_some_and(|position| position.is_check())
    }

    fn to_position_string(&self) -> String {
        match &self.board {
            BoardState::Standard(position) => fen_of(position),
            BoardState::Empty => EMPTY_FEN.to_string(),
        }
    }

    fn reset(&mut self) {
        self.board = BoardState::Standard(Chess::default());
        self.history.clear();
    }

    fn clear_board(&mut self) {
        self.board = BoardState::Empty;
        self.history.clear();
    }

    fn undo_last_move(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.board = BoardState::Standard(previous);
                true
            }
            None => false,
        }
    }

    fn history_len(&self) -> usize {
        self.history.len()
    }
}
