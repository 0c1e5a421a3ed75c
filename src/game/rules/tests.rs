//! Test suite for the shakmaty-backed rules engine
//!
//! Covers the operations the controller depends on: move application and
//! rejection, promotion defaulting, castling in king-move notation, undo,
//! reset/clear round-trips, and every termination condition.
//!
//! # Test Organization
//!
//! - `test_apply_*` - move application and rejection
//! - `test_undo_*` / `test_reset_*` / `test_clear_*` - lifecycle
//! - `test_termination_*` - checkmate, check and the draw rules

use super::*;
use crate::game::types::{parse_square, MoveRequest, Side, Termination};
use shakmaty::Role;

/// Helper to build a move request from coordinate notation ("e2e4")
fn request(text: &str) -> MoveRequest {
    MoveRequest::new(parse_square(&text[0..2]).unwrap(), parse_square(&text[2..4]).unwrap())
}

/// Helper to play a sequence of moves, panicking on the first illegal one
fn play_all(rules: &mut ShakmatyRules, moves: &[&str]) {
    for text in moves {
        rules
            .apply_move(&request(text).promoting_to_queen())
            .unwrap_or_else(|e| panic!("{text} should be legal: {e}"));
    }
}

#[test]
fn test_apply_legal_move_switches_side() {
    let mut rules = ShakmatyRules::new();
    assert_eq!(rules.side_to_move(), Side::White);

    let applied = rules.apply_move(&request("e2e4")).unwrap();
    assert_eq!(applied.side, Side::White);
    assert_eq!(applied.san, "e4");
    assert_eq!(rules.side_to_move(), Side::Black);
    assert_eq!(
        rules.to_position_string(),
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
    );
}

#[test]
fn test_apply_illegal_move_leaves_position_untouched() {
    //! Rejections must not mutate the position or the history
    let mut rules = ShakmatyRules::new();
    let before = rules.to_position_string();

    assert_eq!(
        rules.apply_move(&request("e2e5")),
        Err(RulesError::Illegal("e2e5".to_string()))
    );
    // Black piece while white is to move
    assert!(rules.apply_move(&request("e7e5")).is_err());

    assert_eq!(rules.to_position_string(), before);
    assert_eq!(rules.history_len(), 0);
}

#[test]
fn test_apply_ignores_promotion_on_ordinary_move() {
    //! The controller always sends a queen designator; ordinary moves ignore it
    let mut rules = ShakmatyRules::new();
    let applied = rules.apply_move(&request("g1f3").promoting_to_queen()).unwrap();
    assert_eq!(applied.request.promotion, None);
}

#[test]
fn test_apply_promotion_requires_designator() {
    //! A pawn reaching the last rank needs a promotion role
    let mut rules = ShakmatyRules::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").unwrap();

    assert!(rules.apply_move(&request("e7e8")).is_err());

    let applied = rules.apply_move(&request("e7e8").promoting_to_queen()).unwrap();
    assert_eq!(applied.request.promotion, Some(Role::Queen));
    assert_eq!(rules.piece_at(Square::E8).map(|p| p.role), Some(Role::Queen));
}

#[test]
fn test_apply_castling_as_king_move() {
    //! Widget drops for castling name the king's destination square
    let mut rules = ShakmatyRules::new();
    play_all(&mut rules, &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6"]);

    rules.apply_move(&request("e1g1")).unwrap();
    assert_eq!(rules.piece_at(Square::G1).map(|p| p.role), Some(Role::King));
    assert_eq!(rules.piece_at(Square::F1).map(|p| p.role), Some(Role::Rook));
}

#[test]
fn test_undo_restores_previous_position() {
    let mut rules = ShakmatyRules::new();
    play_all(&mut rules, &["e2e4", "e7e5"]);
    assert_eq!(rules.history_len(), 2);

    assert!(rules.undo_last_move());
    assert_eq!(rules.side_to_move(), Side::Black);
    assert!(rules.undo_last_move());
    assert_eq!(rules.to_position_string(), STARTING_FEN);
}

#[test]
fn test_undo_with_no_history_is_noop() {
    let mut rules = ShakmatyRules::new();
    assert!(!rules.undo_last_move());
    assert_eq!(rules.to_position_string(), STARTING_FEN);
}

#[test]
fn test_reset_returns_to_starting_fen() {
    let mut rules = ShakmatyRules::new();
    play_all(&mut rules, &["d2d4", "d7d5"]);

    rules.reset();
    assert_eq!(rules.to_position_string(), STARTING_FEN);
    assert_eq!(rules.history_len(), 0);
}

#[test]
fn test_clear_produces_empty_board() {
    //! Clear empties the board; status queries must still work
    let mut rules = ShakmatyRules::new();
    play_all(&mut rules, &["e2e4"]);

    rules.clear_board();
    assert_eq!(rules.to_position_string(), EMPTY_FEN);
    assert_eq!(rules.termination(), Termination::InProgress);
    assert_eq!(rules.side_to_move(), Side::White);
    assert!(!rules.is_game_over());
    assert_eq!(rules.piece_at(Square::E4), None);
    assert_eq!(rules.apply_move(&request("e2e4")), Err(RulesError::EmptyBoard));
    assert!(!rules.undo_last_move());
}

#[test]
fn test_from_fen_rejects_garbage() {
    assert!(matches!(
        ShakmatyRules::from_fen("not a position"),
        Err(RulesError::InvalidPosition(_))
    ));
    assert_eq!(
        ShakmatyRules::from_fen(EMPTY_FEN).unwrap().to_position_string(),
        EMPTY_FEN
    );
}

#[test]
fn test_termination_checkmate() {
    //! Fool's mate: white is mated
    let mut rules = ShakmatyRules::new();
    play_all(&mut rules, &["f2f3", "e7e5", "g2g4", "d8h4"]);

    assert!(rules.is_checkmate());
    assert!(rules.is_game_over());
    assert_eq!(rules.side_to_move(), Side::White);
    assert_eq!(rules.termination(), Termination::Checkmate);
}

#[test]
fn test_termination_check() {
    let mut rules = ShakmatyRules::new();
    play_all(&mut rules, &["e2e4", "f7f6", "d1h5"]);

    assert!(rules.is_check());
    assert!(!rules.is_game_over());
    assert_eq!(rules.termination(), Termination::Check);
}

#[test]
fn test_termination_stalemate() {
    let rules = ShakmatyRules::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(rules.is_draw());
    assert!(!rules.is_checkmate());
    assert_eq!(rules.termination(), Termination::Draw);
}

#[test]
fn test_termination_insufficient_material() {
    let rules = ShakmatyRules::from_fen("8/8/8/4k3/8/8/8/4K3 w - - 0 1").unwrap();
    assert!(rules.is_draw());
}

#[test]
fn test_termination_fifty_move_rule() {
    let rules = ShakmatyRules::from_fen("8/8/8/4k3/8/8/8/R3K3 w - - 100 80").unwrap();
    assert!(rules.is_draw());

    let rules = ShakmatyRules::from_fen("8/8/8/4k3/8/8/8/R3K3 w - - 99 80").unwrap();
    assert!(!rules.is_draw());
}

#[test]
fn test_termination_threefold_repetition() {
    //! Shuffling knights back home twice repeats the start position three times
    let mut rules = ShakmatyRules::new();
    play_all(&mut rules, &["g1f3", "g8f6", "f3g1", "f6g8"]);
    assert!(!rules.is_draw(), "two occurrences are not yet a draw");

    play_all(&mut rules, &["g1f3", "g8f6", "f3g1", "f6g8"]);
    assert!(rules.is_draw());

    // Undo takes the position out of the repetition again
    assert!(rules.undo_last_move());
    assert!(!rules.is_draw());
}
