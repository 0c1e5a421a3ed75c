//! UCI line protocol
//!
//! Outbound [`Directive`]s render to the text lines a UCI engine reads on
//! stdin. Inbound lines parse into an [`EngineMessage`] so the controller can
//! dispatch with a plain `match` instead of pattern extraction.
//!
//! Only `bestmove` matters to the controller. Everything else the engine says
//! (`info` search progress, `id` banners, acknowledgements) is diagnostic.

use crate::game::types::parse_square;
use shakmaty::Square;
use std::fmt;

/// Text directive sent to the search engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Switch the engine into UCI mode
    Uci,
    /// Synchronisation ping, answered by `readyok`
    IsReady,
    /// Next search belongs to a different game
    NewGame,
    /// `setoption name <name> value <value>`
    SetOption { name: String, value: String },
    /// `position fen <fen>`
    Position { fen: String },
    /// `go depth <n>`
    GoDepth(u8),
    /// Finish the running search now
    Stop,
    /// Shut the engine down
    Quit,
}

impl Directive {
    pub fn set_option(name: impl Into<String>, value: impl ToString) -> Self {
        Directive::SetOption {
            name: name.into(),
            value: value.to_string(),
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::Uci => f.write_str("uci"),
            Directive::IsReady => f.write_str("isready"),
            Directive::NewGame => f.write_str("ucinewgame"),
            Directive::SetOption { name, value } => {
                write!(f, "setoption name {name} value {value}")
            }
            Directive::Position { fen } => write!(f, "position fen {fen}"),
            Directive::GoDepth(depth) => write!(f, "go depth {depth}"),
            Directive::Stop => f.write_str("stop"),
            Directive::Quit => f.write_str("quit"),
        }
    }
}

/// A line received from the search engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineMessage {
    /// `bestmove <origin><destination>[<promotion>]`
    ///
    /// `promotion` is set when the move carries any promotion letter; the
    /// controller always promotes to a queen.
    BestMove {
        origin: Square,
        destination: Square,
        promotion: bool,
    },
    /// `bestmove (none)` or `bestmove 0000`: no legal move
    NoMove,
    /// `uciok`
    UciOk,
    /// `readyok`
    ReadyOk,
    /// `id name ...` / `id author ...`
    Id { key: String, value: String },
    /// `info ...` search progress
    Info(String),
    /// Anything else
    Unknown(String),
}

impl EngineMessage {
    /// Parse one line of engine output
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let mut tokens = line.split_whitespace();

        match tokens.next() {
            Some("bestmove") => match tokens.next() {
                Some("(none)") | Some("0000") => EngineMessage::NoMove,
                Some(text) => {
                    parse_best_move(text).unwrap_or_else(|| EngineMessage::Unknown(line.to_string()))
                }
                None => EngineMessage::Unknown(line.to_string()),
            },
            Some("uciok") => EngineMessage::UciOk,
            Some("readyok") => EngineMessage::ReadyOk,
            Some("id") => {
                let key = tokens.next().unwrap_or_default().to_string();
                let value = tokens.collect::<Vec<_>>().join(" ");
                EngineMessage::Id { key, value }
            }
            Some("info") => EngineMessage::Info(line.to_string()),
            _ => EngineMessage::Unknown(line.to_string()),
        }
    }
}

/// Coordinate move text: four square characters plus an optional role letter
fn parse_best_move(text: &str) -> Option<EngineMessage> {
    if !text.is_ascii() {
        return None;
    }
    let promotion = match text.len() {
        4 => false,
        5 => matches!(text.as_bytes()[4], b'q' | b'r' | b'b' | b'n'),
        _ => return None,
    };
    if text.len() == 5 && !promotion {
        return None;
    }

    let origin = parse_square(&text[0..2]).ok()?;
    let destination = parse_square(&text[2..4]).ok()?;
    Some(EngineMessage::BestMove {
        origin,
        destination,
        promotion,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_rendering() {
        assert_eq!(Directive::Uci.to_string(), "uci");
        assert_eq!(
            Directive::set_option("Skill Level", 20).to_string(),
            "setoption name Skill Level value 20"
        );
        assert_eq!(
            Directive::Position {
                fen: "8/8/8/8/8/8/8/8 w - - 0 1".into()
            }
            .to_string(),
            "position fen 8/8/8/8/8/8/8/8 w - - 0 1"
        );
        assert_eq!(Directive::GoDepth(10).to_string(), "go depth 10");
        assert_eq!(Directive::NewGame.to_string(), "ucinewgame");
    }

    #[test]
    fn test_parse_best_move() {
        assert_eq!(
            EngineMessage::parse("bestmove e7e5"),
            EngineMessage::BestMove {
                origin: Square::E7,
                destination: Square::E5,
                promotion: false,
            }
        );
    }

    #[test]
    fn test_parse_best_move_with_ponder() {
        //! The ponder suggestion is ignored
        assert_eq!(
            EngineMessage::parse("bestmove g8f6 ponder e4e5\n"),
            EngineMessage::BestMove {
                origin: Square::G8,
                destination: Square::F6,
                promotion: false,
            }
        );
    }

    #[test]
    fn test_parse_promotion_marks() {
        //! Any promotion letter marks a promotion
        for text in ["bestmove a2a1q", "bestmove a2a1n"] {
            assert_eq!(
                EngineMessage::parse(text),
                EngineMessage::BestMove {
                    origin: Square::A2,
                    destination: Square::A1,
                    promotion: true,
                }
            );
        }
    }

    #[test]
    fn test_parse_no_move() {
        assert_eq!(EngineMessage::parse("bestmove (none)"), EngineMessage::NoMove);
        assert_eq!(EngineMessage::parse("bestmove 0000"), EngineMessage::NoMove);
    }

    #[test]
    fn test_parse_noise() {
        //! Diagnostic lines never look like a best move
        assert_eq!(EngineMessage::parse("uciok"), EngineMessage::UciOk);
        assert_eq!(EngineMessage::parse("readyok"), EngineMessage::ReadyOk);
        assert_eq!(
            EngineMessage::parse("id name Stockfish 16"),
            EngineMessage::Id {
                key: "name".into(),
                value: "Stockfish 16".into()
            }
        );
        assert!(matches!(
            EngineMessage::parse("info depth 12 score cp 31 pv e2e4"),
            EngineMessage::Info(_)
        ));
        assert!(matches!(
            EngineMessage::parse("Stockfish 16 by the Stockfish developers"),
            EngineMessage::Unknown(_)
        ));
    }

    #[test]
    fn test_parse_malformed_best_move() {
        for text in ["bestmove", "bestmove e9e5", "bestmove e7e5x", "bestmove e7"] {
            assert!(
                matches!(EngineMessage::parse(text), EngineMessage::Unknown(_)),
                "{text} should be unknown"
            );
        }
    }
}
