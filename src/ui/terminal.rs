//! Terminal front end
//!
//! [`TerminalView`] is a text display widget: it draws the board from FEN as
//! an 8x8 grid and prints the status line. [`read_commands`] turns stdin
//! lines into [`UiEvent`]s for the session loop.
//!
//! # Commands
//!
//! | Input       | Event                        |
//! |-------------|------------------------------|
//! | `e2e4`      | drag gesture e2 → e4         |
//! | `start`     | start / reset                |
//! | `clear`     | clear the board              |
//! | `undo`      | undo the last round          |
//! | `level <n>` | difficulty selector          |
//! | `quit`      | end the session              |

use crate::game::ai::AIDifficulty;
use crate::game::types::parse_square;
use crate::game::view::BoardView;
use crate::game::UiEvent;
use shakmaty::Square;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::warn;

pub const HELP: &str = "commands: <from><to> (e.g. e2e4), start, clear, undo, level <1-3>, help, quit";

/// A parsed line of terminal input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Event(UiEvent),
    Help,
}

/// Input the terminal could not understand
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised command '{0}' (type 'help')")]
pub struct CommandError(pub String);

/// Parse one line of terminal input
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let unrecognised = || CommandError(line.to_string());
    let mut words = line.split_whitespace();

    let command = match (words.next(), words.next(), words.next()) {
        (Some("start"), None, None) => Command::Event(UiEvent::Start),
        (Some("clear"), None, None) => Command::Event(UiEvent::Clear),
        (Some("undo"), None, None) => Command::Event(UiEvent::Undo),
        (Some("quit") | Some("exit"), None, None) => Command::Event(UiEvent::Quit),
        (Some("help") | Some("?"), None, None) => Command::Help,
        (Some("level"), Some(level), None) => {
            Command::Event(UiEvent::SetDifficulty(AIDifficulty::from_input(level).level()))
        }
        (Some(text), None, None) if text.len() == 4 && text.is_ascii() => {
            let origin = parse_square(&text[0..2]).map_err(|_| unrecognised())?;
            let destination = parse_square(&text[2..4]).map_err(|_| unrecognised())?;
            Command::Event(UiEvent::Move {
                origin,
                destination,
            })
        }
        _ => return Err(unrecognised()),
    };
    Ok(command)
}

/// Forward stdin commands to the session until EOF or `quit`
pub async fn read_commands(events: mpsc::UnboundedSender<UiEvent>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!("[UI] Failed to read input: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Ok(Command::Event(event)) => {
                let quitting = event == UiEvent::Quit;
                if events.send(event).is_err() || quitting {
                    return;
                }
            }
            Ok(Command::Help) => println!("{HELP}"),
            Err(e) => println!("{e}"),
        }
    }
    // EOF behaves like closing the page
    let _ = events.send(UiEvent::Quit);
}

/// Board rows, rank 8 first, one character per square ('.' for empty)
pub fn board_rows(fen: &str) -> Vec<String> {
    let placement = fen.split_whitespace().next().unwrap_or_default();
    placement
        .split('/')
        .map(|rank| {
            rank.chars()
                .flat_map(|c| match c.to_digit(10) {
                    Some(empty) => vec!['.'; empty as usize],
                    None => vec![c],
                })
                .collect()
        })
        .collect()
}

/// Text display widget writing to any output
pub struct TerminalView<W> {
    out: W,
    last_fen: String,
    last_status: String,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last_fen: String::new(),
            last_status: String::new(),
        }
    }

    pub fn last_fen(&self) -> &str {
        &self.last_fen
    }

    pub fn last_status(&self) -> &str {
        &self.last_status
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, fen: &str) {
        let mut text = String::new();
        for (index, row) in board_rows(fen).iter().enumerate() {
            let rank = 8 - index;
            let squares: Vec<String> = row.chars().map(String::from).collect();
            text.push_str(&format!("{rank} {}\n", squares.join(" ")));
        }
        text.push_str("  a b c d e f g h\n");
        self.emit(&text);
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|()| self.out.flush()) {
            warn!("[UI] Failed to write to terminal: {}", e);
        }
    }
}

impl<W: Write> BoardView for TerminalView<W> {
    fn position(&mut self, fen: &str) {
        if fen == self.last_fen {
            return;
        }
        self.last_fen = fen.to_string();
        self.draw(fen);
    }

    fn clear(&mut self) {
        self.position(crate::game::rules::EMPTY_FEN);
    }

    fn set_status(&mut self, text: &str) {
        if text == self.last_status {
            return;
        }
        self.last_status = text.to_string();
        self.emit(&format!("{text}\n"));
    }

    fn snapback(&mut self, origin: Square, destination: Square) {
        self.emit(&format!("{origin}{destination} is not allowed here\n"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::rules::STARTING_FEN;

    #[test]
    fn test_parse_move_command() {
        assert_eq!(
            parse_command("e2e4"),
            Ok(Command::Event(UiEvent::Move {
                origin: Square::E2,
                destination: Square::E4,
            }))
        );
    }

    #[test]
    fn test_parse_lifecycle_commands() {
        //! Each button maps to exactly one event
        assert_eq!(parse_command("start"), Ok(Command::Event(UiEvent::Start)));
        assert_eq!(parse_command(" clear "), Ok(Command::Event(UiEvent::Clear)));
        assert_eq!(parse_command("undo"), Ok(Command::Event(UiEvent::Undo)));
        assert_eq!(parse_command("quit"), Ok(Command::Event(UiEvent::Quit)));
        assert_eq!(parse_command("help"), Ok(Command::Help));
        assert_eq!(
            parse_command("level 2"),
            Ok(Command::Event(UiEvent::SetDifficulty(2)))
        );
    }

    #[test]
    fn test_parse_unknown_level_is_hardest() {
        assert_eq!(
            parse_command("level max"),
            Ok(Command::Event(UiEvent::SetDifficulty(3)))
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for line in ["", "e2", "e2e9", "level", "start now", "ééé"] {
            assert!(parse_command(line).is_err(), "'{line}' should be rejected");
        }
    }

    #[test]
    fn test_board_rows_expand_empty_squares() {
        let rows = board_rows(STARTING_FEN);
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0], "rnbqkbnr");
        assert_eq!(rows[4], "........");
        assert_eq!(rows[7], "RNBQKBNR");
    }

    #[test]
    fn test_terminal_view_output() {
        let mut view = TerminalView::new(Vec::new());
        view.position(STARTING_FEN);
        view.set_status("White to move");
        // Repeated status is not printed twice
        view.set_status("White to move");

        assert_eq!(view.last_fen(), STARTING_FEN);
        let output = String::from_utf8(view.into_inner()).unwrap();
        assert!(output.starts_with("8 r n b q k b n r\n"));
        assert!(output.contains("1 R N B Q K B N R\n  a b c d e f g h\n"));
        assert_eq!(output.matches("White to move").count(), 1);
    }

    #[test]
    fn test_terminal_view_clear() {
        let mut view = TerminalView::new(Vec::new());
        view.position(STARTING_FEN);
        view.clear();
        assert_eq!(view.last_fen(), crate::game::rules::EMPTY_FEN);
    }
}
