//! User interface
//!
//! The game controller only talks to a [`BoardView`](crate::game::view::BoardView)
//! and receives [`UiEvent`](crate::game::UiEvent)s, so any front end that can
//! draw a FEN string and report drags can drive it. The bundled front end is
//! a plain terminal.

pub mod terminal;

pub use terminal::{parse_command, read_commands, Command, CommandError, TerminalView};
