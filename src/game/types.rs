//! Type definitions and utilities for chess game logic
//!
//! Provides the small vocabulary the controller speaks on top of the rules
//! engine's square and role types:
//!
//! - [`Side`] - whose turn it is (white or black)
//! - [`PieceCode`] - a piece as the display widget names it (`"wP"`, `"bK"`)
//! - [`MoveRequest`] - a proposed transition (origin, destination, promotion)
//! - [`Termination`] - the derived game-termination status
//!
//! Squares and roles are the `shakmaty` types, so coordinates never need
//! converting between the widget, the rules engine and the search engine.

use crate::game::error::GameError;
use serde::{Deserialize, Serialize};
use shakmaty::{Color, Role, Square};
use std::fmt;
use std::str::FromStr;

/// Side to move
///
/// Derived from the rules engine's position. Determines whose input is
/// accepted and who wins on checkmate (the side NOT to move).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    /// The other side
    pub fn opposite(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Capitalized name used in status text ("White", "Black")
    pub fn name(self) -> &'static str {
        match self {
            Side::White => "White",
            Side::Black => "Black",
        }
    }

    /// Lowercase name used when the side appears mid-sentence
    pub fn lowercase_name(self) -> &'static str {
        match self {
            Side::White => "white",
            Side::Black => "black",
        }
    }

    /// Color prefix the display widget uses in piece codes
    pub fn letter(self) -> char {
        match self {
            Side::White => 'w',
            Side::Black => 'b',
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Color> for Side {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Side::White,
            Color::Black => Side::Black,
        }
    }
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

/// A piece as named by the display widget
///
/// The widget hands the controller a two-letter code on drag start: the side
/// letter (`w`/`b`) followed by the uppercase role letter (`P`, `N`, `B`,
/// `R`, `Q`, `K`).
///
/// # Examples
///
/// ```rust,ignore
/// let piece: PieceCode = "bN".parse()?;
/// assert_eq!(piece.side, Side::Black);
/// assert_eq!(piece.role, Role::Knight);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceCode {
    pub side: Side,
    pub role: Role,
}

impl PieceCode {
    pub fn new(side: Side, role: Role) -> Self {
        Self { side, role }
    }
}

impl From<shakmaty::Piece> for PieceCode {
    fn from(piece: shakmaty::Piece) -> Self {
        Self {
            side: piece.color.into(),
            role: piece.role,
        }
    }
}

impl FromStr for PieceCode {
    type Err = GameError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || GameError::InvalidPiece {
            text: text.to_string(),
        };

        let mut chars = text.chars();
        let (Some(side), Some(role), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };

        let side = match side {
            'w' => Side::White,
            'b' => Side::Black,
            _ => return Err(invalid()),
        };
        if !role.is_ascii_uppercase() {
            return Err(invalid());
        }
        let role = Role::from_char(role.to_ascii_lowercase()).ok_or_else(invalid)?;

        Ok(Self { side, role })
    }
}

impl fmt::Display for PieceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.side.letter(), self.role.upper_char())
    }
}

/// Parse a square name ("e4") into a board square
pub fn parse_square(text: &str) -> Result<Square, GameError> {
    text.parse::<Square>().map_err(|_| GameError::InvalidSquare {
        text: text.to_string(),
    })
}

/// A proposed or applied transition
///
/// Ephemeral: built per attempt and discarded after application or
/// rejection. The promotion role is only consulted when the move actually
/// promotes a pawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub origin: Square,
    pub destination: Square,
    pub promotion: Option<Role>,
}

impl MoveRequest {
    pub fn new(origin: Square, destination: Square) -> Self {
        Self {
            origin,
            destination,
            promotion: None,
        }
    }

    /// Same move with a queen designated for a possible promotion
    pub fn promoting_to_queen(self) -> Self {
        Self {
            promotion: Some(Role::Queen),
            ..self
        }
    }
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.origin, self.destination)?;
        if let Some(role) = self.promotion {
            write!(f, "{}", role.char())?;
        }
        Ok(())
    }
}

/// Game-termination status, recomputed from the position on demand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    InProgress,
    Check,
    Checkmate,
    Draw,
}

impl Termination {
    /// Whether the game has ended (checkmate or draw)
    pub fn is_over(self) -> bool {
        matches!(self, Termination::Checkmate | Termination::Draw)
    }
}
