//! Turn management resources
//!
//! Tracks the computer's turn across the think delay and the engine search.

pub mod pending;

pub use pending::{ComputerTurn, ReplyFate, TurnLedger, TurnStart};
