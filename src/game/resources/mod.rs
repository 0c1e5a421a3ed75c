//! Chess game resources - controller-owned bookkeeping
//!
//! State the controller keeps next to the position, never inside it.
//!
//! # Resource Categories
//!
//! ## Turn Management
//! - [`TurnLedger`] - Scheduled, deferred and in-flight computer turns
//! - [`ComputerTurn`] - Token handed to the event loop's think-delay timer

pub mod turn;

pub use turn::*;
