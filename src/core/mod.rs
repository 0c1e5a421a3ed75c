//! Core module - application infrastructure
//!
//! Everything the game controller needs from its surroundings but that is
//! not chess: configuration, persistence, logging and error plumbing.
//!
//! # Resources
//!
//! - [`GameSettings`] - engine path, skill level, difficulty, think delay, log filter
//!
//! # Infrastructure
//!
//! - `settings_persistence` - JSON settings file in the platform config directory
//! - `logging` - `tracing` subscriber setup
//! - `error_handling` - panic guard and absorbed-error logging
//! - `error` - [`CoreError`]

pub mod error;
pub mod error_handling;
pub mod logging;
pub mod resources;
pub mod settings_persistence;

// Re-export commonly used items
pub use error::{CoreError, CoreResult};
pub use resources::*;
