//! Chess AI opponent
//!
//! The computer's moves come from an external UCI search engine running in
//! its own process. The controller never waits for it: a request is posted
//! and control returns to the event loop; the `bestmove` reply arrives later
//! on the engine's message channel.
//!
//! # Architecture
//!
//! - `resource` - [`AIDifficulty`], level to search-depth mapping
//! - `protocol` - [`Directive`] and [`EngineMessage`], the UCI line protocol
//! - `process` - [`UciProcess`], the engine child process and its channels
//!
//! # Integration Strategy
//!
//! The rules engine's position is the source of truth. For each computer turn:
//! 1. Serialize the position to FEN
//! 2. Post `position fen <fen>` then `go depth <n>`
//! 3. Parse the `bestmove` reply
//! 4. Apply it through the rules engine, exactly like a human move

pub mod process;
pub mod protocol;
pub mod resource;

use crate::game::error::GameResult;

pub use process::{EngineLines, UciProcess};
pub use protocol::{Directive, EngineMessage};
pub use resource::AIDifficulty;

/// Search engine as seen by the controller
///
/// Posting is fire-and-forget; responses come back through a separate
/// message channel owned by the session loop.
pub trait SearchEngine {
    /// Queue one directive for the engine
    fn post(&mut self, directive: Directive) -> GameResult<()>;

    /// End the engine process; further posts fail
    fn terminate(&mut self);
}
