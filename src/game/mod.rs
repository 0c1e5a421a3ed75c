//! Chess game logic module - the game-state and turn-coordination core
//!
//! Owns the authoritative game state (through a rules engine), validates
//! human input against it, drives the asynchronous request/response cycle
//! with the search engine on the computer's turn, and keeps the display and
//! status readout in sync after every change.
//!
//! # Module Organization
//!
//! - `types` - Side, piece codes, move requests, termination status
//! - `rules` - Rules-engine seam and the `shakmaty` implementation
//! - `ai` - Search-engine seam, UCI protocol, engine process, difficulty
//! - `resources` - Turn ledger guarding against stale engine replies
//! - `status` - Status text derivation
//! - `view` - Display-widget seam
//! - `controller` - The controller itself
//! - `session` - Event loop binding UI, engine and timers to the controller
//!
//! # Collaborators
//!
//! ```text
//!            ┌──────────────┐
//!  UiEvent ─▶│   Session    │◀── engine lines
//!            └──────┬───────┘
//!                   ▼
//!            ┌──────────────┐
//!            │  Controller  │
//!            └─┬────┬─────┬─┘
//!              ▼    ▼     ▼
//!          Rules  View  SearchEngine
//! ```

pub mod ai;
pub mod controller;
pub mod error;
pub mod resources;
pub mod rules;
pub mod session;
pub mod status;
pub mod types;
pub mod view;

// Re-export the main entry points
pub use controller::{Controller, ControllerOptions, DropOutcome, HUMAN_SIDE};
pub use error::{GameError, GameResult};
pub use session::{Session, SessionEnd, UiEvent};
pub use view::BoardView;
