//! Error types for game module
//!
//! Provides custom error types for game logic including widget input parsing,
//! search-engine process management and the engine message channel.
//!
//! Most of these never reach the user: illegal moves become a snap back,
//! protocol noise is logged and dropped. They exist so the seams can report
//! what went wrong and the controller can decide to absorb it.

/// Errors that can occur in game logic
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Square name the board does not have
    #[error("Invalid square: {text}")]
    InvalidSquare { text: String },

    /// Piece code the display widget should never produce
    #[error("Invalid piece code: {text}")]
    InvalidPiece { text: String },

    /// Search engine binary could not be launched
    #[error("Failed to start engine at {path}: {source}")]
    EngineSpawn {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The engine's directive channel is gone (process exited or terminated)
    #[error("Engine channel closed")]
    EngineChannelClosed,
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
