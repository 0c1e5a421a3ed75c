//! Error types for core module
//!
//! Provides custom error types for core functionality: settings persistence
//! and logging setup.

use thiserror::Error;

/// Errors that can occur in the core module
#[derive(Error, Debug)]
pub enum CoreError {
    /// Settings file I/O error
    #[error("Settings I/O error: {0}")]
    SettingsIo(#[from] std::io::Error),

    /// Settings serialization/deserialization error
    #[error("Settings serialization error: {0}")]
    SettingsSerialization(#[from] serde_json::Error),

    /// Logging subscriber could not be installed
    #[error("Logging initialization failed: {message}")]
    LoggingInit { message: String },
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;
