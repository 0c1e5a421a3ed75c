//! Logging setup
//!
//! One `tracing-subscriber` fmt layer writing to stderr (stdout belongs to
//! the board display). `RUST_LOG` takes precedence over the configured
//! filter.

use crate::core::error::{CoreError, CoreResult};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber
pub fn init_logging(default_filter: &str) -> CoreResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| CoreError::LoggingInit {
            message: e.to_string(),
        })
}
