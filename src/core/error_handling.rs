//! Error handling utilities
//!
//! Recoverable conditions are absorbed where they happen and only logged.
//! These helpers keep that absorption uniform, and stop a panic inside a
//! collaborator from taking the whole session down.

use std::panic::{self, AssertUnwindSafe};
use tracing::error;

/// Run a closure, turning a panic into `None`
///
/// The panic is logged with the given context and the caller decides how to
/// degrade (for move application: snap the piece back).
pub fn guard_panic<T>(context: &str, body: impl FnOnce() -> T) -> Option<T> {
    match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(value) => Some(value),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            error!("[ERROR_HANDLER] {} panicked: {} - continuing", context, message);
            None
        }
    }
}

/// Log an error that the caller has decided to absorb
pub fn log_absorbed(context: &str, error: &dyn std::fmt::Display) {
    error!("[ERROR_HANDLER] {} encountered error: {}", context, error);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_panic_passes_values_through() {
        assert_eq!(guard_panic("adding", || 2 + 2), Some(4));
    }

    #[test]
    fn test_guard_panic_absorbs_panics() {
        //! A panicking collaborator yields None instead of unwinding further
        let result: Option<u8> = guard_panic("exploding", || panic!("boom"));
        assert_eq!(result, None);
    }
}
