//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions (configuration, initialization, database, media)
//! - Per-category failure counters
//! - Retry strategy configuration for media downloads

mod stats;
mod types;

use std::time::Duration;

use tokio_retry::strategy::ExponentialBackoff;

// Re-export public API
pub use stats::ProcessingStats;
pub use types::{ConfigError, DatabaseError, ErrorType, InitializationError, MediaError};

/// Creates an exponential backoff retry strategy.
///
/// Returns a retry strategy configured with:
/// - Initial delay: `RETRY_INITIAL_DELAY_MS` milliseconds
/// - Backoff factor: `RETRY_FACTOR` (doubles delay each retry)
/// - Maximum delay: `RETRY_MAX_DELAY_SECS` seconds
/// - At most `RETRY_MAX_ATTEMPTS - 1` retries
pub fn get_retry_strategy() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(crate::config::RETRY_INITIAL_DELAY_MS)
        .factor(crate::config::RETRY_FACTOR)
        .max_delay(Duration::from_secs(crate::config::RETRY_MAX_DELAY_SECS))
        .take(crate::config::RETRY_MAX_ATTEMPTS.saturating_sub(1))
}
