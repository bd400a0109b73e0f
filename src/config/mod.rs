//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (pacing, retry, media naming)
//! - CLI option types and parsing
//! - The run configuration consumed by the library

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{
    normalize_domain, parse_post_ids, Cli, Command, Config, GetArgs, LogFormat, LogLevel, Protocol,
    TagMode,
};
