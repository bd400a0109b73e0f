//! Processing statistics tracking.
//!
//! Counts failures by category during a run. The batch runs on a single task,
//! so counters are plain integers owned by the run.

use std::collections::HashMap;
use strum::IntoEnumIterator;

use super::types::ErrorType;

/// Per-category failure counters.
///
/// All categories are initialized to zero on creation.
#[derive(Debug, Clone)]
pub struct ProcessingStats {
    errors: HashMap<ErrorType, usize>,
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStats {
    pub fn new() -> Self {
        let errors = ErrorType::iter().map(|error| (error, 0)).collect();
        ProcessingStats { errors }
    }

    /// Increment an error counter.
    pub fn increment_error(&mut self, error: ErrorType) {
        *self.errors.entry(error).or_insert(0) += 1;
    }

    pub fn get_error_count(&self, error: ErrorType) -> usize {
        self.errors.get(&error).copied().unwrap_or(0)
    }

    pub fn total_errors(&self) -> usize {
        self.errors.values().sum()
    }

    /// Non-zero counters in declaration order, for the end-of-run report.
    pub fn non_zero(&self) -> Vec<(ErrorType, usize)> {
        ErrorType::iter()
            .map(|error| (error, self.get_error_count(error)))
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}
