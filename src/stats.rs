//! Run statistics.
//!
//! Counters only ever grow during a run; their final values are the run's
//! report.

use log::info;
use serde::Serialize;

use crate::error_handling::{ErrorType, ProcessingStats};
use crate::resolve::Decision;

/// Counters for one backfill run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    /// Posts loaded and scanned (including empty ones)
    pub documents_seen: usize,
    /// Posts whose content changed
    pub documents_modified: usize,
    /// References that resolved to a new URL
    pub references_rewritten: usize,
    pub skipped_wrong_domain: usize,
    pub skipped_wrong_protocol: usize,
    pub skipped_html_file: usize,
    pub reused_local: usize,
    pub reused_session: usize,
    pub fetched: usize,
    pub fetch_failed: usize,
    pub persist_failed: usize,
    /// Requested post ids that do not exist
    pub missing_documents: usize,
    /// Failures by category
    #[serde(skip)]
    pub errors: ProcessingStats,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tallies a resolver decision. Fetch outcomes are recorded separately
    /// with `record_fetch_success` / `record_fetch_failure`.
    pub fn record_decision(&mut self, decision: &Decision) {
        match decision {
            Decision::SkipWrongDomain => self.skipped_wrong_domain += 1,
            Decision::SkipWrongProtocol => self.skipped_wrong_protocol += 1,
            Decision::SkipHtmlFile => self.skipped_html_file += 1,
            Decision::ReuseLocal(_) => self.reused_local += 1,
            Decision::ReuseSession(_) => self.reused_session += 1,
            Decision::NeedsFetch(_) => {}
        }
    }

    pub fn record_fetch_success(&mut self) {
        self.fetched += 1;
    }

    pub fn record_fetch_failure(&mut self, error: ErrorType) {
        self.fetch_failed += 1;
        self.errors.increment_error(error);
    }

    pub fn record_persist_failure(&mut self) {
        self.persist_failed += 1;
        self.errors.increment_error(ErrorType::PostPersistError);
    }

    pub fn record_missing_document(&mut self) {
        self.missing_documents += 1;
        self.errors.increment_error(ErrorType::PostNotFound);
    }

    /// Logs the per-outcome breakdown.
    pub fn log_summary(&self) {
        info!(
            "References: {} rewritten ({} fetched, {} reused local, {} reused this run), {} fetch failures",
            self.references_rewritten,
            self.fetched,
            self.reused_local,
            self.reused_session,
            self.fetch_failed
        );
        info!(
            "Skipped: {} wrong domain, {} wrong protocol, {} html pages",
            self.skipped_wrong_domain, self.skipped_wrong_protocol, self.skipped_html_file
        );
        for (error, count) in self.errors.non_zero() {
            info!("   {}: {}", error, count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_decision() {
        let mut stats = RunStats::new();
        stats.record_decision(&Decision::SkipWrongDomain);
        stats.record_decision(&Decision::SkipHtmlFile);
        stats.record_decision(&Decision::ReuseLocal("u".to_string()));
        stats.record_decision(&Decision::ReuseSession("u".to_string()));
        stats.record_decision(&Decision::NeedsFetch("u".to_string()));

        assert_eq!(stats.skipped_wrong_domain, 1);
        assert_eq!(stats.skipped_html_file, 1);
        assert_eq!(stats.reused_local, 1);
        assert_eq!(stats.reused_session, 1);
        // Fetches are counted once their outcome is known
        assert_eq!(stats.fetched, 0);
    }

    #[test]
    fn test_failures_are_categorized() {
        let mut stats = RunStats::new();
        stats.record_fetch_failure(ErrorType::MediaHttpStatusError);
        stats.record_persist_failure();
        stats.record_missing_document();

        assert_eq!(stats.fetch_failed, 1);
        assert_eq!(stats.persist_failed, 1);
        assert_eq!(stats.missing_documents, 1);
        assert_eq!(stats.errors.total_errors(), 3);
        assert_eq!(
            stats.errors.get_error_count(ErrorType::MediaHttpStatusError),
            1
        );
    }

    #[test]
    fn test_serializes_counters_only() {
        let mut stats = RunStats::new();
        stats.documents_seen = 4;
        stats.documents_modified = 2;
        let json = serde_json::to_value(&stats).expect("RunStats should serialize");
        assert_eq!(json["documents_seen"], 4);
        assert_eq!(json["documents_modified"], 2);
        assert!(json.get("errors").is_none());
    }
}
