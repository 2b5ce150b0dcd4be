//! Outcome of a batch run.
//!
//! # Examples
//!
//! ```rust
//! use std::time::Duration;
//! use tranche::download::{BatchSummary, ProgressEntry, Status};
//!
//! let summary = BatchSummary::new(
//!     vec![
//!         ProgressEntry { name: "a".into(), status: Status::Completed },
//!         ProgressEntry { name: "b".into(), status: Status::Failed("timeout".into()) },
//!     ],
//!     Duration::from_secs(3),
//! );
//! assert_eq!(summary.completed(), 1);
//! assert_eq!(summary.failed(), 1);
//! ```

use super::status::{ProgressEntry, Status};
use std::time::Duration;

/// Final state of every item once the batch is finished.
#[derive(Debug, Clone)]
pub struct BatchSummary {
    /// Entries sorted by name.
    entries: Vec<ProgressEntry>,
    /// Wall time from the start of the run until the last task finished.
    elapsed: Duration,
}

impl BatchSummary {
    pub fn new(entries: Vec<ProgressEntry>, elapsed: Duration) -> Self {
        Self { entries, elapsed }
    }

    /// Get the final entries, sorted by name.
    pub fn entries(&self) -> &[ProgressEntry] {
        &self.entries
    }

    /// Get the status an item finished with.
    pub fn status(&self, name: &str) -> Option<&Status> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.status)
    }

    /// Number of items that finished successfully.
    pub fn completed(&self) -> usize {
        self.count(|status| matches!(status, Status::Completed))
    }

    /// Number of items that failed.
    pub fn failed(&self) -> usize {
        self.count(|status| matches!(status, Status::Failed(_)))
    }

    /// Get the duration of the run.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    fn count(&self, predicate: impl Fn(&Status) -> bool) -> usize {
        self.entries
            .iter()
            .filter(|entry| predicate(&entry.status))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, status: Status) -> ProgressEntry {
        ProgressEntry {
            name: name.to_string(),
            status,
        }
    }

    #[test]
    fn test_summary_counts() {
        let summary = BatchSummary::new(
            vec![
                entry("a", Status::Completed),
                entry("b", Status::failed("boom")),
                entry("c", Status::Completed),
                entry("d", Status::Pending),
            ],
            Duration::from_secs(1),
        );

        assert_eq!(summary.completed(), 2);
        assert_eq!(summary.failed(), 1);
        assert_eq!(summary.entries().len(), 4);
        assert_eq!(summary.elapsed(), Duration::from_secs(1));
    }

    #[test]
    fn test_summary_status_lookup() {
        let summary = BatchSummary::new(
            vec![entry("a", Status::failed("404 Not Found"))],
            Duration::ZERO,
        );

        assert_eq!(summary.status("a"), Some(&Status::failed("404 Not Found")));
        assert_eq!(summary.status("missing"), None);
    }

    #[test]
    fn test_empty_summary() {
        let summary = BatchSummary::new(Vec::new(), Duration::ZERO);
        assert_eq!(summary.completed(), 0);
        assert_eq!(summary.failed(), 0);
    }
}
