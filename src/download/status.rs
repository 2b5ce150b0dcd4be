//! Per-item status values shown in the progress table.

use indicatif::HumanBytes;
use std::fmt;
use std::time::Duration;

pub(crate) const UNKNOWN: &str = "N/A";

/// Download status of a single item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Registered, not started yet.
    Pending,
    /// Transfer running.
    InProgress {
        /// Completion, e.g. ` 42.3%`, or the byte count when the size is unknown.
        percent: String,
        /// Transfer rate, e.g. `1.20 MiB/s`.
        rate: String,
    },
    /// The file was written completely.
    Completed,
    /// The download failed with error message.
    Failed(String),
}

impl Status {
    /// Whether this status ends the item's lifecycle for the run.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Completed | Status::Failed(_))
    }

    /// Mark an item as failed with a message.
    pub fn failed(msg: impl fmt::Display) -> Self {
        Status::Failed(msg.to_string())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Pending => f.write_str("Pending"),
            Status::InProgress { percent, rate } => write!(f, "{} - {}", percent, rate),
            Status::Completed => f.write_str("Completed"),
            Status::Failed(msg) => write!(f, "Failed: {}", msg),
        }
    }
}

impl From<TransferProgress> for Status {
    fn from(progress: TransferProgress) -> Self {
        Status::InProgress {
            percent: progress.percent,
            rate: progress.rate,
        }
    }
}

/// A row of the progress table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEntry {
    pub name: String,
    pub status: Status,
}

/// Progress event emitted by a fetcher while a transfer runs.
///
/// Both fields are display text: fetchers backed by external tools report
/// whatever the tool prints, HTTP fetchers build them with
/// [`TransferProgress::from_bytes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferProgress {
    pub percent: String,
    pub rate: String,
}

impl TransferProgress {
    pub fn new(percent: impl Into<String>, rate: impl Into<String>) -> Self {
        Self {
            percent: percent.into(),
            rate: rate.into(),
        }
    }

    /// The progress a task reports once it owns a worker slot.
    pub fn starting() -> Self {
        Self::new(format_percent(0.0), UNKNOWN)
    }

    /// Builds the display text from raw byte counts.
    ///
    /// `total` of `None` or `Some(0)` means the size is unknown; the percent
    /// column then shows the amount received so far.
    pub fn from_bytes(downloaded: u64, total: Option<u64>, elapsed: Duration) -> Self {
        let percent = match total {
            Some(total) if total > 0 => format_percent(downloaded as f64 * 100.0 / total as f64),
            _ => HumanBytes(downloaded).to_string(),
        };
        let secs = elapsed.as_secs_f64();
        let rate = if secs > 0.0 {
            format!("{}/s", HumanBytes((downloaded as f64 / secs) as u64))
        } else {
            UNKNOWN.to_string()
        };
        Self { percent, rate }
    }
}

fn format_percent(value: f64) -> String {
    format!("{:>5.1}%", value.clamp(0.0, 100.0))
}
