//! Tranche downloads a batch of remote files with bounded concurrency and
//! paced submissions, while keeping a live status table on the terminal.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use std::time::Duration;
//! use tranche::{Error, HttpFetcher, Item, SchedulerBuilder};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let items = vec![
//!     Item::new("reqwest", "https://github.com/seanmonstar/reqwest/archive/refs/tags/v0.11.9.zip"),
//!     Item::new("tokio", "https://github.com/tokio-rs/tokio/archive/refs/tags/tokio-1.45.1.zip"),
//! ];
//! let scheduler = SchedulerBuilder::new()
//!     .directory(PathBuf::from("output"))
//!     .extension("zip")
//!     .workers(2)
//!     .pacing(Duration::from_secs(1))
//!     .build(HttpFetcher::with_config(Default::default())?);
//! let summary = scheduler.run(&items).await?;
//! assert_eq!(summary.entries().len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`download`] - items, statuses, the per-item task and the batch summary
//! - [`fetch`] - the [`Fetcher`] trait and its HTTP, Google Drive and `yt-dlp` providers
//! - [`progress`] - the shared status table and how it is drawn
//! - [`scheduler`] - the [`Scheduler`] and [`SchedulerBuilder`]
//! - [`error`] - centralized error handling with the [`Error`] enum
//! - [`http`] - HTTP client functionality
//! - [`logging`] - `tracing` subscriber setup for the binary
//! - [`utils`] - shared utility functions

pub mod download;
pub mod error;
pub mod fetch;
pub mod http;
pub mod logging;
pub mod progress;
pub mod scheduler;
pub mod utils;

pub use download::{BatchSummary, Item, Locator, ProgressEntry, Status, TransferProgress};
pub use error::{Error, Result};
pub use fetch::{DriveFetcher, Fetcher, HttpFetcher, YtDlpFetcher};
pub use http::{create_http_client, HttpClientConfig};
pub use progress::{LineStyle, ProgressStore, Renderer, TerminalRenderer};
pub use scheduler::{Scheduler, SchedulerBuilder, SchedulerConfig};
