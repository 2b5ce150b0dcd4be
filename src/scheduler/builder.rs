//! Builder pattern implementation for creating Scheduler instances.
//!
//! # Examples
//!
//! ```rust
//! use std::path::PathBuf;
//! use std::time::Duration;
//! use tranche::fetch::HttpFetcher;
//! use tranche::scheduler::SchedulerBuilder;
//!
//! # fn example() -> tranche::Result<()> {
//! let scheduler = SchedulerBuilder::new()
//!     .directory(PathBuf::from("./downloads"))
//!     .workers(3)
//!     .pacing(Duration::from_secs(15))
//!     .build(HttpFetcher::with_config(Default::default())?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Hidden Progress Table
//!
//! ```rust
//! use tranche::fetch::HttpFetcher;
//! use tranche::scheduler::SchedulerBuilder;
//!
//! # fn example() -> tranche::Result<()> {
//! let scheduler = SchedulerBuilder::hidden().build(HttpFetcher::with_config(Default::default())?);
//! # Ok(())
//! # }
//! ```

use super::{config::SchedulerConfig, scheduler::Scheduler};
use crate::fetch::Fetcher;
use crate::progress::{NullRenderer, Renderer};

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// A builder used to create a [`Scheduler`].
#[derive(Default)]
pub struct SchedulerBuilder {
    config: SchedulerConfig,
}

impl SchedulerBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        SchedulerBuilder::default()
    }

    /// Convenience function to draw nothing.
    pub fn hidden() -> Self {
        SchedulerBuilder::default().renderer(|| NullRenderer)
    }

    /// Sets the directory where to store the downloads.
    pub fn directory(mut self, directory: PathBuf) -> Self {
        self.config.directory = directory;
        self
    }

    /// Sets the extension of the output files.
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.config.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    /// Set the number of downloads running at once. At least one.
    pub fn workers(mut self, workers: usize) -> Self {
        self.config.workers = workers.max(1);
        self
    }

    /// Set the pause taken before each submission.
    pub fn pacing(mut self, pacing: Duration) -> Self {
        self.config.pacing = pacing;
        self
    }

    /// Set the minimum spacing between two progress updates of an item.
    pub fn progress_interval(mut self, interval: Duration) -> Self {
        self.config.progress_interval = interval;
        self
    }

    /// Set how the progress table is presented.
    ///
    /// The factory is called once at the start of every run.
    pub fn renderer<F, R>(mut self, factory: F) -> Self
    where
        F: Fn() -> R + Send + Sync + 'static,
        R: Renderer + 'static,
    {
        self.config.renderer = Arc::new(move || Box::new(factory()) as Box<dyn Renderer>);
        self
    }

    /// Create the [`Scheduler`] with the specified options.
    pub fn build(self, fetcher: impl Fetcher + 'static) -> Scheduler {
        Scheduler::new(self.config, Arc::new(fetcher))
    }

    /// Create the [`Scheduler`] around a shared fetcher.
    pub fn build_shared(self, fetcher: Arc<dyn Fetcher>) -> Scheduler {
        Scheduler::new(self.config, fetcher)
    }
}
