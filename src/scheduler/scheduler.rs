//! Core scheduler implementation.
//!
//! The [`Scheduler`] applies two independent throttles to a batch:
//!
//! - **pacing**: the submitting loop sleeps before each submission, which
//!   bounds how fast new work reaches the provider;
//! - **workers**: a semaphore bounds how many fetches run at once.
//!
//! Submitted tasks queue for a worker slot in submission order.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use tranche::download::Item;
//! use tranche::fetch::HttpFetcher;
//! use tranche::scheduler::SchedulerBuilder;
//!
//! # async fn example() -> tranche::Result<()> {
//! let scheduler = SchedulerBuilder::new()
//!     .directory(PathBuf::from("downloads"))
//!     .extension("bin")
//!     .build(HttpFetcher::with_config(Default::default())?);
//!
//! let items = vec![
//!     Item::new("first", "https://example.com/first.bin"),
//!     Item::new("second", "https://example.com/second.bin"),
//! ];
//! let summary = scheduler.run(&items).await?;
//! println!("{} completed, {} failed", summary.completed(), summary.failed());
//! # Ok(())
//! # }
//! ```

use super::config::SchedulerConfig;
use crate::download::{BatchSummary, DownloadTask, Item, Status};
use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::progress::ProgressStore;

use futures::future::{self, FutureExt};
use std::collections::HashSet;
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::{sleep, Instant};
use tracing::{debug, error, info, warn};

/// Runs a batch of downloads.
///
/// A scheduler can be created via its builder:
///
/// ```rust
/// use tranche::fetch::HttpFetcher;
/// use tranche::scheduler::SchedulerBuilder;
///
/// # fn main() -> tranche::Result<()> {
/// let s = SchedulerBuilder::new().build(HttpFetcher::with_config(Default::default())?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Scheduler {
    config: SchedulerConfig,
    fetcher: Arc<dyn Fetcher>,
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Scheduler {
    pub(crate) fn new(config: SchedulerConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        Self { config, fetcher }
    }

    /// Gets the directory where files will be written.
    pub fn directory(&self) -> &PathBuf {
        &self.config.directory
    }

    /// Gets the extension of the output files.
    pub fn extension(&self) -> &str {
        &self.config.extension
    }

    /// Gets the number of downloads running at once.
    pub fn workers(&self) -> usize {
        self.config.workers
    }

    /// Gets the pause taken before each submission.
    pub fn pacing(&self) -> Duration {
        self.config.pacing
    }

    /// Gets the minimum spacing between two progress updates of an item.
    pub fn progress_interval(&self) -> Duration {
        self.config.progress_interval
    }

    /// Downloads every item and waits for all of them to finish.
    ///
    /// Individual failures are part of the returned summary; an error is only
    /// returned when the batch itself cannot run.
    pub async fn run(&self, items: &[Item]) -> Result<BatchSummary> {
        self.run_until(items, future::pending::<()>()).await
    }

    /// Like [`Scheduler::run`], but stops as soon as `shutdown` resolves.
    ///
    /// On shutdown no further item is submitted, running fetches are
    /// abandoned and [`Error::Cancelled`] is returned. Statuses already in the
    /// table are left as they are.
    pub async fn run_until<S>(&self, items: &[Item], shutdown: S) -> Result<BatchSummary>
    where
        S: Future<Output = ()>,
    {
        check_unique(items)?;

        tokio::select! {
            summary = self.drive(items) => Ok(summary),
            _ = shutdown => {
                info!("Cancellation requested, stopping submissions");
                Err(Error::Cancelled)
            }
        }
    }

    async fn drive(&self, items: &[Item]) -> BatchSummary {
        let started = Instant::now();
        if items.is_empty() {
            return BatchSummary::new(Vec::new(), started.elapsed());
        }

        let store = Arc::new(ProgressStore::new(items.len(), (self.config.renderer)()));
        store.seed(items.iter().map(|item| item.name.as_str()));

        let pool = Arc::new(Semaphore::new(self.config.workers.max(1)));
        let mut tasks = JoinSet::new();

        for item in items {
            sleep(self.config.pacing).await;

            let destination = item.destination(&self.config.directory, &self.config.extension);
            let task = DownloadTask::new(
                item.clone(),
                destination,
                Arc::clone(&store),
                Arc::clone(&self.fetcher),
                self.config.progress_interval,
            );

            debug!("Submitting {}", item.name);
            tasks.spawn(run_in_pool(task, Arc::clone(&pool), Arc::clone(&store)));
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                warn!("Download task did not finish: {}", e);
            }
        }

        BatchSummary::new(store.snapshot(), started.elapsed())
    }
}

/// Waits for a worker slot, then runs the task.
///
/// A panic inside the task is reported as a failure of that item only.
async fn run_in_pool(
    task: DownloadTask,
    pool: Arc<Semaphore>,
    store: Arc<ProgressStore>,
) -> Status {
    let name = task.item().name.clone();

    let _permit = match pool.acquire_owned().await {
        Ok(permit) => permit,
        Err(e) => {
            let status = Status::failed(Error::Internal(e.to_string()));
            store.update(&name, status.clone());
            return status;
        }
    };

    match AssertUnwindSafe(task.run()).catch_unwind().await {
        Ok(status) => status,
        Err(_) => {
            error!("Download task for {} panicked", name);
            let status = Status::failed("task panicked");
            store.update(&name, status.clone());
            status
        }
    }
}

fn check_unique(items: &[Item]) -> Result<()> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.name.as_str()) {
            return Err(Error::DuplicateItem(item.name.clone()));
        }
    }
    Ok(())
}
