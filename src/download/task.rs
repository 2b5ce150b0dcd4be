//! One item's download, bound to the shared progress table.
//!
//! A [`DownloadTask`] calls its [`Fetcher`] and turns everything that comes
//! back into [`Status`] updates. Progress events pass through a [`Throttle`]
//! so a chatty fetcher cannot flood the terminal; the final `Completed` or
//! `Failed` status is always recorded.

use crate::download::{Item, Status, TransferProgress};
use crate::fetch::Fetcher;
use crate::progress::ProgressStore;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Drops events that arrive less than `interval` after the last accepted one.
///
/// Time comes from [`tokio::time::Instant`], so paused-clock tests can drive it.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Returns `true` and records the time if an event may go through now.
    pub fn ready(&mut self) -> bool {
        let now = Instant::now();
        match self.last {
            Some(last) if now.duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Records an event that bypassed the check.
    pub fn mark(&mut self) {
        self.last = Some(Instant::now());
    }
}

/// Download of a single [`Item`].
pub struct DownloadTask {
    item: Item,
    destination: PathBuf,
    store: Arc<ProgressStore>,
    fetcher: Arc<dyn Fetcher>,
    throttle: Throttle,
}

impl DownloadTask {
    /// Creates a task writing `item` to `destination`.
    ///
    /// `progress_interval` is the minimum spacing between two forwarded
    /// progress updates.
    pub fn new(
        item: Item,
        destination: PathBuf,
        store: Arc<ProgressStore>,
        fetcher: Arc<dyn Fetcher>,
        progress_interval: Duration,
    ) -> Self {
        Self {
            item,
            destination,
            store,
            fetcher,
            throttle: Throttle::new(progress_interval),
        }
    }

    /// Get a reference to the task's item.
    pub fn item(&self) -> &Item {
        &self.item
    }

    /// Get the path the file is written to.
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Runs the fetcher to completion and returns the terminal status.
    ///
    /// Never fails: fetcher errors are recorded as `Failed` in the store and
    /// returned as such.
    pub async fn run(self) -> Status {
        let DownloadTask {
            item,
            destination,
            store,
            fetcher,
            mut throttle,
        } = self;

        store.update(&item.name, TransferProgress::starting().into());
        throttle.mark();

        debug!("Fetching {} into {:?}", item.locator, destination);
        let mut on_progress = |progress: TransferProgress| {
            if throttle.ready() {
                store.update(&item.name, progress.into());
            }
        };
        let result = fetcher
            .fetch(&item.locator, &destination, &mut on_progress)
            .await;

        let status = match result {
            Ok(()) => {
                debug!("{} completed", item.name);
                Status::Completed
            }
            Err(e) => {
                warn!("{} failed: {}", item.name, e);
                Status::failed(e)
            }
        };
        store.update(&item.name, status.clone());
        status
    }
}
