//! Adapter for fetchers built on blocking I/O.
//!
//! A [`BlockingFetcher`] runs on tokio's blocking thread pool, so a slow
//! synchronous transfer occupies a dedicated OS thread rather than a runtime
//! worker. Its progress events are relayed back over a channel and delivered
//! to the async side's callback in order.

use super::{Fetcher, ProgressFn};
use crate::download::{Locator, TransferProgress};
use crate::error::{Error, Result};

use futures::future::{BoxFuture, FutureExt};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task;

/// Synchronous counterpart of [`Fetcher`].
pub trait BlockingFetcher: Send + Sync + 'static {
    fn fetch(
        &self,
        locator: &Locator,
        destination: &Path,
        on_progress: &mut dyn FnMut(TransferProgress),
    ) -> Result<()>;
}

/// Runs a [`BlockingFetcher`] with `spawn_blocking`.
#[derive(Debug)]
pub struct Blocking<F> {
    inner: Arc<F>,
}

impl<F: BlockingFetcher> Blocking<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }
}

impl<F: BlockingFetcher> Fetcher for Blocking<F> {
    fn fetch<'a>(
        &'a self,
        locator: &'a Locator,
        destination: &'a Path,
        on_progress: ProgressFn<'a>,
    ) -> BoxFuture<'a, Result<()>> {
        let inner = Arc::clone(&self.inner);
        let locator = locator.clone();
        let destination = destination.to_path_buf();

        async move {
            let (tx, mut rx) = mpsc::unbounded_channel();
            let handle = task::spawn_blocking(move || {
                let mut forward = |progress: TransferProgress| {
                    // The receiver only goes away when the batch is abandoned.
                    let _ = tx.send(progress);
                };
                inner.fetch(&locator, &destination, &mut forward)
            });

            while let Some(progress) = rx.recv().await {
                on_progress(progress);
            }

            handle
                .await
                .map_err(|e| Error::Internal(format!("blocking fetch did not finish: {}", e)))?
        }
        .boxed()
    }
}
