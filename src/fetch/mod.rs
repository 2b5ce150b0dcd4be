//! Fetch module containing the provider side of a download.
//!
//! A [`Fetcher`] writes the file behind a [`Locator`] to a destination path
//! and may report progress while doing so. The scheduler only ever talks to
//! this trait, so providers can be swapped and tests can inject fakes that
//! report on a controlled schedule.
//!
//! # Overview
//!
//! - [`http`] - [`HttpFetcher`], a plain HTTP(S) GET streamed to disk
//! - [`drive`] - [`DriveFetcher`], Google Drive share links
//! - [`ytdlp`] - [`YtDlpFetcher`], anything the `yt-dlp` program understands
//! - [`blocking`] - [`Blocking`], runs a synchronous [`BlockingFetcher`] on
//!   the blocking thread pool
//!
//! # Examples
//!
//! A fetcher that writes a fixed payload:
//!
//! ```rust
//! use futures::future::{BoxFuture, FutureExt};
//! use std::path::Path;
//! use tranche::download::{Locator, TransferProgress};
//! use tranche::fetch::{Fetcher, ProgressFn};
//!
//! struct Static(&'static [u8]);
//!
//! impl Fetcher for Static {
//!     fn fetch<'a>(
//!         &'a self,
//!         _locator: &'a Locator,
//!         destination: &'a Path,
//!         on_progress: ProgressFn<'a>,
//!     ) -> BoxFuture<'a, tranche::Result<()>> {
//!         async move {
//!             tokio::fs::write(destination, self.0).await?;
//!             on_progress(TransferProgress::new("100.0%", "N/A"));
//!             Ok(())
//!         }
//!         .boxed()
//!     }
//! }
//! ```

pub mod blocking;
pub mod drive;
pub mod http;
pub mod ytdlp;

pub use blocking::{Blocking, BlockingFetcher};
pub use drive::{file_id, DriveFetcher};
pub use http::HttpFetcher;
pub use ytdlp::YtDlpFetcher;

use crate::download::{Locator, TransferProgress};
use crate::error::Result;

use futures::future::BoxFuture;
use std::path::Path;

/// Progress callback handed to a fetcher. May be called any number of times.
pub type ProgressFn<'a> = &'a mut (dyn FnMut(TransferProgress) + Send + 'a);

/// Capability to fetch one remote file.
pub trait Fetcher: Send + Sync {
    /// Writes the complete file behind `locator` to `destination`, or fails.
    fn fetch<'a>(
        &'a self,
        locator: &'a Locator,
        destination: &'a Path,
        on_progress: ProgressFn<'a>,
    ) -> BoxFuture<'a, Result<()>>;
}
