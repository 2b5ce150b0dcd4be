//! Download module containing the items of a batch and their lifecycle.
//!
//! # Overview
//!
//! - [`item`] - [`Item`] and [`Locator`], the immutable input of a batch
//! - [`status`] - [`Status`] values shown in the table, and the
//!   [`TransferProgress`] events fetchers emit
//! - [`task`] - [`DownloadTask`], one item's fetch bound to the progress table
//! - [`summary`] - [`BatchSummary`], the outcome of a run
//!
//! # Examples
//!
//! ```rust
//! use tranche::download::{Item, Status};
//!
//! let items: Vec<Item> = vec![
//!     ("intro", "https://example.com/intro.mp4").into(),
//!     ("outro", "https://example.com/outro.mp4").into(),
//! ];
//! assert_eq!(items.len(), 2);
//! assert_eq!(Status::Failed("timeout".into()).to_string(), "Failed: timeout");
//! ```

pub mod item;
pub mod status;
pub mod summary;
pub mod task;

pub use item::{Item, Locator};
pub use status::{ProgressEntry, Status, TransferProgress};
pub use summary::BatchSummary;
pub use task::{DownloadTask, Throttle};
