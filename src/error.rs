//! Error handling for tranche.
//!
//! Per-item errors ([`Error::InvalidLocator`], [`Error::Fetch`] and the wrapped
//! I/O and HTTP failures) never leave a download task: they are turned into a
//! `Failed` status for that item. Only [`Error::Cancelled`] and the batch-level
//! variants reach the caller of [`Scheduler::run`](crate::Scheduler::run).

use std::io;
use thiserror::Error;

/// Errors that can happen when using tranche.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from an underlying system.
    ///
    /// Captures failures that don't fit into other categories, such as a
    /// worker pool that was shut down underneath a pending task.
    #[error("Internal error: {0}")]
    Internal(String),

    /// The resource identifier could not be derived from a locator.
    ///
    /// Returned instead of guessing when the locator lacks the component a
    /// provider expects (for example the file id of a Google Drive link).
    #[error("Invalid locator: {0}")]
    InvalidLocator(String),

    /// The provider failed to deliver the file.
    #[error("{0}")]
    Fetch(String),

    /// Two items of the same batch share a name.
    ///
    /// Names key the progress table and the output files, so they must be
    /// unique. Detected before anything is submitted.
    #[error("Duplicate item name: {0}")]
    DuplicateItem(String),

    /// The batch was interrupted before every item was submitted and finished.
    #[error("Download cancelled")]
    Cancelled,

    /// I/O Error.
    ///
    /// Wraps standard I/O errors that can occur while creating or writing the
    /// destination file.
    #[error("I/O error: {source}")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// Error from the Reqwest library.
    #[error("HTTP error: {source}")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },

    /// Error from the HTTP middleware stack.
    #[error("HTTP error: {source}")]
    Middleware {
        #[from]
        source: reqwest_middleware::Error,
    },
}

/// Result type alias for operations that can fail with a tranche error.
pub type Result<T> = std::result::Result<T, Error>;
