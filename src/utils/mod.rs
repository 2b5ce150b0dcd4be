//! Shared utility functions.
//!
//! - [`content_length`] - total size announced by an HTTP response

pub mod content_length;

pub use content_length::{get_content_length, parse_content_range_total};
