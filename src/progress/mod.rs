//! Progress module containing the shared status table and its presentations.
//!
//! # Overview
//!
//! - `store` - [`ProgressStore`], the only state written by several tasks
//! - `render` - the [`Renderer`] trait and the terminal, log and null renderers
//! - `style` - [`LineStyle`], the layout of a table line
//!
//! # Examples
//!
//! ## Drawing into a buffer
//!
//! ```rust
//! use tranche::download::Status;
//! use tranche::progress::{LineStyle, ProgressStore, TerminalRenderer};
//!
//! let renderer = TerminalRenderer::new(std::io::sink(), LineStyle::plain());
//! let store = ProgressStore::new(2, Box::new(renderer));
//! store.update("first", Status::Pending);
//! store.update("second", Status::Pending);
//! store.update("first", Status::Completed);
//! ```
//!
//! ## Structured log lines instead of a table
//!
//! ```rust
//! use tranche::progress::{LogRenderer, ProgressStore};
//!
//! let store = ProgressStore::new(10, Box::new(LogRenderer));
//! ```

pub(crate) mod render;
pub(crate) mod store;
pub(crate) mod style;

pub use render::{LogRenderer, NullRenderer, RenderMode, Renderer, TableView, TerminalRenderer};
pub use store::ProgressStore;
pub use console::Alignment;
pub use style::LineStyle;
