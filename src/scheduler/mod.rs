//! Scheduler module containing the batch driver, its builder and configuration.
//!
//! - `scheduler` - [`Scheduler`], paces submissions and bounds concurrency
//! - `builder` - [`SchedulerBuilder`], flexible configuration
//! - `config` - [`SchedulerConfig`] and its defaults
//!
//! # Examples
//!
//! ```rust
//! use std::time::Duration;
//! use tranche::fetch::{DriveFetcher, HttpFetcher};
//! use tranche::scheduler::SchedulerBuilder;
//!
//! # fn example() -> tranche::Result<()> {
//! let scheduler = SchedulerBuilder::new()
//!     .workers(2)
//!     .pacing(Duration::from_secs(15))
//!     .progress_interval(Duration::from_millis(500))
//!     .build(DriveFetcher::new(HttpFetcher::with_config(Default::default())?));
//! assert_eq!(scheduler.workers(), 2);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
#[allow(clippy::module_inception)]
pub mod scheduler;

pub use builder::SchedulerBuilder;
pub use config::{RendererFactory, SchedulerConfig};
pub use scheduler::Scheduler;
