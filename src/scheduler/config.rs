//! Configuration structures and defaults for the scheduler.
//!
//! # Examples
//!
//! ```rust
//! use std::time::Duration;
//! use tranche::scheduler::SchedulerConfig;
//!
//! let config = SchedulerConfig::default();
//! assert_eq!(config.workers, 2);
//! assert_eq!(config.pacing, Duration::from_secs(10));
//! assert_eq!(config.progress_interval, Duration::from_millis(500));
//! ```

use crate::progress::{Renderer, TerminalRenderer};

use std::env::current_dir;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Creates the renderer of a batch. Called once per run.
pub type RendererFactory = Arc<dyn Fn() -> Box<dyn Renderer> + Send + Sync>;

/// Configuration structure for the scheduler.
#[derive(Clone)]
pub struct SchedulerConfig {
    /// Directory where to store the downloaded files.
    pub directory: PathBuf,
    /// Extension of the output files, without the dot.
    pub extension: String,
    /// Number of downloads running at once.
    pub workers: usize,
    /// Pause before each submission.
    pub pacing: Duration,
    /// Minimum spacing between two forwarded progress updates of an item.
    pub progress_interval: Duration,
    /// Presentation of the progress table.
    pub renderer: RendererFactory,
}

impl std::fmt::Debug for SchedulerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchedulerConfig")
            .field("directory", &self.directory)
            .field("extension", &self.extension)
            .field("workers", &self.workers)
            .field("pacing", &self.pacing)
            .field("progress_interval", &self.progress_interval)
            .finish_non_exhaustive()
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            directory: current_dir().unwrap_or_default(),
            extension: "mp4".to_string(),
            workers: 2,
            pacing: Duration::from_secs(10),
            progress_interval: Duration::from_millis(500),
            renderer: Arc::new(|| Box::new(TerminalRenderer::stdout())),
        }
    }
}
