#![allow(dead_code)]

use futures::future::{BoxFuture, FutureExt};
use std::collections::{HashMap, HashSet};
use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::{sleep, Instant};
use tranche::download::{Item, Locator, Status, TransferProgress};
use tranche::fetch::{Fetcher, ProgressFn};
use tranche::progress::{LineStyle, RenderMode, Renderer, TableView, TerminalRenderer};
use tranche::{Error, Result};

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Items named `item-0`, `item-1`, ... with locator `loc-<i>`.
pub fn create_items(count: usize) -> Vec<Item> {
    (0..count)
        .map(|i| Item::new(format!("item-{}", i), format!("loc-{}", i)))
        .collect()
}

/// In-memory writer shared between a renderer and the test.
#[derive(Clone, Default)]
pub struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Uncoloured terminal renderer without line padding, writing into `buf`.
pub fn plain_terminal(buf: &SharedBuf) -> TerminalRenderer {
    TerminalRenderer::new(buf.clone(), LineStyle::plain().with_min_width(0))
}

/// One render call as seen by [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub mode: RenderMode,
    pub changed: Option<(String, Status)>,
    pub lines: usize,
}

/// Renderer that keeps every frame it is asked to draw.
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    pub frames: Arc<Mutex<Vec<Frame>>>,
}

impl RecordingRenderer {
    pub fn frames(&self) -> Vec<Frame> {
        self.frames.lock().unwrap().clone()
    }

    /// Statuses rendered for `name`, in order.
    pub fn statuses_of(&self, name: &str) -> Vec<Status> {
        self.frames()
            .into_iter()
            .filter_map(|frame| frame.changed)
            .filter(|(changed, _)| changed == name)
            .map(|(_, status)| status)
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, view: &TableView<'_>) -> io::Result<()> {
        self.frames.lock().unwrap().push(Frame {
            mode: view.mode(),
            changed: view
                .changed()
                .map(|(name, status)| (name.to_string(), status.clone())),
            lines: view.entries().count(),
        });
        Ok(())
    }
}

/// Fetcher whose behaviour is scripted per locator.
///
/// Every fetch waits `delay`, reports 50% halfway and then succeeds, unless
/// the locator is listed in `failures` or `panics`. Start times and the
/// number of concurrently running fetches are recorded.
#[derive(Default)]
pub struct FakeFetcher {
    pub delay: Duration,
    pub failures: HashMap<String, String>,
    pub panics: HashSet<String>,
    pub active: AtomicUsize,
    pub max_active: AtomicUsize,
    pub starts: Mutex<Vec<(String, Instant)>>,
}

impl FakeFetcher {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            ..Default::default()
        }
    }

    pub fn failing(mut self, locator: &str, message: &str) -> Self {
        self.failures.insert(locator.to_string(), message.to_string());
        self
    }

    pub fn panicking(mut self, locator: &str) -> Self {
        self.panics.insert(locator.to_string());
        self
    }

    pub fn max_active(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }

    pub fn starts(&self) -> Vec<(String, Instant)> {
        self.starts.lock().unwrap().clone()
    }
}

impl Fetcher for FakeFetcher {
    fn fetch<'a>(
        &'a self,
        locator: &'a Locator,
        _destination: &'a Path,
        on_progress: ProgressFn<'a>,
    ) -> BoxFuture<'a, Result<()>> {
        async move {
            self.starts
                .lock()
                .unwrap()
                .push((locator.to_string(), Instant::now()));
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_active.fetch_max(now, Ordering::SeqCst);

            sleep(self.delay / 2).await;
            on_progress(TransferProgress::new(" 50.0%", "1.00 MiB/s"));
            sleep(self.delay / 2).await;

            self.active.fetch_sub(1, Ordering::SeqCst);

            if self.panics.contains(locator.as_str()) {
                panic!("fetcher exploded on {}", locator);
            }
            match self.failures.get(locator.as_str()) {
                Some(message) => Err(Error::Fetch(message.clone())),
                None => Ok(()),
            }
        }
        .boxed()
    }
}

/// Reports progress every 10ms for two seconds, then succeeds.
pub struct ChattyFetcher;

impl Fetcher for ChattyFetcher {
    fn fetch<'a>(
        &'a self,
        _locator: &'a Locator,
        _destination: &'a Path,
        on_progress: ProgressFn<'a>,
    ) -> BoxFuture<'a, Result<()>> {
        async move {
            for step in 1..=200u32 {
                sleep(Duration::from_millis(10)).await;
                on_progress(TransferProgress::new(
                    format!("{:>5.1}%", step as f64 / 2.0),
                    "1.00 MiB/s",
                ));
            }
            Ok(())
        }
        .boxed()
    }
}

/// Sets its flag when dropped.
pub struct DropFlag(pub Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// Never finishes; records when its in-flight future is dropped.
#[derive(Default)]
pub struct StuckFetcher {
    pub started: AtomicUsize,
    pub dropped: Arc<AtomicBool>,
}

impl Fetcher for StuckFetcher {
    fn fetch<'a>(
        &'a self,
        _locator: &'a Locator,
        _destination: &'a Path,
        _on_progress: ProgressFn<'a>,
    ) -> BoxFuture<'a, Result<()>> {
        let guard = DropFlag(Arc::clone(&self.dropped));
        self.started.fetch_add(1, Ordering::SeqCst);
        async move {
            let _guard = guard;
            futures::future::pending::<()>().await;
            Ok(())
        }
        .boxed()
    }
}

/// Blocks every fetch until the test releases it through `gate`.
pub struct GatedFetcher {
    pub gate: tokio::sync::Semaphore,
    pub started: AtomicUsize,
    pub active: AtomicUsize,
    pub max_active: AtomicUsize,
}

impl Default for GatedFetcher {
    fn default() -> Self {
        Self {
            gate: tokio::sync::Semaphore::new(0),
            started: AtomicUsize::new(0),
            active: AtomicUsize::new(0),
            max_active: AtomicUsize::new(0),
        }
    }
}

impl GatedFetcher {
    /// Lets `count` blocked or future fetches finish.
    pub fn release(&self, count: usize) {
        self.gate.add_permits(count);
    }

    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }
}

impl Fetcher for GatedFetcher {
    fn fetch<'a>(
        &'a self,
        _locator: &'a Locator,
        _destination: &'a Path,
        _on_progress: ProgressFn<'a>,
    ) -> BoxFuture<'a, Result<()>> {
        async move {
            self.started.fetch_add(1, Ordering::SeqCst);
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_active.fetch_max(now, Ordering::SeqCst);

            let permit = self
                .gate
                .acquire()
                .await
                .map_err(|e| Error::Internal(e.to_string()))?;
            permit.forget();

            self.active.fetch_sub(1, Ordering::SeqCst);
            Ok(())
        }
        .boxed()
    }
}
