//! Shared progress table.
//!
//! # Examples
//!
//! ```rust
//! use tranche::download::Status;
//! use tranche::progress::{NullRenderer, ProgressStore};
//!
//! let store = ProgressStore::new(2, Box::new(NullRenderer));
//! store.update("b", Status::Pending);
//! store.update("a", Status::Completed);
//! assert!(store.is_redrawing());
//! assert_eq!(store.get("a"), Some(Status::Completed));
//! ```

use crate::download::{ProgressEntry, Status};
use crate::progress::render::{NullRenderer, RenderMode, Renderer, TableView};

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::warn;

struct Inner {
    entries: BTreeMap<String, Status>,
    redraw: bool,
    renderer: Box<dyn Renderer>,
}

/// Thread-safe `name -> status` table that redraws itself on every update.
///
/// The table, the render mode and the renderer sit behind one mutex: an update
/// and the render it triggers form a single critical section, so every frame
/// matches the table at the time of the update.
pub struct ProgressStore {
    total: usize,
    inner: Mutex<Inner>,
}

impl fmt::Debug for ProgressStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("ProgressStore")
            .field("total", &self.total)
            .field("entries", &inner.entries)
            .field("redraw", &inner.redraw)
            .finish()
    }
}

impl ProgressStore {
    /// Creates a store expecting `total` distinct entries.
    pub fn new(total: usize, renderer: Box<dyn Renderer>) -> Self {
        Self {
            total,
            inner: Mutex::new(Inner {
                entries: BTreeMap::new(),
                redraw: false,
                renderer,
            }),
        }
    }

    /// Creates a store that never draws anything.
    pub fn hidden(total: usize) -> Self {
        Self::new(total, Box::new(NullRenderer))
    }

    // A panic in a renderer must not stop other tasks from reporting.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces (or inserts) the status of `name` and renders the table.
    ///
    /// Never fails: render errors are logged and dropped.
    pub fn update(&self, name: &str, status: Status) {
        let mut guard = self.lock();
        let Inner {
            entries,
            redraw,
            renderer,
        } = &mut *guard;

        let inserted = entries.insert(name.to_string(), status).is_none();
        if inserted && *redraw {
            warn!("{} is not part of the {} line table", name, self.total);
        }

        let mode = if *redraw {
            RenderMode::Redraw
        } else if entries.len() >= self.total {
            RenderMode::Establish
        } else {
            RenderMode::Append
        };

        let view = TableView::new(entries, self.total, mode, name);
        if let Err(e) = renderer.render(&view) {
            warn!("Failed to render progress: {}", e);
        }

        if mode == RenderMode::Establish {
            *redraw = true;
        }
    }

    /// Records `Pending` for every name not in the table yet, rendering once.
    ///
    /// When the seeded table is complete the full layout is drawn and the
    /// store switches to redraw mode; an incomplete table is not drawn.
    pub fn seed<'a>(&self, names: impl IntoIterator<Item = &'a str>) {
        let mut guard = self.lock();
        let Inner {
            entries,
            redraw,
            renderer,
        } = &mut *guard;

        for name in names {
            entries
                .entry(name.to_string())
                .or_insert(Status::Pending);
        }

        if *redraw || entries.len() < self.total {
            return;
        }

        let view = TableView::new(entries, self.total, RenderMode::Establish, "");
        if let Err(e) = renderer.render(&view) {
            warn!("Failed to render progress: {}", e);
        }
        *redraw = true;
    }

    /// Get the current status of an item.
    pub fn get(&self, name: &str) -> Option<Status> {
        self.lock().entries.get(name).cloned()
    }

    /// Copy of every entry, sorted by name.
    pub fn snapshot(&self) -> Vec<ProgressEntry> {
        self.lock()
            .entries
            .iter()
            .map(|(name, status)| ProgressEntry {
                name: name.clone(),
                status: status.clone(),
            })
            .collect()
    }

    /// Number of distinct entries recorded so far.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Expected number of entries.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Whether the full layout has been drawn and renders now happen in place.
    pub fn is_redrawing(&self) -> bool {
        self.lock().redraw
    }
}
