//! Presentations of the progress table.
//!
//! A [`Renderer`] is called by [`ProgressStore`](super::ProgressStore) after
//! every update, while the store's lock is held, with a [`TableView`] of the
//! whole table. [`TerminalRenderer`] draws the table in place on a terminal,
//! [`LogRenderer`] turns each update into a tracing event and
//! [`NullRenderer`] draws nothing.

use crate::download::Status;
use crate::progress::LineStyle;

use console::{measure_text_width, Term};
use std::collections::BTreeMap;
use std::io::{self, Write};
use tracing::info;

/// Which part of the layout a render call has to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// The table is still incomplete; emit the changed entry as a new line.
    Append,
    /// The table just reached its full size; emit every line once.
    Establish,
    /// The layout exists; overwrite the last `total` lines in place.
    Redraw,
}

/// Read-only view of the progress table handed to a renderer.
#[derive(Debug)]
pub struct TableView<'a> {
    entries: &'a BTreeMap<String, Status>,
    total: usize,
    mode: RenderMode,
    changed: &'a str,
}

impl<'a> TableView<'a> {
    pub fn new(
        entries: &'a BTreeMap<String, Status>,
        total: usize,
        mode: RenderMode,
        changed: &'a str,
    ) -> Self {
        Self {
            entries,
            total,
            mode,
            changed,
        }
    }

    /// Entries sorted by name.
    pub fn entries(&self) -> impl Iterator<Item = (&'a str, &'a Status)> + 'a {
        self.entries.iter().map(|(name, status)| (name.as_str(), status))
    }

    /// Expected number of lines of the full table.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// The entry whose update triggered this render.
    pub fn changed(&self) -> Option<(&'a str, &'a Status)> {
        self.entries
            .get_key_value(self.changed)
            .map(|(name, status)| (name.as_str(), status))
    }

    /// Width of the longest name in the table.
    pub fn name_width(&self) -> usize {
        self.entries
            .keys()
            .map(|name| measure_text_width(name))
            .max()
            .unwrap_or(0)
    }
}

/// Something that can present the progress table.
pub trait Renderer: Send {
    /// Present the table. Errors are logged by the store and otherwise ignored.
    fn render(&mut self, view: &TableView<'_>) -> io::Result<()>;
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&mut self, view: &TableView<'_>) -> io::Result<()> {
        (**self).render(view)
    }
}

/// Draws the table as a block of lines, redrawn in place with cursor-up
/// escape sequences once all items are known.
pub struct TerminalRenderer {
    out: Box<dyn Write + Send>,
    style: LineStyle,
}

impl TerminalRenderer {
    /// Create a renderer writing to any sink.
    pub fn new(out: impl Write + Send + 'static, style: LineStyle) -> Self {
        Self {
            out: Box::new(out),
            style,
        }
    }

    /// Renderer on standard output, coloured when it is a terminal.
    pub fn stdout() -> Self {
        let term = Term::stdout();
        let style = if term.is_term() {
            LineStyle::default()
        } else {
            LineStyle::plain()
        };
        Self::new(term, style)
    }

    fn write_line(&mut self, prefix: &str, line: &str) -> io::Result<()> {
        writeln!(self.out, "{}{}", prefix, line)
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, view: &TableView<'_>) -> io::Result<()> {
        let width = view.name_width();
        match view.mode() {
            RenderMode::Append => {
                if let Some((name, status)) = view.changed() {
                    let line = self.style.format_line(name, width, status);
                    self.write_line("", &line)?;
                }
            }
            RenderMode::Establish => {
                for (name, status) in view.entries().take(view.total()) {
                    let line = self.style.format_line(name, width, status);
                    self.write_line("", &line)?;
                }
            }
            RenderMode::Redraw => {
                if view.total() > 0 {
                    write!(self.out, "\x1b[{}A", view.total())?;
                }
                for (name, status) in view.entries().take(view.total()) {
                    let line = self.style.format_line(name, width, status);
                    self.write_line("\r", &line)?;
                }
            }
        }
        self.out.flush()
    }
}

/// Emits one `info` event per update instead of drawing a table.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogRenderer;

impl Renderer for LogRenderer {
    fn render(&mut self, view: &TableView<'_>) -> io::Result<()> {
        if let Some((name, status)) = view.changed() {
            info!(item = name, status = %status, "progress");
        }
        Ok(())
    }
}

/// Draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _view: &TableView<'_>) -> io::Result<()> {
        Ok(())
    }
}
