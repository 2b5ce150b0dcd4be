//! Line layout options for the progress table.
//!
//! # Examples
//!
//! ```rust
//! use tranche::download::Status;
//! use tranche::progress::LineStyle;
//!
//! let style = LineStyle::plain().with_min_width(20);
//! let line = style.format_line("clip", 6, &Status::Completed);
//! assert_eq!(line, "  clip: Completed   ");
//! ```

use crate::download::Status;
use console::{pad_str, style, Alignment};

/// Define how a table line is laid out.
///
/// Every line is padded to `min_width` columns so that a shorter status
/// fully overwrites a longer one during a redraw.
#[derive(Debug, Clone)]
pub struct LineStyle {
    /// Minimum visible width of a line.
    pub(crate) min_width: usize,
    /// How names are aligned inside the name column.
    pub(crate) name_alignment: Alignment,
    /// Colour terminal statuses.
    pub(crate) colors: bool,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            min_width: LineStyle::DEFAULT_MIN_WIDTH,
            name_alignment: Alignment::Right,
            colors: true,
        }
    }
}

impl LineStyle {
    /// Width used unless configured otherwise.
    pub const DEFAULT_MIN_WIDTH: usize = 50;

    /// Create a new [`LineStyle`].
    pub fn new(min_width: usize, name_alignment: Alignment, colors: bool) -> Self {
        Self {
            min_width,
            name_alignment,
            colors,
        }
    }

    /// Default layout without colours.
    pub fn plain() -> Self {
        Self {
            colors: false,
            ..LineStyle::default()
        }
    }

    pub fn with_min_width(mut self, min_width: usize) -> Self {
        self.min_width = min_width;
        self
    }

    pub fn with_name_alignment(mut self, name_alignment: Alignment) -> Self {
        self.name_alignment = name_alignment;
        self
    }

    /// Get the minimum line width.
    pub fn min_width(&self) -> usize {
        self.min_width
    }

    /// Render one `<name>: <status>` line.
    ///
    /// `name_width` is the width of the name column, usually the longest
    /// name in the table.
    pub fn format_line(&self, name: &str, name_width: usize, status: &Status) -> String {
        let name = single_line(name);
        let name = pad_str(&name, name_width, self.name_alignment, None);
        let line = format!("{}: {}", name, self.paint(status));
        pad_str(&line, self.min_width, Alignment::Left, None).into_owned()
    }

    fn paint(&self, status: &Status) -> String {
        let text = single_line(&status.to_string());
        if !self.colors {
            return text;
        }
        match status {
            Status::Completed => style(text).green().to_string(),
            Status::Failed(_) => style(text).red().to_string(),
            Status::Pending => style(text).dim().to_string(),
            Status::InProgress { .. } => text,
        }
    }
}

// A line break inside a line would shift every later redraw.
fn single_line(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}
